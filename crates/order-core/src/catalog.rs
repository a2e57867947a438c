//! Product catalog and enumerated option lists.
//!
//! The catalog is immutable configuration: one static instance is built into
//! the binary and shared by reference everywhere a lookup is needed.

/// How a product's quantity is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUnit {
    /// Continuous weight in kilograms; any positive number is a valid quantity.
    Kilograms,
    /// Discrete units (bags, cubes, cartons); quantity must be a positive integer.
    Discrete(&'static str),
}

impl QuantityUnit {
    /// Unit label appended to bare numeric quantities ("50" -> "50 cubes").
    pub fn label(&self) -> &'static str {
        match self {
            QuantityUnit::Kilograms => "kg",
            QuantityUnit::Discrete(name) => name,
        }
    }

    /// Whether quantities in this unit must be whole numbers.
    pub fn is_discrete(&self) -> bool {
        matches!(self, QuantityUnit::Discrete(_))
    }
}

/// A catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct Product {
    /// Stable identifier used in query parameters and lookups.
    pub id: &'static str,
    /// Display name shown to buyers and written into order records.
    pub name: &'static str,
    /// Short export-facing description.
    pub description: &'static str,
    /// HS code(s) for customs paperwork.
    pub hs_code: &'static str,
    /// Quantity unit for this product.
    pub unit: QuantityUnit,
    /// Packaging choices offered for this product; empty means packaging
    /// stays unset for orders of this product.
    pub packaging_options: &'static [&'static str],
    /// Lowercase keywords used to resolve free-text product mentions.
    keywords: &'static [&'static str],
}

impl Product {
    /// Whether this product offers a packaging choice at all.
    pub fn has_packaging(&self) -> bool {
        !self.packaging_options.is_empty()
    }
}

/// The product catalog plus the enumerated option lists that go with it.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    products: &'static [Product],
    incoterms: &'static [&'static str],
    countries: &'static [&'static str],
}

static PRODUCTS: &[Product] = &[
    Product {
        id: "chili",
        name: "Premium Chili (Hot Dragon F1 / Scotch Bonnet)",
        description: "Export-quality chilies grown in semi-protected polytunnels. Fresh or dried.",
        hs_code: "070960 (fresh) / 090420 (dried)",
        unit: QuantityUnit::Kilograms,
        packaging_options: &[
            "5kg export carton (Fresh)",
            "10kg export carton (Fresh)",
            "25kg export carton (Fresh)",
            "5kg export carton (Dried)",
            "10kg export carton (Dried)",
            "25kg export carton (Dried)",
        ],
        keywords: &["chili", "chilli", "hot dragon", "scotch bonnet"],
    },
    Product {
        id: "worm-compost",
        name: "Organic Worm Compost",
        description: "100% organic, microbial-rich vermicompost.",
        hs_code: "310100",
        unit: QuantityUnit::Discrete("bags"),
        packaging_options: &["5kg bags", "25kg bags"],
        keywords: &["compost", "vermicompost", "worm"],
    },
    Product {
        id: "cocopeat",
        name: "Premium Cocopeat (cube)",
        description: "High water retention & aeration growing medium. Washed or unwashed cubes.",
        hs_code: "530500",
        unit: QuantityUnit::Discrete("cubes"),
        packaging_options: &[
            "5kg blocks (Washed)",
            "25kg blocks (Washed)",
            "5kg blocks (Unwashed)",
            "25kg blocks (Unwashed)",
        ],
        keywords: &["cocopeat", "coco peat", "coir"],
    },
];

/// Delivery terms accepted on an order, in canonical uppercase form.
static INCOTERMS: &[&str] = &["EXW", "FCA", "FOB", "CFR", "CIF", "DAP", "DDP"];

/// Destination countries accepted by the strict intake profile.
static COUNTRIES: &[&str] = &[
    "Australia",
    "Bahrain",
    "Canada",
    "France",
    "Germany",
    "India",
    "Japan",
    "Kuwait",
    "Maldives",
    "Netherlands",
    "Oman",
    "Qatar",
    "Saudi Arabia",
    "Singapore",
    "South Korea",
    "United Arab Emirates",
    "United Kingdom",
    "United States",
];

static BUILTIN: Catalog = Catalog {
    products: PRODUCTS,
    incoterms: INCOTERMS,
    countries: COUNTRIES,
};

impl Catalog {
    /// The built-in catalog.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// All products, in display order.
    pub fn products(&self) -> &[Product] {
        self.products
    }

    /// Canonical incoterm set.
    pub fn incoterms(&self) -> &[&'static str] {
        self.incoterms
    }

    /// Allowed destination countries for enumerated-destination profiles.
    pub fn countries(&self) -> &[&'static str] {
        self.countries
    }

    /// Look up a product by its stable identifier.
    pub fn by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Resolve free text (a display name, an id, or a mention like
    /// "200 kg chili") to a catalog entry.
    ///
    /// Matching is case-insensitive keyword containment, so both the exact
    /// display name and loose chat phrasing resolve. Returns `None` for
    /// anything unrecognized.
    pub fn resolve(&self, input: &str) -> Option<&Product> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        if let Some(product) = self.products.iter().find(|p| p.id == needle) {
            return Some(product);
        }

        self.products.iter().find(|p| {
            needle == p.name.to_lowercase()
                || p.keywords.iter().any(|k| needle.contains(k))
        })
    }

    /// Whether a destination belongs to the allowed country list.
    pub fn is_allowed_country(&self, destination: &str) -> bool {
        let needle = destination.trim();
        self.countries.iter().any(|c| c.eq_ignore_ascii_case(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.resolve("cocopeat").unwrap().id, "cocopeat");
    }

    #[test]
    fn test_resolve_by_display_name() {
        let catalog = Catalog::builtin();
        let product = catalog.resolve("Premium Cocopeat (cube)").unwrap();
        assert_eq!(product.id, "cocopeat");
        assert!(product.unit.is_discrete());
    }

    #[test]
    fn test_resolve_loose_mention() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.resolve("I need hot dragon chili").unwrap().id, "chili");
        assert_eq!(catalog.resolve("WORM COMPOST").unwrap().id, "worm-compost");
    }

    #[test]
    fn test_resolve_unknown() {
        let catalog = Catalog::builtin();
        assert!(catalog.resolve("bananas").is_none());
        assert!(catalog.resolve("").is_none());
    }

    #[test]
    fn test_units() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.by_id("chili").unwrap().unit.label(), "kg");
        assert_eq!(catalog.by_id("cocopeat").unwrap().unit.label(), "cubes");
        assert!(!catalog.by_id("chili").unwrap().unit.is_discrete());
    }

    #[test]
    fn test_allowed_country_case_insensitive() {
        let catalog = Catalog::builtin();
        assert!(catalog.is_allowed_country("india"));
        assert!(catalog.is_allowed_country(" United Arab Emirates "));
        assert!(!catalog.is_allowed_country("Atlantis"));
    }

    #[test]
    fn test_incoterm_set() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.incoterms().len(), 7);
        assert!(catalog.incoterms().contains(&"FOB"));
    }
}
