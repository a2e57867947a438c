//! Named intake profiles.
//!
//! The two observed intake flows disagree on which fields are mandatory and
//! which option lists are closed. Those policies live here as data so a
//! deployment selects a profile instead of forking the validation logic.

use thiserror::Error;

/// Configuration toggles for one intake flow variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakeProfile {
    /// Profile name used in configuration.
    pub name: &'static str,
    /// Whether a phone number is mandatory at submission.
    pub phone_required: bool,
    /// Whether the destination must belong to the catalog's country list.
    pub destination_enumerated: bool,
    /// Whether the product must resolve to a catalog entry (as opposed to
    /// accepting free text).
    pub product_catalog_only: bool,
    /// Whether incoterms and target delivery date are offered as fields.
    pub offer_trade_terms: bool,
}

static RELAXED: IntakeProfile = IntakeProfile {
    name: "relaxed",
    phone_required: false,
    destination_enumerated: false,
    product_catalog_only: false,
    offer_trade_terms: true,
};

static STRICT: IntakeProfile = IntakeProfile {
    name: "strict",
    phone_required: true,
    destination_enumerated: true,
    product_catalog_only: true,
    offer_trade_terms: false,
};

/// Error returned when a configured profile name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown intake profile: {0} (expected \"relaxed\" or \"strict\")")]
pub struct UnknownProfile(pub String);

impl IntakeProfile {
    /// The default profile: free-text destination, optional phone, full
    /// trade-terms field group.
    pub fn relaxed() -> &'static IntakeProfile {
        &RELAXED
    }

    /// The strict profile: catalog-only products, enumerated destination
    /// countries, mandatory phone, simplified field group.
    pub fn strict() -> &'static IntakeProfile {
        &STRICT
    }

    /// Look up a profile by its configured name.
    pub fn by_name(name: &str) -> Result<&'static IntakeProfile, UnknownProfile> {
        match name.trim().to_lowercase().as_str() {
            "relaxed" => Ok(&RELAXED),
            "strict" => Ok(&STRICT),
            other => Err(UnknownProfile(other.to_string())),
        }
    }
}
