//! Catalog and option-list routes.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use order_core::Catalog;

use crate::state::AppState;

/// One product as presented to the intake form.
#[derive(Serialize)]
pub struct ProductInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub hs_code: String,
    /// Quantity unit label ("kg", "bags", "cubes").
    pub unit: String,
    /// Whether quantities must be whole numbers.
    pub discrete: bool,
    pub packaging_options: Vec<String>,
}

/// Catalog response: products plus the option lists the active profile uses.
#[derive(Serialize)]
pub struct CatalogResponse {
    pub profile: String,
    pub products: Vec<ProductInfo>,
    pub incoterms: Vec<String>,
    /// Present only when the profile enumerates destinations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<Vec<String>>,
}

/// Get the product catalog and option lists as JSON.
pub async fn catalog_api(State(state): State<AppState>) -> Json<CatalogResponse> {
    let catalog = Catalog::builtin();

    let products = catalog
        .products()
        .iter()
        .map(|p| ProductInfo {
            id: p.id.to_string(),
            name: p.name.to_string(),
            description: p.description.to_string(),
            hs_code: p.hs_code.to_string(),
            unit: p.unit.label().to_string(),
            discrete: p.unit.is_discrete(),
            packaging_options: p.packaging_options.iter().map(|o| o.to_string()).collect(),
        })
        .collect();

    let countries = state
        .profile
        .destination_enumerated
        .then(|| catalog.countries().iter().map(|c| c.to_string()).collect());

    Json(CatalogResponse {
        profile: state.profile.name.to_string(),
        products,
        incoterms: catalog.incoterms().iter().map(|t| t.to_string()).collect(),
        countries,
    })
}
