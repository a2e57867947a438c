//! Submission rules for order records.
//!
//! Rules are evaluated independently and all errors are collected, so the
//! caller can surface every problem at once instead of one per attempt.
//! Same input always yields the same error set.

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::normalize::parse_quantity;
use crate::order::{Field, OrderRequest};
use crate::profile::IntakeProfile;

/// Check a candidate record against the catalog and the active profile.
///
/// Returns a map from field to human-readable error; an empty map means the
/// record is submittable.
pub fn validate(
    record: &OrderRequest,
    catalog: &Catalog,
    profile: &IntakeProfile,
) -> BTreeMap<Field, String> {
    let mut errors = BTreeMap::new();

    let product = catalog.resolve(&record.product);

    if record.product.trim().is_empty() {
        errors.insert(Field::Product, "enter a product".to_string());
    } else if profile.product_catalog_only && product.is_none() {
        errors.insert(Field::Product, "choose a product from the catalog".to_string());
    }

    if record.quantity.trim().is_empty() {
        errors.insert(Field::Quantity, "enter a quantity".to_string());
    } else {
        let discrete = product.map(|p| p.unit.is_discrete()).unwrap_or(false);
        match parse_quantity(&record.quantity) {
            Some(qty) if discrete => {
                if qty.value <= 0.0 || qty.value.fract() != 0.0 {
                    errors.insert(Field::Quantity, "must be a positive integer".to_string());
                }
            }
            Some(qty) => {
                if qty.value <= 0.0 {
                    errors.insert(Field::Quantity, "must be a positive number".to_string());
                }
            }
            None if discrete => {
                errors.insert(Field::Quantity, "must be a positive integer".to_string());
            }
            None => {
                errors.insert(Field::Quantity, "must be a positive number".to_string());
            }
        }
    }

    if let (Some(product), Some(packaging)) = (product, record.packaging.as_deref()) {
        if !packaging.trim().is_empty() && !product.has_packaging() {
            errors.insert(
                Field::Packaging,
                "packaging is not offered for this product".to_string(),
            );
        }
    }

    if record.destination.trim().is_empty() {
        errors.insert(Field::Destination, "enter a destination country".to_string());
    } else if profile.destination_enumerated && !catalog.is_allowed_country(&record.destination) {
        errors.insert(
            Field::Destination,
            "choose a country we currently export to".to_string(),
        );
    }

    if record.buyer_name.trim().is_empty() {
        errors.insert(Field::BuyerName, "enter your name".to_string());
    }

    if record.email.trim().is_empty() {
        errors.insert(Field::Email, "enter an email address".to_string());
    } else if !email_shape_ok(&record.email) {
        errors.insert(Field::Email, "enter a valid email address".to_string());
    }

    if profile.phone_required && record.phone.as_deref().map_or(true, |p| p.trim().is_empty()) {
        errors.insert(Field::Phone, "enter a phone number".to_string());
    }

    errors
}

/// Basic `local@domain.tld` shape check.
fn email_shape_ok(email: &str) -> bool {
    let email = email.trim();
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };

    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::FieldUpdate;

    fn complete_record() -> OrderRequest {
        OrderRequest::default().apply(&FieldUpdate {
            product: Some("Premium Cocopeat (cube)".to_string()),
            quantity: Some("50".to_string()),
            destination: Some("India".to_string()),
            buyer_name: Some("A. Perera".to_string()),
            email: Some("a@x.com".to_string()),
            phone: Some("+94775112541".to_string()),
            ..FieldUpdate::default()
        })
    }

    #[test]
    fn test_complete_record_is_submittable() {
        let errors = validate(
            &complete_record(),
            Catalog::builtin(),
            IntakeProfile::relaxed(),
        );
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_every_missing_required_field_is_flagged() {
        let errors = validate(
            &OrderRequest::default(),
            Catalog::builtin(),
            IntakeProfile::relaxed(),
        );

        for field in [
            Field::Product,
            Field::Quantity,
            Field::Destination,
            Field::BuyerName,
            Field::Email,
        ] {
            assert!(errors.contains_key(&field), "missing error for {field:?}");
        }
        // Phone optional in the relaxed profile.
        assert!(!errors.contains_key(&Field::Phone));
    }

    #[test]
    fn test_discrete_unit_requires_positive_integer() {
        for bad in ["3.5", "-2", "0", "abc"] {
            let mut record = complete_record();
            record.quantity = bad.to_string();
            let errors = validate(&record, Catalog::builtin(), IntakeProfile::relaxed());
            assert_eq!(
                errors.get(&Field::Quantity).map(String::as_str),
                Some("must be a positive integer"),
                "quantity {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_continuous_unit_accepts_fractional_quantity() {
        let mut record = complete_record();
        record.product = "Premium Chili (Hot Dragon F1 / Scotch Bonnet)".to_string();
        record.quantity = "2.5".to_string();
        let errors = validate(&record, Catalog::builtin(), IntakeProfile::relaxed());
        assert!(!errors.contains_key(&Field::Quantity));
    }

    #[test]
    fn test_quantity_with_unit_text_is_accepted() {
        let mut record = complete_record();
        record.quantity = "50 cubes".to_string();
        let errors = validate(&record, Catalog::builtin(), IntakeProfile::relaxed());
        assert!(!errors.contains_key(&Field::Quantity));
    }

    #[test]
    fn test_email_shape() {
        for bad in ["nope", "a@b", "@x.com", "a@.com", "a@x..com", "a@b@c.com"] {
            let mut record = complete_record();
            record.email = bad.to_string();
            let errors = validate(&record, Catalog::builtin(), IntakeProfile::relaxed());
            assert!(errors.contains_key(&Field::Email), "email {bad:?} accepted");
        }
    }

    #[test]
    fn test_strict_profile_requires_phone_and_known_country() {
        let mut record = complete_record();
        record.phone = None;
        record.destination = "Atlantis".to_string();

        let errors = validate(&record, Catalog::builtin(), IntakeProfile::strict());
        assert!(errors.contains_key(&Field::Phone));
        assert!(errors.contains_key(&Field::Destination));

        // The same record passes under the relaxed profile.
        let errors = validate(&record, Catalog::builtin(), IntakeProfile::relaxed());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_strict_profile_rejects_free_text_product() {
        let mut record = complete_record();
        record.product = "Mystery produce".to_string();
        record.phone = Some("+94775112541".to_string());
        record.destination = "India".to_string();

        let errors = validate(&record, Catalog::builtin(), IntakeProfile::strict());
        assert!(errors.contains_key(&Field::Product));

        let errors = validate(&record, Catalog::builtin(), IntakeProfile::relaxed());
        assert!(!errors.contains_key(&Field::Product));
    }

    #[test]
    fn test_deterministic() {
        let record = OrderRequest::default();
        let a = validate(&record, Catalog::builtin(), IntakeProfile::relaxed());
        let b = validate(&record, Catalog::builtin(), IntakeProfile::relaxed());
        assert_eq!(a, b);
    }
}
