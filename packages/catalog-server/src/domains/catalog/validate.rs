//! Listing draft validation.
//!
//! One pass over the draft collects every violated constraint; callers get
//! the full list in a single `ValidationError` so batch tooling (and form
//! UIs) can report completely instead of stopping at the first failure.
//! Field names in violations use the wire names (`metrics.dr.value`,
//! `type.months`, ...).

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::common::errors::FieldViolation;
use crate::domains::catalog::models::ListingDraft;

const MAX_COUNTRY_TRAFFIC_ENTRIES: usize = 5;

/// Validate a draft against the listing schema.
///
/// `known_categories` is the current set of category names; the draft must
/// reference one of them. Domain uniqueness is a store concern (it needs
/// the full record set) and is checked there, not here.
pub fn validate_draft(
    draft: &ListingDraft,
    known_categories: &BTreeSet<String>,
) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if draft.price < Decimal::ZERO {
        violations.push(FieldViolation::new("price", "must be non-negative"));
    }

    if let Some(offer_rate) = draft.offer_rate {
        if offer_rate < Decimal::ZERO || offer_rate > Decimal::from(100) {
            violations.push(FieldViolation::new(
                "offerRate",
                "must be between 0 and 100",
            ));
        }
    }

    if draft.website.domain.trim().is_empty() {
        violations.push(FieldViolation::new("website.domain", "must not be empty"));
    }

    if !draft.terms.permanent {
        match draft.terms.months {
            None => violations.push(FieldViolation::new(
                "type.months",
                "required for non-permanent placements",
            )),
            Some(0) => violations.push(FieldViolation::new(
                "type.months",
                "must be greater than zero",
            )),
            Some(_) => {}
        }
    }

    if draft.language.primary.trim().is_empty() {
        violations.push(FieldViolation::new("language.primary", "must not be empty"));
    }
    if draft.language.native.trim().is_empty() {
        violations.push(FieldViolation::new("language.native", "must not be empty"));
    }

    if draft.category.trim().is_empty() {
        violations.push(FieldViolation::new("category", "must not be empty"));
    } else if !known_categories.contains(&draft.category) {
        violations.push(FieldViolation::new(
            "category",
            format!("unknown category: {}", draft.category),
        ));
    }

    if draft.metrics.dr.value > 100 {
        violations.push(FieldViolation::new(
            "metrics.dr.value",
            "must be between 0 and 100",
        ));
    }
    if draft.metrics.da > 100 {
        violations.push(FieldViolation::new(
            "metrics.da",
            "must be between 0 and 100",
        ));
    }

    if draft.metrics.country_traffic.len() > MAX_COUNTRY_TRAFFIC_ENTRIES {
        violations.push(FieldViolation::new(
            "metrics.countryTraffic",
            format!("at most {MAX_COUNTRY_TRAFFIC_ENTRIES} entries"),
        ));
    }
    let mut share_sum = 0.0_f32;
    for share in &draft.metrics.country_traffic {
        if share.percent < 0.0 || share.percent > 100.0 {
            violations.push(FieldViolation::new(
                "metrics.countryTraffic",
                format!("percentage out of range for {}", share.country),
            ));
        }
        share_sum += share.percent;
    }
    if share_sum > 100.0 {
        violations.push(FieldViolation::new(
            "metrics.countryTraffic",
            "percentages must sum to at most 100",
        ));
    }

    violations
}
