//! Bulk import pipeline.
//!
//! The import collaborator hands over tabular rows already split into
//! `field name -> raw string` maps; this pipeline coerces each row into a
//! listing draft, runs it through the same store validation as direct
//! creation, and collects per-row errors. Rows are independent: one bad
//! row never aborts the batch. Row indices are 1-based.

use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::common::errors::DomainError;
use crate::domains::catalog::models::{
    ContentAcceptance, ContentCategory, DomainRating, Languages, Listing, ListingDraft,
    PlacementTerms, PlacementType, SiteMetrics, Website,
};
use crate::domains::catalog::store::ListingStore;

/// One tabular input row: wire field name to raw string value.
pub type RawRow = BTreeMap<String, String>;

/// A problem with a single field of a single row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    /// 1-based data row index
    pub row_index: usize,
    pub field: String,
    pub message: String,
}

/// Batch result: what made it in, and everything that did not, in original
/// row order.
#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    pub imported: Vec<Listing>,
    pub errors: Vec<RowError>,
}

pub struct ImportPipeline {
    store: Arc<ListingStore>,
}

impl ImportPipeline {
    pub fn new(store: Arc<ListingStore>) -> Self {
        Self { store }
    }

    /// Process a batch of raw rows.
    ///
    /// Only infrastructure failures (`StoreUnavailable`) escape; every
    /// parse and validation problem lands in the outcome's error list.
    /// A domain seen earlier in the batch rejects later occurrences even
    /// before the store-level uniqueness check can see the first row.
    pub async fn run(&self, rows: Vec<RawRow>) -> Result<ImportOutcome, DomainError> {
        let mut imported = Vec::new();
        let mut errors = Vec::new();
        let mut batch_domains: HashSet<String> = HashSet::new();

        for (offset, row) in rows.iter().enumerate() {
            let row_index = offset + 1;

            let draft = match parse_row(row) {
                Ok(draft) => draft,
                Err(field_errors) => {
                    errors.extend(field_errors.into_iter().map(|(field, message)| RowError {
                        row_index,
                        field,
                        message,
                    }));
                    continue;
                }
            };

            let domain_key = draft.website.domain.trim().to_lowercase();
            if !domain_key.is_empty() && !batch_domains.insert(domain_key) {
                errors.push(RowError {
                    row_index,
                    field: "website.domain".to_string(),
                    message: format!(
                        "duplicate domain within batch: {}",
                        draft.website.domain
                    ),
                });
                continue;
            }

            match self.store.create(draft).await {
                Ok(listing) => imported.push(listing),
                Err(DomainError::Validation(violations)) => {
                    errors.extend(violations.into_iter().map(|violation| RowError {
                        row_index,
                        field: violation.field,
                        message: violation.message,
                    }));
                }
                Err(other) => return Err(other),
            }
        }

        info!(
            imported = imported.len(),
            failed_rows = errors.iter().map(|e| e.row_index).collect::<HashSet<_>>().len(),
            "Bulk import finished"
        );
        Ok(ImportOutcome { imported, errors })
    }
}

// =============================================================================
// Row parsing (type coercion)
// =============================================================================

type FieldErrors = Vec<(String, String)>;

fn parse_row(row: &RawRow) -> Result<ListingDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let price = required(row, "price", &mut errors)
        .and_then(|raw| coerce::<Decimal>(raw, "price", "a decimal number", &mut errors))
        .unwrap_or(Decimal::ZERO);

    let offer_rate = optional(row, "offerRate")
        .and_then(|raw| coerce::<Decimal>(raw, "offerRate", "a decimal number", &mut errors));

    let listing_type = required(row, "type.listingType", &mut errors)
        .and_then(|raw| coerce::<PlacementType>(raw, "type.listingType", "a listing type", &mut errors))
        .unwrap_or(PlacementType::GuestPost);

    let draft = ListingDraft {
        price,
        offer_rate,
        website: Website {
            domain: string(row, "website.domain"),
            verified: boolean(row, "website.verified", &mut errors).unwrap_or(false),
        },
        terms: PlacementTerms {
            listing_type,
            permanent: boolean(row, "type.permanent", &mut errors).unwrap_or(false),
            months: optional(row, "type.months")
                .and_then(|raw| coerce::<u32>(raw, "type.months", "a whole number", &mut errors)),
            word_count: number(row, "type.wordCount", &mut errors),
            working_days: number(row, "type.workingDays", &mut errors),
        },
        language: Languages {
            primary: string(row, "language.primary"),
            native: string(row, "language.native"),
        },
        category: string(row, "category"),
        metrics: SiteMetrics {
            dr: DomainRating {
                value: number(row, "metrics.dr.value", &mut errors),
            },
            da: number(row, "metrics.da", &mut errors),
            authority_score: number(row, "metrics.as", &mut errors),
            traffic: number(row, "metrics.traffic", &mut errors),
            keywords: number(row, "metrics.keywords", &mut errors),
            ref_domains: number(row, "metrics.refDomains", &mut errors),
            country_traffic: Vec::new(),
        },
        niches: optional(row, "niches")
            .map(|raw| {
                raw.split(',')
                    .map(|tag| tag.trim().to_string())
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
        accepted_content: accepted_content(row, &mut errors),
    };

    if errors.is_empty() {
        Ok(draft)
    } else {
        Err(errors)
    }
}

fn optional<'a>(row: &'a RawRow, field: &str) -> Option<&'a str> {
    row.get(field).map(String::as_str).filter(|s| !s.trim().is_empty())
}

fn required<'a>(row: &'a RawRow, field: &str, errors: &mut FieldErrors) -> Option<&'a str> {
    let value = optional(row, field);
    if value.is_none() {
        errors.push((field.to_string(), "missing required field".to_string()));
    }
    value
}

fn string(row: &RawRow, field: &str) -> String {
    optional(row, field).unwrap_or_default().trim().to_string()
}

fn coerce<T: FromStr>(
    raw: &str,
    field: &str,
    expected: &str,
    errors: &mut FieldErrors,
) -> Option<T> {
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push((
                field.to_string(),
                format!("expected {expected}, got '{}'", raw.trim()),
            ));
            None
        }
    }
}

/// Numeric field defaulting to zero when absent.
fn number<T: FromStr + Default>(row: &RawRow, field: &str, errors: &mut FieldErrors) -> T {
    optional(row, field)
        .and_then(|raw| coerce::<T>(raw, field, "a whole number", errors))
        .unwrap_or_default()
}

fn boolean(row: &RawRow, field: &str, errors: &mut FieldErrors) -> Option<bool> {
    let raw = optional(row, field)?;
    match raw.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        other => {
            errors.push((
                field.to_string(),
                format!("expected a boolean, got '{other}'"),
            ));
            None
        }
    }
}

/// `acceptedContent.<category>` columns, e.g. `acceptedContent.casino`.
fn accepted_content(
    row: &RawRow,
    errors: &mut FieldErrors,
) -> BTreeMap<ContentCategory, ContentAcceptance> {
    let mut accepted = BTreeMap::new();
    for category in ContentCategory::ALL {
        let field = format!("acceptedContent.{category}");
        if let Some(raw) = optional(row, &field) {
            if let Some(acceptance) =
                coerce::<ContentAcceptance>(raw, &field, "an acceptance rule", errors)
            {
                accepted.insert(category, acceptance);
            }
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn minimal_row(domain: &str) -> RawRow {
        row(&[
            ("price", "120.50"),
            ("website.domain", domain),
            ("website.verified", "true"),
            ("type.listingType", "guest-post"),
            ("type.permanent", "true"),
            ("type.wordCount", "500"),
            ("language.primary", "en"),
            ("language.native", "en"),
            ("category", "technology"),
            ("metrics.dr.value", "55"),
            ("metrics.da", "48"),
            ("metrics.traffic", "25000"),
            ("niches", "saas, marketing"),
            ("acceptedContent.crypto", "accepted"),
        ])
    }

    #[test]
    fn test_parse_row_coerces_types() {
        let draft = parse_row(&minimal_row("site.com")).unwrap();
        assert_eq!(draft.price, Decimal::new(12050, 2));
        assert!(draft.website.verified);
        assert_eq!(draft.terms.listing_type, PlacementType::GuestPost);
        assert!(draft.terms.permanent);
        assert_eq!(draft.metrics.dr.value, 55);
        assert_eq!(draft.niches.len(), 2);
        assert_eq!(
            draft.accepted_content.get(&ContentCategory::Crypto),
            Some(&ContentAcceptance::Accepted)
        );
    }

    #[test]
    fn test_malformed_values_produce_field_errors() {
        let mut bad = minimal_row("site.com");
        bad.insert("price".to_string(), "lots".to_string());
        bad.insert("website.verified".to_string(), "maybe".to_string());
        let errors = parse_row(&bad).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|(field, _)| field.as_str()).collect();
        assert!(fields.contains(&"price"));
        assert!(fields.contains(&"website.verified"));
    }

    #[test]
    fn test_missing_required_fields_are_reported() {
        let errors = parse_row(&row(&[("category", "technology")])).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|(field, _)| field.as_str()).collect();
        assert!(fields.contains(&"price"));
        assert!(fields.contains(&"type.listingType"));
    }
}
