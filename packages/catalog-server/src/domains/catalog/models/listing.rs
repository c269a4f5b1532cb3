use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::ListingId;

/// Listing - a publisher's sellable placement on a website
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,

    // Pricing
    pub price: Decimal,
    /// Optional discount, 0-100 percent
    pub offer_rate: Option<Decimal>,

    pub website: Website,
    #[serde(rename = "type")]
    pub terms: PlacementTerms,
    pub language: Languages,

    /// Must name an existing category
    pub category: String,

    pub metrics: SiteMetrics,

    /// Topical tags for categorization/search
    pub niches: BTreeSet<String>,

    /// Content categories this placement accepts. Absent entries mean
    /// not-accepted.
    pub accepted_content: BTreeMap<ContentCategory, ContentAcceptance>,

    /// Written only by the listing lifecycle; always `pending` at creation
    pub status: ListingStatus,

    pub created_at: DateTime<Utc>,
}

/// The website a placement lives on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    /// Non-empty; unique across active (non-rejected) listings
    pub domain: String,
    pub verified: bool,
}

/// Placement terms: what is sold and for how long
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementTerms {
    pub listing_type: PlacementType,
    pub permanent: bool,
    /// Required and > 0 when the placement is not permanent
    pub months: Option<u32>,
    pub word_count: u32,
    pub working_days: u32,
}

/// Languages of the website content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Languages {
    pub primary: String,
    pub native: String,
}

/// Third-party site quality metrics, treated as opaque bounded numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMetrics {
    pub dr: DomainRating,
    /// Domain authority, 0-100
    pub da: u8,
    /// Authority score
    #[serde(rename = "as")]
    pub authority_score: u32,
    pub traffic: u64,
    pub keywords: u64,
    pub ref_domains: u64,
    /// At most 5 entries; percentages sum to <= 100
    pub country_traffic: Vec<CountryShare>,
}

/// Domain rating, 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRating {
    pub value: u8,
}

/// Share of traffic coming from one country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryShare {
    pub country: String,
    pub percent: f32,
}

// =============================================================================
// Enums for type-safe edges
// =============================================================================

/// What kind of placement is being sold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementType {
    GuestPost,
    HomepageLink,
    InnerpageLink,
    SitewideLink,
}

impl std::fmt::Display for PlacementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementType::GuestPost => write!(f, "guest-post"),
            PlacementType::HomepageLink => write!(f, "homepage-link"),
            PlacementType::InnerpageLink => write!(f, "innerpage-link"),
            PlacementType::SitewideLink => write!(f, "sitewide-link"),
        }
    }
}

impl std::str::FromStr for PlacementType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "guest-post" => Ok(PlacementType::GuestPost),
            "homepage-link" => Ok(PlacementType::HomepageLink),
            "innerpage-link" => Ok(PlacementType::InnerpageLink),
            "sitewide-link" => Ok(PlacementType::SitewideLink),
            _ => Err(anyhow::anyhow!("Invalid listing type: {}", s)),
        }
    }
}

/// Moderation status of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingStatus::Pending => write!(f, "pending"),
            ListingStatus::Approved => write!(f, "approved"),
            ListingStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ListingStatus {
    type Err = anyhow::Error;

    /// Case-insensitive: the status endpoint accepts `PENDING` and `pending`
    /// alike.
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(ListingStatus::Pending),
            "approved" => Ok(ListingStatus::Approved),
            "rejected" => Ok(ListingStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid listing status: {}", s)),
        }
    }
}

/// Sensitive content categories with explicit acceptance rules
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    Casino,
    Finance,
    Erotic,
    Dating,
    Crypto,
    Cbd,
    Medicine,
}

impl ContentCategory {
    pub const ALL: [ContentCategory; 7] = [
        ContentCategory::Casino,
        ContentCategory::Finance,
        ContentCategory::Erotic,
        ContentCategory::Dating,
        ContentCategory::Crypto,
        ContentCategory::Cbd,
        ContentCategory::Medicine,
    ];
}

impl std::fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentCategory::Casino => write!(f, "casino"),
            ContentCategory::Finance => write!(f, "finance"),
            ContentCategory::Erotic => write!(f, "erotic"),
            ContentCategory::Dating => write!(f, "dating"),
            ContentCategory::Crypto => write!(f, "crypto"),
            ContentCategory::Cbd => write!(f, "cbd"),
            ContentCategory::Medicine => write!(f, "medicine"),
        }
    }
}

impl std::str::FromStr for ContentCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "casino" => Ok(ContentCategory::Casino),
            "finance" => Ok(ContentCategory::Finance),
            "erotic" => Ok(ContentCategory::Erotic),
            "dating" => Ok(ContentCategory::Dating),
            "crypto" => Ok(ContentCategory::Crypto),
            "cbd" => Ok(ContentCategory::Cbd),
            "medicine" => Ok(ContentCategory::Medicine),
            _ => Err(anyhow::anyhow!("Invalid content category: {}", s)),
        }
    }
}

/// How a content category is handled by the publisher
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ContentAcceptance {
    Accepted,
    NotAccepted,
    Prohibited,
}

impl std::fmt::Display for ContentAcceptance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentAcceptance::Accepted => write!(f, "accepted"),
            ContentAcceptance::NotAccepted => write!(f, "not-accepted"),
            ContentAcceptance::Prohibited => write!(f, "prohibited"),
        }
    }
}

impl std::str::FromStr for ContentAcceptance {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "accepted" => Ok(ContentAcceptance::Accepted),
            "not-accepted" => Ok(ContentAcceptance::NotAccepted),
            "prohibited" => Ok(ContentAcceptance::Prohibited),
            _ => Err(anyhow::anyhow!("Invalid content acceptance: {}", s)),
        }
    }
}

// =============================================================================
// Draft and patch inputs
// =============================================================================

/// Input for creating a listing. The store assigns id, status and
/// created_at; a draft never carries them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub price: Decimal,
    pub offer_rate: Option<Decimal>,
    pub website: Website,
    #[serde(rename = "type")]
    pub terms: PlacementTerms,
    pub language: Languages,
    pub category: String,
    pub metrics: SiteMetrics,
    #[serde(default)]
    pub niches: BTreeSet<String>,
    #[serde(default)]
    pub accepted_content: BTreeMap<ContentCategory, ContentAcceptance>,
}

/// Partial update for a listing. `status` is carried only so the store can
/// reject direct writes to it - status belongs to the lifecycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPatch {
    pub price: Option<Decimal>,
    /// Sets or changes the discount. An absent field leaves the current
    /// value; a patch cannot clear an existing discount back to none -
    /// withdrawing an offer means setting `offerRate` to 0.
    pub offer_rate: Option<Decimal>,
    pub website: Option<Website>,
    #[serde(rename = "type")]
    pub terms: Option<PlacementTerms>,
    pub language: Option<Languages>,
    pub category: Option<String>,
    pub metrics: Option<SiteMetrics>,
    pub niches: Option<BTreeSet<String>>,
    pub accepted_content: Option<BTreeMap<ContentCategory, ContentAcceptance>>,
    pub status: Option<ListingStatus>,
}

impl Listing {
    /// Materialize a validated draft into a stored listing.
    pub fn from_draft(draft: ListingDraft) -> Self {
        Listing {
            id: ListingId::new(),
            price: draft.price,
            offer_rate: draft.offer_rate,
            website: draft.website,
            terms: draft.terms,
            language: draft.language,
            category: draft.category,
            metrics: draft.metrics,
            niches: draft.niches,
            accepted_content: draft.accepted_content,
            status: ListingStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Acceptance rule for a content category, defaulting to not-accepted.
    pub fn acceptance(&self, category: ContentCategory) -> ContentAcceptance {
        self.accepted_content
            .get(&category)
            .copied()
            .unwrap_or(ContentAcceptance::NotAccepted)
    }

    /// Apply a patch (status excluded - the store rejects patches that
    /// carry one before getting here).
    pub fn merged_with(&self, patch: ListingPatch) -> Self {
        let mut merged = self.clone();
        if let Some(price) = patch.price {
            merged.price = price;
        }
        if let Some(offer_rate) = patch.offer_rate {
            merged.offer_rate = Some(offer_rate);
        }
        if let Some(website) = patch.website {
            merged.website = website;
        }
        if let Some(terms) = patch.terms {
            merged.terms = terms;
        }
        if let Some(language) = patch.language {
            merged.language = language;
        }
        if let Some(category) = patch.category {
            merged.category = category;
        }
        if let Some(metrics) = patch.metrics {
            merged.metrics = metrics;
        }
        if let Some(niches) = patch.niches {
            merged.niches = niches;
        }
        if let Some(accepted_content) = patch.accepted_content {
            merged.accepted_content = accepted_content;
        }
        merged
    }
}
