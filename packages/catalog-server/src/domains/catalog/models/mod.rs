pub mod category;
pub mod listing;

pub use category::Category;
pub use listing::{
    ContentAcceptance, ContentCategory, CountryShare, DomainRating, Languages, Listing,
    ListingDraft, ListingPatch, ListingStatus, PlacementTerms, PlacementType, SiteMetrics,
    Website,
};
