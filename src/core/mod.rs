pub mod aggregator;
pub mod llm_extractor;
pub mod matcher;
pub mod price_extractor;
pub mod search;
pub mod search_terms;

pub use crate::domain::model::{Listing, ModelQuery, Post, PriceRange, SearchReport, SearchRequest};
pub use crate::domain::ports::{CompletionService, ListingSource, PriceExtractor, SourceQuery};
pub use crate::utils::error::Result;
