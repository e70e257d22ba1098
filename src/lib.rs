pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{CliConfig, Strategy};
pub use core::{
    llm_extractor::LlmPriceExtractor, price_extractor::RegexPriceExtractor, search::SearchEngine,
};
pub use domain::model::{Listing, ModelQuery, Post, PriceRange, SearchReport, SearchRequest};
pub use utils::error::{PriceCheckError, Result};
