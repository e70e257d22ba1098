use crate::core::aggregator;
use crate::core::search_terms::{
    broad_query, build_query, is_sale_post, search_variations, time_filter,
};
use crate::domain::model::{Listing, ModelQuery, Post, PriceRange, SearchReport, SearchRequest};
use crate::domain::ports::{ListingSource, PriceExtractor, SourceQuery};
use crate::utils::error::{PriceCheckError, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

/// 搜尋流程：取得貼文 → 型號比對 → 價格擷取 → 篩選與統計
///
/// 每篇貼文依序處理完畢才處理下一篇。單一子版的來源錯誤只會略過該子版，
/// 單一貼文的擷取錯誤只會讓該貼文沒有價格。
pub struct SearchEngine<L: ListingSource> {
    source: L,
    extractor: Box<dyn PriceExtractor>,
}

struct SearchState<'a> {
    query: &'a ModelQuery,
    range: PriceRange,
    since: DateTime<Utc>,
    seen: HashSet<String>,
    listings: Vec<Listing>,
    accepted_in_subreddit: usize,
}

impl<L: ListingSource> SearchEngine<L> {
    pub fn new(source: L, extractor: Box<dyn PriceExtractor>) -> Self {
        Self { source, extractor }
    }

    pub fn extractor_name(&self) -> &'static str {
        self.extractor.name()
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchReport> {
        self.search_at(request, Utc::now()).await
    }

    pub async fn search_at(&self, request: &SearchRequest, now: DateTime<Utc>) -> Result<SearchReport> {
        let query = ModelQuery::new(&request.query)?;
        let since = lookback_start(now, request.days_back);

        let variations = search_variations(&request.query);
        tracing::info!(
            "Searching for variations: {}",
            variations.iter().cloned().collect::<Vec<_>>().join(", ")
        );

        let mut state = SearchState {
            query: &query,
            range: request.price_range,
            since,
            seen: HashSet::new(),
            listings: Vec::new(),
            accepted_in_subreddit: 0,
        };

        for subreddit in &request.subreddits {
            tracing::info!("🔍 Searching in r/{}...", subreddit);
            state.accepted_in_subreddit = 0;

            if let Err(e) = self
                .run_query(subreddit, build_query(&request.query), request, &mut state)
                .await
            {
                tracing::warn!("❌ Error searching r/{}: {}", subreddit, e);
                continue;
            }

            for term in variations.iter().filter(|term| **term != request.query) {
                if state.accepted_in_subreddit > 0 {
                    break;
                }
                match self.run_query(subreddit, build_query(term), request, &mut state).await {
                    Ok(()) => {}
                    Err(e @ PriceCheckError::RateLimited { .. }) => {
                        tracing::warn!("❌ Stopping variations for r/{}: {}", subreddit, e);
                        break;
                    }
                    Err(e) => tracing::debug!("Variation '{}' failed in r/{}: {}", term, subreddit, e),
                }
            }

            if state.accepted_in_subreddit == 0 {
                if let Some(model) = query.model_token() {
                    tracing::info!("No results found in r/{}. Trying broader search...", subreddit);
                    if let Err(e) = self
                        .run_query(subreddit, broad_query(model), request, &mut state)
                        .await
                    {
                        tracing::warn!("❌ Error with broad search in r/{}: {}", subreddit, e);
                    }
                }
            }
        }

        let filtered = aggregator::filter(
            state.listings,
            request.price_range.min,
            request.price_range.max,
            since,
        );

        if filtered.is_empty() {
            tracing::info!(
                "No results found for '{}' in the past {} days",
                request.query,
                request.days_back
            );
        }

        Ok(aggregator::aggregate(filtered))
    }

    async fn run_query(
        &self,
        subreddit: &str,
        text: String,
        request: &SearchRequest,
        state: &mut SearchState<'_>,
    ) -> Result<()> {
        let source_query = SourceQuery {
            text,
            time_filter: time_filter(request.days_back),
            limit: request.limit,
        };

        tracing::debug!("r/{}: query {}", subreddit, source_query.text);
        let posts = self.source.fetch(subreddit, &source_query).await?;
        tracing::debug!("r/{}: {} posts returned", subreddit, posts.len());

        for post in posts {
            self.process_post(post, request, state).await;
        }
        Ok(())
    }

    async fn process_post(&self, post: Post, request: &SearchRequest, state: &mut SearchState<'_>) {
        if !state.seen.insert(post.id.clone()) {
            return;
        }

        if !is_sale_post(&post.title) {
            tracing::debug!("Not a sale post: {}", post.title);
            return;
        }

        if post.created_at < state.since {
            tracing::debug!("Outside lookback window: {}", post.title);
            return;
        }

        if !state.query.matches(&post.text()) {
            tracing::debug!("Model mismatch for '{}': {}", state.query.base_name(), post.title);
            return;
        }

        let price = match self
            .extractor
            .extract(&post.title, &post.body, &request.query)
            .await
        {
            Ok(price) => price,
            Err(e) => {
                tracing::warn!("Price extraction failed for {}: {}", post.id, e);
                None
            }
        };

        let listing = Listing::new(post, price, &state.range, state.since);
        match listing.price {
            Some(price) if listing.within_range => {
                tracing::info!("Found: {} (${:.2})", listing.post.title, price);
                state.accepted_in_subreddit += 1;
            }
            Some(price) => {
                tracing::info!(
                    "Skipped (price outside range ${:.2}-${:.2}): {} (found ${:.2})",
                    state.range.min,
                    state.range.max,
                    listing.post.title,
                    price
                );
            }
            None => tracing::debug!("No price found: {}", listing.post.title),
        }

        state.listings.push(listing);
    }
}

/// 回溯起點；超出 chrono 可表示範圍時不設下限
fn lookback_start(now: DateTime<Utc>, days_back: u32) -> DateTime<Utc> {
    Duration::try_days(i64::from(days_back))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
