use anyhow::Result;
use chrono::{TimeZone, Utc};
use httpmock::prelude::*;
use reddit_price_checker::adapters::reddit::{RedditClient, RedditSettings};
use reddit_price_checker::app::render::render_report;
use reddit_price_checker::config::credentials::RedditCredentials;
use reddit_price_checker::{PriceRange, RegexPriceExtractor, SearchEngine, SearchRequest};
use rust_decimal::Decimal;
use serde_json::json;

// 2024-06-01 00:00:00 UTC
const NOW_TS: i64 = 1717200000;
const DAY: i64 = 86400;

fn credentials() -> RedditCredentials {
    RedditCredentials {
        client_id: "test-id".to_string(),
        client_secret: "test-secret".to_string(),
        username: "seller".to_string(),
        password: "hunter2".to_string(),
    }
}

fn child(id: &str, title: &str, body: &str, days_ago: i64) -> serde_json::Value {
    json!({
        "kind": "t3",
        "data": {
            "id": id,
            "subreddit": "avexchange",
            "author": format!("user_{}", id),
            "title": title,
            "selftext": body,
            "created_utc": (NOW_TS - days_ago * DAY) as f64,
            "score": 1,
            "url": format!("https://www.reddit.com/r/avexchange/comments/{}/", id),
            "permalink": format!("/r/avexchange/comments/{}/", id)
        }
    })
}

async fn engine_for(server: &MockServer) -> Result<SearchEngine<RedditClient>> {
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/access_token");
        then.status(200).json_body(json!({ "access_token": "token-abc" }));
    });

    let settings = RedditSettings {
        auth_url: server.url("/api/v1/access_token"),
        api_base: server.base_url(),
        ..Default::default()
    };
    let client = RedditClient::connect(&credentials(), settings).await?;
    Ok(SearchEngine::new(client, Box::new(RegexPriceExtractor::new())))
}

fn request(query: &str) -> Result<SearchRequest> {
    let range = PriceRange::new(Decimal::from(500), Decimal::from(1500))?;
    Ok(SearchRequest::new(query, ["avexchange"], range, 30))
}

#[tokio::test]
async fn test_end_to_end_search_reports_matching_listings() -> Result<()> {
    let server = MockServer::start();
    let search_mock = server.mock(|when, then| {
        when.method(GET).path("/r/avexchange/search");
        then.status(200).json_body(json!({
            "data": {
                "after": null,
                "children": [
                    child("a", "[WTS] Sennheiser HD800S", "Asking $1000 shipped", 1),
                    child("b", "[WTS] HD800S - $1,200", "", 2),
                    child("c", "[WTS] HD800 - $700", "", 3),
                    child("d", "[WTB] HD800S", "Paying up to $900", 1),
                    child("e", "[WTS] HD800S - $1,900", "", 4),
                    child("f", "[WTS] HD800S", "Make an offer", 5)
                ]
            }
        }));
    });

    let engine = engine_for(&server).await?;
    let now = Utc.timestamp_opt(NOW_TS, 0).unwrap();
    let report = engine.search_at(&request("HD800S")?, now).await?;

    assert!(search_mock.hits() >= 1);
    let ids: Vec<&str> = report.listings.iter().map(|l| l.post.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(report.min(), Some(Decimal::from(1000)));
    assert_eq!(report.max(), Some(Decimal::from(1200)));
    assert_eq!(report.average(), Some(Decimal::from(1100)));

    let text = render_report("HD800S", 30, &report);
    assert!(text.contains("Total listings found: 2"));
    assert!(text.contains("Seller: u/user_a"));
    Ok(())
}

#[tokio::test]
async fn test_variant_posts_do_not_match_base_model() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/r/avexchange/search");
        then.status(200).json_body(json!({
            "data": {
                "after": null,
                "children": [child("a", "[WTS] HD800S - $1000", "", 1)]
            }
        }));
    });

    let engine = engine_for(&server).await?;
    let now = Utc.timestamp_opt(NOW_TS, 0).unwrap();
    let report = engine.search_at(&request("HD800")?, now).await?;

    assert!(report.is_empty());
    assert!(report.stats.is_none());
    Ok(())
}

#[tokio::test]
async fn test_no_posts_gives_no_statistics() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/r/avexchange/search");
        then.status(200)
            .json_body(json!({ "data": { "after": null, "children": [] } }));
    });

    let engine = engine_for(&server).await?;
    let now = Utc.timestamp_opt(NOW_TS, 0).unwrap();
    let report = engine.search_at(&request("HD800")?, now).await?;

    assert!(report.is_empty());
    assert_eq!(report.average(), None);
    let text = render_report("HD800", 30, &report);
    assert!(text.contains("No results found for 'HD800' in the past 30 days."));
    Ok(())
}

#[tokio::test]
async fn test_failing_subreddit_does_not_abort_search() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/r/photomarket/search");
        then.status(503);
    });
    server.mock(|when, then| {
        when.method(GET).path("/r/avexchange/search");
        then.status(200).json_body(json!({
            "data": {
                "after": null,
                "children": [child("a", "[WTS] HD800 - $900", "", 1)]
            }
        }));
    });

    let engine = engine_for(&server).await?;
    let range = PriceRange::new(Decimal::from(500), Decimal::from(1500))?;
    let request = SearchRequest::new("HD800", ["photomarket", "avexchange"], range, 30);
    let now = Utc.timestamp_opt(NOW_TS, 0).unwrap();
    let report = engine.search_at(&request, now).await?;

    assert_eq!(report.listings.len(), 1);
    assert_eq!(report.median(), Some(Decimal::from(900)));
    Ok(())
}
