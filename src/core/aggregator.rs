use crate::domain::model::{Listing, PriceStats, SearchReport};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// 保留有價格、價格落在 `[min_price, max_price]`（含兩端）且發文時間不早於 `since` 的 listing，
/// 依發文時間新到舊排序，同時間以分數高者優先。
pub fn filter(
    listings: Vec<Listing>,
    min_price: Decimal,
    max_price: Decimal,
    since: DateTime<Utc>,
) -> Vec<Listing> {
    let mut accepted: Vec<Listing> = listings
        .into_iter()
        .filter(|listing| {
            listing
                .price
                .is_some_and(|price| min_price <= price && price <= max_price)
                && listing.post.created_at >= since
        })
        .collect();

    accepted.sort_by(|a, b| {
        b.post
            .created_at
            .cmp(&a.post.created_at)
            .then_with(|| b.post.score.cmp(&a.post.score))
    });
    accepted
}

pub fn aggregate(filtered: Vec<Listing>) -> SearchReport {
    let prices: Vec<Decimal> = filtered.iter().filter_map(|listing| listing.price).collect();
    let stats = price_stats(&prices);

    SearchReport {
        listings: filtered,
        stats,
    }
}

pub fn price_stats(prices: &[Decimal]) -> Option<PriceStats> {
    if prices.is_empty() {
        return None;
    }

    let mut sorted = prices.to_vec();
    sorted.sort();

    let count = sorted.len();
    let total: Decimal = sorted.iter().sum();

    Some(PriceStats {
        count,
        average: total / Decimal::from(count),
        median: median(&sorted),
        min: sorted[0],
        max: sorted[count - 1],
    })
}

/// `sorted` 必須已排序且非空
fn median(sorted: &[Decimal]) -> Decimal {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / Decimal::TWO
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Post;
    use chrono::{Duration, TimeZone};

    fn listing(id: &str, price: Option<i64>, created_at: DateTime<Utc>, score: i64) -> Listing {
        Listing {
            post: Post {
                id: id.to_string(),
                subreddit: "avexchange".to_string(),
                author: "seller".to_string(),
                title: format!("[WTS] HD800 {}", id),
                body: String::new(),
                created_at,
                score,
                url: format!("https://redd.it/{}", id),
                permalink: format!("/r/avexchange/comments/{}", id),
            },
            price: price.map(Decimal::from),
            within_range: true,
            within_date_window: true,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_median_odd_and_even() {
        let odd = price_stats(&[Decimal::from(1000), Decimal::from(500), Decimal::from(700)]).unwrap();
        assert_eq!(odd.median, Decimal::from(700));

        let even = price_stats(&[
            Decimal::from(500),
            Decimal::from(700),
            Decimal::from(900),
            Decimal::from(1000),
        ])
        .unwrap();
        assert_eq!(even.median, Decimal::from(800));
        assert_eq!(even.average, Decimal::from(775));
        assert_eq!(even.min, Decimal::from(500));
        assert_eq!(even.max, Decimal::from(1000));
        assert_eq!(even.count, 4);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let since = now() - Duration::days(30);
        let listings = vec![
            listing("at-min", Some(500), now(), 1),
            listing("at-max", Some(1500), now(), 1),
        ];
        let min = Decimal::from(500);
        let max = Decimal::from(1500);
        assert_eq!(filter(listings, min, max, since).len(), 2);

        let mut below = listing("below", None, now(), 1);
        below.price = Some(Decimal::new(49999, 2));
        let mut above = listing("above", None, now(), 1);
        above.price = Some(Decimal::new(150001, 2));
        assert!(filter(vec![below, above], min, max, since).is_empty());
    }

    #[test]
    fn test_filter_drops_unpriced_and_old_listings() {
        let since = now() - Duration::days(7);
        let listings = vec![
            listing("unpriced", None, now(), 1),
            listing("old", Some(900), since - Duration::seconds(1), 1),
            listing("edge", Some(900), since, 1),
        ];
        let kept = filter(listings, Decimal::from(1), Decimal::from(5000), since);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].post.id, "edge");
    }

    #[test]
    fn test_sorted_newest_first_then_by_score() {
        let since = now() - Duration::days(30);
        let listings = vec![
            listing("older", Some(900), now() - Duration::days(2), 50),
            listing("newest-low", Some(900), now(), 1),
            listing("newest-high", Some(900), now(), 10),
        ];
        let ids: Vec<String> = filter(listings, Decimal::from(1), Decimal::from(5000), since)
            .into_iter()
            .map(|l| l.post.id)
            .collect();
        assert_eq!(ids, vec!["newest-high", "newest-low", "older"]);
    }

    #[test]
    fn test_empty_input_has_no_stats() {
        let report = aggregate(Vec::new());
        assert!(report.is_empty());
        assert!(report.stats.is_none());
        assert_eq!(report.average(), None);
        assert_eq!(report.median(), None);
    }
}
