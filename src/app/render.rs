use crate::domain::model::SearchReport;
use std::fmt::Write;

const RULE_WIDTH: usize = 80;

pub fn render_report(item_name: &str, days_back: u32, report: &SearchReport) -> String {
    let mut out = String::new();

    let Some(stats) = &report.stats else {
        let _ = writeln!(
            out,
            "\nNo results found for '{}' in the past {} days.",
            item_name, days_back
        );
        return out;
    };

    let _ = writeln!(out, "\nPrice Analysis Results:");
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    let _ = writeln!(out, "\nTotal listings found: {}", report.listings.len());
    let _ = writeln!(out, "Average price: ${:.2}", stats.average);
    let _ = writeln!(out, "Median price: ${:.2}", stats.median);
    let _ = writeln!(out, "Price range: ${:.2} - ${:.2}", stats.min, stats.max);

    let _ = writeln!(out, "\nDetailed Listings (Most Recent First):");
    for listing in &report.listings {
        let post = &listing.post;
        let _ = writeln!(out, "\nDate: {}", post.created_at.format("%Y-%m-%d %H:%M:%S"));
        if let Some(price) = listing.price {
            let _ = writeln!(out, "Price: ${:.2}", price);
        }
        let _ = writeln!(out, "Subreddit: r/{}", post.subreddit);
        let _ = writeln!(out, "Seller: u/{}", post.author);
        let _ = writeln!(out, "URL: {}", post.url);
        let _ = writeln!(out, "Title: {}", post.title);
    }

    out
}
