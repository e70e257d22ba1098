use anyhow::{bail, Context, Result};
use clap::Parser;
use reddit_price_checker::adapters::openai::OpenAiCompletionService;
use reddit_price_checker::adapters::reddit::RedditClient;
use reddit_price_checker::config::credentials::{load_dotenv, OpenAiCredentials, RedditCredentials};
use reddit_price_checker::config::toml_config::ProfileConfig;
use reddit_price_checker::utils::logger;
use reddit_price_checker::LlmPriceExtractor;

/// 檢查 Reddit 與 OpenAI 憑證是否可用
#[derive(Parser)]
#[command(name = "check_connections")]
#[command(about = "Verify Reddit and OpenAI credentials without running a search")]
struct Args {
    /// Optional TOML profile
    #[arg(long)]
    config: Option<String>,

    /// Also check the OpenAI extraction service
    #[arg(long)]
    openai: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);
    load_dotenv();

    let profile = match &args.config {
        Some(path) => ProfileConfig::from_file(path)
            .with_context(|| format!("failed to load profile '{}'", path))?,
        None => ProfileConfig::default(),
    };

    println!("🚀 Checking connections");

    let credentials = RedditCredentials::from_env()?;
    let reddit = RedditClient::connect(&credentials, profile.reddit_settings())
        .await
        .context("Reddit authentication failed")?;
    let name = reddit.verify_identity().await?;
    println!("✅ Reddit: authenticated as u/{}", name);

    if args.openai {
        let key = OpenAiCredentials::from_env()?;
        let extractor = LlmPriceExtractor::new(OpenAiCompletionService::new(
            &key.api_key,
            profile.openai_settings(),
        ));
        if !extractor.verify_reachable().await {
            bail!("OpenAI extraction service did not answer the connection test");
        }
        println!("✅ OpenAI: extraction service reachable");
    }

    Ok(())
}
