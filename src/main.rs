use clap::Parser;
use reddit_price_checker::adapters::openai::OpenAiCompletionService;
use reddit_price_checker::adapters::reddit::RedditClient;
use reddit_price_checker::app::{prompt::Prompter, render::render_report, resolve_request};
use reddit_price_checker::config::credentials::{load_dotenv, OpenAiCredentials, RedditCredentials};
use reddit_price_checker::config::toml_config::ProfileConfig;
use reddit_price_checker::core::PriceExtractor;
use reddit_price_checker::utils::error::ErrorSeverity;
use reddit_price_checker::utils::{logger, validation::Validate};
use reddit_price_checker::{
    CliConfig, LlmPriceExtractor, PriceCheckError, RegexPriceExtractor, SearchEngine, Strategy,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);
    load_dotenv();

    tracing::info!("Starting reddit-price-checker");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ Price check failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(config: CliConfig) -> Result<(), PriceCheckError> {
    config.validate()?;

    let profile = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading profile from: {}", path);
            ProfileConfig::from_file(path)?
        }
        None => ProfileConfig::default(),
    };
    profile.validate()?;

    // 憑證缺漏在連線前就結束
    let reddit_credentials = RedditCredentials::from_env()?;
    let openai_credentials = match config.strategy {
        Strategy::Llm => Some(OpenAiCredentials::from_env()?),
        Strategy::Regex => None,
    };

    let source = RedditClient::connect(&reddit_credentials, profile.reddit_settings()).await?;

    let extractor: Box<dyn PriceExtractor> = match openai_credentials {
        Some(credentials) => {
            let service = OpenAiCompletionService::new(&credentials.api_key, profile.openai_settings());
            let extractor = LlmPriceExtractor::new(service);
            if !extractor.verify_reachable().await {
                return Err(PriceCheckError::ConfigError {
                    message: "the OpenAI extraction service is not reachable".to_string(),
                });
            }
            tracing::info!("✅ OpenAI extraction service reachable");
            Box::new(extractor)
        }
        None => Box::new(RegexPriceExtractor::new()),
    };

    println!("\nReddit Price Checker - Price Analysis");
    println!("{}", "-".repeat(80));

    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
    let request = resolve_request(&config, &profile, &mut prompter)?;

    let engine = SearchEngine::new(source, extractor);
    tracing::info!(
        "Searching {} subreddit(s) for '{}' with the {} extractor",
        request.subreddits.len(),
        request.query,
        engine.extractor_name()
    );

    let report = engine.search(&request).await?;
    println!("{}", render_report(&request.query, request.days_back, &report));

    Ok(())
}
