use crate::config::credentials::RedditCredentials;
use crate::domain::model::Post;
use crate::domain::ports::{ListingSource, SourceQuery};
use crate::utils::error::{PriceCheckError, Result};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_AUTH_URL: &str = "https://www.reddit.com/api/v1/access_token";
pub const DEFAULT_API_BASE: &str = "https://oauth.reddit.com";
pub const DEFAULT_USER_AGENT: &str = "script:com.redditpricechecker:v1.0";

/// Reddit 單頁最多回傳 100 筆
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct RedditSettings {
    pub user_agent: String,
    pub auth_url: String,
    pub api_base: String,
    pub timeout_seconds: u64,
}

impl Default for RedditSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingResponse {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: RawPost,
}

#[derive(Debug, Deserialize)]
struct RawPost {
    id: String,
    #[serde(default)]
    subreddit: String,
    author: Option<String>,
    title: String,
    #[serde(default)]
    selftext: String,
    created_utc: f64,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    url: String,
    #[serde(default)]
    permalink: String,
}

impl RawPost {
    fn into_post(self) -> Option<Post> {
        let created_at = DateTime::from_timestamp(self.created_utc as i64, 0)?;
        Some(Post {
            id: self.id,
            subreddit: self.subreddit,
            author: self.author.unwrap_or_else(|| "[deleted]".to_string()),
            title: self.title,
            body: self.selftext,
            created_at,
            score: self.score,
            url: self.url,
            permalink: self.permalink,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Identity {
    name: String,
}

/// 以 OAuth（script app 的 password grant）存取 Reddit 的 Listing Source
pub struct RedditClient {
    client: Client,
    settings: RedditSettings,
    access_token: String,
}

impl RedditClient {
    /// 取得 access token；授權失敗直接回傳錯誤
    pub async fn connect(credentials: &RedditCredentials, settings: RedditSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        tracing::debug!("Requesting Reddit access token from {}", settings.auth_url);
        let response = client
            .post(&settings.auth_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PriceCheckError::RateLimited {
                service: "reddit".to_string(),
            });
        }
        if !status.is_success() {
            return Err(PriceCheckError::AuthError {
                message: format!("token request failed with status: {}", status),
            });
        }

        // Reddit 帳密錯誤時仍回 200，內容為 {"error": "invalid_grant"}
        let token: TokenResponse = response.json().await?;
        let access_token = match (token.access_token, token.error) {
            (Some(access_token), None) => access_token,
            (_, Some(error)) => {
                return Err(PriceCheckError::AuthError {
                    message: format!("Reddit rejected the credentials: {}", error),
                })
            }
            (None, None) => {
                return Err(PriceCheckError::AuthError {
                    message: "token response did not contain an access token".to_string(),
                })
            }
        };

        tracing::info!("✅ Reddit authentication successful");
        Ok(Self {
            client,
            settings,
            access_token,
        })
    }

    /// 以目前 token 查詢帳號名稱，確認完整授權可用
    pub async fn verify_identity(&self) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/api/v1/me", self.settings.api_base))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PriceCheckError::AuthError {
                message: format!("identity check failed with status: {}", response.status()),
            });
        }

        let identity: Identity = response.json().await?;
        Ok(identity.name)
    }

    async fn fetch_page(
        &self,
        subreddit: &str,
        query: &SourceQuery,
        page_size: usize,
        after: Option<&str>,
    ) -> Result<ListingData> {
        let page_size = page_size.to_string();
        let mut request = self
            .client
            .get(format!("{}/r/{}/search", self.settings.api_base, subreddit))
            .bearer_auth(&self.access_token)
            .query(&[
                ("q", query.text.as_str()),
                ("restrict_sr", "1"),
                ("sort", "new"),
                ("t", query.time_filter),
                ("limit", page_size.as_str()),
                ("raw_json", "1"),
            ]);

        if let Some(after) = after {
            request = request.query(&[("after", after)]);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("r/{}: search response status: {}", subreddit, status);

        if status.is_success() {
            let listing: ListingResponse = response.json().await?;
            Ok(listing.data)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            Err(PriceCheckError::RateLimited {
                service: "reddit".to_string(),
            })
        } else if status == StatusCode::UNAUTHORIZED {
            Err(PriceCheckError::AuthError {
                message: "access token rejected".to_string(),
            })
        } else {
            Err(PriceCheckError::SourceError {
                subreddit: subreddit.to_string(),
                message: format!("search failed with status: {}", status),
            })
        }
    }
}

#[async_trait]
impl ListingSource for RedditClient {
    async fn fetch(&self, subreddit: &str, query: &SourceQuery) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        let mut after: Option<String> = None;

        while posts.len() < query.limit {
            let page_size = (query.limit - posts.len()).min(MAX_PAGE_SIZE);
            let page = self
                .fetch_page(subreddit, query, page_size, after.as_deref())
                .await?;

            let received = page.children.len();
            posts.extend(
                page.children
                    .into_iter()
                    .take(page_size)
                    .filter_map(|child| child.data.into_post()),
            );

            match page.after {
                Some(next) if received > 0 => after = Some(next),
                _ => break,
            }
        }

        Ok(posts)
    }
}
