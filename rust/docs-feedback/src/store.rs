//! Comment Store Client
//!
//! Talks to a PostgREST-style endpoint (`/rest/v1/<table>`). When the widget
//! was built or mounted without real credentials the client is `Degraded`:
//! reads return nothing and writes fail with `StoreError::NotConfigured`.

use feedback_core::{Comment, NewComment, StoreConfig, StoreError};
use gloo_net::http::{Request, Response};

pub enum CommentStoreClient {
    Configured(RestStore),
    Degraded,
}

impl CommentStoreClient {
    pub fn new(config: StoreConfig) -> Self {
        if config.is_configured() {
            CommentStoreClient::Configured(RestStore { config })
        } else {
            CommentStoreClient::Degraded
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, CommentStoreClient::Configured(_))
    }

    /// All comments for `page_url`. Errors are logged and read as "no comments".
    pub async fn list(&self, page_url: &str) -> Vec<Comment> {
        match self {
            CommentStoreClient::Degraded => {
                web_sys::console::warn_1(&"[FeedbackStore] Store not configured, skipping load".into());
                Vec::new()
            }
            CommentStoreClient::Configured(store) => match store.fetch(page_url).await {
                Ok(comments) => comments,
                Err(e) => {
                    web_sys::console::error_1(&format!("[FeedbackStore] Error loading comments: {}", e).into());
                    Vec::new()
                }
            },
        }
    }

    pub async fn insert(&self, comment: &NewComment) -> Result<(), StoreError> {
        match self {
            CommentStoreClient::Degraded => Err(StoreError::NotConfigured),
            CommentStoreClient::Configured(store) => store.insert(comment).await,
        }
    }
}

pub struct RestStore {
    config: StoreConfig,
}

impl RestStore {
    async fn fetch(&self, page_url: &str) -> Result<Vec<Comment>, StoreError> {
        let response = Request::get(&self.config.list_url(page_url))
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &self.config.bearer())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let response = ensure_success(response).await?;
        response
            .json::<Vec<Comment>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn insert(&self, comment: &NewComment) -> Result<(), StoreError> {
        let request = Request::post(&self.config.table_url())
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &self.config.bearer())
            .header("Prefer", "return=minimal")
            .json(comment)
            .map_err(|e| StoreError::Transport(format!("Failed to encode comment: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        ensure_success(response).await.map(|_| ())
    }
}

async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = match response.text().await {
        Ok(body) if !body.is_empty() => body,
        _ => response.status_text(),
    };
    Err(StoreError::Rejected { status, message })
}
