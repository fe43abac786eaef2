use std::sync::Arc;

use gloo_net::http::{Request, RequestBuilder, Response};
use postwall_shared::config::ClientConfig;
use postwall_shared::query::{self, Include, PostQuery};
use postwall_shared::session::SessionContext;
use postwall_shared::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::BrowserStore;

/// Client for the remote social API. Reads the session token from storage on
/// every request, so a login in another form is picked up immediately.
#[derive(Clone, Debug)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    session: SessionContext<BrowserStore>,
}

impl ApiClient {
    pub fn new(config: Arc<ClientConfig>, session: SessionContext<BrowserStore>) -> Self {
        Self { config, session }
    }

    fn authorize(&self, mut req: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.session.token() {
            req = req.header("Authorization", &format!("Bearer {}", token));
        }
        if let Some(key) = &self.config.api_key {
            req = req.header("X-Noroff-API-Key", key);
        }
        req
    }

    async fn send(&self, method: &str, url: &str, req: Request) -> Result<Response, ApiError> {
        tracing::debug!(%method, %url, "api request");
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.ok() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            let err = ApiError::from_response(status, &body);
            tracing::warn!(%method, %url, status = ?err.status(), error = %err, "api request failed");
            return Err(err);
        }

        Ok(resp)
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.url(path);
        let req = self
            .authorize(Request::get(&url))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = self.send("GET", &url, req).await?;
        Self::decode(resp).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &str,
        builder: RequestBuilder,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self
            .authorize(builder.header("Content-Type", "application/json"))
            .body(serde_json::to_string(body)?)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = self.send(method, url, req).await?;
        Self::decode(resp).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let url = self.config.url(path);
        self.send_json("POST", Request::post(&url), &url, body).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let url = self.config.url(path);
        self.send_json("PUT", Request::put(&url), &url, body).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.config.url(path);
        let req = self
            .authorize(Request::delete(&url))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.send("DELETE", &url, req).await?;
        Ok(())
    }

    fn require_login(&self) -> Result<(), ApiError> {
        if self.session.is_logged_in() {
            Ok(())
        } else {
            Err(ApiError::NotLoggedIn)
        }
    }

    // ── Auth ──

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginData, ApiError> {
        let env: Envelope<LoginData> = self.post(query::LOGIN_PATH, credentials).await?;
        Ok(env.data)
    }

    pub async fn register(&self, registration: &Registration) -> Result<ProfileSummary, ApiError> {
        let env: Envelope<ProfileSummary> = self.post(query::REGISTER_PATH, registration).await?;
        Ok(env.data)
    }

    // ── Profiles ──

    pub async fn fetch_profile(&self, name: &str) -> Result<Profile, ApiError> {
        let env: Envelope<Profile> = self.get(&query::profile_path(name)).await?;
        Ok(env.data)
    }

    pub async fn update_profile(&self, name: &str, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        self.require_login()?;
        let env: Envelope<Profile> = self.put(&query::profile_update_path(name), update).await?;
        Ok(env.data)
    }

    /// Returns the follow state after the toggle.
    pub async fn follow_toggle(&self, name: &str, currently_following: bool) -> Result<bool, ApiError> {
        self.require_login()?;
        let _: serde_json::Value = self
            .put(&query::follow_path(name, currently_following), &serde_json::json!({}))
            .await?;
        Ok(!currently_following)
    }

    // ── Posts ──

    pub async fn list_posts(&self, q: &PostQuery) -> Result<Envelope<Vec<Post>>, ApiError> {
        self.get(&q.path()).await
    }

    pub async fn get_post(&self, id: i64, include: Include) -> Result<Post, ApiError> {
        let env: Envelope<Post> = self.get(&query::post_path(id, include)).await?;
        Ok(env.data)
    }

    pub async fn create_post(&self, draft: &PostDraft) -> Result<Post, ApiError> {
        self.require_login()?;
        let env: Envelope<Post> = self.post(&query::posts_path(), draft).await?;
        Ok(env.data)
    }

    pub async fn update_post(&self, id: i64, draft: &PostDraft) -> Result<Post, ApiError> {
        self.require_login()?;
        let env: Envelope<Post> = self
            .put(&query::post_path(id, Include::default()), draft)
            .await?;
        Ok(env.data)
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        self.require_login()?;
        self.delete(&query::post_path(id, Include::default())).await
    }

    pub async fn post_comment(&self, post_id: i64, body: &str) -> Result<Comment, ApiError> {
        self.require_login()?;
        let payload = CommentDraft {
            body: body.to_string(),
        };
        let env: Envelope<Comment> = self.post(&query::comment_path(post_id), &payload).await?;
        Ok(env.data)
    }

    pub async fn toggle_reaction(&self, post_id: i64, symbol: &str) -> Result<ReactionUpdate, ApiError> {
        self.require_login()?;
        let env: Envelope<ReactionUpdate> = self
            .put(&query::react_path(post_id, symbol), &serde_json::json!({}))
            .await?;
        Ok(env.data)
    }
}
