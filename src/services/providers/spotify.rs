/// Spotify Web API provider
///
/// Uses the client-credentials flow, so only catalog endpoints are available.
///
/// API Flow:
/// 1. Token: POST {accounts}/api/token → bearer token valid for `expires_in` seconds
/// 2. Search: /v1/search?type=track → tracks with album release date, popularity, duration
/// 3. Genres: /v1/artists/{id} → genre strings for the first listed artist
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client as HttpClient, Response};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{SpotifyArtist, SpotifySearchResponse, SpotifyToken, TrackCandidate},
    services::providers::TrackLookup,
};

/// Tokens are refreshed this long before Spotify says they expire
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) < self.expires_at
    }
}

#[derive(Clone)]
pub struct SpotifyProvider {
    http_client: HttpClient,
    client_id: String,
    client_secret: String,
    api_url: String,
    accounts_url: String,
    token: Arc<RwLock<Option<AccessToken>>>,
}

impl SpotifyProvider {
    pub fn new(
        client_id: String,
        client_secret: String,
        api_url: String,
        accounts_url: String,
    ) -> Self {
        Self {
            http_client: HttpClient::new(),
            client_id,
            client_secret,
            api_url: api_url.trim_end_matches('/').to_string(),
            accounts_url: accounts_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns a cached bearer token, requesting a new one when it is close to expiry
    async fn access_token(&self) -> AppResult<String> {
        if let Some(token) = self.token.read().await.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.value.clone());
            }
        }

        let mut guard = self.token.write().await;

        // Another task may have refreshed while we waited for the write lock
        if let Some(token) = guard.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.value.clone());
            }
        }

        let url = format!("{}/api/token", self.accounts_url);
        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let token: SpotifyToken = check_status(response).await?.json().await?;

        tracing::debug!(expires_in = token.expires_in, "Spotify access token refreshed");

        let access = AccessToken {
            value: token.access_token,
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
        };
        let value = access.value.clone();
        *guard = Some(access);

        Ok(value)
    }
}

/// Search expression restricting matches to the given track and artist
pub fn search_query(title: &str, artist: &str) -> String {
    format!("track:{} artist:{}", title.trim(), artist.trim())
}

async fn check_status(response: Response) -> AppResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(AppError::ExternalApi(format!(
        "Spotify API returned status {}: {}",
        status, body
    )))
}

#[async_trait::async_trait]
impl TrackLookup for SpotifyProvider {
    async fn search_tracks(
        &self,
        title: &str,
        artist: &str,
        limit: usize,
    ) -> AppResult<Vec<TrackCandidate>> {
        let token = self.access_token().await?;
        let url = format!("{}/v1/search", self.api_url);
        let query = search_query(title, artist);
        let limit = limit.to_string();

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("q", query.as_str()),
                ("type", "track"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let response_text = check_status(response).await?.text().await?;
        let search: SpotifySearchResponse = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize Spotify search response"
            );
            AppError::ExternalApi(format!("Failed to parse Spotify response: {}", e))
        })?;

        let tracks: Vec<TrackCandidate> = search
            .tracks
            .items
            .into_iter()
            .map(TrackCandidate::from)
            .collect();

        tracing::info!(
            query = %query,
            results = tracks.len(),
            provider = "spotify",
            "Track search completed"
        );

        Ok(tracks)
    }

    async fn artist_genres(&self, artist_id: &str) -> AppResult<Vec<String>> {
        let token = self.access_token().await?;
        let url = format!("{}/v1/artists/{}", self.api_url, artist_id);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await?;

        let artist: SpotifyArtist = check_status(response).await?.json().await?;

        tracing::debug!(
            artist_id = %artist_id,
            genres = artist.genres.len(),
            provider = "spotify",
            "Artist genres fetched"
        );

        Ok(artist.genres)
    }

    fn name(&self) -> &'static str {
        "spotify"
    }
}
