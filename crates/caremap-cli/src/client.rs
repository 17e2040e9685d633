use anyhow::{Context, Result};
use caremap_api::ErrorBody;
use reqwest::StatusCode;
use serde_json::Value;

pub struct CaremapClient {
    http: reqwest::Client,
    base_url: String,
}

impl CaremapClient {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await
            .context("Failed to connect to server")?;
        handle_response(resp).await
    }

    pub async fn doctors(&self) -> Result<Value> {
        self.get("/api/doctors", &[]).await
    }

    pub async fn doctor(&self, id: i64) -> Result<Value> {
        self.get(&format!("/api/doctors/{id}"), &[]).await
    }

    pub async fn facilities(&self, params: &[(&str, String)]) -> Result<Value> {
        self.get("/api/facilities", params).await
    }

    pub async fn facility(&self, id: i64) -> Result<Value> {
        self.get(&format!("/api/facilities/{id}"), &[]).await
    }

    pub async fn route(&self, from_lat: f64, from_lon: f64, to_lat: f64, to_lon: f64) -> Result<Value> {
        let params = [
            ("fromLat", from_lat.to_string()),
            ("fromLon", from_lon.to_string()),
            ("toLat", to_lat.to_string()),
            ("toLon", to_lon.to_string()),
        ];
        self.get("/api/route", &params).await
    }

    /// Status code and body of a health endpoint (`/healthz`, `/readyz`).
    pub async fn check(&self, path: &str) -> Result<(u16, String)> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to connect to server")?;
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Ok((status, body))
    }
}

async fn handle_response(resp: reqwest::Response) -> Result<Value> {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();

    if !status.is_success() {
        anyhow::bail!(error_message(status, &body));
    }

    if body.is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body).context("Failed to parse response JSON")
}

/// `HTTP <status>: <message>`, using the server's error body when there is one.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => format!("HTTP {status}: {}", err.error.message),
        Err(_) if body.trim().is_empty() => format!("HTTP {status}"),
        Err(_) => format!("HTTP {status}: {body}"),
    }
}
