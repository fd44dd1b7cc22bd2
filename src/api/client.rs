// src/api/client.rs

use crate::config::Config;
use crate::errors::{BrowserError, BrowserResult};
use reqwest::blocking::{Client, Response};
use serde_json::Value;
use url::Url;

const USER_AGENT: &str = concat!("apartment-browser/", env!("CARGO_PKG_VERSION"));

/// The backend that serves listings and accepts update triggers.
///
/// `Sync` so both listing sets can be fetched from scoped threads.
pub trait ListingsApi: Sync {
    /// `GET /apartments`, the raw decoded payload.
    fn fetch_apartments(&self) -> BrowserResult<Value>;
    /// `GET /apartments/deleted`, the raw decoded payload.
    fn fetch_deleted(&self) -> BrowserResult<Value>;
    /// `POST /update`; returns the backend's message on success.
    fn trigger_update(&self) -> BrowserResult<String>;
}

pub struct HttpListingsApi {
    client: Client,
    base: Url,
}

impl HttpListingsApi {
    pub fn new(config: &Config) -> BrowserResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| BrowserError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base: base_url(&config.api_base)?,
        })
    }

    fn endpoint(&self, path: &str) -> BrowserResult<Url> {
        self.base
            .join(path)
            .map_err(|e| BrowserError::Config(format!("bad endpoint {path:?}: {e}")))
    }

    fn get_json(&self, path: &str) -> BrowserResult<Value> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {url}");

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| BrowserError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BrowserError::Http {
                status: status.as_u16(),
                message: format!("Fetch of {path} failed: {status}"),
            });
        }

        read_json(resp)
    }
}

impl ListingsApi for HttpListingsApi {
    fn fetch_apartments(&self) -> BrowserResult<Value> {
        self.get_json("apartments")
    }

    fn fetch_deleted(&self) -> BrowserResult<Value> {
        self.get_json("apartments/deleted")
    }

    fn trigger_update(&self) -> BrowserResult<String> {
        let url = self.endpoint("update")?;
        tracing::debug!("POST {url}");

        let resp = self
            .client
            .post(url)
            .send()
            .map_err(|e| BrowserError::Network(e.to_string()))?;

        let status = resp.status();
        let body = read_json(resp).unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(BrowserError::Http {
                status: status.as_u16(),
                message: trigger_error_message(status.as_u16(), &body),
            });
        }

        Ok(body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Update initiated.")
            .to_string())
    }
}

fn read_json(resp: Response) -> BrowserResult<Value> {
    let text = resp
        .text()
        .map_err(|e| BrowserError::Network(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| BrowserError::JsonParse(e.to_string()))
}

/// Parses the configured base, making sure relative joins append to it.
fn base_url(raw: &str) -> BrowserResult<Url> {
    let mut base =
        Url::parse(raw).map_err(|e| BrowserError::Config(format!("bad API base {raw:?}: {e}")))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

/// The `error` field of a failed trigger response, or a generic status line.
fn trigger_error_message(status: u16, body: &Value) -> String {
    body.get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP error! status: {status}"))
}
