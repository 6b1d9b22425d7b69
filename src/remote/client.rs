//! Blocking HTTP client for the song collection.
//!
//! The store is a plain REST collection: `GET base`, `GET base?artist_like=..`,
//! `POST base`, `PATCH base/:id`, `DELETE base/:id`.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::board::EntryId;
use crate::config::RemoteSettings;

use super::error::{GatewayError, GatewayResult};
use super::types::{RecordPatch, RemoteRecord, SearchFilter};

const JSON_UTF8: &str = "application/json; charset=UTF-8";

/// Parse and check the configured collection URL.
pub fn collection_url(base: &str) -> GatewayResult<Url> {
    let url = Url::parse(base.trim()).map_err(|e| GatewayError::InvalidUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(GatewayError::InvalidUrl {
            url: base.to_string(),
            reason: "expected an http(s) collection url".to_string(),
        });
    }
    Ok(url)
}

/// `base/<id>`, with the id percent-encoded as one path segment.
pub fn item_url(base: &Url, id: &EntryId) -> GatewayResult<Url> {
    let mut url = base.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|_| GatewayError::InvalidUrl {
            url: base.to_string(),
            reason: "collection url cannot take path segments".to_string(),
        })?
        .pop_if_empty()
        .push(&id.to_string());
    Ok(url)
}

/// `base?artist_like=..&name_like=..`; absent filters are left out.
pub fn search_url(base: &Url, filter: &SearchFilter) -> Url {
    let mut url = base.clone();
    if filter.is_empty() {
        return url;
    }
    {
        let mut pairs = url.query_pairs_mut();
        if let Some(artist) = &filter.artist_like {
            pairs.append_pair("artist_like", artist);
        }
        if let Some(name) = &filter.name_like {
            pairs.append_pair("name_like", name);
        }
    }
    url
}

pub struct StoreClient {
    http: Client,
    base: Url,
}

impl StoreClient {
    /// Build a client for the configured collection. A `timeout_ms` of 0
    /// means requests never time out.
    pub fn new(settings: &RemoteSettings) -> GatewayResult<Self> {
        let base = collection_url(&settings.base_url)?;
        let timeout = (settings.timeout_ms > 0).then(|| Duration::from_millis(settings.timeout_ms));
        let http = Client::builder()
            .user_agent(concat!("musictop/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|source| GatewayError::Transport {
                url: base.to_string(),
                source,
            })?;
        Ok(Self { http, base })
    }

    pub(crate) fn with_http(base: Url, http: Client) -> Self {
        Self { http, base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn fetch_all(&self) -> GatewayResult<Vec<RemoteRecord>> {
        let url = self.base.clone();
        self.send_json("GET", self.http.get(url.clone()), &url)
    }

    pub fn fetch_filtered(&self, filter: &SearchFilter) -> GatewayResult<Vec<RemoteRecord>> {
        let url = search_url(&self.base, filter);
        self.send_json("GET", self.http.get(url.clone()), &url)
    }

    /// Create `record`; returns the store's canonical copy.
    pub fn create(&self, record: &RemoteRecord) -> GatewayResult<RemoteRecord> {
        let url = self.base.clone();
        let body = encode(record, &url)?;
        let req = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, JSON_UTF8)
            .body(body);
        self.send_json("POST", req, &url)
    }

    pub fn remove(&self, id: &EntryId) -> GatewayResult<()> {
        let url = item_url(&self.base, id)?;
        self.send("DELETE", self.http.delete(url.clone()), &url)
            .map(|_| ())
    }

    /// Apply `patch` to record `id`; returns the full updated record.
    pub fn update(&self, id: &EntryId, patch: &RecordPatch) -> GatewayResult<RemoteRecord> {
        let url = item_url(&self.base, id)?;
        let body = encode(patch, &url)?;
        let req = self
            .http
            .patch(url.clone())
            .header(CONTENT_TYPE, JSON_UTF8)
            .body(body);
        self.send_json("PATCH", req, &url)
    }

    fn send(
        &self,
        method: &'static str,
        req: RequestBuilder,
        url: &Url,
    ) -> GatewayResult<reqwest::blocking::Response> {
        debug!(method, %url, "store request");
        let resp = req.send().map_err(|source| GatewayError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                method,
                url: url.to_string(),
                status,
            });
        }
        Ok(resp)
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        method: &'static str,
        req: RequestBuilder,
        url: &Url,
    ) -> GatewayResult<T> {
        let resp = self.send(method, req, url)?;
        let text = resp.text().map_err(|source| GatewayError::Transport {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| GatewayError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

fn encode<T: serde::Serialize>(value: &T, url: &Url) -> GatewayResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|source| GatewayError::Decode {
        url: url.to_string(),
        source,
    })
}
