//! Blocking HTTP client for the panel application API.
//!
//! Hides pagination behind [`PanelClient::list_nests`] and
//! [`PanelClient::list_eggs`], and honors a dry-run mode in which the two
//! mutating calls log their intent instead of touching the network.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use eggsync_lib::make_identifier;

use crate::error::PanelError;
use crate::types::{ApiObject, CreateNest, DRY_RUN_NEST_ID, EggSummary, Nest, Page};

const API_BASE: &str = "/api/application";
const PER_PAGE: u32 = 100;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for one panel instance.
pub struct PanelClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    dry_run: bool,
}

impl PanelClient {
    pub fn new(base_url: &str, api_key: &str, dry_run: bool) -> Result<Self, PanelError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            dry_run,
        })
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn url(&self, path: &str) -> String {
        format!("{}{API_BASE}{path}", self.base_url)
    }

    /// Fetch every page of a paginated list endpoint and flatten the
    /// `attributes` envelopes.
    fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, PanelError> {
        let mut results = Vec::new();
        let mut page = 1u32;
        loop {
            let resp = self
                .http
                .get(self.url(path))
                .bearer_auth(&self.api_key)
                .header(reqwest::header::ACCEPT, "application/json")
                .query(&[("per_page", PER_PAGE), ("page", page)])
                .send()?;

            let status = resp.status();
            let text = resp.text()?;
            if !status.is_success() {
                return Err(PanelError::api(status.as_u16(), &text));
            }

            let parsed: Page<T> = serde_json::from_str(&text)?;
            results.extend(parsed.data.into_iter().map(|o| o.attributes));

            if page >= parsed.meta.pagination.total_pages {
                break;
            }
            page += 1;
        }
        Ok(results)
    }

    fn post<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<String, PanelError> {
        let resp = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()?;

        let status = resp.status();
        let text = resp.text()?;
        if !status.is_success() {
            return Err(PanelError::api(status.as_u16(), &text));
        }
        Ok(text)
    }

    /// List all nests on the panel.
    pub fn list_nests(&self) -> Result<Vec<Nest>, PanelError> {
        self.get_all("/nests")
    }

    /// Create a nest.
    ///
    /// In dry-run mode no request is made; the returned record carries the
    /// [`DRY_RUN_NEST_ID`] sentinel. The client does not check for an
    /// existing nest with the same name; callers consult `list_nests` first.
    pub fn create_nest(&self, name: &str, description: &str) -> Result<Nest, PanelError> {
        if self.dry_run {
            log::info!("[dry-run] would create nest '{name}'");
            return Ok(Nest {
                id: DRY_RUN_NEST_ID,
                name: name.to_string(),
                description: Some(description.to_string()),
            });
        }

        let payload = CreateNest {
            name,
            identifier: make_identifier(name),
            description,
        };
        let text = self.post("/nests", &payload)?;
        let created: ApiObject<Nest> = serde_json::from_str(&text)?;
        Ok(created.attributes)
    }

    /// List the eggs already present in a nest.
    pub fn list_eggs(&self, nest_id: i64) -> Result<Vec<EggSummary>, PanelError> {
        self.get_all(&format!("/nests/{nest_id}/eggs"))
    }

    /// Import an egg definition into a nest. The payload is sent verbatim.
    pub fn import_egg(&self, nest_id: i64, egg: &Value) -> Result<Value, PanelError> {
        let name = egg.get("name").and_then(Value::as_str).unwrap_or("?");
        if self.dry_run {
            log::info!("[dry-run] would import egg '{name}' into nest {nest_id}");
            return Ok(Value::Null);
        }

        let text = self.post(&format!("/nests/{nest_id}/eggs/import"), egg)?;
        Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
    }
}
