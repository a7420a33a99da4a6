use crate::api::models::{project_entries, ProjectListEntry};
use crate::api::{ApiError, GridSource};
use crate::config::ApiConfig;
use crate::inventory::{ProjectChoice, Variant};
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

const USER_AGENT: &str = concat!("sales-matrix/", env!("CARGO_PKG_VERSION"));

/// Blocking client for the sales REST backend.
pub struct RestSource {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl RestSource {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base = Url::parse(&config.base_url).map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base,
            token: config.token.clone(),
        })
    }

    /// Appends path segments to the base URL, keeping the trailing slash the
    /// backend routes expect.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::Network(format!("cannot use {} as a base URL", self.base)))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn get_json(&self, url: Url, query: &[(String, String)]) -> Result<Value, ApiError> {
        debug!(%url, params = query.len(), "GET sales api");

        let resp = self
            .authorized(self.client.get(url))
            .query(query)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp.text().map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::JsonParse(e.to_string()))
    }
}

impl GridSource for RestSource {
    fn project_choices(&self, variant: Variant) -> Result<Vec<ProjectChoice>, ApiError> {
        let payload = self.get_json(self.endpoint(&["projects", ""])?, &[])?;
        let entries =
            project_entries(payload).map_err(|e| ApiError::JsonParse(e.to_string()))?;

        let choices: Vec<ProjectChoice> = entries
            .into_iter()
            .filter(|e| e.is_variant(variant))
            .filter_map(ProjectListEntry::into_choice)
            .collect();

        info!(%variant, count = choices.len(), "loaded project choices");
        Ok(choices)
    }

    fn fetch_grid(
        &self,
        variant: Variant,
        project_id: &str,
        query: &[(String, String)],
    ) -> Result<Value, ApiError> {
        match variant {
            Variant::Flat => {
                let url = self.endpoint(&["multi-flat", "projects", project_id, "grid", ""])?;
                self.get_json(url, query)
            }
            Variant::Plot => {
                let url = self.endpoint(&["sales", "multi-plot"])?;
                let mut params = vec![("project_id".to_string(), project_id.to_string())];
                params.extend_from_slice(query);
                self.get_json(url, &params)
            }
        }
    }
}
