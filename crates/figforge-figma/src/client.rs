use crate::{
    FigmaApi, FigmaConfig, FigmaUser, FileVersion, ImagesResponse, ProjectFile, ProjectSummary,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info};

pub struct FigmaClient {
    config: FigmaConfig,
    client: reqwest::Client,
}

impl FigmaClient {
    pub fn new(config: FigmaConfig) -> Result<Self> {
        if config.auth.token().trim().is_empty() {
            anyhow::bail!("Figma access token is required");
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { config, client })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(FigmaConfig::from_env()?)
    }

    pub fn config(&self) -> &FigmaConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self.url(path);
        let (header, value) = self.config.auth.header();

        debug!("GET {}", url);
        let start = Instant::now();

        let response = self
            .client
            .get(&url)
            .header(header, value)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to Figma API ({})", path))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Figma API error ({}) on {}: {}", status, path, error_text);
        }

        let json: Value = response
            .json()
            .await
            .with_context(|| format!("Failed to parse Figma API response ({})", path))?;

        debug!("GET {} finished in {:?}", path, start.elapsed());
        Ok(json)
    }
}

/// Decode the array under `field` of a list response.
fn list_field<T: DeserializeOwned>(mut json: Value, field: &str) -> Result<Vec<T>> {
    let list = json
        .get_mut(field)
        .map(Value::take)
        .with_context(|| format!("Unexpected Figma response: no '{}' field", field))?;
    serde_json::from_value(list).with_context(|| format!("Unexpected {} response", field))
}

#[async_trait]
impl FigmaApi for FigmaClient {
    async fn me(&self) -> Result<FigmaUser> {
        let json = self.get_json("me", &[]).await?;
        let user: FigmaUser = serde_json::from_value(json).context("Unexpected /me response")?;
        info!("🔑 Connected to Figma as {}", user.handle);
        Ok(user)
    }

    async fn get_file(&self, file_id: &str) -> Result<Value> {
        info!("📥 Fetching Figma file {}", file_id);
        self.get_json(&format!("files/{}", file_id), &[]).await
    }

    async fn get_images(&self, file_id: &str, node_ids: &[String]) -> Result<ImagesResponse> {
        let json = self
            .get_json(
                &format!("images/{}", file_id),
                &[("ids", node_ids.join(","))],
            )
            .await?;
        let images: ImagesResponse =
            serde_json::from_value(json).context("Unexpected images response")?;

        if let Some(err) = &images.err {
            anyhow::bail!("Figma image render failed for {}: {}", file_id, err);
        }
        Ok(images)
    }

    async fn get_file_versions(&self, file_id: &str) -> Result<Vec<FileVersion>> {
        let json = self
            .get_json(&format!("files/{}/versions", file_id), &[])
            .await?;
        list_field(json, "versions")
    }

    async fn get_team_projects(&self, team_id: &str) -> Result<Vec<ProjectSummary>> {
        let json = self
            .get_json(&format!("teams/{}/projects", team_id), &[])
            .await?;
        list_field(json, "projects")
    }

    async fn get_project_files(&self, project_id: &str) -> Result<Vec<ProjectFile>> {
        let json = self
            .get_json(&format!("projects/{}/files", project_id), &[])
            .await?;
        list_field(json, "files")
    }
}
