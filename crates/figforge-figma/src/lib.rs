use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::time::Duration;

mod client;

pub use client::FigmaClient;

pub const DEFAULT_API_URL: &str = "https://api.figma.com/v1";

/// How requests authenticate against the Figma API
#[derive(Debug, Clone, PartialEq)]
pub enum FigmaAuth {
    /// Personal access token, sent as `X-Figma-Token`
    PersonalToken(String),
    /// OAuth access token, sent as `Authorization: Bearer ...`
    OAuth(String),
}

impl FigmaAuth {
    pub fn token(&self) -> &str {
        match self {
            FigmaAuth::PersonalToken(token) | FigmaAuth::OAuth(token) => token,
        }
    }

    /// `personal` or `oauth`, as given to `--auth` or `FIGMA_AUTH`.
    /// An empty kind means a personal token.
    pub fn from_kind(kind: &str, token: impl Into<String>) -> Result<Self> {
        match kind.trim().to_lowercase().as_str() {
            "" | "personal" => Ok(FigmaAuth::PersonalToken(token.into())),
            "oauth" => Ok(FigmaAuth::OAuth(token.into())),
            other => anyhow::bail!(
                "Unknown Figma auth kind '{}', expected 'personal' or 'oauth'",
                other
            ),
        }
    }

    pub fn header(&self) -> (&'static str, String) {
        match self {
            FigmaAuth::PersonalToken(token) => ("X-Figma-Token", token.clone()),
            FigmaAuth::OAuth(token) => ("Authorization", format!("Bearer {}", token)),
        }
    }
}

/// Configuration for the Figma client
#[derive(Debug, Clone)]
pub struct FigmaConfig {
    pub auth: FigmaAuth,
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for FigmaConfig {
    fn default() -> Self {
        Self {
            auth: FigmaAuth::PersonalToken(String::new()),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl FigmaConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            auth: FigmaAuth::PersonalToken(token.into()),
            ..Default::default()
        }
    }

    /// Reads `FIGMA_ACCESS_TOKEN` and, if set, `FIGMA_AUTH` and `FIGMA_API_URL`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("FIGMA_ACCESS_TOKEN")
            .context("FIGMA_ACCESS_TOKEN environment variable not set")?;
        let kind = std::env::var("FIGMA_AUTH").unwrap_or_default();

        let mut config = Self {
            auth: FigmaAuth::from_kind(&kind, token)?,
            ..Default::default()
        };
        if let Ok(url) = std::env::var("FIGMA_API_URL") {
            if !url.trim().is_empty() {
                config.api_url = url.trim().trim_end_matches('/').to_string();
            }
        }
        Ok(config)
    }
}

/// The authenticated user, returned by `GET /me`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FigmaUser {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub handle: String,
    pub email: String,
    pub img_url: String,
}

/// Rendered image URLs keyed by node id, returned by `GET /images/:file`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesResponse {
    pub err: Option<String>,
    pub images: HashMap<String, Option<String>>,
    pub status: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVersion {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub created_at: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub user: Option<FigmaUser>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFile {
    pub key: String,
    pub name: String,
    pub thumbnail_url: Option<String>,
    pub last_modified: Option<String>,
}

/// Figma ids show up as strings in some endpoints and as numbers in others.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Read-only view of the Figma REST API used by the importer.
#[async_trait]
pub trait FigmaApi: Send + Sync {
    /// Connection test: who does this token belong to.
    async fn me(&self) -> Result<FigmaUser>;

    /// The full file document (node tree plus `components` and `styles` maps).
    async fn get_file(&self, file_id: &str) -> Result<serde_json::Value>;

    async fn get_images(&self, file_id: &str, node_ids: &[String]) -> Result<ImagesResponse>;

    async fn get_file_versions(&self, file_id: &str) -> Result<Vec<FileVersion>>;

    async fn get_team_projects(&self, team_id: &str) -> Result<Vec<ProjectSummary>>;

    async fn get_project_files(&self, project_id: &str) -> Result<Vec<ProjectFile>>;
}
