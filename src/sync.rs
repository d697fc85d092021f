use anyhow::{Context, Result};
use figforge_common::FailurePolicy;
use figforge_core::{reconcile_component_ids, ExtractOptions, ExtractionReport, Extractor};
use figforge_figma::FigmaApi;
use figforge_store::{DesignSystemPatch, DesignSystemStore, SyncHistoryEntry, SyncLog, SyncStatus};
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub extract: ExtractOptions,
    pub policy: FailurePolicy,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::default(),
            policy: FailurePolicy::Continue,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImportedFile {
    pub design_system_id: String,
    pub file_id: String,
    pub name: String,
    pub report: ExtractionReport,
}

#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    pub imported: Vec<ImportedFile>,
    /// (file id, error)
    pub failures: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct ResyncOutcome {
    pub name: String,
    pub report: ExtractionReport,
    /// Components that kept their id from the previous sync
    pub reused_ids: usize,
}

/// Fetch, extract and store each file in order.
///
/// Every attempt is recorded in the sync history. Under `Continue` a failed
/// file is skipped and reported; under `Abort` the first failure is returned
/// (files imported before it stay imported).
pub async fn import_files(
    api: &dyn FigmaApi,
    store: &DesignSystemStore,
    log: &SyncLog,
    file_ids: &[String],
    access_token: &str,
    options: &ImportOptions,
) -> Result<ImportSummary> {
    let extractor = Extractor::new(options.extract.clone());
    let mut summary = ImportSummary::default();

    info!("📥 Importing {} files", file_ids.len());

    for (i, file_id) in file_ids.iter().enumerate() {
        info!("📄 [{}/{}] {}", i + 1, file_ids.len(), file_id);

        match import_one(api, store, &extractor, file_id, access_token).await {
            Ok(imported) => {
                record(
                    log,
                    SyncHistoryEntry::new(
                        imported.design_system_id.as_str(),
                        file_id.as_str(),
                        imported.name.as_str(),
                        SyncStatus::Success,
                    )
                    .with_counts(imported.report.components, token_total(&imported.report)),
                );
                summary.imported.push(imported);
            }
            Err(e) => {
                record(
                    log,
                    SyncHistoryEntry::new("", file_id.as_str(), "", SyncStatus::Error)
                        .with_message(format!("{:#}", e)),
                );

                match options.policy {
                    FailurePolicy::Abort => {
                        error!("❌ Import of {} failed: {:#}", file_id, e);
                        return Err(e.context(format!("Import aborted at file {}", file_id)));
                    }
                    FailurePolicy::Continue => {
                        warn!("⚠️  Skipping {}: {:#}", file_id, e);
                        summary.failures.push((file_id.clone(), format!("{:#}", e)));
                    }
                }
            }
        }
    }

    info!(
        "✅ Imported {} files, {} failed",
        summary.imported.len(),
        summary.failures.len()
    );
    Ok(summary)
}

async fn import_one(
    api: &dyn FigmaApi,
    store: &DesignSystemStore,
    extractor: &Extractor,
    file_id: &str,
    access_token: &str,
) -> Result<ImportedFile> {
    let file = api
        .get_file(file_id)
        .await
        .with_context(|| format!("Failed to fetch file {}", file_id))?;

    let extraction = extractor.extract(&file, file_id, access_token);
    let design_system = extraction.design_system;
    let imported = ImportedFile {
        design_system_id: design_system.id.clone(),
        file_id: file_id.to_string(),
        name: design_system.name.clone(),
        report: extraction.report,
    };

    store.add(design_system)?;
    Ok(imported)
}

/// Re-fetch a stored design system's file and replace its content in place.
///
/// The id and access token are kept; components whose source node survived
/// keep their ids.
pub async fn resync(
    api: &dyn FigmaApi,
    store: &DesignSystemStore,
    log: &SyncLog,
    id: &str,
    extract: &ExtractOptions,
) -> Result<ResyncOutcome> {
    let current = store.require(id)?;

    info!("🔄 Syncing '{}' from file {}", current.name, current.source_file_id);

    let file = match api.get_file(&current.source_file_id).await {
        Ok(file) => file,
        Err(e) => {
            record(
                log,
                SyncHistoryEntry::new(id, current.source_file_id.as_str(), current.name.as_str(), SyncStatus::Error)
                    .with_message(format!("{:#}", e)),
            );
            return Err(e.context(format!("Failed to fetch file {}", current.source_file_id)));
        }
    };

    let extraction = Extractor::new(extract.clone()).extract(
        &file,
        &current.source_file_id,
        &current.access_token,
    );
    let mut fresh = extraction.design_system;
    let reused_ids = reconcile_component_ids(&current.components, &mut fresh.components);
    let name = fresh.name.clone();

    store.update(id, DesignSystemPatch::content_of(fresh))?;
    record(
        log,
        SyncHistoryEntry::new(id, current.source_file_id.as_str(), name.as_str(), SyncStatus::Success)
            .with_counts(extraction.report.components, token_total(&extraction.report)),
    );

    info!(
        "✅ Synced '{}': {} components ({} kept their id)",
        name, extraction.report.components, reused_ids
    );
    Ok(ResyncOutcome {
        name,
        report: extraction.report,
        reused_ids,
    })
}

fn token_total(report: &ExtractionReport) -> usize {
    report.colors + report.typography + report.spacing
}

/// History is best effort; a failed write never fails the sync itself.
fn record(log: &SyncLog, entry: SyncHistoryEntry) {
    if let Err(e) = log.record(entry) {
        warn!("⚠️  Could not record sync history: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use figforge_figma::{FigmaUser, FileVersion, ImagesResponse, ProjectFile, ProjectSummary};
    use figforge_store::{KeyValueStorage, MemoryStorage};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MockFigma {
        files: Mutex<HashMap<String, Value>>,
    }

    impl MockFigma {
        fn with_file(self, id: &str, file: Value) -> Self {
            self.files.lock().unwrap().insert(id.to_string(), file);
            self
        }
    }

    #[async_trait]
    impl FigmaApi for MockFigma {
        async fn me(&self) -> anyhow::Result<FigmaUser> {
            Ok(FigmaUser::default())
        }

        async fn get_file(&self, file_id: &str) -> anyhow::Result<Value> {
            match self.files.lock().unwrap().get(file_id) {
                Some(file) => Ok(file.clone()),
                None => anyhow::bail!("Figma API error (404 Not Found) on files/{}", file_id),
            }
        }

        async fn get_images(&self, _: &str, _: &[String]) -> anyhow::Result<ImagesResponse> {
            Ok(ImagesResponse::default())
        }

        async fn get_file_versions(&self, _: &str) -> anyhow::Result<Vec<FileVersion>> {
            Ok(Vec::new())
        }

        async fn get_team_projects(&self, _: &str) -> anyhow::Result<Vec<ProjectSummary>> {
            Ok(Vec::new())
        }

        async fn get_project_files(&self, _: &str) -> anyhow::Result<Vec<ProjectFile>> {
            Ok(Vec::new())
        }
    }

    fn kit(name: &str, components: Value) -> Value {
        json!({ "name": name, "document": { "type": "DOCUMENT", "children": [] }, "components": components, "styles": {} })
    }

    fn setup() -> (DesignSystemStore, SyncLog) {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        (
            DesignSystemStore::open(storage.clone()),
            SyncLog::new(storage),
        )
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_import_continues_past_failures() {
        let api = MockFigma::default()
            .with_file("a", kit("Kit A", json!({ "1:1": { "name": "Buttons/Primary" } })))
            .with_file("c", kit("Kit C", json!({})));
        let (store, log) = setup();

        let summary = import_files(&api, &store, &log, &ids(&["a", "b", "c"]), "tok", &ImportOptions::default())
            .await
            .unwrap();

        assert_eq!(summary.imported.len(), 2);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].0, "b");
        assert_eq!(store.len(), 2);

        let history = log.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].file_id, "c");
        assert_eq!(history[1].status, SyncStatus::Error);
    }

    #[tokio::test]
    async fn test_import_abort_stops_at_first_failure() {
        let api = MockFigma::default().with_file("a", kit("Kit A", json!({})));
        let (store, log) = setup();
        let options = ImportOptions {
            policy: FailurePolicy::Abort,
            ..Default::default()
        };

        let result = import_files(&api, &store, &log, &ids(&["a", "missing", "a"]), "tok", &options).await;

        assert!(result.is_err());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_resync_keeps_ids() {
        let api = MockFigma::default().with_file(
            "f",
            kit("Kit", json!({ "1:1": { "name": "Buttons/Primary" }, "1:2": { "name": "Cards/Basic" } })),
        );
        let (store, log) = setup();
        import_files(&api, &store, &log, &ids(&["f"]), "tok", &ImportOptions::default())
            .await
            .unwrap();
        let before = store.snapshot().remove(0);

        let api = api.with_file(
            "f",
            kit("Kit v2", json!({ "1:1": { "name": "Buttons/Primary" }, "2:1": { "name": "Icons/Star" } })),
        );
        let outcome = resync(&api, &store, &log, &before.id, &ExtractOptions::default())
            .await
            .unwrap();

        assert_eq!(outcome.reused_ids, 1);
        assert_eq!(store.len(), 1);

        let after = store.get(&before.id).unwrap();
        assert_eq!(after.name, "Kit v2");
        assert_eq!(after.access_token, "tok");
        assert_eq!(after.components[0].id, before.components[0].id);
        assert_eq!(after.components[1].name, "Icons/Star");
        assert_eq!(log.history().len(), 2);
    }

    #[tokio::test]
    async fn test_resync_unknown_id() {
        let (store, log) = setup();
        let result = resync(&MockFigma::default(), &store, &log, "nope", &ExtractOptions::default()).await;
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<figforge_common::ForgeError>(),
            Some(figforge_common::ForgeError::NotFound(_))
        ));
        assert!(log.history().is_empty());
    }
}
