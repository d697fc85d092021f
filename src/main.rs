mod sync;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use figforge_codegen::{
    export_tokens_json, export_tokens_scss, export_zip, write_component_files, BatchOutcome,
    GenerationOptions, GenerationOrchestrator, GenerationProgress, GenerationStatus,
    TemplateGenerator,
};
use figforge_common::FailurePolicy;
use figforge_core::{DesignSystem, ExtractOptions, TokenValues};
use figforge_figma::{FigmaApi, FigmaAuth, FigmaClient, FigmaConfig};
use figforge_store::{
    DesignSystemPatch, DesignSystemStore, KeyValueStorage, SqliteStorage, SyncLog, SyncStatus,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "figforge",
    version,
    about = "Extract design systems from Figma files and generate Angular components"
)]
struct Cli {
    /// State database
    #[arg(long, env = "FIGFORGE_DB", default_value = ".figforge/state.db", global = true)]
    db: PathBuf,

    /// Figma API base URL
    #[arg(long, env = "FIGMA_API_URL", global = true)]
    api_url: Option<String>,

    /// How tokens are sent: `personal` (X-Figma-Token) or `oauth` (Bearer)
    #[arg(long, env = "FIGMA_AUTH", default_value = "personal", global = true)]
    auth: String,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that a token can reach the Figma API
    Connect {
        #[arg(long, env = "FIGMA_ACCESS_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    /// Extract and store design systems from Figma files
    Import {
        #[arg(required = true)]
        file_ids: Vec<String>,
        #[arg(long, env = "FIGMA_ACCESS_TOKEN", hide_env_values = true)]
        token: Option<String>,
        #[arg(long, default_value = "continue")]
        policy: FailurePolicy,
        #[command(flatten)]
        extract: ExtractArgs,
    },
    /// List stored design systems
    List,
    /// Show one design system
    Show { id: String },
    /// Re-fetch a design system from Figma and replace its content
    Sync {
        id: String,
        #[command(flatten)]
        extract: ExtractArgs,
    },
    /// Remove a stored design system
    Delete { id: String },
    /// Generate Angular components
    Generate {
        id: String,
        /// Only this component
        #[arg(long)]
        component: Option<String>,
        /// Write component folders here
        #[arg(long)]
        out: Option<PathBuf>,
        /// Write a zip archive here
        #[arg(long)]
        zip: Option<PathBuf>,
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
        #[arg(long, default_value = "abort")]
        policy: FailurePolicy,
        /// Store the generated code on the design system
        #[arg(long)]
        save: bool,
    },
    /// Export design tokens
    Tokens {
        id: String,
        #[arg(long, value_enum, default_value_t = TokenFormat::Json)]
        format: TokenFormat,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Recent syncs, newest first
    History {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Show or change sync settings
    Settings {
        #[arg(long)]
        auto_sync: Option<bool>,
        #[arg(long)]
        interval: Option<u32>,
    },
    /// Totals across stored design systems
    Stats,
    /// List a team's projects
    Projects {
        #[arg(long)]
        team: String,
        #[arg(long, env = "FIGMA_ACCESS_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    /// List a project's files
    Files {
        #[arg(long)]
        project: String,
        #[arg(long, env = "FIGMA_ACCESS_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    /// List a file's version history
    Versions {
        file_id: String,
        #[arg(long, env = "FIGMA_ACCESS_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    /// Render nodes to image URLs
    Images {
        file_id: String,
        #[arg(required = true)]
        node_ids: Vec<String>,
        #[arg(long, env = "FIGMA_ACCESS_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
}

#[derive(clap::Args)]
struct ExtractArgs {
    /// Leave the component list empty when the file has none
    #[arg(long)]
    no_placeholders: bool,
    /// Do not read token values from the document
    #[arg(long)]
    placeholder_tokens: bool,
}

impl ExtractArgs {
    fn options(&self) -> ExtractOptions {
        ExtractOptions {
            token_values: if self.placeholder_tokens {
                TokenValues::Placeholder
            } else {
                TokenValues::Resolve
            },
            placeholder_components: !self.no_placeholders,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TokenFormat {
    Json,
    Scss,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "❌ Error:".red().bold(), e);
        std::process::exit(1);
    }
}

struct App {
    store: DesignSystemStore,
    log: SyncLog,
    api_url: Option<String>,
    auth: String,
}

impl App {
    fn open(cli: &Cli) -> Result<Self> {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(
            SqliteStorage::open(&cli.db)
                .with_context(|| format!("Failed to open state database {}", cli.db.display()))?,
        );
        Ok(Self {
            store: DesignSystemStore::open(storage.clone()),
            log: SyncLog::new(storage),
            api_url: cli.api_url.clone(),
            auth: cli.auth.clone(),
        })
    }

    fn client(&self, token: Option<String>) -> Result<FigmaClient> {
        let token = token.context("No Figma token: pass --token or set FIGMA_ACCESS_TOKEN")?;
        let mut config = FigmaConfig {
            auth: FigmaAuth::from_kind(&self.auth, token)?,
            ..Default::default()
        };
        if let Some(url) = self.api_url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        FigmaClient::new(config)
    }

    fn design_system(&self, id: &str) -> Result<DesignSystem> {
        Ok(self.store.require(id)?)
    }
}

async fn run(cli: Cli) -> Result<()> {
    let app = App::open(&cli)?;

    match cli.command {
        Command::Connect { token } => {
            let user = app.client(token)?.me().await?;
            println!(
                "{} Connected as {} <{}>",
                "✓".green().bold(),
                user.handle.bold(),
                user.email
            );
        }

        Command::Import {
            file_ids,
            token,
            policy,
            extract,
        } => {
            let client = app.client(token)?;
            let options = sync::ImportOptions {
                extract: extract.options(),
                policy,
            };
            let summary = sync::import_files(
                &client,
                &app.store,
                &app.log,
                &file_ids,
                client.config().auth.token(),
                &options,
            )
            .await?;

            for imported in &summary.imported {
                let note = if imported.report.placeholder_components {
                    " (placeholder components)".yellow().to_string()
                } else {
                    String::new()
                };
                println!(
                    "{} {} {}: {} components, {} tokens{}",
                    "✓".green().bold(),
                    imported.name.bold(),
                    imported.design_system_id.dimmed(),
                    imported.report.components,
                    imported.report.colors + imported.report.typography + imported.report.spacing,
                    note
                );
            }
            for (file_id, error) in &summary.failures {
                println!("{} {}: {}", "✗".red().bold(), file_id, error);
            }
            println!(
                "\nImported {}, failed {}",
                summary.imported.len().to_string().green(),
                summary.failures.len().to_string().red()
            );
        }

        Command::List => {
            let systems = app.store.snapshot();
            if systems.is_empty() {
                println!("No design systems yet. Run `figforge import <FILE_ID>`.");
            }
            for ds in systems {
                println!(
                    "{}  {}  {} components, {} tokens, synced {}",
                    ds.id.dimmed(),
                    ds.name.bold(),
                    ds.components.len(),
                    ds.token_count(),
                    ds.last_sync.format("%Y-%m-%d %H:%M")
                );
            }
        }

        Command::Show { id } => print_design_system(&app.design_system(&id)?),

        Command::Sync { id, extract } => {
            // Each design system syncs with the token it was imported with
            let ds = app.design_system(&id)?;
            let client = app.client(Some(ds.access_token.clone()))?;
            let outcome =
                sync::resync(&client, &app.store, &app.log, &id, &extract.options()).await?;
            println!(
                "{} Synced {}: {} components ({} unchanged ids)",
                "✓".green().bold(),
                outcome.name.bold(),
                outcome.report.components,
                outcome.reused_ids
            );
        }

        Command::Delete { id } => {
            if app.store.delete(&id)? {
                println!("{} Deleted {}", "✓".green().bold(), id);
            } else {
                println!("{} No design system with id {}", "!".yellow().bold(), id);
            }
        }

        Command::Generate {
            id,
            component,
            out,
            zip,
            delay_ms,
            policy,
            save,
        } => {
            let ds = app.design_system(&id)?;
            let options = GenerationOptions {
                item_delay: Duration::from_millis(delay_ms),
                policy,
            };
            let outcome = generate(&ds, component.as_deref(), options).await?;

            if save {
                save_generated(&app.store, &ds, component.as_deref(), &outcome)?;
                println!("{} Saved generated code to {}", "✓".green().bold(), ds.name);
            }
            if let Some(dir) = out {
                let written = write_component_files(&dir, &outcome.generated, &ds.tokens)?;
                println!("{} Wrote {} files to {}", "✓".green().bold(), written.len(), dir.display());
            }
            if let Some(path) = zip {
                let bytes = export_zip(&outcome.generated, &ds.tokens)?;
                std::fs::write(&path, bytes)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("{} Wrote {}", "✓".green().bold(), path.display());
            }
            for failure in &outcome.failures {
                println!(
                    "{} [{}] {}: {}",
                    "✗".red().bold(),
                    failure.index,
                    failure.name,
                    failure.error
                );
            }
        }

        Command::Tokens { id, format, out } => {
            let ds = app.design_system(&id)?;
            let text = match format {
                TokenFormat::Json => export_tokens_json(&ds.tokens)?,
                TokenFormat::Scss => export_tokens_scss(&ds.tokens),
            };
            match out {
                Some(path) => {
                    std::fs::write(&path, text)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("{} Wrote {}", "✓".green().bold(), path.display());
                }
                None => println!("{}", text),
            }
        }

        Command::History { limit } => {
            let history = app.log.history();
            if history.is_empty() {
                println!("No syncs recorded.");
            }
            for entry in history.iter().take(limit) {
                let status = match entry.status {
                    SyncStatus::Success => "ok".green(),
                    SyncStatus::Error => "error".red(),
                };
                println!(
                    "{}  {:5}  {} ({})  {} components, {} tokens{}",
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    status,
                    entry.file_name,
                    entry.file_id.dimmed(),
                    entry.components,
                    entry.tokens,
                    entry
                        .message
                        .as_deref()
                        .map(|m| format!("  {}", m))
                        .unwrap_or_default()
                );
            }
        }

        Command::Settings {
            auto_sync,
            interval,
        } => {
            let settings = if auto_sync.is_some() || interval.is_some() {
                app.log.update_settings(auto_sync, interval)?
            } else {
                app.log.settings()
            };
            println!("auto sync: {}", settings.auto_sync);
            println!("interval:  {} minutes", settings.interval_minutes);
        }

        Command::Stats => {
            let stats = app.store.stats();
            println!("connected files: {}", stats.connected_files.to_string().bold());
            println!("components:      {}", stats.components.to_string().bold());
            println!("design tokens:   {}", stats.design_tokens.to_string().bold());
            println!("generated files: {}", stats.generated_files.to_string().bold());
        }

        Command::Projects { team, token } => {
            for project in app.client(token)?.get_team_projects(&team).await? {
                println!("{}  {}", project.id.dimmed(), project.name);
            }
        }

        Command::Files { project, token } => {
            for file in app.client(token)?.get_project_files(&project).await? {
                println!(
                    "{}  {}  {}",
                    file.key.dimmed(),
                    file.name,
                    file.last_modified.unwrap_or_default()
                );
            }
        }

        Command::Versions { file_id, token } => {
            for version in app.client(token)?.get_file_versions(&file_id).await? {
                let author = version.user.map(|u| u.handle).unwrap_or_default();
                println!(
                    "{}  {}  {}  {}",
                    version.id.dimmed(),
                    version.created_at,
                    version.label.unwrap_or_default().bold(),
                    author
                );
            }
        }

        Command::Images {
            file_id,
            node_ids,
            token,
        } => {
            let images = app.client(token)?.get_images(&file_id, &node_ids).await?;
            for node_id in &node_ids {
                match images.images.get(node_id).cloned().flatten() {
                    Some(url) => println!("{}  {}", node_id, url),
                    None => println!("{}  {}", node_id, "not rendered".yellow()),
                }
            }
        }
    }

    Ok(())
}

async fn generate(
    ds: &DesignSystem,
    component: Option<&str>,
    options: GenerationOptions,
) -> Result<BatchOutcome> {
    let target = match component {
        Some(name) => Some(
            ds.find_component(name)
                .with_context(|| format!("No component named '{}' in {}", name, ds.name))?,
        ),
        None => None,
    };

    let orchestrator = GenerationOrchestrator::new(Arc::new(TemplateGenerator::new()), options);
    let printer = tokio::spawn(print_progress(orchestrator.subscribe()));

    let result = match target {
        Some(target) => orchestrator
            .generate_one(target)
            .await
            .map(|generated| BatchOutcome {
                generated: vec![generated],
                failures: Vec::new(),
            }),
        None => orchestrator.generate_system(ds).await,
    };

    // Closing the channel ends the printer
    drop(orchestrator);
    let _ = printer.await;

    Ok(result?)
}

async fn print_progress(mut rx: broadcast::Receiver<GenerationProgress>) {
    loop {
        match rx.recv().await {
            Ok(progress) => match progress.status {
                GenerationStatus::Generating if progress.current > 0 => println!(
                    "{} [{}/{}] {}",
                    "→".cyan(),
                    progress.current,
                    progress.total,
                    progress.current_component
                ),
                GenerationStatus::Error => println!(
                    "{} [{}/{}] {}",
                    "✗".red().bold(),
                    progress.current,
                    progress.total,
                    progress.message
                ),
                GenerationStatus::Completed => {
                    println!("{} {}", "✓".green().bold(), progress.message)
                }
                _ => {}
            },
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Write generated sources back onto the stored components.
fn save_generated(
    store: &DesignSystemStore,
    ds: &DesignSystem,
    only: Option<&str>,
    outcome: &BatchOutcome,
) -> Result<()> {
    let mut components = ds.components.clone();

    match only {
        Some(name) => {
            let target = ds
                .find_component(name)
                .and_then(|found| components.iter_mut().find(|c| c.id == found.id));
            if let (Some(target), Some(generated)) = (target, outcome.generated.first()) {
                generated.apply_to(target);
            }
        }
        None => {
            let failed: Vec<usize> = outcome.failures.iter().map(|f| f.index).collect();
            let succeeded = components
                .iter_mut()
                .enumerate()
                .filter(|(i, _)| !failed.contains(&(i + 1)))
                .map(|(_, c)| c);
            for (component, generated) in succeeded.zip(&outcome.generated) {
                generated.apply_to(component);
            }
        }
    }

    store.update(
        &ds.id,
        DesignSystemPatch {
            components: Some(components),
            ..Default::default()
        },
    )?;
    Ok(())
}

fn print_design_system(ds: &DesignSystem) {
    println!("{}", ds.name.bold());
    println!("  id:        {}", ds.id);
    println!("  file:      {}", ds.source_file_id);
    println!("  last sync: {}", ds.last_sync.to_rfc3339());
    println!("  language:  {:?}", ds.language);

    println!("\n{} ({})", "Components".bold(), ds.components.len());
    for component in &ds.components {
        let mark = if component.is_generated() {
            "generated".green()
        } else {
            "pending".dimmed()
        };
        println!("  {:40} {:12} {}", component.name, component.category, mark);
    }

    println!("\n{} ({})", "Colors".bold(), ds.tokens.colors.len());
    for color in &ds.tokens.colors {
        println!("  {:30} {:24} {}", color.name, color.value, color.category.dimmed());
    }

    println!("\n{} ({})", "Typography".bold(), ds.tokens.typography.len());
    for t in &ds.tokens.typography {
        println!(
            "  {:30} {} {} / {} / {}",
            t.name, t.font_family, t.font_size, t.font_weight, t.line_height
        );
    }

    println!("\n{} ({})", "Spacing".bold(), ds.tokens.spacing.len());
    for s in &ds.tokens.spacing {
        println!("  {:30} {}", s.name, s.value);
    }
}
