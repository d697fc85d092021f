//! Angular code generation from extracted design systems.
//!
//! [`TemplateGenerator`] renders one component from its category template,
//! [`GenerationOrchestrator`] runs it over a batch and reports progress, and
//! [`export`] packs the results as files, a zip archive or token sheets.

pub mod export;
pub mod generator;
pub mod orchestrator;
pub mod registry;
mod templates;

pub use export::{
    export_tokens_json, export_tokens_scss, export_zip, import_tokens_json,
    write_component_files,
};
pub use generator::{ComponentRenderer, GeneratedComponent, TemplateGenerator};
pub use orchestrator::{
    BatchOutcome, GenerationFailure, GenerationOptions, GenerationOrchestrator,
    GenerationProgress, GenerationStatus,
};
pub use registry::{CategoryTemplate, Identifiers, TemplateProp, TemplateRegistry};
