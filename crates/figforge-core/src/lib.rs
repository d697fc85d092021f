pub mod defaults;
pub mod extractor;
pub mod naming;
pub mod types;

pub use extractor::{
    ComponentSource, ExtractOptions, Extraction, ExtractionReport, Extractor, TokenValues,
};
pub use types::{
    new_id, reconcile_component_ids, Category, ColorToken, DesignComponent, DesignSystem,
    DesignTokens, Language, SpacingToken, TypographyToken,
};
