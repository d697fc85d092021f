use crate::generator::{GeneratedComponent, TemplateGenerator};
use figforge_common::{ForgeError, Result};
use figforge_core::naming::to_kebab_case;
use figforge_core::{Category, DesignComponent, DesignTokens};
use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

pub const TOKENS_SCSS_PATH: &str = "styles/_tokens.scss";

/// One file of the export layout, relative to the export root.
struct ExportEntry {
    path: String,
    contents: String,
}

/// Zip archive with one folder per component plus the token stylesheet.
pub fn export_zip(generated: &[GeneratedComponent], tokens: &DesignTokens) -> Result<Vec<u8>> {
    let entries = layout(generated, tokens)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in &entries {
        zip.start_file(entry.path.as_str(), options.clone())
            .map_err(|e| ForgeError::Export(format!("{}: {}", entry.path, e)))?;
        zip.write_all(entry.contents.as_bytes())?;
    }

    let buffer = zip
        .finish()
        .map_err(|e| ForgeError::Export(e.to_string()))?;

    info!(
        "📦 Packed {} components into {} files",
        generated.len(),
        entries.len()
    );
    Ok(buffer.into_inner())
}

/// Write the zip layout under `dir`. Returns the written paths.
pub fn write_component_files(
    dir: &Path,
    generated: &[GeneratedComponent],
    tokens: &DesignTokens,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for entry in layout(generated, tokens)? {
        let path = dir.join(&entry.path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, entry.contents)?;
        debug!("Wrote {}", path.display());
        written.push(path);
    }

    info!("💾 Wrote {} files to {}", written.len(), dir.display());
    Ok(written)
}

pub fn export_tokens_json(tokens: &DesignTokens) -> Result<String> {
    Ok(serde_json::to_string_pretty(tokens)?)
}

pub fn import_tokens_json(json: &str) -> Result<DesignTokens> {
    Ok(serde_json::from_str(json)?)
}

/// Flat SCSS variables, one section per token kind.
pub fn export_tokens_scss(tokens: &DesignTokens) -> String {
    let mut out = String::from("// Design tokens generated from Figma\n");

    out.push_str("\n// Colors\n");
    for color in &tokens.colors {
        push_variable(&mut out, &color.name, "", &color.value);
    }

    out.push_str("\n// Typography\n");
    for typography in &tokens.typography {
        let name = &typography.name;
        push_variable(&mut out, name, "-font-family", &typography.font_family);
        push_variable(&mut out, name, "-font-size", &typography.font_size);
        push_variable(&mut out, name, "-font-weight", &typography.font_weight.to_string());
        push_variable(&mut out, name, "-line-height", &typography.line_height);
    }

    out.push_str("\n// Spacing\n");
    for spacing in &tokens.spacing {
        push_variable(&mut out, &spacing.name, "", &spacing.value);
    }

    out
}

fn push_variable(out: &mut String, name: &str, suffix: &str, value: &str) {
    let base = to_kebab_case(name);
    if !base.is_empty() {
        out.push_str(&format!("${}{}: {};\n", base, suffix, value));
    }
}

/// Components rendered in one batch already have distinct stems. Mixing
/// batches can still collide; that is refused rather than overwritten.
fn layout(generated: &[GeneratedComponent], tokens: &DesignTokens) -> Result<Vec<ExportEntry>> {
    let docs = TemplateGenerator::new();
    let mut used = HashSet::new();
    let mut entries = Vec::with_capacity(generated.len() * 4 + 1);

    for component in generated {
        let stem = component.file_stem();
        if !used.insert(stem) {
            return Err(ForgeError::Export(format!(
                "'{}' and another component both export as {}/",
                component.name, stem
            )));
        }

        for (ext, contents) in [
            ("html", &component.html),
            ("scss", &component.scss),
            ("ts", &component.typescript),
        ] {
            entries.push(ExportEntry {
                path: format!("{0}/{0}.component.{1}", stem, ext),
                contents: contents.clone(),
            });
        }

        let source = DesignComponent::new(
            component.name.as_str(),
            &Category::parse(&component.category),
            "",
        );
        entries.push(ExportEntry {
            path: format!("{}/README.md", stem),
            contents: docs.documentation_for(&source, &component.identifiers),
        });
    }

    entries.push(ExportEntry {
        path: TOKENS_SCSS_PATH.to_string(),
        contents: export_tokens_scss(tokens),
    });
    Ok(entries)
}
