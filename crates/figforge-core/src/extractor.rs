use crate::defaults;
use crate::types::{
    Category, ColorToken, DesignComponent, DesignSystem, DesignTokens, TypographyToken,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, info, warn};

const COMPONENT_NODE_TYPES: [&str; 3] = ["COMPONENT", "COMPONENT_SET", "INSTANCE"];

/// Where token values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenValues {
    /// Read fills and text styles from the nodes that use each style
    #[default]
    Resolve,
    /// Names only; every value is the fixed placeholder
    Placeholder,
}

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub token_values: TokenValues,
    /// Synthesize stand-in components when the file has none
    pub placeholder_components: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            token_values: TokenValues::Resolve,
            placeholder_components: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentSource {
    /// The flat `components` map
    Map,
    /// A scan of the `document` tree
    Tree,
    Placeholder,
    /// Nothing found and placeholders disabled
    None,
}

/// What an extraction found and what it had to make up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub component_source: ComponentSource,
    pub components: usize,
    pub colors: usize,
    pub typography: usize,
    pub spacing: usize,
    /// Style values read from the document rather than filled with placeholders
    pub resolved_values: usize,
    pub placeholder_components: bool,
    pub default_colors: bool,
    pub default_typography: bool,
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub design_system: DesignSystem,
    pub report: ExtractionReport,
}

/// Turns a raw Figma file object into a DesignSystem.
///
/// Never fails: missing or oddly shaped sections are treated as empty.
pub struct Extractor {
    options: ExtractOptions,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    pub fn extract(&self, file: &Value, file_id: &str, access_token: &str) -> Extraction {
        let name = file
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("Untitled");

        info!("🔍 Extracting design system '{}' ({})", name, file_id);

        let (components, component_source) = self.extract_components(file);
        let (tokens, token_stats) = self.extract_tokens(file);

        let report = ExtractionReport {
            component_source,
            components: components.len(),
            colors: tokens.colors.len(),
            typography: tokens.typography.len(),
            spacing: tokens.spacing.len(),
            resolved_values: token_stats.resolved,
            placeholder_components: component_source == ComponentSource::Placeholder,
            default_colors: token_stats.default_colors,
            default_typography: token_stats.default_typography,
        };

        info!(
            "✅ Extracted {} components, {} colors, {} typography, {} spacing tokens",
            report.components, report.colors, report.typography, report.spacing
        );

        let mut design_system = DesignSystem::new(name, file_id, access_token);
        design_system.components = components;
        design_system.tokens = tokens;

        Extraction {
            design_system,
            report,
        }
    }

    fn extract_components(&self, file: &Value) -> (Vec<DesignComponent>, ComponentSource) {
        let from_map = components_from_map(file.get("components"));
        if !from_map.is_empty() {
            debug!("Using {} entries from the components map", from_map.len());
            return (from_map, ComponentSource::Map);
        }

        let mut from_tree = Vec::new();
        if let Some(document) = file.get("document") {
            scan_tree(document, &mut from_tree);
        }
        if !from_tree.is_empty() {
            debug!("Found {} component nodes in the document tree", from_tree.len());
            return (from_tree, ComponentSource::Tree);
        }

        if self.options.placeholder_components {
            warn!("⚠️  No components found, using placeholder components");
            (defaults::placeholder_components(), ComponentSource::Placeholder)
        } else {
            warn!("⚠️  No components found");
            (Vec::new(), ComponentSource::None)
        }
    }

    fn extract_tokens(&self, file: &Value) -> (DesignTokens, TokenStats) {
        let usages = match self.options.token_values {
            TokenValues::Resolve => {
                let mut usages = HashMap::new();
                if let Some(document) = file.get("document") {
                    index_style_usages(document, &mut usages);
                }
                usages
            }
            TokenValues::Placeholder => HashMap::new(),
        };

        let mut tokens = DesignTokens::default();
        let mut stats = TokenStats::default();

        for (style_id, style) in entries(file.get("styles")) {
            let Some(style_name) = style.get("name").and_then(Value::as_str) else {
                continue;
            };
            let node = usages.get(style_id.as_str()).copied();

            match style.get("styleType").and_then(Value::as_str) {
                Some("FILL") => {
                    let value = node.and_then(resolve_fill);
                    if value.is_some() {
                        stats.resolved += 1;
                    }
                    tokens.colors.push(ColorToken {
                        name: style_name.to_string(),
                        value: value.unwrap_or_else(|| defaults::PLACEHOLDER_COLOR.to_string()),
                        category: color_category(style_name),
                    });
                }
                Some("TEXT") => {
                    let token = match node.and_then(|n| resolve_text(style_name, n)) {
                        Some(token) => {
                            stats.resolved += 1;
                            token
                        }
                        None => defaults::placeholder_typography(style_name),
                    };
                    tokens.typography.push(token);
                }
                _ => {}
            }
        }

        if tokens.colors.is_empty() {
            debug!("No color styles, adding default palette");
            tokens.colors = defaults::default_colors();
            stats.default_colors = true;
        }
        if tokens.typography.is_empty() {
            debug!("No text styles, adding default typography");
            tokens.typography = defaults::default_typography();
            stats.default_typography = true;
        }
        tokens.spacing = defaults::default_spacing();

        (tokens, stats)
    }
}

#[derive(Default)]
struct TokenStats {
    resolved: usize,
    default_colors: bool,
    default_typography: bool,
}

/// Object entries sorted by key, or nothing if the value is not an object.
fn entries(value: Option<&Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<_> = value
        .and_then(Value::as_object)
        .map(Map::iter)
        .into_iter()
        .flatten()
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

fn components_from_map(map: Option<&Value>) -> Vec<DesignComponent> {
    entries(map)
        .into_iter()
        .filter_map(|(node_id, meta)| {
            let name = meta.get("name").and_then(Value::as_str)?;
            Some(DesignComponent::new(name, &Category::infer(name), node_id.as_str()))
        })
        .collect()
}

fn scan_tree(node: &Value, out: &mut Vec<DesignComponent>) {
    let node_type = node.get("type").and_then(Value::as_str).unwrap_or_default();

    if COMPONENT_NODE_TYPES.contains(&node_type) {
        let name = node.get("name").and_then(Value::as_str).unwrap_or_default();
        let id = node.get("id").and_then(Value::as_str).unwrap_or_default();
        if !name.is_empty() {
            out.push(DesignComponent::new(name, &Category::infer(name), id));
        }
        return;
    }

    if let Some(children) = node.get("children").and_then(Value::as_array) {
        for child in children {
            scan_tree(child, out);
        }
    }
}

/// Map each style id to the first node (depth first) that references it.
fn index_style_usages<'a>(node: &'a Value, usages: &mut HashMap<&'a str, &'a Value>) {
    if let Some(styles) = node.get("styles").and_then(Value::as_object) {
        for style_id in styles.values().filter_map(Value::as_str) {
            usages.entry(style_id).or_insert(node);
        }
    }

    if let Some(children) = node.get("children").and_then(Value::as_array) {
        for child in children {
            index_style_usages(child, usages);
        }
    }
}

fn resolve_fill(node: &Value) -> Option<String> {
    let paint = node
        .get("fills")?
        .as_array()?
        .iter()
        .filter(|p| p.get("visible").and_then(Value::as_bool).unwrap_or(true))
        .find(|p| p.get("type").and_then(Value::as_str) == Some("SOLID"))?;

    let color = paint.get("color")?;
    let channel = |key: &str| color.get(key).and_then(Value::as_f64);
    let (r, g, b) = (channel("r")?, channel("g")?, channel("b")?);
    let alpha = channel("a").unwrap_or(1.0)
        * paint.get("opacity").and_then(Value::as_f64).unwrap_or(1.0);

    Some(format_color(r, g, b, alpha))
}

fn resolve_text(name: &str, node: &Value) -> Option<TypographyToken> {
    let style = node.get("style")?.as_object()?;
    let font_family = style.get("fontFamily").and_then(Value::as_str)?;

    Some(TypographyToken {
        name: name.to_string(),
        font_family: font_family.to_string(),
        font_size: style
            .get("fontSize")
            .and_then(Value::as_f64)
            .map(format_px)
            .unwrap_or_else(|| defaults::PLACEHOLDER_FONT_SIZE.to_string()),
        font_weight: style
            .get("fontWeight")
            .and_then(Value::as_f64)
            .map(|w| w.round().clamp(1.0, 1000.0) as u16)
            .unwrap_or(defaults::PLACEHOLDER_FONT_WEIGHT),
        line_height: style
            .get("lineHeightPx")
            .and_then(Value::as_f64)
            .map(format_px)
            .unwrap_or_else(|| defaults::PLACEHOLDER_LINE_HEIGHT.to_string()),
    })
}

/// Figma channels are 0..1 floats.
pub fn format_color(r: f64, g: f64, b: f64, alpha: f64) -> String {
    let to_byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    let (r, g, b) = (to_byte(r), to_byte(g), to_byte(b));
    let alpha = alpha.clamp(0.0, 1.0);

    if alpha < 1.0 {
        let alpha = (alpha * 100.0).round() / 100.0;
        format!("rgba({}, {}, {}, {})", r, g, b, alpha)
    } else {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

fn format_px(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}px", rounded as i64)
    } else {
        format!("{}px", rounded)
    }
}

fn color_category(name: &str) -> String {
    match crate::naming::group_name(name) {
        Some(group) if !group.trim().is_empty() => group.trim().to_lowercase(),
        _ => "general".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn styled_file() -> Value {
        json!({
            "name": "Brand Kit",
            "document": {
                "id": "0:0",
                "type": "DOCUMENT",
                "children": [{
                    "id": "0:1",
                    "type": "CANVAS",
                    "children": [
                        {
                            "id": "1:1",
                            "type": "RECTANGLE",
                            "styles": { "fill": "S:brand" },
                            "fills": [
                                { "type": "GRADIENT_LINEAR" },
                                { "type": "SOLID", "color": { "r": 1.0, "g": 0.5, "b": 0.0, "a": 1.0 } }
                            ]
                        },
                        {
                            "id": "1:2",
                            "type": "RECTANGLE",
                            "styles": { "fill": "S:overlay" },
                            "fills": [
                                { "type": "SOLID", "opacity": 0.5, "color": { "r": 0.0, "g": 0.0, "b": 0.0, "a": 1.0 } }
                            ]
                        },
                        {
                            "id": "1:3",
                            "type": "TEXT",
                            "styles": { "text": "S:title" },
                            "style": { "fontFamily": "Roboto", "fontSize": 28.0, "fontWeight": 700.0, "lineHeightPx": 33.75 }
                        }
                    ]
                }]
            },
            "components": {},
            "styles": {
                "S:brand": { "name": "Brand/Orange", "styleType": "FILL" },
                "S:overlay": { "name": "Overlay", "styleType": "FILL" },
                "S:unused": { "name": "Unused", "styleType": "FILL" },
                "S:title": { "name": "Title", "styleType": "TEXT" },
                "S:shadow": { "name": "Shadow", "styleType": "EFFECT" }
            }
        })
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let extraction = Extractor::default().extract(&json!({}), "file1", "tok");
        let ds = &extraction.design_system;

        assert_eq!(ds.name, "Untitled");
        assert_eq!(ds.source_file_id, "file1");
        assert_eq!(ds.components.len(), 3);
        assert_eq!(ds.tokens.colors.len(), 6);
        assert_eq!(ds.tokens.typography.len(), 4);
        assert_eq!(ds.tokens.spacing.len(), 5);
        assert_eq!(extraction.report.component_source, ComponentSource::Placeholder);
        assert!(extraction.report.default_colors);
        assert!(extraction.report.default_typography);
    }

    #[test]
    fn test_malformed_input_does_not_panic() {
        let inputs = [
            json!(null),
            json!("not a file"),
            json!({ "document": 42, "components": [], "styles": "x" }),
            json!({ "document": { "children": "nope" }, "components": { "1:1": { "name": 7 } } }),
        ];
        for input in inputs.iter() {
            let extraction = Extractor::default().extract(input, "f", "t");
            assert_eq!(extraction.design_system.components.len(), 3);
            assert_eq!(extraction.design_system.tokens.spacing.len(), 5);
        }
    }

    #[test]
    fn test_components_map_takes_precedence() {
        let file = json!({
            "document": { "type": "DOCUMENT", "children": [{ "id": "9:9", "type": "COMPONENT", "name": "Tree Only" }] },
            "components": {
                "2:1": { "name": "Buttons/Primary" },
                "2:2": { "name": "Icons/Star" }
            }
        });
        let extraction = Extractor::default().extract(&file, "f", "t");
        let components = &extraction.design_system.components;

        assert_eq!(extraction.report.component_source, ComponentSource::Map);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].source_node_id, "2:1");
        assert_eq!(components[0].category(), Category::Button);
        assert_eq!(components[1].category(), Category::Icon);
    }

    #[test]
    fn test_tree_scan_stops_at_component_nodes() {
        let file = json!({
            "document": {
                "type": "DOCUMENT",
                "children": [{
                    "type": "CANVAS",
                    "children": [
                        {
                            "id": "3:1",
                            "type": "COMPONENT_SET",
                            "name": "Navigation/Tabs",
                            "children": [{ "id": "3:2", "type": "COMPONENT", "name": "Tab=Active" }]
                        },
                        { "id": "3:3", "type": "FRAME", "children": [{ "id": "3:4", "type": "INSTANCE", "name": "Forms/Login" }] }
                    ]
                }]
            }
        });
        let extraction = Extractor::default().extract(&file, "f", "t");
        let names: Vec<_> = extraction
            .design_system
            .components
            .iter()
            .map(|c| c.name.as_str())
            .collect();

        assert_eq!(extraction.report.component_source, ComponentSource::Tree);
        assert_eq!(names, vec!["Navigation/Tabs", "Forms/Login"]);
    }

    #[test]
    fn test_resolves_style_values() {
        let extraction = Extractor::default().extract(&styled_file(), "f", "t");
        let tokens = &extraction.design_system.tokens;

        assert_eq!(extraction.design_system.name, "Brand Kit");
        assert_eq!(tokens.colors.len(), 3);

        let brand = tokens.colors.iter().find(|c| c.name == "Brand/Orange").unwrap();
        assert_eq!(brand.value, "#ff8000");
        assert_eq!(brand.category, "brand");

        let overlay = tokens.colors.iter().find(|c| c.name == "Overlay").unwrap();
        assert_eq!(overlay.value, "rgba(0, 0, 0, 0.5)");
        assert_eq!(overlay.category, "general");

        let unused = tokens.colors.iter().find(|c| c.name == "Unused").unwrap();
        assert_eq!(unused.value, defaults::PLACEHOLDER_COLOR);

        assert_eq!(tokens.typography.len(), 1);
        let title = &tokens.typography[0];
        assert_eq!(title.font_family, "Roboto");
        assert_eq!(title.font_size, "28px");
        assert_eq!(title.font_weight, 700);
        assert_eq!(title.line_height, "33.75px");

        assert_eq!(extraction.report.resolved_values, 3);
        assert!(!extraction.report.default_colors);
    }

    #[test]
    fn test_placeholder_token_values() {
        let extractor = Extractor::new(ExtractOptions {
            token_values: TokenValues::Placeholder,
            ..Default::default()
        });
        let extraction = extractor.extract(&styled_file(), "f", "t");
        let tokens = &extraction.design_system.tokens;

        assert!(tokens.colors.iter().all(|c| c.value == "#000000"));
        assert_eq!(tokens.typography[0].font_family, "Inter");
        assert_eq!(tokens.typography[0].font_size, "16px");
        assert_eq!(extraction.report.resolved_values, 0);
    }

    #[test]
    fn test_placeholder_components_can_be_disabled() {
        let extractor = Extractor::new(ExtractOptions {
            placeholder_components: false,
            ..Default::default()
        });
        let extraction = extractor.extract(&json!({}), "f", "t");

        assert!(extraction.design_system.components.is_empty());
        assert_eq!(extraction.report.component_source, ComponentSource::None);
        assert!(!extraction.report.placeholder_components);
    }

    #[test]
    fn test_format_color() {
        assert_eq!(format_color(0.0, 0.482, 1.0, 1.0), "#007bff");
        assert_eq!(format_color(1.0, 1.0, 1.0, 0.25), "rgba(255, 255, 255, 0.25)");
        assert_eq!(format_px(16.0), "16px");
    }
}
