use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Locale the generated code targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

/// Everything extracted from one Figma file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSystem {
    pub id: String,
    pub name: String,
    pub source_file_id: String,
    pub access_token: String,
    pub last_sync: DateTime<Utc>,
    #[serde(default)]
    pub components: Vec<DesignComponent>,
    #[serde(default)]
    pub tokens: DesignTokens,
    #[serde(default)]
    pub language: Language,
}

impl DesignSystem {
    pub fn new(name: impl Into<String>, source_file_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            source_file_id: source_file_id.into(),
            access_token: access_token.into(),
            last_sync: Utc::now(),
            components: Vec::new(),
            tokens: DesignTokens::default(),
            language: Language::default(),
        }
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn find_component(&self, name: &str) -> Option<&DesignComponent> {
        self.components
            .iter()
            .find(|c| c.name == name)
            .or_else(|| self.components.iter().find(|c| c.name.eq_ignore_ascii_case(name)))
    }
}

/// A named, categorized UI element found in the source file.
///
/// `html`, `scss` and `typescript` stay empty until the generator fills them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignComponent {
    pub id: String,
    pub name: String,
    pub category: String,
    pub source_node_id: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub scss: String,
    #[serde(default)]
    pub typescript: String,
}

impl DesignComponent {
    pub fn new(name: impl Into<String>, category: &Category, source_node_id: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            category: category.as_str().to_string(),
            source_node_id: source_node_id.into(),
            html: String::new(),
            scss: String::new(),
            typescript: String::new(),
        }
    }

    pub fn category(&self) -> Category {
        Category::parse(&self.category)
    }

    pub fn is_generated(&self) -> bool {
        !self.html.is_empty() && !self.scss.is_empty() && !self.typescript.is_empty()
    }
}

/// Component category. The six named variants have dedicated templates;
/// anything else is carried as `Custom` and rendered generically unless a
/// template was registered for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Button,
    Card,
    Input,
    Icon,
    Navigation,
    Form,
    Custom(String),
}

impl Category {
    pub const BUILT_IN: [Category; 6] = [
        Category::Button,
        Category::Card,
        Category::Input,
        Category::Icon,
        Category::Navigation,
        Category::Form,
    ];

    pub fn parse(value: &str) -> Self {
        let value = value.trim().to_lowercase();
        match value.as_str() {
            "button" => Category::Button,
            "card" => Category::Card,
            "input" => Category::Input,
            "icon" => Category::Icon,
            "navigation" => Category::Navigation,
            "form" => Category::Form,
            _ => Category::Custom(value),
        }
    }

    /// Guess a category from a component name such as `Buttons/Primary`.
    ///
    /// Matches whole words (split on punctuation and camelCase), with plural
    /// forms allowed, so `Table` is not a tab and `Platform` is not a form.
    pub fn infer(name: &str) -> Self {
        let words = name_words(name);
        let has = |needles: &[&str]| {
            words.iter().any(|word| {
                needles.iter().any(|&needle| {
                    word == needle
                        || word.strip_suffix('s') == Some(needle)
                        || word.strip_suffix("es") == Some(needle)
                })
            })
        };

        if has(&["button", "btn"]) {
            Category::Button
        } else if has(&["card"]) {
            Category::Card
        } else if has(&["input", "field", "textfield", "textarea", "select", "checkbox"]) {
            Category::Input
        } else if has(&["icon"]) {
            Category::Icon
        } else if has(&["nav", "navbar", "navigation", "menu", "tab", "breadcrumb", "sidebar"]) {
            Category::Navigation
        } else if has(&["form"]) {
            Category::Form
        } else {
            Category::Custom("component".to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Button => "button",
            Category::Card => "card",
            Category::Input => "input",
            Category::Icon => "icon",
            Category::Navigation => "navigation",
            Category::Form => "form",
            Category::Custom(name) => name,
        }
    }
}

/// Lowercased words of a name; `IconButton/Large` gives icon, button, large.
fn name_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in name.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignTokens {
    #[serde(default)]
    pub colors: Vec<ColorToken>,
    #[serde(default)]
    pub typography: Vec<TypographyToken>,
    #[serde(default)]
    pub spacing: Vec<SpacingToken>,
}

impl DesignTokens {
    pub fn len(&self) -> usize {
        self.colors.len() + self.typography.len() + self.spacing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorToken {
    pub name: String,
    pub value: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyToken {
    pub name: String,
    pub font_family: String,
    pub font_size: String,
    pub font_weight: u16,
    pub line_height: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacingToken {
    pub name: String,
    pub value: String,
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Carry component ids over from a previous extraction of the same file.
///
/// Components are matched on their source node id; unmatched components
/// keep the ids they were created with. Returns how many ids were reused.
pub fn reconcile_component_ids(previous: &[DesignComponent], fresh: &mut [DesignComponent]) -> usize {
    let known: std::collections::HashMap<&str, &str> = previous
        .iter()
        .filter(|c| !c.source_node_id.is_empty())
        .map(|c| (c.source_node_id.as_str(), c.id.as_str()))
        .collect();

    let mut reused = 0;
    for component in fresh.iter_mut() {
        if let Some(id) = known.get(component.source_node_id.as_str()) {
            component.id = id.to_string();
            reused += 1;
        }
    }
    reused
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("Button"), Category::Button);
        assert_eq!(Category::parse(" NAVIGATION "), Category::Navigation);
        assert_eq!(Category::parse("Tooltip"), Category::Custom("tooltip".to_string()));
        assert_eq!(Category::parse("tooltip").as_str(), "tooltip");
    }

    #[test]
    fn test_category_infer() {
        assert_eq!(Category::infer("Buttons/Primary"), Category::Button);
        assert_eq!(Category::infer("Forms/Login"), Category::Form);
        assert_eq!(Category::infer("Inputs/Text Field"), Category::Input);
        assert_eq!(Category::infer("Icons/Star"), Category::Icon);
        assert_eq!(Category::infer("Top Navigation"), Category::Navigation);
        assert_eq!(Category::infer("Avatar"), Category::Custom("component".to_string()));
    }

    #[test]
    fn test_category_infer_matches_whole_words() {
        let custom = Category::Custom("component".to_string());
        assert_eq!(Category::infer("Table"), custom);
        assert_eq!(Category::infer("Data/Table Row"), custom);
        assert_eq!(Category::infer("Platform Logo"), custom);
        assert_eq!(Category::infer("Information/Banner"), custom);

        assert_eq!(Category::infer("Tabs/Active"), Category::Navigation);
        assert_eq!(Category::infer("NavBar"), Category::Navigation);
        assert_eq!(Category::infer("Checkboxes/Checked"), Category::Input);
        assert_eq!(Category::infer("IconButton/Large"), Category::Button);
        assert_eq!(Category::infer("Brand Icons/Logo"), Category::Icon);
    }

    #[test]
    fn test_design_system_json_layout() {
        let mut ds = DesignSystem::new("Kit", "file123", "tok");
        ds.components.push(DesignComponent::new("Icons/Star", &Category::Icon, "1:2"));

        let json = serde_json::to_value(&ds).unwrap();
        assert_eq!(json["sourceFileId"], "file123");
        assert_eq!(json["language"], "ar");
        assert_eq!(json["components"][0]["sourceNodeId"], "1:2");

        let back: DesignSystem = serde_json::from_value(json).unwrap();
        assert_eq!(back, ds);
    }

    #[test]
    fn test_reconcile_component_ids() {
        let old = vec![
            DesignComponent::new("Buttons/Primary", &Category::Button, "1:1"),
            DesignComponent::new("Cards/Basic", &Category::Card, "1:2"),
        ];
        let mut fresh = vec![
            DesignComponent::new("Buttons/Primary v2", &Category::Button, "1:1"),
            DesignComponent::new("Icons/New", &Category::Icon, "9:9"),
        ];
        let new_icon_id = fresh[1].id.clone();

        let reused = reconcile_component_ids(&old, &mut fresh);

        assert_eq!(reused, 1);
        assert_eq!(fresh[0].id, old[0].id);
        assert_eq!(fresh[1].id, new_icon_id);
    }
}
