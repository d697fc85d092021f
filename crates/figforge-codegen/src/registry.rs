use crate::templates;
use figforge_common::{ForgeError, Result};
use figforge_core::naming::{display_name, to_kebab_case, to_pascal_case};
use figforge_core::{Category, DesignComponent};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An `@Input()` a template exposes, used for docs and props interfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateProp {
    pub name: String,
    pub ts_type: String,
}

impl TemplateProp {
    pub fn new(name: impl Into<String>, ts_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ts_type: ts_type.into(),
        }
    }
}

/// The three source templates for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTemplate {
    pub html: String,
    pub scss: String,
    pub typescript: String,
    #[serde(default)]
    pub props: Vec<TemplateProp>,
}

impl CategoryTemplate {
    pub fn new(
        html: impl Into<String>,
        scss: impl Into<String>,
        typescript: impl Into<String>,
    ) -> Self {
        Self {
            html: html.into(),
            scss: scss.into(),
            typescript: typescript.into(),
            props: Vec::new(),
        }
    }

    pub fn with_props(mut self, props: Vec<TemplateProp>) -> Self {
        self.props = props;
        self
    }

    /// Render html, scss and typescript for one set of identifiers.
    pub fn render(&self, ids: &Identifiers) -> (String, String, String) {
        (
            fill(&self.html, ids),
            fill(&self.scss, ids),
            fill(&self.typescript, ids),
        )
    }
}

/// Names substituted into a template, all derived from the component name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifiers {
    /// `app-icons-star`
    pub selector: String,
    /// `icons-star`, also the file stem
    pub css_class: String,
    /// `IconsStarComponent`
    pub class_name: String,
    /// `Star`
    pub display_name: String,
    /// `star`
    pub display_lower: String,
}

impl Identifiers {
    /// `None` unless the name starts, after punctuation, with a letter.
    /// TypeScript classes and CSS classes cannot start with a digit.
    pub fn from_name(name: &str) -> Option<Self> {
        let css_class = to_kebab_case(name);
        if !css_class.starts_with(char::is_alphabetic) {
            return None;
        }

        let display = display_name(name).trim().to_string();
        Some(Self {
            selector: format!("app-{}", css_class),
            class_name: format!("{}Component", to_pascal_case(name)),
            display_lower: display.to_lowercase(),
            display_name: display,
            css_class,
        })
    }

    pub fn for_component(component: &DesignComponent) -> Result<Self> {
        Self::from_name(&component.name).ok_or_else(|| {
            ForgeError::Generation(format!(
                "component name '{}' cannot form an identifier, it must start with a letter",
                component.name
            ))
        })
    }

    /// The same names numbered `n`: `app-icons-star-2`, `IconsStar2Component`.
    /// Display names are unchanged.
    pub fn with_suffix(&self, n: usize) -> Self {
        let css_class = format!("{}-{}", self.css_class, n);
        let base = self
            .class_name
            .strip_suffix("Component")
            .unwrap_or(&self.class_name);

        Self {
            selector: format!("app-{}", css_class),
            class_name: format!("{}{}Component", base, n),
            display_name: self.display_name.clone(),
            display_lower: self.display_lower.clone(),
            css_class,
        }
    }

    fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "selector" => Some(self.selector.clone()),
            "css_class" => Some(self.css_class.clone()),
            "class_name" => Some(self.class_name.clone()),
            "display_name" => Some(escape_quotes(&self.display_name)),
            "display_lower" => Some(escape_quotes(&self.display_lower)),
            _ => None,
        }
    }
}

/// Display names land inside single-quoted TypeScript and template strings.
fn escape_quotes(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Single-pass substitution, so text coming from a name is never re-expanded.
fn fill(template: &str, ids: &Identifiers) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let replaced = after.find('}').and_then(|end| {
            let key = &after[..end];
            ids.lookup(key).map(|value| (value, end))
        });

        match replaced {
            Some((value, end)) => {
                out.push_str(&value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Category -> template lookup, pre-loaded with the built-in categories.
///
/// Categories without an entry render with the generic template.
pub struct TemplateRegistry {
    templates: HashMap<Category, CategoryTemplate>,
    fallback: CategoryTemplate,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self {
            templates: templates::built_in().into_iter().collect(),
            fallback: templates::generic(),
        }
    }

    /// Add or replace the template for a category, returning the old one.
    pub fn register(
        &mut self,
        category: Category,
        template: CategoryTemplate,
    ) -> Option<CategoryTemplate> {
        self.templates.insert(category, template)
    }

    pub fn get(&self, category: &Category) -> &CategoryTemplate {
        self.templates.get(category).unwrap_or(&self.fallback)
    }

    pub fn contains(&self, category: &Category) -> bool {
        self.templates.contains_key(category)
    }

    pub fn fallback(&self) -> &CategoryTemplate {
        &self.fallback
    }

    pub fn categories(&self) -> Vec<&Category> {
        let mut categories: Vec<_> = self.templates.keys().collect();
        categories.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_for_grouped_name() {
        let ids = Identifiers::from_name("Icons/Star").unwrap();
        assert_eq!(ids.selector, "app-icons-star");
        assert_eq!(ids.css_class, "icons-star");
        assert_eq!(ids.class_name, "IconsStarComponent");
        assert_eq!(ids.display_name, "Star");
        assert_eq!(ids.display_lower, "star");
    }

    #[test]
    fn test_identifiers_reject_symbol_names() {
        assert!(Identifiers::from_name("").is_none());
        assert!(Identifiers::from_name(" / - ").is_none());
    }

    #[test]
    fn test_identifiers_reject_leading_digit() {
        assert!(Identifiers::from_name("2 Column/Card").is_none());
        assert!(Identifiers::from_name("/2col").is_none());

        let ids = Identifiers::from_name("Grid/2 Column").unwrap();
        assert_eq!(ids.class_name, "Grid2ColumnComponent");

        let component = DesignComponent::new("2 Column/Card", &Category::Card, "1:1");
        assert!(matches!(
            Identifiers::for_component(&component),
            Err(ForgeError::Generation(_))
        ));
    }

    #[test]
    fn test_identifiers_with_suffix() {
        let ids = Identifiers::from_name("Buttons/Primary").unwrap().with_suffix(2);
        assert_eq!(ids.selector, "app-buttons-primary-2");
        assert_eq!(ids.css_class, "buttons-primary-2");
        assert_eq!(ids.class_name, "ButtonsPrimary2Component");
        assert_eq!(ids.display_name, "Primary");
    }

    #[test]
    fn test_fill_leaves_angular_bindings() {
        let ids = Identifiers::from_name("Buttons/Primary").unwrap();
        let out = fill("<b class=\"{css_class}\">{{ text || '{display_name}' }}</b>{unknown}", &ids);
        assert_eq!(
            out,
            "<b class=\"buttons-primary\">{{ text || 'Primary' }}</b>{unknown}"
        );
    }

    #[test]
    fn test_fill_does_not_reexpand_names() {
        let ids = Identifiers::from_name("Cards/{selector} it's").unwrap();
        let out = fill("{display_name}", &ids);
        assert_eq!(out, "{selector} it\\'s");
    }

    #[test]
    fn test_registry_fallback_and_register() {
        let mut registry = TemplateRegistry::new();
        let tooltip = Category::parse("tooltip");

        assert_eq!(registry.categories().len(), 6);
        assert!(!registry.contains(&tooltip));
        assert_eq!(registry.get(&tooltip), registry.fallback());

        let custom = CategoryTemplate::new("<span>{display_name}</span>", ".{css_class} {}", "");
        assert!(registry.register(tooltip.clone(), custom.clone()).is_none());
        assert_eq!(registry.get(&tooltip), &custom);
        assert!(registry.register(Category::Button, custom).is_some());
    }
}
