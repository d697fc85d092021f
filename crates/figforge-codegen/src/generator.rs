use crate::registry::{Identifiers, TemplateRegistry};
use figforge_common::Result;
use figforge_core::naming::to_pascal_case;
use figforge_core::DesignComponent;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Generated Angular sources for one component. Not persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedComponent {
    pub name: String,
    pub category: String,
    pub html: String,
    pub scss: String,
    pub typescript: String,
    /// Names the sources were rendered with, possibly numbered within a batch
    pub identifiers: Identifiers,
}

impl GeneratedComponent {
    /// Copy the generated sources onto the component they came from.
    pub fn apply_to(&self, component: &mut DesignComponent) {
        component.html = self.html.clone();
        component.scss = self.scss.clone();
        component.typescript = self.typescript.clone();
    }

    /// File stem for `{stem}.component.html` and friends.
    pub fn file_stem(&self) -> &str {
        &self.identifiers.css_class
    }
}

/// Turns one component into its generated sources.
pub trait ComponentRenderer: Send + Sync {
    /// Render with names chosen by the caller.
    fn render_as(&self, component: &DesignComponent, ids: &Identifiers)
        -> Result<GeneratedComponent>;

    fn render(&self, component: &DesignComponent) -> Result<GeneratedComponent> {
        self.render_as(component, &Identifiers::for_component(component)?)
    }
}

pub struct TemplateGenerator {
    registry: TemplateRegistry,
}

impl Default for TemplateGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateGenerator {
    pub fn new() -> Self {
        Self::with_registry(TemplateRegistry::new())
    }

    pub fn with_registry(registry: TemplateRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TemplateRegistry {
        &mut self.registry
    }

    /// Markdown usage notes listing the inputs of the component's template.
    pub fn generate_documentation(&self, component: &DesignComponent) -> Result<String> {
        let ids = Identifiers::for_component(component)?;
        Ok(self.documentation_for(component, &ids))
    }

    /// Documentation for a component rendered under `ids`.
    pub fn documentation_for(&self, component: &DesignComponent, ids: &Identifiers) -> String {
        let template = self.registry.get(&component.category());

        let mut doc = format!(
            "# {}\n\n{} component (`{}`) generated from the Figma design system.\n\n",
            component.name, ids.display_name, component.category
        );
        doc.push_str("## Usage\n\n```html\n");
        doc.push_str(&format!("<{0}></{0}>\n", ids.selector));
        doc.push_str("```\n\n");
        doc.push_str(&format!(
            "Class `{}` in `{}.component.ts`.\n",
            ids.class_name, ids.css_class
        ));

        if !template.props.is_empty() {
            doc.push_str("\n## Inputs\n\n| Name | Type |\n|---|---|\n");
            for prop in &template.props {
                doc.push_str(&format!("| `{}` | `{}` |\n", prop.name, prop.ts_type));
            }
        }
        doc
    }

    /// A `{Pascal}Props` interface with every input optional.
    pub fn generate_props_interface(&self, component: &DesignComponent) -> Result<String> {
        Identifiers::for_component(component)?;
        let template = self.registry.get(&component.category());

        let mut out = format!(
            "export interface {}Props {{\n",
            to_pascal_case(&component.name)
        );
        for prop in &template.props {
            out.push_str(&format!("  {}?: {};\n", prop.name, prop.ts_type));
        }
        out.push_str("  className?: string;\n}\n");
        Ok(out)
    }
}

impl ComponentRenderer for TemplateGenerator {
    fn render_as(
        &self,
        component: &DesignComponent,
        ids: &Identifiers,
    ) -> Result<GeneratedComponent> {
        let category = component.category();
        let (html, scss, typescript) = self.registry.get(&category).render(ids);

        debug!(
            "Rendered {} as {} ({})",
            component.name, ids.class_name, category
        );

        Ok(GeneratedComponent {
            name: component.name.clone(),
            category: component.category.clone(),
            html,
            scss,
            typescript,
            identifiers: ids.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figforge_common::ForgeError;
    use figforge_core::Category;

    fn component(name: &str, category: &str) -> DesignComponent {
        DesignComponent::new(name, &Category::parse(category), "1:1")
    }

    #[test]
    fn test_icon_star_identifiers() {
        let generated = TemplateGenerator::new()
            .render(&component("Icons/Star", "icon"))
            .unwrap();

        assert!(generated.typescript.contains("selector: 'app-icons-star'"));
        assert!(generated.typescript.contains("export class IconsStarComponent"));
        assert!(generated.typescript.contains("@Input() label: string = 'Star';"));
        assert!(generated.typescript.contains("@Input() iconName: string = 'star';"));
        assert!(generated.html.contains("class=\"icons-star-wrapper\""));
        assert!(generated.scss.starts_with(".icons-star-wrapper {"));
        assert_eq!(generated.file_stem(), "icons-star");
    }

    #[test]
    fn test_every_built_in_category_renders() {
        let generator = TemplateGenerator::new();
        for category in Category::BUILT_IN.iter() {
            let generated = generator
                .render(&DesignComponent::new("Kit/Thing", category, "1:1"))
                .unwrap();
            assert!(generated.typescript.contains("KitThingComponent"));
            assert!(!generated.html.contains("{css_class}"));
            assert!(!generated.scss.contains("{css_class}"));
            assert_eq!(generated.category, category.as_str());
        }
    }

    #[test]
    fn test_unknown_category_uses_generic_template() {
        let generated = TemplateGenerator::new()
            .render(&component("Misc/Avatar", "Tooltip"))
            .unwrap();

        assert!(generated.html.starts_with("<div class=\"misc-avatar-container\">"));
        assert!(generated
            .typescript
            .contains("This is a Avatar component from your design system."));
    }

    #[test]
    fn test_output_is_deterministic() {
        let generator = TemplateGenerator::new();
        let a = generator.render(&component("Cards/Basic", "card")).unwrap();
        let b = generator.render(&component("Cards/Basic", "card")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let err = TemplateGenerator::new()
            .render(&component("  //  ", "button"))
            .unwrap_err();
        assert!(matches!(err, ForgeError::Generation(_)));
    }

    #[test]
    fn test_leading_digit_is_rejected() {
        let err = TemplateGenerator::new()
            .render(&component("2 Column/Card", "card"))
            .unwrap_err();
        assert!(matches!(err, ForgeError::Generation(_)));
    }

    #[test]
    fn test_render_as_uses_given_identifiers() {
        let button = component("Buttons/Primary", "button");
        let ids = Identifiers::for_component(&button).unwrap().with_suffix(2);
        let generated = TemplateGenerator::new().render_as(&button, &ids).unwrap();

        assert_eq!(generated.file_stem(), "buttons-primary-2");
        assert!(generated.typescript.contains("selector: 'app-buttons-primary-2'"));
        assert!(generated.typescript.contains("'./buttons-primary-2.component.html'"));
        assert!(generated.typescript.contains("export class ButtonsPrimary2Component"));
    }

    #[test]
    fn test_apply_to_fills_component() {
        let mut target = component("Buttons/Primary", "button");
        assert!(!target.is_generated());

        let generated = TemplateGenerator::new().render(&target).unwrap();
        generated.apply_to(&mut target);

        assert!(target.is_generated());
        assert_eq!(target.typescript, generated.typescript);
    }

    #[test]
    fn test_docs_and_props_interface() {
        let generator = TemplateGenerator::new();
        let button = component("Buttons/Primary", "button");

        let doc = generator.generate_documentation(&button).unwrap();
        assert!(doc.starts_with("# Buttons/Primary"));
        assert!(doc.contains("<app-buttons-primary></app-buttons-primary>"));
        assert!(doc.contains("| `variant` |"));

        let props = generator.generate_props_interface(&button).unwrap();
        assert!(props.starts_with("export interface ButtonsPrimaryProps {"));
        assert!(props.contains("  disabled?: boolean;\n"));
        assert!(props.ends_with("  className?: string;\n}\n"));
    }
}
