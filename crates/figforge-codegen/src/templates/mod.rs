//! Built-in Angular templates, one module per category.
//!
//! Placeholders: `{selector}`, `{css_class}`, `{class_name}`,
//! `{display_name}`, `{display_lower}`. Angular `{{ ... }}` bindings are
//! left alone by the renderer.

mod button;
mod card;
mod form;
mod generic;
mod icon;
mod input;
mod navigation;

use crate::registry::{CategoryTemplate, TemplateProp};
use figforge_core::Category;

pub(crate) fn built_in() -> Vec<(Category, CategoryTemplate)> {
    vec![
        (
            Category::Button,
            CategoryTemplate::new(button::HTML, button::SCSS, button::TS).with_props(vec![
                TemplateProp::new("variant", "'primary' | 'secondary' | 'outline'"),
                TemplateProp::new("text", "string"),
                TemplateProp::new("icon", "string"),
                TemplateProp::new("disabled", "boolean"),
            ]),
        ),
        (
            Category::Card,
            CategoryTemplate::new(card::HTML, card::SCSS, card::TS).with_props(vec![
                TemplateProp::new("title", "string"),
                TemplateProp::new("subtitle", "string"),
                TemplateProp::new("elevated", "boolean"),
                TemplateProp::new("outlined", "boolean"),
                TemplateProp::new("showHeader", "boolean"),
                TemplateProp::new("showActions", "boolean"),
            ]),
        ),
        (
            Category::Input,
            CategoryTemplate::new(input::HTML, input::SCSS, input::TS).with_props(vec![
                TemplateProp::new("label", "string"),
                TemplateProp::new("placeholder", "string"),
                TemplateProp::new("type", "string"),
                TemplateProp::new("required", "boolean"),
                TemplateProp::new("disabled", "boolean"),
                TemplateProp::new("value", "string"),
                TemplateProp::new("errorMessage", "string"),
            ]),
        ),
        (
            Category::Icon,
            CategoryTemplate::new(icon::HTML, icon::SCSS, icon::TS).with_props(vec![
                TemplateProp::new("iconName", "string"),
                TemplateProp::new("size", "'small' | 'medium' | 'large'"),
                TemplateProp::new("label", "string"),
                TemplateProp::new("showLabel", "boolean"),
                TemplateProp::new("clickable", "boolean"),
            ]),
        ),
        (
            Category::Navigation,
            CategoryTemplate::new(navigation::HTML, navigation::SCSS, navigation::TS).with_props(
                vec![
                    TemplateProp::new("navigationItems", "NavigationItem[]"),
                    TemplateProp::new("orientation", "'horizontal' | 'vertical'"),
                ],
            ),
        ),
        (
            Category::Form,
            CategoryTemplate::new(form::HTML, form::SCSS, form::TS).with_props(vec![
                TemplateProp::new("title", "string"),
                TemplateProp::new("description", "string"),
                TemplateProp::new("submitText", "string"),
                TemplateProp::new("cancelText", "string"),
                TemplateProp::new("loading", "boolean"),
            ]),
        ),
    ]
}

pub(crate) fn generic() -> CategoryTemplate {
    CategoryTemplate::new(generic::HTML, generic::SCSS, generic::TS).with_props(vec![
        TemplateProp::new("title", "string"),
        TemplateProp::new("description", "string"),
        TemplateProp::new("showActions", "boolean"),
    ])
}
