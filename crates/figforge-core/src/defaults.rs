use crate::types::{Category, ColorToken, DesignComponent, SpacingToken, TypographyToken};

pub const PLACEHOLDER_COLOR: &str = "#000000";
pub const PLACEHOLDER_FONT_FAMILY: &str = "Inter";
pub const PLACEHOLDER_FONT_SIZE: &str = "16px";
pub const PLACEHOLDER_FONT_WEIGHT: u16 = 400;
pub const PLACEHOLDER_LINE_HEIGHT: &str = "24px";

pub fn default_colors() -> Vec<ColorToken> {
    [
        ("primary", "#007bff"),
        ("secondary", "#6c757d"),
        ("success", "#28a745"),
        ("danger", "#dc3545"),
        ("warning", "#ffc107"),
        ("info", "#17a2b8"),
    ]
    .iter()
    .map(|(name, value)| ColorToken {
        name: name.to_string(),
        value: value.to_string(),
        category: "general".to_string(),
    })
    .collect()
}

pub fn default_typography() -> Vec<TypographyToken> {
    [
        ("heading-1", "32px", 700, "40px"),
        ("heading-2", "24px", 600, "32px"),
        ("body", "16px", 400, "24px"),
        ("caption", "12px", 400, "16px"),
    ]
    .iter()
    .map(|(name, size, weight, line_height)| TypographyToken {
        name: name.to_string(),
        font_family: PLACEHOLDER_FONT_FAMILY.to_string(),
        font_size: size.to_string(),
        font_weight: *weight,
        line_height: line_height.to_string(),
    })
    .collect()
}

/// Spacing scale. Figma styles carry no spacing, so this set is always used.
pub fn default_spacing() -> Vec<SpacingToken> {
    [("xs", "4px"), ("sm", "8px"), ("md", "16px"), ("lg", "24px"), ("xl", "32px")]
        .iter()
        .map(|(name, value)| SpacingToken {
            name: name.to_string(),
            value: value.to_string(),
        })
        .collect()
}

/// Stand-in components for files that contain none.
pub fn placeholder_components() -> Vec<DesignComponent> {
    vec![
        DesignComponent::new("Buttons/Primary", &Category::Button, "placeholder:button"),
        DesignComponent::new("Cards/Basic", &Category::Card, "placeholder:card"),
        DesignComponent::new("Inputs/Text Field", &Category::Input, "placeholder:input"),
    ]
}

pub fn placeholder_typography(name: &str) -> TypographyToken {
    TypographyToken {
        name: name.to_string(),
        font_family: PLACEHOLDER_FONT_FAMILY.to_string(),
        font_size: PLACEHOLDER_FONT_SIZE.to_string(),
        font_weight: PLACEHOLDER_FONT_WEIGHT,
        line_height: PLACEHOLDER_LINE_HEIGHT.to_string(),
    }
}
