//! Name transforms shared by the extractor and the code generator.

/// Drop the first `/` segment of a grouped name: `Icons/Star` -> `Star`,
/// `Forms/Auth/Login` -> `Auth/Login`. Names without `/` come back as is.
pub fn display_name(full_name: &str) -> String {
    match full_name.split_once('/') {
        Some((_, rest)) => rest.to_string(),
        None => full_name.to_string(),
    }
}

/// First `/` segment, if the name is grouped.
pub fn group_name(full_name: &str) -> Option<&str> {
    full_name.split_once('/').map(|(group, _)| group)
}

fn words(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

pub fn to_kebab_case(value: &str) -> String {
    words(value)
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn to_pascal_case(value: &str) -> String {
    words(value).map(capitalize).collect()
}

pub fn to_camel_case(value: &str) -> String {
    words(value)
        .enumerate()
        .map(|(i, word)| if i == 0 { word.to_lowercase() } else { capitalize(word) })
        .collect()
}
