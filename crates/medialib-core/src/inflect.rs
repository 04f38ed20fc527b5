//! Inflection helpers
//!
//! Owner module names are derived from entity type names: the short CamelCase
//! type name is lower-camel-cased and pluralized, e.g. `CaseStudy` ->
//! `caseStudies`.

/// Lowercase the first character of a type name.
pub fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Pluralize an English word. Covers the regular cases module names hit:
/// sibilant endings take `es`, consonant + `y` becomes `ies`, everything
/// else takes `s`.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_lowercase();
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{}es", word);
    }

    if let Some(stem) = word.strip_suffix('y') {
        let before = stem.chars().last();
        if before.is_some_and(|c| !"aeiouAEIOU".contains(c)) {
            return format!("{}ies", stem);
        }
    }

    format!("{}s", word)
}

/// Module name for an owner entity type: pluralized lower-camel short name.
pub fn module_name(type_name: &str) -> String {
    pluralize(&lower_camel(type_name))
}
