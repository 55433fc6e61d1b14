//! Identifier and path helpers shared by the templates and the generator.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Remove diacritics: NFD decomposition, then drop combining marks.
/// `"São Paulo"` becomes `"Sao Paulo"`.
pub fn strip_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Filesystem-safe path segment: diacritics stripped, surrounding
/// whitespace dropped, inner whitespace runs replaced by a single `-`.
/// Idempotent.
pub fn normalize_path_segment(s: &str) -> String {
    strip_diacritics(s)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// `itens_pedido` → `ItensPedido`, `São Paulo` → `SaoPaulo`.
pub fn pascal_case(s: &str) -> String {
    let mut result = String::new();
    for word in strip_diacritics(s).split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.push(first.to_ascii_uppercase());
            result.extend(chars);
        }
    }

    if result.is_empty() {
        return "Item".to_string();
    }
    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert_str(0, "Page");
    }
    result
}

/// `itens_pedido` → `itensPedido`.
pub fn camel_case(s: &str) -> String {
    let pascal = pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => pascal,
    }
}

/// `created_at` → `Created at`.
pub fn humanize(s: &str) -> String {
    let spaced = s.replace('_', " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Double-quoted JavaScript string literal.
pub fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Object key: bare when it is a valid identifier, quoted otherwise.
pub fn js_key(s: &str) -> String {
    let mut chars = s.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_' || first == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        None => false,
    };
    if valid { s.to_string() } else { js_string(s) }
}
