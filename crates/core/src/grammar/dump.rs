use super::ast::MenuFile;

/// Serialize a menu file (config and tree) to a pretty-printed JSON string.
pub fn to_pretty_json(file: &MenuFile) -> String {
    serde_json::to_string_pretty(file).expect("MenuFile serialization cannot fail")
}

