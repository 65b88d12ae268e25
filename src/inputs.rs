pub const DEFAULT_ENTRY_TEXT: &str = "Path to jboss deployments folder";
pub const DEFAULT_FILENAME_TEXT: &str = "Filename to scan for";

/// Strips surrounding whitespace and treats the placeholder texts as empty
/// input, so a placeholder never ends up scanned or saved.
pub fn normalize_input(value: &str) -> String {
    match value.trim() {
        DEFAULT_ENTRY_TEXT | DEFAULT_FILENAME_TEXT => String::new(),
        trimmed => trimmed.to_string(),
    }
}
