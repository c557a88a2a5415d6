pub mod string_utils;

// Re-export commonly used functions
pub use string_utils::{is_blank, sanitize_import_text};
