//! Translation collaborator for constraint-violation messages.
//!
//! The engine only ever builds human-readable messages through this trait;
//! it functions with any implementation, including the no-op passthrough
//! used throughout the test suite.

/// Resolves a message key and its parameters into display text.
pub trait Translator: Send + Sync {
    /// Translates `key`, substituting the given `(name, value)` parameters.
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String;
}

/// Passthrough translator: echoes the key, appending any parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

impl Translator for NoopTranslator {
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String {
        if params.is_empty() {
            return key.to_string();
        }
        let rendered: Vec<String> = params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        format!("{key} [{}]", rendered.join(", "))
    }
}
