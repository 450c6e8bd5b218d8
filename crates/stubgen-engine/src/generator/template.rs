//! Named-placeholder templates
//!
//! Templates contain `{key}` placeholders where `key` is an identifier.
//! Formatting runs in two phases: every placeholder is first checked against
//! the context (all missing keys are reported together), then all
//! placeholders are replaced in a single pass. Inserted text is never
//! rescanned, so values cannot reference other keys.
//!
//! Braces that do not enclose a bare identifier (`{ return x; }`) are left
//! alone, which keeps code templates readable.

use std::borrow::Cow;
use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Text substituted for a placeholder whose value is absent.
pub const NULL_TEXT: &str = "(null)";

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
});

/// Template formatting errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Placeholders without a context value
    #[error("template placeholder(s) without a value: {}", format_keys(.keys))]
    MissingValues {
        /// Missing keys, in order of first appearance
        keys: Vec<String>,
    },
}

fn format_keys(keys: &[String]) -> String {
    keys.iter()
        .map(|k| format!("{{{}}}", k))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values for one template instantiation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    values: FxHashMap<String, Option<String>>,
}

impl TemplateContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value (builder style).
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        self.values.insert(key.into(), Some(value.to_string()));
    }

    /// Declare a key whose value is absent; it renders as [`NULL_TEXT`].
    pub fn insert_absent(&mut self, key: impl Into<String>) {
        self.values.insert(key.into(), None);
    }

    /// Check if a key is declared (even with an absent value).
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|value| value.as_deref().unwrap_or(NULL_TEXT))
    }
}

/// List the distinct placeholder keys of a template, in order of first appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut keys: Vec<&str> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        if let Some(key) = caps.get(1) {
            if !keys.contains(&key.as_str()) {
                keys.push(key.as_str());
            }
        }
    }
    keys
}

/// Instantiate `template` with the values in `context`.
pub fn format(template: &str, context: &TemplateContext) -> Result<String, TemplateError> {
    let missing: Vec<String> = placeholders(template)
        .into_iter()
        .filter(|key| !context.contains(key))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(TemplateError::MissingValues { keys: missing });
    }

    let rendered: Cow<'_, str> = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        // Every key was validated above.
        context.lookup(&caps[1]).unwrap_or(NULL_TEXT).to_string()
    });
    Ok(rendered.into_owned())
}
