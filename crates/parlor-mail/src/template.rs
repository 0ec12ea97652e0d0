#![forbid(unsafe_code)]

//! Template resolution seam.
//!
//! The host application owns template lookup (file layout, theme
//! overrides, multisite paths); the mailer only asks for the finished
//! body. [`MemoryTemplates`] is the in-memory implementation used by
//! tests and simple embeddings: it stores bodies by path and fills
//! `{key}` markers from the render arguments in a single pass.

use ahash::AHashMap;

use crate::mailer::MailError;

/// Arguments for one render call. The `module` and `template_path`
/// entries double as resolution hints.
#[derive(Debug, Clone, Default)]
pub struct TemplateArgs {
    values: AHashMap<String, String>,
}

impl TemplateArgs {
    /// Create an empty argument set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one argument.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Look up one argument.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The module resolution hint, when present.
    #[must_use]
    pub fn module(&self) -> &str {
        self.get("module").unwrap_or("")
    }

    /// The path resolution hint, when present.
    #[must_use]
    pub fn path_hint(&self) -> &str {
        self.get("template_path").unwrap_or("")
    }

    /// Iterate all arguments.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Resolves a template path to its rendered body.
pub trait TemplateResolver {
    /// Render the template at `path` with the given arguments and hints.
    fn resolve(
        &self,
        path: &str,
        args: &TemplateArgs,
        module: &str,
        path_hint: &str,
    ) -> Result<String, MailError>;
}

/// In-memory template store with `{key}` interpolation.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplates {
    bodies: AHashMap<String, String>,
}

impl MemoryTemplates {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template body under a path.
    pub fn insert(&mut self, path: impl Into<String>, body: impl Into<String>) {
        self.bodies.insert(path.into(), body.into());
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(path, body);
        self
    }
}

impl TemplateResolver for MemoryTemplates {
    fn resolve(
        &self,
        path: &str,
        args: &TemplateArgs,
        _module: &str,
        _path_hint: &str,
    ) -> Result<String, MailError> {
        let body = self.bodies.get(path).ok_or_else(|| MailError::Template {
            path: path.to_string(),
            reason: "no template registered".to_string(),
        })?;

        // Single-pass marker fill; values are not re-scanned.
        let mut out = body.clone();
        for (key, value) in args.iter() {
            out = out.replace(&format!("{{{key}}}"), value);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_template_errors() {
        let store = MemoryTemplates::new();
        let err = store
            .resolve("email/welcome", &TemplateArgs::new(), "", "")
            .unwrap_err();
        assert!(matches!(err, MailError::Template { .. }));
    }

    #[test]
    fn interpolates_arguments() {
        let store = MemoryTemplates::new().with("email/welcome", "Hello {display_name}!");
        let args = TemplateArgs::new().with("display_name", "Sam");
        let out = store.resolve("email/welcome", &args, "", "").unwrap();
        assert_eq!(out, "Hello Sam!");
    }

    #[test]
    fn unknown_markers_are_left_alone() {
        let store = MemoryTemplates::new().with("email/welcome", "Hi {nobody}");
        let out = store
            .resolve("email/welcome", &TemplateArgs::new(), "", "")
            .unwrap();
        assert_eq!(out, "Hi {nobody}");
    }

    #[test]
    fn hints_come_from_args() {
        let args = TemplateArgs::new()
            .with("module", "registration")
            .with("template_path", "/overrides");
        assert_eq!(args.module(), "registration");
        assert_eq!(args.path_hint(), "/overrides");
        assert_eq!(TemplateArgs::new().module(), "");
    }
}
