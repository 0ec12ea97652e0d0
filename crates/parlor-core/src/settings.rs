#![forbid(unsafe_code)]

//! Key-value settings read synchronously by consumers.
//!
//! Host applications usually have their own option storage; Parlor only
//! needs a read seam. The [`Settings`] trait is that seam, and
//! [`MemorySettings`] is the ahash-backed implementation used in tests
//! and simple embeddings.
//!
//! Truthiness follows the loose convention of the option stores this
//! integrates with: `Flag(true)`, any non-zero `Number`, and any `Text`
//! other than `""`/`"0"` are truthy. A missing key is falsy.

use ahash::AHashMap;

/// A single configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Flag(bool),
    Text(String),
    Number(i64),
}

impl SettingValue {
    /// Loose truthiness: `Flag(true)`, non-zero numbers, and non-empty,
    /// non-`"0"` strings.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Number(n) => *n != 0,
            Self::Text(text) => !text.is_empty() && text != "0",
        }
    }

    /// Render the value as text. Flags become `"1"`/`""`.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Flag(true) => "1".to_string(),
            Self::Flag(false) => String::new(),
            Self::Number(n) => n.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Read access to host configuration.
pub trait Settings {
    /// Look up a raw value by key.
    fn get(&self, key: &str) -> Option<&SettingValue>;

    /// Whether the key exists and is truthy.
    fn truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(SettingValue::is_truthy)
    }

    /// The value rendered as text, if the key exists.
    fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(SettingValue::to_text)
    }
}

/// In-memory settings store.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: AHashMap<String, SettingValue>,
}

impl MemorySettings {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Builder-style insert for construction chains.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.set(key, value);
        self
    }
}

impl Settings for MemorySettings {
    fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_falsy() {
        let store = MemorySettings::new();
        assert!(!store.truthy("absent"));
        assert_eq!(store.text("absent"), None);
    }

    #[test]
    fn truthiness_rules() {
        assert!(SettingValue::Flag(true).is_truthy());
        assert!(!SettingValue::Flag(false).is_truthy());
        assert!(SettingValue::Number(1).is_truthy());
        assert!(!SettingValue::Number(0).is_truthy());
        assert!(SettingValue::from("yes").is_truthy());
        assert!(!SettingValue::from("").is_truthy());
        assert!(!SettingValue::from("0").is_truthy());
    }

    #[test]
    fn text_rendering() {
        assert_eq!(SettingValue::Flag(true).to_text(), "1");
        assert_eq!(SettingValue::Flag(false).to_text(), "");
        assert_eq!(SettingValue::Number(42).to_text(), "42");
        assert_eq!(SettingValue::from("hi").to_text(), "hi");
    }

    #[test]
    fn set_and_get_round_trip() {
        let store = MemorySettings::new()
            .with("welcome_on", true)
            .with("mail_from", "Site Admin");
        assert!(store.truthy("welcome_on"));
        assert_eq!(store.text("mail_from").as_deref(), Some("Site Admin"));
    }
}
