#![forbid(unsafe_code)]

//! Modal configuration.
//!
//! [`ModalOptions::default`] encodes the baseline every open starts
//! from: no attributes, no extra classes, a 400ms fade, normal size,
//! empty content. The manager runs every options value through its
//! `options` filter chain before use, which is the typed stand-in for
//! merging caller options over an overridable default map.

use ahash::AHashMap;
use core::fmt;

use crate::content::Content;

/// Size category applied to a modal as a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModalSize {
    Small,
    #[default]
    Normal,
    Large,
}

impl ModalSize {
    /// The class name this size applies.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Normal => "normal",
            Self::Large => "large",
        }
    }
}

/// The UI event that triggered an open, when there was one.
#[derive(Debug, Clone, Default)]
pub struct OpenEvent {
    /// Identifier of the control that triggered the open.
    pub source: Option<String>,
}

impl OpenEvent {
    /// An event originating from the named control.
    #[must_use]
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
        }
    }
}

/// Configuration for one modal.
pub struct ModalOptions {
    /// Attributes applied to the modal element.
    pub attributes: AHashMap<String, String>,
    /// Extra classes, space-separated.
    pub classes: String,
    /// Fade-in duration in milliseconds.
    pub duration_ms: u64,
    /// Header region markup; an empty header removes the region.
    pub header: String,
    /// Footer region markup; an empty footer removes the region.
    pub footer: String,
    /// Size category.
    pub size: ModalSize,
    /// Custom frame template name; falls back to the default frame when
    /// the host does not know it.
    pub template: Option<String>,
    /// Body content.
    pub content: Content,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            attributes: AHashMap::new(),
            classes: String::new(),
            duration_ms: 400,
            header: String::new(),
            footer: String::new(),
            size: ModalSize::Normal,
            template: None,
            content: Content::Empty,
        }
    }
}

impl fmt::Debug for ModalOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalOptions")
            .field("attributes", &self.attributes)
            .field("classes", &self.classes)
            .field("duration_ms", &self.duration_ms)
            .field("header", &self.header)
            .field("footer", &self.footer)
            .field("size", &self.size)
            .field("template", &self.template)
            .field("content", &self.content)
            .finish()
    }
}

impl ModalOptions {
    /// Start from the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one attribute.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the extra classes (space-separated).
    #[must_use]
    pub fn classes(mut self, classes: impl Into<String>) -> Self {
        self.classes = classes.into();
        self
    }

    /// Set the fade duration.
    #[must_use]
    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the header markup.
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Set the footer markup.
    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    /// Set the size category.
    #[must_use]
    pub fn size(mut self, size: ModalSize) -> Self {
        self.size = size;
        self
    }

    /// Use a custom frame template.
    #[must_use]
    pub fn template(mut self, name: impl Into<String>) -> Self {
        self.template = Some(name.into());
        self
    }

    /// Set the body content.
    #[must_use]
    pub fn content(mut self, content: impl Into<Content>) -> Self {
        self.content = content.into();
        self
    }
}
