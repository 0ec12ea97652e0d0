#![forbid(unsafe_code)]

//! Modal body content, as a tagged variant.
//!
//! The content a modal opens with is dispatched explicitly on its kind
//! instead of being sniffed at runtime. [`Content::from_text`] exists for
//! callers holding a raw string and applies the classification rules
//! those strings conventionally carry: the literal token `"loading"`
//! shows the indicator, an `http(s):` prefix requests a remote body, a
//! `#`/`.` prefix names a document fragment, and anything else is
//! inserted as literal markup.

use core::fmt;

use crate::options::{ModalOptions, OpenEvent};

/// What a content generator produced.
#[derive(Debug)]
pub enum GeneratorOutput {
    /// Markup ready for synchronous insertion.
    Ready(String),
    /// The generator started asynchronous work. The modal enters the
    /// loading state; completion re-enters through
    /// [`crate::ModalManager::finish_content_load`].
    Async,
}

/// A content generator, invoked with the triggering event and the
/// resolved options.
pub type ContentFn = Box<dyn FnMut(Option<&OpenEvent>, &ModalOptions) -> GeneratorOutput>;

/// Body content for a modal.
pub enum Content {
    /// No body content.
    Empty,
    /// Literal markup, inserted as-is.
    Literal(String),
    /// A `#id` or `.class` fragment selector; the matched fragment's
    /// children are cloned in. An unmatched selector falls back to
    /// literal insertion.
    Selector(String),
    /// A remote body fetched through the [`crate::Fetcher`] port; the
    /// loading indicator shows until the fetch resolves.
    RemoteUrl(String),
    /// Show only the loading indicator.
    Loading,
    /// Content produced by a callable.
    Generator(ContentFn),
}

impl Default for Content {
    fn default() -> Self {
        Self::Empty
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Literal(markup) => f.debug_tuple("Literal").field(markup).finish(),
            Self::Selector(selector) => f.debug_tuple("Selector").field(selector).finish(),
            Self::RemoteUrl(url) => f.debug_tuple("RemoteUrl").field(url).finish(),
            Self::Loading => f.write_str("Loading"),
            Self::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

impl Content {
    /// Classify a raw string the way string-typed content is
    /// conventionally interpreted.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        if text == "loading" {
            Self::Loading
        } else if text.starts_with("http:") || text.starts_with("https:") {
            Self::RemoteUrl(text.trim().to_string())
        } else if text.starts_with('#') || text.starts_with('.') {
            Self::Selector(text.to_string())
        } else if text.is_empty() {
            Self::Empty
        } else {
            Self::Literal(text.to_string())
        }
    }

    /// Wrap a callable as generator content.
    #[must_use]
    pub fn generator(
        f: impl FnMut(Option<&OpenEvent>, &ModalOptions) -> GeneratorOutput + 'static,
    ) -> Self {
        Self::Generator(Box::new(f))
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_token() {
        assert!(matches!(Content::from_text("loading"), Content::Loading));
    }

    #[test]
    fn url_prefixes() {
        assert!(matches!(
            Content::from_text("https://example.test/body "),
            Content::RemoteUrl(url) if url == "https://example.test/body"
        ));
        assert!(matches!(
            Content::from_text("http://example.test"),
            Content::RemoteUrl(_)
        ));
    }

    #[test]
    fn selector_prefixes() {
        assert!(matches!(
            Content::from_text("#registration"),
            Content::Selector(sel) if sel == "#registration"
        ));
        assert!(matches!(
            Content::from_text(".profile-card"),
            Content::Selector(_)
        ));
    }

    #[test]
    fn everything_else_is_literal() {
        assert!(matches!(
            Content::from_text("<p>Hello</p>"),
            Content::Literal(markup) if markup == "<p>Hello</p>"
        ));
        assert!(matches!(Content::from_text(""), Content::Empty));
    }

    #[test]
    fn loading_must_be_exact() {
        assert!(matches!(
            Content::from_text("loading..."),
            Content::Literal(_)
        ));
    }
}
