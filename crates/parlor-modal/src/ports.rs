#![forbid(unsafe_code)]

//! Embedder ports.
//!
//! The manager is headless: everything that touches a real document or
//! the network goes through these seams. [`HostDocument`] answers
//! fragment-selector and custom-template lookups; [`Fetcher`] starts
//! remote body fetches. Both have do-nothing defaults so a manager is
//! usable without wiring.
//!
//! A fetch is fire-and-forget: the port only *starts* the request. The
//! embedder delivers the outcome later through
//! [`crate::ModalManager::finish_content_load`], which tolerates the
//! modal having closed in the meantime.

use ahash::{AHashMap, AHashSet};
use std::cell::RefCell;
use std::rc::Rc;

use crate::instance::ModalId;

/// Document-side lookups the manager delegates to its embedder.
pub trait HostDocument {
    /// Markup of the fragment a `#id`/`.class` selector names, if the
    /// document has one. The returned markup is owned by the caller;
    /// the source element is never aliased.
    fn fragment(&self, selector: &str) -> Option<String> {
        let _ = selector;
        None
    }

    /// Whether a custom frame template with this name exists.
    fn has_template(&self, name: &str) -> bool {
        let _ = name;
        false
    }
}

/// A host with no fragments and no templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl HostDocument for NullHost {}

/// In-memory host document for tests and simple embeddings.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    fragments: AHashMap<String, String>,
    templates: AHashSet<String>,
}

impl MemoryHost {
    /// Create an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fragment under a selector.
    pub fn insert_fragment(&mut self, selector: impl Into<String>, markup: impl Into<String>) {
        self.fragments.insert(selector.into(), markup.into());
    }

    /// Register a custom frame template name.
    pub fn insert_template(&mut self, name: impl Into<String>) {
        self.templates.insert(name.into());
    }
}

impl HostDocument for MemoryHost {
    fn fragment(&self, selector: &str) -> Option<String> {
        self.fragments.get(selector).cloned()
    }

    fn has_template(&self, name: &str) -> bool {
        self.templates.contains(name)
    }
}

/// Starts remote body fetches.
pub trait Fetcher {
    /// Begin fetching `url` for the given modal. Completion is delivered
    /// out of band via [`crate::ModalManager::finish_content_load`].
    fn begin(&mut self, url: &str, modal: ModalId);
}

/// A fetcher that drops every request. The modal stays in its loading
/// state until something calls `finish_content_load`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFetcher;

impl Fetcher for NullFetcher {
    fn begin(&mut self, url: &str, modal: ModalId) {
        tracing::debug!(url, %modal, "no fetcher wired; remote content stays pending");
    }
}

/// One request a [`RecordingFetcher`] captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub modal: ModalId,
}

/// A fetcher that records requests for later inspection. Clones share
/// the same request log, so tests keep a clone and hand the original to
/// the manager.
#[derive(Debug, Clone, Default)]
pub struct RecordingFetcher {
    requests: Rc<RefCell<Vec<FetchRequest>>>,
}

impl RecordingFetcher {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured requests.
    #[must_use]
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.borrow().clone()
    }
}

impl Fetcher for RecordingFetcher {
    fn begin(&mut self, url: &str, modal: ModalId) {
        self.requests.borrow_mut().push(FetchRequest {
            url: url.to_string(),
            modal,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_host_knows_nothing() {
        let host = NullHost;
        assert_eq!(host.fragment("#x"), None);
        assert!(!host.has_template("custom"));
    }

    #[test]
    fn memory_host_round_trip() {
        let mut host = MemoryHost::new();
        host.insert_fragment("#card", "<p>card</p>");
        host.insert_template("invite-frame");

        assert_eq!(host.fragment("#card").as_deref(), Some("<p>card</p>"));
        assert_eq!(host.fragment("#other"), None);
        assert!(host.has_template("invite-frame"));
    }

    #[test]
    fn recording_fetcher_shares_log_across_clones() {
        let recorder = RecordingFetcher::new();
        let mut handle = recorder.clone();
        let id = crate::instance::ModalInstance::new().id();

        handle.begin("https://example.test/a", id);
        let requests = recorder.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://example.test/a");
    }
}
