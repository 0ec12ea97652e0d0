#![forbid(unsafe_code)]

//! Per-modal state.
//!
//! A [`ModalInstance`] is one entry in the manager's stack: region
//! markup, class list, attributes, the measured geometry the embedder
//! reported, and the flags the lifecycle operations flip (attachment,
//! loading, click suppression). Instances are created by
//! [`crate::ModalManager::open`] and never outlive the stack.

use ahash::AHashMap;
use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parlor_core::geometry::Size;

use crate::layout::{BodyStyle, ComputedStyle, ImageInfo, ModalMetrics};

/// Global counter for unique modal IDs.
static MODAL_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a modal in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModalId(u64);

impl ModalId {
    pub(crate) fn next() -> Self {
        Self(MODAL_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "modal#{}", self.0)
    }
}

/// An ordered, duplicate-free list of class names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    names: Vec<String>,
}

impl ClassList {
    /// Create an empty class list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one class name. Duplicates and empty names are ignored.
    pub fn add(&mut self, name: &str) {
        if !name.is_empty() && !self.contains(name) {
            self.names.push(name.to_string());
        }
    }

    /// Add every whitespace-separated name in the string.
    pub fn add_many(&mut self, names: &str) {
        for name in names.split_whitespace() {
            self.add(name);
        }
    }

    /// Remove one class name, if present.
    pub fn remove(&mut self, name: &str) {
        self.names.retain(|existing| existing != name);
    }

    /// Whether the class is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    /// Iterate class names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join(" "))
    }
}

/// What kind of asynchronous content the modal is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContentWait {
    /// A generator reported asynchronous completion. Its result only
    /// populates the body if nothing filled it in the meantime.
    Generator,
    /// A remote-URL fetch. Its result always replaces the body.
    Remote,
}

/// One modal in the stack.
#[derive(Debug)]
pub struct ModalInstance {
    id: ModalId,
    pub(crate) header: Option<String>,
    pub(crate) footer: Option<String>,
    pub(crate) body: String,
    pub(crate) classes: ClassList,
    pub(crate) attributes: AHashMap<String, String>,
    pub(crate) template: Option<String>,
    pub(crate) duration_ms: u64,
    pub(crate) opacity: f64,
    pub(crate) attached: bool,
    pub(crate) loading: bool,
    pub(crate) clicks_suppressed: bool,
    pub(crate) metrics: ModalMetrics,
    pub(crate) body_image: Option<ImageInfo>,
    pub(crate) image_display: Option<Size>,
    pub(crate) style: ComputedStyle,
    pub(crate) body_style: BodyStyle,
    pub(crate) wait: Option<ContentWait>,
}

impl ModalInstance {
    pub(crate) fn new() -> Self {
        Self {
            id: ModalId::next(),
            header: None,
            footer: None,
            body: String::new(),
            classes: ClassList::new(),
            attributes: AHashMap::new(),
            template: None,
            duration_ms: 400,
            opacity: 0.0,
            attached: false,
            loading: false,
            clicks_suppressed: false,
            metrics: ModalMetrics::default(),
            body_image: None,
            image_display: None,
            style: ComputedStyle::default(),
            body_style: BodyStyle::default(),
            wait: None,
        }
    }

    /// This modal's identifier.
    #[must_use]
    pub fn id(&self) -> ModalId {
        self.id
    }

    /// Header markup, if the region exists.
    #[must_use]
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Footer markup, if the region exists.
    #[must_use]
    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    /// Current body markup.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The class list.
    #[must_use]
    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    /// Look up one attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Custom frame template resolved at open, if any.
    #[must_use]
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Fade duration for the embedder's opacity animation.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Target opacity (0 while hidden, 1 once shown).
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Whether the modal is attached to the document (visible).
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether the loading state is active.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether clicks inside the modal are currently suppressed.
    #[must_use]
    pub fn clicks_suppressed(&self) -> bool {
        self.clicks_suppressed
    }

    /// Geometry last reported by the embedder.
    #[must_use]
    pub fn metrics(&self) -> ModalMetrics {
        self.metrics
    }

    /// Body image driving layout, if any.
    #[must_use]
    pub fn body_image(&self) -> Option<ImageInfo> {
        self.body_image
    }

    /// Display size of the body image after the viewport cap, when the
    /// image layout rule applied on the last pass.
    #[must_use]
    pub fn image_display(&self) -> Option<Size> {
        self.image_display
    }

    /// Style computed on the last layout pass.
    #[must_use]
    pub fn style(&self) -> ComputedStyle {
        self.style
    }

    /// Body-region style computed on the last layout pass.
    #[must_use]
    pub fn body_style(&self) -> BodyStyle {
        self.body_style
    }

    /// Whether a `#id` / `.class` selector matches this modal.
    #[must_use]
    pub fn matches(&self, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            self.attribute("id") == Some(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            self.classes.contains(class)
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = ModalInstance::new();
        let b = ModalInstance::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn class_list_dedupes_and_orders() {
        let mut classes = ClassList::new();
        classes.add_many("invite wide invite");
        classes.add("");
        assert_eq!(classes.len(), 2);
        assert_eq!(classes.to_string(), "invite wide");

        classes.remove("invite");
        assert!(!classes.contains("invite"));
        assert!(classes.contains("wide"));
    }

    #[test]
    fn selector_matching() {
        let mut inst = ModalInstance::new();
        inst.attributes.insert("id".to_string(), "invite".to_string());
        inst.classes.add("wide");

        assert!(inst.matches("#invite"));
        assert!(inst.matches(".wide"));
        assert!(!inst.matches("#other"));
        assert!(!inst.matches(".narrow"));
        assert!(!inst.matches("invite"));
    }
}
