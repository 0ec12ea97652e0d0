#![forbid(unsafe_code)]

//! Lifecycle hooks and filter chains for the modal stack.
//!
//! Every extension point is typed: lifecycle notifications are
//! [`Hook`]s, overridable values are [`FilterChain`]s. Emission order
//! within one operation follows the lifecycle: content events fire
//! before `before_open`, and `shown` fires last.

use parlor_core::hooks::{FilterChain, Hook};

use crate::instance::ModalId;
use crate::layout::ComputedStyle;
use crate::options::ModalOptions;

/// Payload for the pre-fetch notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchEvent {
    pub modal: ModalId,
}

/// Payload for a successful asynchronous content load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchDone {
    pub modal: ModalId,
    pub body: String,
}

/// Payload for a failed asynchronous content load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailed {
    pub modal: ModalId,
    pub error: String,
}

/// All extension points of a [`crate::ModalManager`].
#[derive(Debug, Default)]
pub struct ModalHooks {
    /// Runs on every open, over the caller-supplied options.
    pub options: FilterChain<ModalOptions>,
    /// Runs on every layout pass, over the computed modal style.
    pub responsive: FilterChain<ComputedStyle>,
    /// Fired before a new modal is pushed onto the stack.
    pub before_open: Hook<ModalId>,
    /// Fired after a modal is attached and laid out.
    pub shown: Hook<ModalId>,
    /// Fired when a modal is detached but retained in the stack.
    pub hidden: Hook<ModalId>,
    /// Fired before the current modal is removed.
    pub before_close: Hook<ModalId>,
    /// Fired whenever body content is inserted or replaced.
    pub content_added: Hook<ModalId>,
    /// Fired before asynchronous content work starts.
    pub before_fetch: Hook<FetchEvent>,
    /// Fired when asynchronous content resolved successfully.
    pub fetch_done: Hook<FetchDone>,
    /// Fired when asynchronous content failed.
    pub fetch_failed: Hook<FetchFailed>,
}

impl ModalHooks {
    /// Create hooks with nothing registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
