#![forbid(unsafe_code)]

//! Headless modal/dialog stack manager.
//!
//! [`ModalManager`] owns an ordered stack of dialog instances, the shared
//! backdrop overlay, and the document-level scroll lock. It computes
//! responsive layout as plain data ([`ComputedStyle`], [`BodyStyle`]);
//! a rendering embedder applies those styles and feeds element
//! measurements back through [`ModalManager::set_metrics`].
//!
//! # Invariants
//!
//! - At most one modal is attached (visible) at a time: the top of the
//!   stack. Lower entries stay in the stack, detached.
//! - Zero or one overlay exists at any time; it is created lazily on the
//!   first show and removed when the stack empties.
//! - Every stack-reading operation treats "no current modal" as a valid,
//!   non-error state and degrades to a no-op.
//!
//! # Asynchronous content
//!
//! Content generators and remote-URL bodies complete out of band. The
//! embedder re-enters through [`ModalManager::finish_content_load`],
//! which checks that the target modal still exists before touching any
//! state — a completion that lands after the modal closed is silently
//! dropped.

pub mod content;
pub mod events;
pub mod instance;
pub mod layout;
pub mod options;
pub mod ports;
pub mod stack;

pub use content::{Content, ContentFn, GeneratorOutput};
pub use events::{FetchDone, FetchEvent, FetchFailed, ModalHooks};
pub use instance::{ClassList, ModalId, ModalInstance};
pub use layout::{
    BodyStyle, Breakpoint, ComputedStyle, ImageInfo, LayoutResult, ModalMetrics,
    MODAL_HEIGHT_ALLOWANCE,
};
pub use options::{ModalOptions, ModalSize, OpenEvent};
pub use ports::{Fetcher, FetchRequest, HostDocument, MemoryHost, NullFetcher, RecordingFetcher};
pub use stack::{ModalManager, OverflowY, Query};
