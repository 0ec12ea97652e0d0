#![forbid(unsafe_code)]

//! Modal stack manager.
//!
//! The [`ModalManager`] owns the stack of live modals, the shared
//! overlay, and the document scroll lock. It is a single stateful
//! service instance: all call sites hold a reference to the same
//! manager rather than ambient globals.
//!
//! # Invariants
//!
//! - The top of the stack is the only attached (visible) modal; lower
//!   entries are detached but retained.
//! - Zero or one overlay exists at any time. It appears on the first
//!   show and disappears when the stack empties.
//! - `close()` pops exactly one level unless it is the last, in which
//!   case the whole stack and the overlay are torn down.
//!
//! # Failure Modes
//!
//! - Every operation on a missing target is a no-op, never an error.
//! - An asynchronous completion for a modal that already closed is
//!   silently dropped.

use parlor_core::geometry::Viewport;

use crate::content::{Content, GeneratorOutput};
use crate::events::{FetchDone, FetchEvent, FetchFailed, ModalHooks};
use crate::instance::{ContentWait, ModalId, ModalInstance};
use crate::layout::{self, Breakpoint, ImageInfo, ModalMetrics};
use crate::options::{ModalOptions, OpenEvent};
use crate::ports::{Fetcher, HostDocument, NullFetcher, NullHost};

/// Resolution query for [`ModalManager::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query<'a> {
    /// The current modal (top of stack).
    Top,
    /// A specific modal, if it is still in the stack.
    Id(ModalId),
    /// The last stack entry matching a `#id` / `.class` selector.
    Selector(&'a str),
}

/// Document `overflow-y` state tracked for cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowY {
    /// No inline override present.
    #[default]
    Inherited,
    /// A residual inline `hidden` the embedder reported.
    Hidden,
    /// Corrected to `visible` by [`ModalManager::clear`].
    Visible,
}

#[derive(Debug, Default)]
struct DocumentState {
    overlay: bool,
    scroll_locked: bool,
    overflow_y: OverflowY,
}

/// Stateful modal stack service.
pub struct ModalManager {
    stack: Vec<ModalInstance>,
    doc: DocumentState,
    viewport: Viewport,
    /// Extension points; register observers and filters directly.
    pub hooks: ModalHooks,
    host: Box<dyn HostDocument>,
    fetcher: Box<dyn Fetcher>,
}

impl ModalManager {
    /// Create a manager for the given viewport, with no host document
    /// and no fetcher wired.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            stack: Vec::new(),
            doc: DocumentState::default(),
            viewport,
            hooks: ModalHooks::new(),
            host: Box::new(NullHost),
            fetcher: Box::new(NullFetcher),
        }
    }

    /// Wire a host document for fragment and template lookups.
    #[must_use]
    pub fn with_host(mut self, host: impl HostDocument + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    /// Wire a fetcher for remote body content.
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Box::new(fetcher);
        self
    }

    // --- Stack Operations ---

    /// Add and display a modal.
    ///
    /// The options pass through the `options` filter chain first. The
    /// previous top is hidden (detached, retained); the new modal is
    /// pushed, overlaid, laid out, and faded in.
    pub fn open(&mut self, options: ModalOptions, event: Option<&OpenEvent>) -> ModalId {
        let mut options = self.hooks.options.apply(options);

        let mut inst = ModalInstance::new();
        let id = inst.id();

        inst.template = options
            .template
            .take()
            .filter(|name| self.host.has_template(name));
        if !options.header.is_empty() {
            inst.header = Some(options.header.clone());
        }
        if !options.footer.is_empty() {
            inst.footer = Some(options.footer.clone());
        }
        inst.classes.add_many(&options.classes);
        inst.classes.add(options.size.class_name());
        inst.attributes = options.attributes.clone();
        inst.duration_ms = options.duration_ms;

        let content = std::mem::take(&mut options.content);
        match content {
            Content::Empty => {}
            Content::Literal(markup) => {
                Self::populate(&mut inst, markup, self.viewport, &mut self.hooks);
            }
            Content::Selector(selector) => {
                // An unmatched selector degrades to literal insertion.
                let markup = self
                    .host
                    .fragment(&selector)
                    .unwrap_or(selector);
                Self::populate(&mut inst, markup, self.viewport, &mut self.hooks);
            }
            Content::Loading => {
                Self::set_loading_state(&mut inst, true);
            }
            Content::RemoteUrl(url) => {
                self.hooks.before_fetch.emit(&FetchEvent { modal: id });
                Self::set_loading_state(&mut inst, true);
                inst.wait = Some(ContentWait::Remote);
                self.fetcher.begin(&url, id);
            }
            Content::Generator(mut generate) => match generate(event, &options) {
                GeneratorOutput::Ready(markup) => {
                    Self::populate(&mut inst, markup, self.viewport, &mut self.hooks);
                }
                GeneratorOutput::Async => {
                    self.hooks.before_fetch.emit(&FetchEvent { modal: id });
                    Self::set_loading_state(&mut inst, true);
                    inst.wait = Some(ContentWait::Generator);
                }
            },
        }

        self.hooks.before_open.emit(&id);
        self.hide(None);
        self.stack.push(inst);
        self.show(Some(id));
        id
    }

    /// Close the current modal.
    ///
    /// With more than one modal in the stack, pops one level and
    /// re-shows the new top; with one (or none), tears everything down.
    pub fn close(&mut self) -> &mut Self {
        if let Some(id) = self.current() {
            self.hooks.before_close.emit(&id);
        }
        if self.stack.len() > 1 {
            self.stack.pop();
            self.show(None);
        } else {
            self.clear();
        }
        self
    }

    /// Close every modal in one step.
    pub fn close_all(&mut self) -> &mut Self {
        if let Some(id) = self.current() {
            self.hooks.before_close.emit(&id);
        }
        self.clear();
        self
    }

    /// Remove all modals and the overlay, release the scroll lock, and
    /// correct a residual hidden overflow style. Idempotent.
    pub fn clear(&mut self) -> &mut Self {
        self.stack.clear();
        self.doc.overlay = false;
        self.doc.scroll_locked = false;
        if self.doc.overflow_y == OverflowY::Hidden {
            self.doc.overflow_y = OverflowY::Visible;
        }
        self
    }

    /// Detach the target modal (keeping it in the stack).
    pub fn hide(&mut self, target: Option<ModalId>) -> Option<ModalId> {
        let id = self.resolve(target)?;
        let inst = self.instance_mut_by_id(id)?;
        inst.attached = false;
        inst.opacity = 0.0;
        self.hooks.hidden.emit(&id);
        Some(id)
    }

    /// Attach the target modal: ensure the overlay, re-attach, relayout,
    /// and fade in.
    pub fn show(&mut self, target: Option<ModalId>) -> Option<ModalId> {
        let id = self.resolve(target)?;
        if !self.doc.overlay {
            self.doc.overlay = true;
            self.doc.scroll_locked = true;
        }
        if let Some(inst) = self.instance_mut_by_id(id) {
            inst.attached = true;
        }
        self.relayout(Some(id));
        if let Some(inst) = self.instance_mut_by_id(id) {
            inst.opacity = 1.0;
        }
        self.hooks.shown.emit(&id);
        Some(id)
    }

    // --- State Queries ---

    /// The current modal: top of stack, if any.
    ///
    /// The stack is the document here, so the "search the document for a
    /// visible modal" fallback folds into this lookup.
    #[must_use]
    pub fn current(&self) -> Option<ModalId> {
        self.stack.last().map(ModalInstance::id)
    }

    /// Resolve a query against the stack.
    #[must_use]
    pub fn get(&self, query: Query<'_>) -> Option<ModalId> {
        match query {
            Query::Top => self.current(),
            Query::Id(id) => self.contains(id).then_some(id),
            Query::Selector(selector) => self
                .stack
                .iter()
                .filter(|inst| inst.matches(selector))
                .next_back()
                .map(ModalInstance::id),
        }
    }

    /// Whether a modal is still in the stack.
    #[must_use]
    pub fn contains(&self, id: ModalId) -> bool {
        self.stack.iter().any(|inst| inst.id() == id)
    }

    /// Number of modals in the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Number of attached (visible) modals. At most one.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.stack.iter().filter(|inst| inst.is_attached()).count()
    }

    /// Number of overlay nodes in the document. Zero or one.
    #[must_use]
    pub fn overlay_count(&self) -> usize {
        usize::from(self.doc.overlay)
    }

    /// Whether the document scroll lock class is applied.
    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.doc.scroll_locked
    }

    /// Tracked document `overflow-y` state.
    #[must_use]
    pub fn overflow_y(&self) -> OverflowY {
        self.doc.overflow_y
    }

    /// Record a residual inline `overflow-y: hidden` the embedder found;
    /// [`Self::clear`] corrects it to `visible`.
    pub fn set_body_overflow_hidden(&mut self) -> &mut Self {
        self.doc.overflow_y = OverflowY::Hidden;
        self
    }

    /// The viewport layout is computed against.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Inspect a modal by ID.
    #[must_use]
    pub fn instance(&self, id: ModalId) -> Option<&ModalInstance> {
        self.stack.iter().find(|inst| inst.id() == id)
    }

    /// Inspect the current modal.
    #[must_use]
    pub fn current_instance(&self) -> Option<&ModalInstance> {
        self.stack.last()
    }

    // --- Content and Loading ---

    /// Add or remove the loading state. While loading, clicks inside the
    /// modal are suppressed; clearing detaches the suppression entirely.
    pub fn set_loading(&mut self, is_loading: bool, target: Option<ModalId>) -> &mut Self {
        if let Some(id) = self.resolve(target)
            && let Some(inst) = self.instance_mut_by_id(id)
        {
            Self::set_loading_state(inst, is_loading);
        }
        self
    }

    /// Replace the target modal's body, relayout, and notify. No-op
    /// without a resolvable target.
    pub fn set_content(&mut self, markup: impl Into<String>, target: Option<ModalId>) -> &mut Self {
        if let Some(id) = self.resolve(target) {
            let viewport = self.viewport;
            if let Some(index) = self.index_of(id) {
                Self::populate(
                    &mut self.stack[index],
                    markup.into(),
                    viewport,
                    &mut self.hooks,
                );
            }
        }
        self
    }

    /// Deliver the outcome of asynchronous content work.
    ///
    /// Drops silently when the modal is gone or was not waiting. The
    /// loading state is released on both outcomes. A generator result
    /// only populates a body that is still empty; a remote result always
    /// replaces the body.
    pub fn finish_content_load(
        &mut self,
        id: ModalId,
        result: Result<String, String>,
    ) -> &mut Self {
        let Some(index) = self.index_of(id) else {
            tracing::debug!(%id, "content completion for a closed modal dropped");
            return self;
        };
        let Some(wait) = self.stack[index].wait.take() else {
            tracing::debug!(%id, "content completion without a pending wait dropped");
            return self;
        };

        Self::set_loading_state(&mut self.stack[index], false);

        match result {
            Ok(markup) => {
                let populate = match wait {
                    ContentWait::Remote => true,
                    ContentWait::Generator => self.stack[index].body().is_empty(),
                };
                if populate {
                    let viewport = self.viewport;
                    Self::populate(
                        &mut self.stack[index],
                        markup.clone(),
                        viewport,
                        &mut self.hooks,
                    );
                }
                self.hooks.fetch_done.emit(&FetchDone { modal: id, body: markup });
            }
            Err(error) => {
                tracing::warn!(%id, %error, "modal content fetch failed");
                self.hooks.fetch_failed.emit(&FetchFailed { modal: id, error });
            }
        }
        self
    }

    // --- Layout ---

    /// Recompute layout for the target modal. Safe to call with no modal
    /// present; idempotent for a fixed viewport and metrics.
    pub fn relayout(&mut self, target: Option<ModalId>) -> &mut Self {
        if let Some(id) = self.resolve(target) {
            let viewport = self.viewport;
            if let Some(index) = self.index_of(id) {
                Self::apply_layout(&mut self.stack[index], viewport, &mut self.hooks);
            }
        }
        self
    }

    /// Update the viewport and relayout the current modal.
    pub fn set_viewport(&mut self, viewport: Viewport) -> &mut Self {
        self.viewport = viewport;
        self.relayout(None)
    }

    /// Record embedder-measured geometry for the target modal.
    pub fn set_metrics(&mut self, metrics: ModalMetrics, target: Option<ModalId>) -> &mut Self {
        if let Some(id) = self.resolve(target)
            && let Some(inst) = self.instance_mut_by_id(id)
        {
            inst.metrics = metrics;
        }
        self
    }

    /// Record the body image driving layout for the target modal.
    pub fn set_body_image(
        &mut self,
        image: Option<ImageInfo>,
        target: Option<ModalId>,
    ) -> &mut Self {
        if let Some(id) = self.resolve(target)
            && let Some(inst) = self.instance_mut_by_id(id)
        {
            inst.body_image = image;
        }
        self
    }

    /// React to a body image finishing its load: relayout the target.
    pub fn image_loaded(&mut self, target: Option<ModalId>) -> &mut Self {
        self.relayout(target)
    }

    // --- Internals ---

    fn resolve(&self, target: Option<ModalId>) -> Option<ModalId> {
        match target {
            Some(id) => self.contains(id).then_some(id),
            None => self.current(),
        }
    }

    fn index_of(&self, id: ModalId) -> Option<usize> {
        self.stack.iter().position(|inst| inst.id() == id)
    }

    fn instance_mut_by_id(&mut self, id: ModalId) -> Option<&mut ModalInstance> {
        self.stack.iter_mut().find(|inst| inst.id() == id)
    }

    fn set_loading_state(inst: &mut ModalInstance, is_loading: bool) {
        if is_loading {
            inst.classes.add("loading");
            inst.loading = true;
            inst.clicks_suppressed = true;
        } else {
            inst.classes.remove("loading");
            inst.loading = false;
            inst.clicks_suppressed = false;
        }
    }

    fn populate(
        inst: &mut ModalInstance,
        markup: String,
        viewport: Viewport,
        hooks: &mut ModalHooks,
    ) {
        inst.body = markup;
        Self::apply_layout(inst, viewport, hooks);
        hooks.content_added.emit(&inst.id());
    }

    fn apply_layout(inst: &mut ModalInstance, viewport: Viewport, hooks: &mut ModalHooks) {
        let result = layout::compute(viewport, inst.metrics, inst.body_image);
        for class in Breakpoint::ALL_CLASSES {
            inst.classes.remove(class);
        }
        if let Some(class) = result.breakpoint.class_name() {
            inst.classes.add(class);
        }
        inst.style = hooks.responsive.apply(result.style);
        inst.body_style = result.body_style;
        inst.image_display = result.image;
    }
}
