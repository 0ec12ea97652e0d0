#![forbid(unsafe_code)]

//! Typed extension points: event hooks and value filter chains.
//!
//! A [`Hook<E>`] is a list of observers notified synchronously, in
//! registration order, with a shared reference to the event payload. A
//! [`FilterChain<T>`] is an ordered list of transforms applied to a value
//! in registration order, so a later registration sees (and may override)
//! the output of an earlier one.
//!
//! # Invariants
//!
//! 1. **Order is registration order**: both emission and filtering walk
//!    the list front to back, exactly once per call.
//! 2. **No removal**: registrations live as long as the hook. Consumers
//!    that need detachable behavior gate inside their closure.
//! 3. **Last write wins**: the final transform in a chain produces the
//!    value the caller receives.
//!
//! # Failure Modes
//!
//! - An observer or transform that panics propagates to the emitter.
//! - An empty chain is the identity function; an empty hook emits to
//!   nobody. Neither is an error.

use core::fmt;

/// An ordered list of event observers.
pub struct Hook<E> {
    observers: Vec<Box<dyn FnMut(&E)>>,
}

impl<E> Default for Hook<E> {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for Hook<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<E> Hook<E> {
    /// Create an empty hook.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. It is called on every subsequent emission.
    pub fn observe(&mut self, observer: impl FnMut(&E) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Notify all observers, in registration order.
    pub fn emit(&mut self, event: &E) {
        for observer in &mut self.observers {
            observer(event);
        }
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

/// An ordered chain of value transforms.
pub struct FilterChain<T> {
    transforms: Vec<Box<dyn FnMut(T) -> T>>,
}

impl<T> Default for FilterChain<T> {
    fn default() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for FilterChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("transforms", &self.transforms.len())
            .finish()
    }
}

impl<T> FilterChain<T> {
    /// Create an empty chain (identity).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transform to the end of the chain.
    pub fn add(&mut self, transform: impl FnMut(T) -> T + 'static) {
        self.transforms.push(Box::new(transform));
    }

    /// Run the value through every transform, in registration order.
    pub fn apply(&mut self, value: T) -> T {
        let mut value = value;
        for transform in &mut self.transforms {
            value = transform(value);
        }
        value
    }

    /// Number of registered transforms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Whether no transforms are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}
