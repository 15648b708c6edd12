//! Training notifications.
//!
//! Observers subscribe to a [`TrainingEvents`] registry and are called
//! synchronously, in training order, from inside
//! [`IncrementalTrainer::train_pending`](crate::training::IncrementalTrainer::train_pending).
//! An observer that needs to do slow work should hand the event off instead
//! of blocking.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use falx::training::events::{TrainingEvent, TrainingEvents};
//!
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&seen);
//!
//! let mut events = TrainingEvents::new();
//! events.subscribe_fn(move |event| {
//!     if let TrainingEvent::TrainingComplete { .. } = event {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     }
//! });
//!
//! events.emit(&TrainingEvent::TrainingComplete { trained: 0, total: 0 });
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::document::Document;

/// A notification emitted while training.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrainingEvent<'a> {
    /// A document was fed to the model.
    DocumentTrained {
        /// Store index of the document.
        index: usize,
        /// Store size when training started.
        total: usize,
        document: &'a Document,
    },
    /// A training pass finished; the model's finalize step runs next.
    TrainingComplete {
        /// Documents fed during this pass.
        trained: usize,
        total: usize,
    },
}

/// Receives training notifications.
pub trait TrainingObserver: Send + Sync {
    fn on_event(&self, event: &TrainingEvent<'_>);
}

impl<F> TrainingObserver for F
where
    F: Fn(&TrainingEvent<'_>) + Send + Sync,
{
    fn on_event(&self, event: &TrainingEvent<'_>) {
        self(event)
    }
}

/// Registry of training observers.
///
/// Never persisted: a restored classifier starts with an empty registry.
#[derive(Clone, Default)]
pub struct TrainingEvents {
    observers: Vec<Arc<dyn TrainingObserver>>,
}

impl TrainingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Observers are notified in subscription order.
    pub fn subscribe(&mut self, observer: Arc<dyn TrainingObserver>) {
        self.observers.push(observer);
    }

    /// Register a closure as an observer.
    pub fn subscribe_fn<F>(&mut self, observer: F)
    where
        F: Fn(&TrainingEvent<'_>) + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(observer));
    }

    pub fn emit(&self, event: &TrainingEvent<'_>) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for TrainingEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainingEvents")
            .field("observers", &self.observers.len())
            .finish()
    }
}
