//! Observers that can hand out strong references to themselves
//!
//! A type that needs an `Arc` to itself from inside `&self` keeps a
//! `Weak<Self>` filled in by [`Arc::new_cyclic`]. Constructors of such types
//! return `Arc<Self>` directly, so an instance can never exist outside a
//! shared allocation and the self handle is always valid while the object is.

use super::{Observer, Subject};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

/// Access to a strong handle to `self`
pub trait SharedFromThis: Sized {
    /// The weak self reference stored at construction time
    fn weak_self(&self) -> &Weak<Self>;

    /// Upgrade the stored self reference
    ///
    /// Returns `None` only while the last strong handle is being dropped.
    fn shared_from_this(&self) -> Option<Arc<Self>> {
        self.weak_self().upgrade()
    }
}

/// A named observer that logs and counts its updates
pub struct LoggingObserver {
    name: String,
    updates: AtomicUsize,
    this: Weak<LoggingObserver>,
}

impl LoggingObserver {
    /// Create a new observer behind an `Arc`
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        let name = name.into();
        Arc::new_cyclic(|this| Self {
            name,
            updates: AtomicUsize::new(0),
            this: this.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// How many times `update` has been called
    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    /// Register this observer with `subject` using its own strong handle
    ///
    /// Returns false if the observer is already being torn down.
    pub fn register_with(&self, subject: &Subject) -> bool {
        match self.shared_from_this() {
            Some(this) => {
                subject.add_observer(&this);
                true
            }
            None => false,
        }
    }
}

impl SharedFromThis for LoggingObserver {
    fn weak_self(&self) -> &Weak<Self> {
        &self.this
    }
}

impl Observer for LoggingObserver {
    fn update(&self) {
        let count = self.updates.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!("Observer '{}' updated (#{})", self.name, count);
    }
}

impl Drop for LoggingObserver {
    fn drop(&mut self) {
        log::info!("Observer '{}' dropped", self.name);
    }
}

impl fmt::Debug for LoggingObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingObserver")
            .field("name", &self.name)
            .field("updates", &self.update_count())
            .finish()
    }
}
