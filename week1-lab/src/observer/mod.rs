//! Observer registry built on shared/weak ownership
//!
//! A [`Subject`] keeps only [`std::sync::Weak`] handles to its observers, so
//! registering never extends an observer's lifetime. Observers that have been
//! dropped are pruned the next time the subject notifies.
//!
//! # Example
//!
//! ```
//! use week1_lab::observer::{LoggingObserver, Subject};
//!
//! let subject = Subject::new();
//! let observer = LoggingObserver::new("display");
//! subject.add_observer(&observer);
//!
//! assert_eq!(subject.notify().delivered, 1);
//!
//! drop(observer);
//! let report = subject.notify();
//! assert_eq!(report.delivered, 0);
//! assert_eq!(report.pruned, 1);
//! ```

pub mod self_handle;
pub mod subject;

pub use self_handle::{LoggingObserver, SharedFromThis};
pub use subject::{NotifyReport, Subject};

/// Something that wants to hear about a [`Subject`]'s notifications
///
/// `update` runs while the subject's lock is held. Calling back into the same
/// subject from inside `update` deadlocks.
pub trait Observer: Send + Sync {
    fn update(&self);
}
