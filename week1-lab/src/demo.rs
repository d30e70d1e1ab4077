//! Ownership and observer lifecycle demonstrations
//!
//! Both demos only log what happens. They return a small report so the CLI
//! can print a summary and tests can check the observed counts.

use crate::observer::{LoggingObserver, NotifyReport, Subject};
use serde::Serialize;
use std::sync::Arc;

/// A value that logs when it is acquired and released
#[derive(Debug)]
pub struct Resource {
    label: String,
}

impl Resource {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        log::info!("Resource '{}' acquired", label);
        Self { label }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Drop for Resource {
    fn drop(&mut self) {
        log::info!("Resource '{}' released", self.label);
    }
}

/// What the ownership demo observed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OwnershipReport {
    /// Strong count of the shared resource once the pool also holds it
    pub shared_strong_count: usize,
    /// Whether the weak handle upgraded while the resource was alive
    pub upgraded_while_alive: bool,
    /// Whether the weak handle upgraded after every owner was gone
    pub upgraded_after_release: bool,
}

/// Walk through unique, shared and weak ownership of a [`Resource`]
pub fn ownership_demo() -> OwnershipReport {
    let mut report = OwnershipReport::default();

    let weak = {
        let _unique = Box::new(Resource::new("unique"));

        let shared = Arc::new(Resource::new("shared"));
        let pool = vec![Arc::clone(&shared)];
        report.shared_strong_count = Arc::strong_count(&shared);
        log::info!(
            "Pool holds {} resource(s), strong count {}",
            pool.len(),
            report.shared_strong_count
        );

        let weak = Arc::downgrade(&shared);
        if let Some(resource) = weak.upgrade() {
            log::info!("Resource '{}' still exists", resource.label());
            report.upgraded_while_alive = true;
        }
        weak
    };

    report.upgraded_after_release = weak.upgrade().is_some();
    if !report.upgraded_after_release {
        log::info!("Weak handle no longer resolves");
    }
    report
}

/// What the lifecycle demo observed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LifecycleReport {
    pub first: NotifyReport,
    pub after_drop: NotifyReport,
}

/// Register an observer, notify, drop the observer, notify again
pub fn lifecycle_demo() -> LifecycleReport {
    let subject = Subject::new();

    let observer = LoggingObserver::new("demo");
    subject.add_observer(&observer);

    let first = subject.notify();

    drop(observer);

    let after_drop = subject.notify();
    log::info!("Registry after drop: {:?}", subject);

    LifecycleReport { first, after_drop }
}
