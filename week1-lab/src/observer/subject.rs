//! Subject - the weak-reference observer registry

use super::Observer;
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Outcome of a single [`Subject::notify`] pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NotifyReport {
    /// Observers whose `update` was called
    pub delivered: usize,
    /// Dead entries removed during the pass
    pub pruned: usize,
}

/// Holds weak references to observers and broadcasts to the live ones
///
/// `add_observer` and `notify` serialize on one mutex per subject, so either
/// can be called from any thread.
#[derive(Default)]
pub struct Subject {
    observers: Mutex<Vec<Weak<dyn Observer>>>,
}

impl Subject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer without taking ownership of it
    pub fn add_observer<O: Observer + 'static>(&self, observer: &Arc<O>) {
        let weak: Weak<dyn Observer> = Arc::downgrade(observer) as Weak<O>;
        let mut observers = self.lock();
        observers.push(weak);
        log::trace!("Observer registered ({} entries)", observers.len());
    }

    /// Call `update` on every live observer in registration order
    ///
    /// Entries whose observer has been dropped are removed in place. Survivors
    /// keep their relative order. The strong handle obtained for each call is
    /// released before moving on to the next entry.
    pub fn notify(&self) -> NotifyReport {
        let mut report = NotifyReport::default();
        let mut observers = self.lock();

        observers.retain(|weak| match weak.upgrade() {
            Some(observer) => {
                observer.update();
                report.delivered += 1;
                true
            }
            None => {
                report.pruned += 1;
                false
            }
        });

        if report.pruned > 0 {
            log::trace!("Pruned {} expired observer(s)", report.pruned);
        }
        log::debug!(
            "Notified {} observer(s), {} remaining",
            report.delivered,
            observers.len()
        );
        report
    }

    /// Drop expired entries without notifying anyone
    pub fn prune(&self) -> usize {
        let mut observers = self.lock();
        let before = observers.len();
        observers.retain(|weak| weak.strong_count() > 0);
        before - observers.len()
    }

    /// Number of entries, including expired ones not yet pruned
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of entries whose observer is still alive
    pub fn live_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    // A panic inside `update` poisons the mutex, but every mutation is a single
    // Vec operation, so the contents are still consistent.
    fn lock(&self) -> MutexGuard<'_, Vec<Weak<dyn Observer>>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let observers = self.lock();
        let live = observers.iter().filter(|weak| weak.strong_count() > 0).count();
        f.debug_struct("Subject")
            .field("entries", &observers.len())
            .field("live", &live)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Appends its id to a shared log on every update
    struct Recorder {
        id: char,
        log: Arc<Mutex<Vec<char>>>,
    }

    impl Observer for Recorder {
        fn update(&self) {
            self.log.lock().unwrap().push(self.id);
        }
    }

    fn recorder(id: char, log: &Arc<Mutex<Vec<char>>>) -> Arc<Recorder> {
        Arc::new(Recorder { id, log: Arc::clone(log) })
    }

    struct Counter(AtomicUsize);

    impl Observer for Counter {
        fn update(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_notify_live_observer() {
        let subject = Subject::new();
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        subject.add_observer(&counter);

        assert_eq!(subject.notify(), NotifyReport { delivered: 1, pruned: 0 });
        assert_eq!(subject.notify(), NotifyReport { delivered: 1, pruned: 0 });
        assert_eq!(counter.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_registry_does_not_own_observers() {
        let subject = Subject::new();
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        subject.add_observer(&counter);

        assert_eq!(Arc::strong_count(&counter), 1);
        assert_eq!(Arc::weak_count(&counter), 1);
    }

    #[test]
    fn test_dropped_observer_is_pruned_once() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let subject = Subject::new();
        let a = recorder('a', &log);
        subject.add_observer(&a);
        drop(a);

        assert_eq!(subject.len(), 1);
        assert_eq!(subject.live_count(), 0);

        assert_eq!(subject.notify(), NotifyReport { delivered: 0, pruned: 1 });
        assert!(subject.is_empty());
        assert!(log.lock().unwrap().is_empty());

        // Nothing left to prune the second time around
        assert_eq!(subject.notify(), NotifyReport::default());
    }

    #[test]
    fn test_registration_order_is_notification_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let subject = Subject::new();
        let a = recorder('a', &log);
        let b = recorder('b', &log);
        let c = recorder('c', &log);
        subject.add_observer(&a);
        subject.add_observer(&b);
        subject.add_observer(&c);

        subject.notify();
        assert_eq!(*log.lock().unwrap(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_dead_entries_skipped_without_reordering() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let subject = Subject::new();
        let a = recorder('a', &log);
        let b = recorder('b', &log);
        let c = recorder('c', &log);
        let d = recorder('d', &log);
        for observer in [&a, &b, &c, &d] {
            subject.add_observer(observer);
        }

        drop(b);
        drop(d);

        assert_eq!(subject.notify(), NotifyReport { delivered: 2, pruned: 2 });
        assert_eq!(*log.lock().unwrap(), vec!['a', 'c']);
        assert_eq!(subject.len(), 2);

        log.lock().unwrap().clear();
        subject.notify();
        assert_eq!(*log.lock().unwrap(), vec!['a', 'c']);
    }

    #[test]
    fn test_mixed_observer_types() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let subject = Subject::new();
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        let a = recorder('a', &log);
        subject.add_observer(&counter);
        subject.add_observer(&a);

        assert_eq!(subject.notify().delivered, 2);
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        assert_eq!(*log.lock().unwrap(), vec!['a']);
    }

    #[test]
    fn test_same_observer_registered_twice() {
        let subject = Subject::new();
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        subject.add_observer(&counter);
        subject.add_observer(&counter);

        assert_eq!(subject.notify().delivered, 2);
        assert_eq!(counter.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_prune_without_notify() {
        let subject = Subject::new();
        let kept = Arc::new(Counter(AtomicUsize::new(0)));
        let gone = Arc::new(Counter(AtomicUsize::new(0)));
        subject.add_observer(&gone);
        subject.add_observer(&kept);
        drop(gone);

        assert_eq!(subject.prune(), 1);
        assert_eq!(subject.prune(), 0);
        assert_eq!(subject.len(), 1);
        assert_eq!(kept.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_debug_output() {
        let subject = Subject::new();
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        subject.add_observer(&counter);
        assert_eq!(format!("{:?}", subject), "Subject { entries: 1, live: 1 }");
    }
}
