// Stress the Subject registry from many threads at once
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use week1_lab::{Observer, Subject};

const ADDERS: usize = 8;
const NOTIFIERS: usize = 4;
const PER_ADDER: usize = 50;
const ROUNDS: usize = 100;

struct Counter(AtomicUsize);

impl Observer for Counter {
    fn update(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn concurrent_add_and_notify_keeps_registry_consistent() {
    init_logging();
    let subject = Subject::new();

    let survivors: Vec<Arc<Counter>> = thread::scope(|scope| {
        let adders: Vec<_> = (0..ADDERS)
            .map(|_| {
                scope.spawn(|| {
                    let mut kept = Vec::new();
                    for i in 0..PER_ADDER {
                        let observer = Arc::new(Counter(AtomicUsize::new(0)));
                        subject.add_observer(&observer);
                        // Every other observer dies right away
                        if i % 2 == 0 {
                            kept.push(observer);
                        }
                    }
                    kept
                })
            })
            .collect();

        for _ in 0..NOTIFIERS {
            scope.spawn(|| {
                for _ in 0..ROUNDS {
                    subject.notify();
                }
            });
        }

        adders
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect()
    });

    let expected_live = ADDERS * PER_ADDER / 2;
    assert_eq!(survivors.len(), expected_live);
    assert_eq!(subject.live_count(), expected_live);

    let before: Vec<usize> = survivors.iter().map(|o| o.0.load(Ordering::SeqCst)).collect();
    let report = subject.notify();

    assert_eq!(report.delivered, expected_live);
    assert_eq!(subject.len(), expected_live);
    for (observer, count) in survivors.iter().zip(before) {
        assert_eq!(observer.0.load(Ordering::SeqCst), count + 1);
    }
}

/// Shared bookkeeping for `Tracked` observers, indexed by observer id
struct DropLog {
    dropped: Vec<AtomicBool>,
    updates: AtomicUsize,
    late_updates: AtomicUsize,
}

/// Marks itself dropped and counts any update that arrives afterwards
struct Tracked {
    id: usize,
    log: Arc<DropLog>,
}

impl Observer for Tracked {
    fn update(&self) {
        self.log.updates.fetch_add(1, Ordering::SeqCst);
        if self.log.dropped[self.id].load(Ordering::SeqCst) {
            self.log.late_updates.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.log.dropped[self.id].store(true, Ordering::SeqCst);
    }
}

#[test]
fn dropping_from_other_threads_never_notifies_dead_observers() {
    init_logging();
    const COUNT: usize = 64;

    let subject = Arc::new(Subject::new());
    let log = Arc::new(DropLog {
        dropped: (0..COUNT).map(|_| AtomicBool::new(false)).collect(),
        updates: AtomicUsize::new(0),
        late_updates: AtomicUsize::new(0),
    });
    let observers: Vec<Arc<Tracked>> = (0..COUNT)
        .map(|id| Arc::new(Tracked { id, log: Arc::clone(&log) }))
        .collect();
    for observer in &observers {
        subject.add_observer(observer);
    }

    let notifier = {
        let subject = Arc::clone(&subject);
        thread::spawn(move || {
            for _ in 0..ROUNDS {
                subject.notify();
            }
        })
    };
    // Drop one at a time while the notifier is running
    for observer in observers {
        drop(observer);
        thread::yield_now();
    }
    notifier.join().unwrap();

    assert!(log.dropped.iter().all(|flag| flag.load(Ordering::SeqCst)));
    let updates_before = log.updates.load(Ordering::SeqCst);

    let report = subject.notify();
    assert_eq!(report.delivered, 0);
    assert!(subject.is_empty());
    assert_eq!(log.updates.load(Ordering::SeqCst), updates_before);
    assert_eq!(log.late_updates.load(Ordering::SeqCst), 0);
}
