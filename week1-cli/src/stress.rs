//! Concurrent registry stress run
//!
//! Registers and notifies from a rayon pool against one shared [`Subject`],
//! keeping only some observers alive, then checks that the registry ends up
//! holding exactly the survivors.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use week1_lab::{NotifyReport, Observer, Subject};

/// One in this many observers outlives its round
const KEEP_EVERY: usize = 4;

struct Tally(AtomicUsize);

impl Observer for Tally {
    fn update(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Debug, Clone, Default)]
pub struct StressSummary {
    pub threads: usize,
    pub rounds: usize,
    pub delivered: usize,
    pub pruned: usize,
    pub survivors: usize,
    pub remaining: usize,
}

pub fn run_stress(threads: usize, rounds: usize) -> Result<StressSummary> {
    if threads == 0 {
        anyhow::bail!("stress needs at least 1 thread");
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to build stress thread pool")?;

    let subject = Subject::new();
    log::info!("Stressing registry: {} round(s) on {} thread(s)", rounds, threads);

    let outcomes: Vec<(Option<Arc<Tally>>, NotifyReport)> = pool.install(|| {
        (0..rounds)
            .into_par_iter()
            .map(|round| {
                let observer = Arc::new(Tally(AtomicUsize::new(0)));
                subject.add_observer(&observer);
                let report = subject.notify();
                ((round % KEEP_EVERY == 0).then_some(observer), report)
            })
            .collect()
    });

    let mut summary = StressSummary {
        threads,
        rounds,
        ..Default::default()
    };
    let mut survivors = Vec::new();
    for (kept, report) in outcomes {
        summary.delivered += report.delivered;
        summary.pruned += report.pruned;
        survivors.extend(kept);
    }

    // Flush whatever dead entries the parallel rounds left behind
    let last = subject.notify();
    summary.delivered += last.delivered;
    summary.pruned += last.pruned;
    summary.survivors = survivors.len();
    summary.remaining = subject.len();

    if summary.remaining != summary.survivors {
        anyhow::bail!(
            "registry holds {} entries but {} observers are alive",
            summary.remaining,
            summary.survivors
        );
    }
    if survivors.iter().any(|o| o.0.load(Ordering::Relaxed) == 0) {
        anyhow::bail!("a live observer was never notified");
    }

    Ok(summary)
}
