//! Bounded worker pool for panel fan-out
//!
//! One pool per fan-out: the card render opens an outer pool for the 8
//! panels, and the full-status and artifact-list panels open nested pools
//! for their rows/tiles. Jobs are pure (they only read the shared
//! registry), results are joined in submission order, and the first job
//! error fails the whole group so a partial card is never composited.

use std::collections::VecDeque;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;

use image::RgbaImage;

use crate::error::{Error, Result};

/// A panel/tile render job. Borrows are fine; jobs run on scoped threads.
pub type Job<'a> = Box<dyn FnOnce() -> Result<RgbaImage> + Send + 'a>;

/// Default pool width for a fan-out of `jobs` tasks.
pub fn default_workers(jobs: usize) -> usize {
    num_cpus::get().min(jobs).max(1)
}

/// Run every job on at most `workers` threads and return the results in
/// submission order. Returns the first error encountered; remaining jobs
/// are abandoned (workers drain the queue but their results are dropped).
pub fn run_all(workers: usize, jobs: Vec<Job<'_>>) -> Result<Vec<RgbaImage>> {
    let total = jobs.len();
    if total == 0 {
        return Ok(Vec::new());
    }
    let workers = workers.min(total).max(1);
    let queue: Mutex<VecDeque<(usize, Job<'_>)>> =
        Mutex::new(jobs.into_iter().enumerate().collect());
    let (tx, rx) = mpsc::channel::<(usize, Result<RgbaImage>)>();

    thread::scope(|s| {
        for _ in 0..workers {
            let tx = tx.clone();
            let queue = &queue;
            s.spawn(move || loop {
                let job = queue.lock().ok().and_then(|mut q| q.pop_front());
                let Some((index, job)) = job else { break };
                // A closed channel means the join side already failed.
                if tx.send((index, job())).is_err() {
                    break;
                }
            });
        }
        drop(tx);

        let mut slots: Vec<Option<RgbaImage>> = Vec::new();
        slots.resize_with(total, || None);
        for (index, result) in rx {
            slots[index] = Some(result?);
        }
        slots
            .into_iter()
            .map(|slot| slot.ok_or_else(|| Error::Render("render worker dropped a result".into())))
            .collect()
    })
}
