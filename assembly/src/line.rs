//! The assembly line: a fixed pool of employees draining a pre-loaded queue.

use std::sync::mpsc::{Receiver, sync_channel};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Instant;

use anyhow::{Result, anyhow};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument};

use crate::config::LineConfig;
use crate::employee::Employee;
use crate::item::{Item, build_items};
use crate::report::LineReport;

/// Shuffle in place; the same seed always yields the same order.
pub fn shuffle(items: &mut [Item], seed: Option<u64>) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    items.shuffle(&mut rng);
}

/// Run the line to completion and report per-employee counts.
#[instrument(skip_all, fields(workers = cfg.workers, items_per_kind = cfg.items_per_kind))]
pub fn run_line(cfg: &LineConfig) -> Result<LineReport> {
    cfg.validate()?;
    let started = Instant::now();

    let mut items = build_items(cfg.items_per_kind);
    shuffle(&mut items, cfg.seed);

    let (sender, receiver) = sync_channel(items.len().max(1));
    for item in items {
        sender
            .send(item)
            .map_err(|err| anyhow!("queue closed before {} was loaded", err.0))?;
    }
    drop(sender);
    let queue = Mutex::new(receiver);

    let employees: Vec<Employee> = (1..=cfg.workers).map(Employee::new).collect();
    thread::scope(|scope| {
        for employee in &employees {
            let queue = &queue;
            scope.spawn(move || work(employee, queue, cfg.time_scale));
        }
    });

    let report = LineReport::from_employees(started.elapsed(), &employees);
    info!(
        total = report.total,
        elapsed_ms = report.elapsed_ms as u64,
        "line finished"
    );
    Ok(report)
}

fn work(employee: &Employee, queue: &Mutex<Receiver<Item>>, time_scale: f64) {
    loop {
        let next = queue.lock().unwrap_or_else(PoisonError::into_inner).recv();
        let Ok(item) = next else {
            debug!(employee = employee.id, "queue drained");
            return;
        };
        let started = Instant::now();
        info!(employee = employee.id, item = %item, "start processing");
        item.process(time_scale);
        info!(
            employee = employee.id,
            item = %item,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "finished processing"
        );
        employee.increment();
    }
}
