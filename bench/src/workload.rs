use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, ensure, Result};
use dashmap::DashMap;
use log::{debug, info};
use rand::Rng;
use tsmap::{BucketMap, Map};

use crate::config::StressConfig;

/// Lets the same workloads drive a `DashMap` for comparison.
#[derive(Default)]
pub struct DashMapAdapter(DashMap<i32, i32>);

impl DashMapAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Map for DashMapAdapter {
    type Key = i32;
    type Val = i32;

    fn get(&self, key: &i32) -> Option<i32> {
        self.0.get(key).map(|entry| *entry)
    }

    fn contains(&self, key: &i32) -> bool {
        self.0.contains_key(key)
    }

    fn put(&self, key: i32, value: i32) -> Option<i32> {
        self.0.insert(key, value)
    }

    fn remove(&self, key: &i32) -> Option<i32> {
        self.0.remove(key).map(|(_, value)| value)
    }
}

fn random_key<R: Rng>(rng: &mut R, key_space: Option<u32>) -> i32 {
    match key_space {
        Some(space) => (rng.gen::<u32>() % space) as i32,
        None => rng.gen(),
    }
}

/// Runs `cycles` rounds of put, get, then remove on one random key each.
pub fn run_cycles<M, R>(map: &M, cycles: usize, key_space: Option<u32>, rng: &mut R)
where
    M: Map<Key = i32, Val = i32> + ?Sized,
    R: Rng,
{
    for _ in 0..cycles {
        let key = random_key(rng, key_space);
        let value = rng.gen();
        map.put(key, value);
        map.get(&key);
        map.remove(&key);
    }
}

#[derive(Debug, Clone)]
pub struct StressReport {
    /// Size according to the map's counter.
    pub len: usize,
    /// Size according to a full bucket scan after all workers joined.
    pub scanned: usize,
    pub load_factor: f64,
    pub elapsed: Duration,
}

/// Spawns the configured workers against one shared map, waits for all of
/// them, then cross-checks the size counter against a bucket scan.
pub fn run_stress(config: &StressConfig) -> Result<StressReport> {
    let map = Arc::new(BucketMap::with_capacity(config.capacity)?);
    let start = Arc::new(Barrier::new(config.num_threads));

    let mut handles = Vec::with_capacity(config.num_threads);
    for id in 0..config.num_threads {
        let tmap = map.clone();
        let tstart = start.clone();
        let cycles = config.cycles;
        let key_space = config.key_space;
        handles.push(thread::spawn(move || {
            tstart.wait();
            run_cycles(&*tmap, cycles, key_space, &mut rand::thread_rng());
            debug!("worker {} finished {} cycles", id, cycles);
        }));
    }

    let now = Instant::now();
    for h in handles {
        h.join().map_err(|_| anyhow!("worker thread panicked"))?;
    }
    let elapsed = now.elapsed();

    let report = StressReport {
        len: map.len(),
        scanned: map.count_entries(),
        load_factor: map.load_factor(),
        elapsed,
    };
    info!(
        "{} threads x {} cycles on {} buckets in {:.2?}",
        config.num_threads,
        config.cycles,
        map.capacity(),
        elapsed
    );
    ensure!(
        report.len == report.scanned,
        "size counter {} disagrees with bucket scan {}",
        report.len,
        report.scanned
    );
    Ok(report)
}
