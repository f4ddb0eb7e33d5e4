use std::sync::Arc;
use std::sync::Barrier;
use std::thread;
use std::time::Instant;

use bench::DashMapAdapter;
use log::{error, info};
use rand::Rng;
use tsmap::{BucketMap, Map};

const NUM_BUCKETS: usize = 1024;

macro_rules! bench {
    ($name: expr, $body: expr) => {
        let now = Instant::now();
        $body;
        let elapsed = now.elapsed();
        info!("{} elapsed: {:.2?}", $name, elapsed);
    };
}

fn make_random_pairs(n: usize) -> Vec<(i32, i32)> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| (rng.gen(), rng.gen())).collect()
}

fn bench_single_threaded<M: Map<Key = i32, Val = i32>>(name: &str, map: M, src: &[(i32, i32)]) {
    bench!(name, {
        for &(key, val) in src {
            map.put(key, val);
        }
    });
}

fn bench_multi_threaded<M>(name: &str, map: M, num_threads: usize, src: &[(i32, i32)])
where
    M: Map<Key = i32, Val = i32> + Send + Sync + 'static,
{
    let map = Arc::new(map);
    let chunk_sz = (src.len() / num_threads).max(1);
    let thread_data: Vec<Vec<(i32, i32)>> = src.chunks(chunk_sz).map(<[_]>::to_vec).collect();
    let start_barr = Arc::new(Barrier::new(thread_data.len() + 1));
    let end_barr = Arc::new(Barrier::new(thread_data.len() + 1));

    let mut handles = Vec::new();
    for data in thread_data {
        let tmap = map.clone();
        let t_start_barr = start_barr.clone();
        let t_end_barr = end_barr.clone();
        handles.push(thread::spawn(move || {
            t_start_barr.wait();
            for (key, val) in data {
                tmap.put(key, val);
            }
            t_end_barr.wait();
        }));
    }

    start_barr.wait();
    let now = Instant::now();
    end_barr.wait();
    let elapsed = now.elapsed();
    info!("{} multithreaded elapsed: {:.2?}", name, elapsed);

    for h in handles {
        if h.join().is_err() {
            error!("{} worker panicked", name);
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let input = make_random_pairs(200_000);

    info!("bench single threaded");
    bench_single_threaded("BucketMap", BucketMap::with_capacity(NUM_BUCKETS)?, &input);
    bench_single_threaded("DashMap", DashMapAdapter::new(), &input);

    info!("bench multi threaded");
    bench_multi_threaded("BucketMap", BucketMap::with_capacity(NUM_BUCKETS)?, 10, &input);
    bench_multi_threaded("DashMap", DashMapAdapter::new(), 10, &input);
    Ok(())
}
