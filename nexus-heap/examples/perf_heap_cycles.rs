//! Cycle-accurate insert / extract latency using rdtscp.
//!
//! Compares the tracked and untracked heap per operation.
//!
//! Run with:
//!   cargo build --release --example perf_heap_cycles
//!   taskset -c 0 ./target/release/examples/perf_heap_cycles

use hdrhistogram::Histogram;
use nexus_heap::MinHeap;
use nexus_heap::runner::generate_input;
use std::hint::black_box;

const HEAP_SIZE: usize = 4096;
const ITERATIONS: usize = 100_000;

#[inline(always)]
fn rdtscp() -> u64 {
    #[cfg(target_arch = "x86_64")]
    unsafe {
        let mut aux: u32 = 0;
        std::arch::x86_64::__rdtscp(&mut aux)
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        panic!("rdtscp only supported on x86_64");
    }
}

fn print_stats(name: &str, hist: &Histogram<u64>) {
    println!("{}", name);
    println!("  min:  {:>6} cycles", hist.min());
    println!("  p50:  {:>6} cycles", hist.value_at_quantile(0.50));
    println!("  p99:  {:>6} cycles", hist.value_at_quantile(0.99));
    println!("  p999: {:>6} cycles", hist.value_at_quantile(0.999));
    println!("  max:  {:>6} cycles", hist.max());
    println!("  avg:  {:>6.0} cycles", hist.mean());
}

struct Hists {
    insert: Histogram<u64>,
    extract: Histogram<u64>,
}

fn bench(track: bool) -> Hists {
    let input = generate_input(HEAP_SIZE, 42);
    let mut heap = MinHeap::with_config(HEAP_SIZE * 2, track, None);
    heap.extend(input.iter().copied());

    let mut insert = Histogram::<u64>::new(3).unwrap();
    let mut extract = Histogram::<u64>::new(3).unwrap();

    // Steady state: pop one, push one, heap size stays HEAP_SIZE
    for i in 0..ITERATIONS {
        let start = rdtscp();
        let v = black_box(heap.extract_min().unwrap());
        let end = rdtscp();
        let _ = extract.record(end.wrapping_sub(start));

        let next = v + (i % HEAP_SIZE) as i64;
        let start = rdtscp();
        heap.insert(black_box(next));
        let end = rdtscp();
        let _ = insert.record(end.wrapping_sub(start));
    }

    if track {
        println!("counters: {}", heap.metrics().csv_header());
        println!("          {}", heap.metrics().csv_row());
        println!();
    }

    Hists { insert, extract }
}

fn main() {
    println!(
        "MinHeap latency ({} ops, heap size {})",
        ITERATIONS, HEAP_SIZE
    );
    println!("========================================");
    println!();

    let tracked = bench(true);
    let untracked = bench(false);

    print_stats("insert (tracked):", &tracked.insert);
    println!();
    print_stats("insert (untracked):", &untracked.insert);
    println!();
    print_stats("extract_min (tracked):", &tracked.extract);
    println!();
    print_stats("extract_min (untracked):", &untracked.extract);
    println!();

    let t = tracked.extract.value_at_quantile(0.50);
    let u = untracked.extract.value_at_quantile(0.50);
    println!("----------------------------------------");
    if u > 0 {
        println!(
            "counter overhead on extract_min p50: {:+.1}%",
            (t as f64 / u as f64 - 1.0) * 100.0
        );
    }
}
