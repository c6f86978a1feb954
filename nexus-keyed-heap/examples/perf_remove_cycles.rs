//! Cycle-accurate latency of removing an arbitrary element, using rdtscp.
//!
//! Compares IndexedMinHeap::remove (slot lookup + sift) against
//! std::collections::BinaryHeap::retain (linear scan + rebuild).
//! Each measured operation removes one element and re-adds it so the heap
//! size stays at HEAP_SIZE.
//!
//! Run with:
//!   cargo build --release --example perf_remove_cycles
//!   taskset -c 0 ./target/release/examples/perf_remove_cycles

use hdrhistogram::Histogram;
use nexus_keyed_heap::IndexedMinHeap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hint::black_box;

const HEAP_SIZE: u64 = 4096;
const OPS: u64 = 100_000;
const WARMUP: u64 = 10_000;

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

/// Deterministic scramble so victims are spread across the heap.
#[inline]
fn victim(i: u64) -> u64 {
    (i * 2_654_435_761) % HEAP_SIZE
}

#[inline]
fn priority(v: &u64) -> u64 {
    (v * 7 + 13) % 1000
}

fn print_stats(name: &str, hist: &Histogram<u64>) {
    println!("{}", name);
    println!("  min:  {:>8} cycles", hist.min());
    println!("  p50:  {:>8} cycles", hist.value_at_quantile(0.50));
    println!("  p99:  {:>8} cycles", hist.value_at_quantile(0.99));
    println!("  p999: {:>8} cycles", hist.value_at_quantile(0.999));
    println!("  max:  {:>8} cycles", hist.max());
    println!("  avg:  {:>8.0} cycles", hist.mean());
}

fn bench_indexed() -> Histogram<u64> {
    let mut heap = IndexedMinHeap::with_capacity(HEAP_SIZE as usize, priority);
    for v in 0..HEAP_SIZE {
        heap.add(v).unwrap();
    }
    let mut hist = Histogram::<u64>::new(3).unwrap();

    for i in 0..WARMUP {
        let v = victim(i);
        black_box(heap.remove(&v));
        heap.add(v).unwrap();
    }

    for i in 0..OPS {
        let v = victim(i);
        let start = rdtscp();
        black_box(heap.remove(&v));
        let end = rdtscp();
        let _ = hist.record(end.wrapping_sub(start));
        heap.add(v).unwrap();
    }

    hist
}

fn bench_binary_heap() -> Histogram<u64> {
    let mut heap: BinaryHeap<Reverse<(u64, u64)>> = (0..HEAP_SIZE)
        .map(|v| Reverse((priority(&v), v)))
        .collect();
    let mut hist = Histogram::<u64>::new(3).unwrap();

    for i in 0..WARMUP / 10 {
        let v = victim(i);
        heap.retain(|Reverse((_, x))| *x != v);
        heap.push(Reverse((priority(&v), v)));
    }

    // Linear removal is slow; sample fewer operations.
    for i in 0..OPS / 10 {
        let v = victim(i);
        let start = rdtscp();
        heap.retain(|Reverse((_, x))| *x != v);
        let end = rdtscp();
        let _ = hist.record(end.wrapping_sub(start));
        heap.push(Reverse((priority(&v), v)));
    }

    hist
}

fn main() {
    println!("REMOVE latency comparison (heap size {})", HEAP_SIZE);
    println!("========================================");
    println!();

    let indexed_hist = bench_indexed();
    let binary_hist = bench_binary_heap();

    print_stats("IndexedMinHeap::remove:", &indexed_hist);
    println!();
    print_stats("BinaryHeap::retain:", &binary_hist);
    println!();

    let indexed_p50 = indexed_hist.value_at_quantile(0.50);
    let binary_p50 = binary_hist.value_at_quantile(0.50).max(1);

    println!("----------------------------------------");
    println!(
        "IndexedMinHeap p50 is {:.1}x of BinaryHeap p50",
        indexed_p50 as f64 / binary_p50 as f64
    );
}
