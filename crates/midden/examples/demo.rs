//! Demonstration driver: a fixed sequence of pushes and pops that
//! exercises the collector.
//!
//! Run with `RUST_LOG=debug cargo run -p midden --example demo` to see the
//! collection cycle. Pass `overflow` or `underflow` as the first argument
//! to watch the host abort on a stack error with its distinct exit status.

use midden::prelude::*;

fn main() {
    env_logger::init();

    let mut heap = Heap::with_defaults();
    match std::env::args().nth(1).as_deref() {
        Some("overflow") => {
            for i in 0.. {
                heap.push_scalar(i).or_abort();
            }
        }
        Some("underflow") => {
            heap.pop_root().or_abort();
        }
        _ => {}
    }

    println!("=== Midden demo ===");
    println!("threshold: {}", heap.threshold());

    for i in 0..80 {
        heap.push_scalar(i).or_abort();
    }
    report("after 80 rooted scalars", &heap);

    for _ in 0..10 {
        heap.pop_root().or_abort();
    }
    report("after popping 10 roots", &heap);

    for i in 80..101 {
        heap.push_scalar(i).or_abort();
    }
    report("after 21 more rooted scalars", &heap);

    if let Some(cycle) = heap.stats().last_cycle {
        println!(
            "last cycle {}: live {} -> {}, marked {}, freed {}, threshold {}",
            cycle.id,
            cycle.live_before,
            cycle.live_after,
            cycle.marked,
            cycle.freed,
            cycle.threshold
        );
    }

    // Build a pair from the top two roots, then a cycle through it.
    let pair = heap.push_pair().or_abort();
    heap.set_second(pair, pair).or_abort();
    report("after pairing the top two roots into a self-cycle", &heap);

    let final_cycle = heap.release_all();
    println!(
        "released everything: freed {}, live {}",
        final_cycle.freed,
        heap.live_count()
    );
}

fn report(label: &str, heap: &Heap) {
    println!(
        "{label}: live={} roots={} threshold={} collections={}",
        heap.live_count(),
        heap.root_count(),
        heap.threshold(),
        heap.stats().collections
    );
}
