use crate::{
    check::{self, Config, Failure, Prove},
    generate::{Generate, State},
    harness::Harness,
};
use core::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};
use crossbeam_channel::{bounded, unbounded};
use std::{sync::Mutex, thread};

/// Parallel execution of a property.
///
/// A bounded channel acts as the closed work queue of example indices.
/// `parallelism` workers dequeue indices, draw `(value, shrinker)` under the
/// shared random-source mutex, run the predicate, and perform their own
/// shrink loop sequentially on failure; shrinkers are never shared across
/// workers. Failures flow through an unbounded channel and are drained and
/// reported in the controlling thread.
///
/// Cancellation is cooperative: when a failure triggers
/// `stop_on_first_failure`, the stop flag is raised, remaining queued
/// indices are drained without execution, and in-flight workers finish
/// their current example. Predicate bodies are never interrupted.
pub(crate) fn run<G, H, P, V>(
    harness: &H,
    config: &Config,
    generator: &G,
    property: &P,
    seed: u64,
    state: State,
) where
    G: Generate + Sync,
    G::Item: Clone + fmt::Debug + Send,
    H: Harness + Sync + ?Sized,
    P: Fn(G::Item) -> V + Sync,
    V: Prove,
{
    let (queue, indices) = bounded(config.examples);
    for index in 1..=config.examples {
        // The queue has exactly `examples` capacity; this never blocks.
        let _ = queue.send(index);
    }
    drop(queue);

    let (failures, results) = unbounded::<(usize, Failure<G::Item>)>();
    let state = Mutex::new(state);
    let stop = AtomicBool::new(false);

    thread::scope(|scope| {
        for _ in 0..config.parallelism {
            let indices = indices.clone();
            let failures = failures.clone();
            let state = &state;
            let stop = &stop;
            scope.spawn(move || {
                for index in indices.iter() {
                    if stop.load(Ordering::Relaxed) {
                        continue;
                    }
                    let (value, shrinker) = {
                        let mut state = match state.lock() {
                            Ok(guard) => guard,
                            Err(poisoned) => poisoned.into_inner(),
                        };
                        generator.generate(&mut state)
                    };
                    let name = format!("ex#{index}");
                    if check::run(harness, &name, property, value.clone()) {
                        continue;
                    }
                    let failure = check::shrink(harness, config, &name, property, value, shrinker);
                    let _ = failures.send((index, failure));
                    if config.stop_on_first_failure {
                        stop.store(true, Ordering::Relaxed);
                        return;
                    }
                }
            });
        }
        drop(failures);

        for (index, failure) in results.iter() {
            check::report(harness, seed, index, &failure);
            if config.stop_on_first_failure {
                break;
            }
        }
    });
}
