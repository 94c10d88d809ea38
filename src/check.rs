use crate::{
    generate::{Generate, State},
    harness::Harness,
    parallel, random,
    shrink::Shrink,
    strategy::{self, Strategy},
    utility, EXAMPLES, SHRINKS,
};
use core::fmt;
use std::{
    env,
    panic::{catch_unwind, AssertUnwindSafe},
    str::FromStr,
};

/// The outcome of a property body, reduced to pass/fail.
///
/// Lets properties return `bool`, `()` (pass unless the body panics) or any
/// `Result` without ceremony.
pub trait Prove {
    fn prove(self) -> bool;
}

impl Prove for bool {
    fn prove(self) -> bool {
        self
    }
}

impl Prove for () {
    fn prove(self) -> bool {
        true
    }
}

impl<T, E> Prove for Result<T, E> {
    fn prove(self) -> bool {
        self.is_ok()
    }
}

/// Bounds a property invocation.
#[derive(Clone, Debug)]
pub struct Config {
    /// Seed for the random source. `0` derives one from the wall clock.
    pub seed: u64,
    /// Number of examples to generate and run.
    pub examples: usize,
    /// Cap on shrink steps per failing example.
    pub max_shrink: usize,
    /// Shrink traversal order; unknown names normalise to BFS.
    pub strategy: Strategy,
    /// Abort the property after the first failing example.
    pub stop_on_first_failure: bool,
    /// Concurrent workers; `1` runs strictly sequentially.
    pub parallelism: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 0,
            examples: EXAMPLES,
            max_shrink: SHRINKS,
            strategy: Strategy::Bfs,
            stop_on_first_failure: true,
            parallelism: 1,
        }
    }
}

impl Config {
    /// Defaults with `RAPIDO_*` environment overrides applied. Malformed
    /// values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        environment::update(&mut config);
        config
    }

    fn effective_seed(&self) -> u64 {
        if self.seed == 0 {
            random::entropy()
        } else {
            self.seed
        }
    }
}

/// Checks `property` against `config.examples` generated values.
///
/// Each example runs in a subtest named `ex#i`; a failing example enters the
/// shrink loop, whose candidates run in subtests named `ex#i/shrink#s`. Once
/// shrinking settles, a single fatal report carries the seed, the number of
/// examples run, the shrink steps performed, the minimal counterexample and
/// a replay hint.
///
/// At `parallelism <= 1` runs are bit-for-bit deterministic for a fixed
/// seed. With more workers, example scheduling is unordered and workers draw
/// from the shared random source in lock-acquisition order, but the shrink
/// result for a given example is unaffected because shrinking stays on the
/// worker that generated it; the replay hint re-runs the failing example at
/// parallelism 1.
pub fn for_all<G, H, P, V>(harness: &H, config: Config, generator: &G, property: P)
where
    G: Generate + Sync,
    G::Item: Clone + fmt::Debug + Send,
    H: Harness + Sync + ?Sized,
    P: Fn(G::Item) -> V + Sync,
    V: Prove,
{
    let seed = config.effective_seed();
    strategy::set(config.strategy);
    harness.log(format_args!(
        "seed={seed} examples={} max_shrink={} strategy={} parallelism={}",
        config.examples, config.max_shrink, config.strategy, config.parallelism
    ));
    let state = State::new(seed);
    if config.parallelism <= 1 {
        sequential(harness, &config, generator, &property, seed, state);
    } else {
        parallel::run(harness, &config, generator, &property, seed, state);
    }
}

fn sequential<G, H, P, V>(
    harness: &H,
    config: &Config,
    generator: &G,
    property: &P,
    seed: u64,
    mut state: State,
) where
    G: Generate,
    G::Item: Clone + fmt::Debug,
    H: Harness + ?Sized,
    P: Fn(G::Item) -> V,
    V: Prove,
{
    for index in 1..=config.examples {
        let (value, shrinker) = generator.generate(&mut state);
        let name = format!("ex#{index}");
        if run(harness, &name, property, value.clone()) {
            continue;
        }
        let failure = shrink(harness, config, &name, property, value, shrinker);
        report(harness, seed, index, &failure);
        if config.stop_on_first_failure {
            return;
        }
    }
}

/// A failing example after shrinking settled.
pub(crate) struct Failure<T> {
    pub(crate) minimum: T,
    pub(crate) steps: usize,
}

/// Runs the property on one value inside a named subtest. A panicking body
/// counts as a failing one, so panicking properties shrink like any other.
pub(crate) fn run<H, P, V, T>(harness: &H, name: &str, property: &P, value: T) -> bool
where
    H: Harness + ?Sized,
    P: Fn(T) -> V,
    V: Prove,
    T: Clone,
{
    harness.subtest(name, &mut || {
        match catch_unwind(AssertUnwindSafe(|| property(value.clone()))) {
            Ok(outcome) => outcome.prove(),
            Err(payload) => {
                match utility::cast(payload) {
                    Ok(message) => harness.log(format_args!("{name} panicked: {message}")),
                    Err(_) => harness.log(format_args!("{name} panicked")),
                }
                false
            }
        }
    })
}

/// The shrink loop: repeatedly asks the shrinker for candidates, re-runs the
/// property on each, and feeds the outcome back so the shrinker can rebase
/// on candidates that still fail.
pub(crate) fn shrink<H, P, V, S>(
    harness: &H,
    config: &Config,
    name: &str,
    property: &P,
    value: S::Item,
    mut shrinker: S,
) -> Failure<S::Item>
where
    H: Harness + ?Sized,
    P: Fn(S::Item) -> V,
    V: Prove,
    S: Shrink,
    S::Item: Clone,
{
    let mut minimum = value;
    let mut steps = 0;
    let mut accepted = true;
    while steps < config.max_shrink {
        let Some(candidate) = shrinker.step(accepted) else {
            break;
        };
        steps += 1;
        let subtest = format!("{name}/shrink#{steps}");
        if run(harness, &subtest, property, candidate.clone()) {
            accepted = false;
        } else {
            minimum = candidate;
            accepted = true;
        }
    }
    Failure { minimum, steps }
}

pub(crate) fn report<H, T>(harness: &H, seed: u64, index: usize, failure: &Failure<T>)
where
    H: Harness + ?Sized,
    T: fmt::Debug,
{
    harness.fatal(format_args!(
        "property failed; seed={seed}; examples_run={index}; shrunk_steps={steps}\n\
         counterexample (min): {minimum:?}\n\
         replay: run only the subtest '{property}/ex#{index}' with seed={seed}",
        steps = failure.steps,
        minimum = failure.minimum,
        property = harness.name(),
    ));
}

mod environment {
    use super::*;

    pub fn update(config: &mut Config) {
        if let Some(value) = parse("RAPIDO_SEED") {
            config.seed = value;
        }
        if let Some(value) = parse("RAPIDO_EXAMPLES") {
            config.examples = value;
        }
        if let Some(value) = parse("RAPIDO_MAX_SHRINK") {
            config.max_shrink = value;
        }
        if let Ok(value) = env::var("RAPIDO_SHRINK_STRATEGY") {
            config.strategy = Strategy::parse(&value);
        }
        if let Some(value) = parse("RAPIDO_STOP_ON_FIRST_FAILURE") {
            config.stop_on_first_failure = value;
        }
        if let Some(value) = parse::<usize>("RAPIDO_PARALLELISM") {
            config.parallelism = value.max(1);
        }
    }

    fn parse<T: FromStr>(key: &str) -> Option<T> {
        match env::var(key) {
            Ok(value) => value.parse().ok(),
            Err(_) => None,
        }
    }
}
