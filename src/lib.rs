#![forbid(unsafe_code)]
#![doc = r#"
Property-based testing with feedback-driven shrinking.

Generators produce a value together with a shrinker: a lazy, deduplicated
stream of "smaller" candidates that rebases on whichever candidate last
reproduced the failure. The runner drives generation, example execution,
counterexample minimisation under a bounded budget, and seeded replay; a
state-machine layer generates and shrinks command sequences on top of the
same engine.

```
use rapido::{for_all, Config, Console, Size};

let harness = Console::new("addition_identity");
let config = Config { seed: 1, ..Config::default() };
for_all(&harness, config, &rapido::integer::<i64>(Size::EMPTY), |x| {
    x + 0 == x
});
```
"#]

pub mod any;
pub mod array;
pub mod boxed;
pub mod check;
pub mod collect;
pub mod constant;
pub mod filter;
pub mod flatten;
pub mod generate;
pub mod harness;
pub mod machine;
pub mod map;
mod parallel;
mod prelude;
pub mod primitive;
pub mod random;
pub mod same;
pub mod sample;
pub mod shrink;
pub mod size;
pub mod strategy;
pub mod text;
pub mod tuple;
mod utility;

pub use check::{for_all, Config, Prove};
pub use generate::{Generate, State};
pub use harness::{Console, Harness};
pub use machine::{Command, Machine, Outcome, Step, Transition};
pub use prelude::*;
pub use same::equal;
pub use sample::Sample;
pub use shrink::Shrink;
pub use size::Size;
pub use strategy::Strategy;

/// Default number of examples per property.
pub const EXAMPLES: usize = 100;
/// Default cap on shrink steps per failing example.
pub const SHRINKS: usize = 400;
/// Default retry budget for [`Generate::filter`].
pub const RETRIES: usize = 1000;
/// Default length bound for generated sequences.
const COLLECTS: u64 = 16;
/// Default length bound for generated strings.
const STRINGS: u64 = 32;
/// Default length bound for state-machine command sequences.
const STEPS: usize = 20;
