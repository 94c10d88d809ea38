use crate::{
    array::Array, boxed::Boxed, collect::Collect, filter::Filter, flatten::Flatten, map::Map,
    random::Random, shrink::Shrink, size::Size, RETRIES,
};
use core::fmt;

/// The state threaded through generation: the random source, the runner's
/// size hint, and the seed that produced both.
///
/// One `State` lives for the duration of a single property invocation; in
/// parallel mode it sits behind a mutex and all draws are serialised.
#[derive(Clone, Debug)]
pub struct State {
    random: Random,
    size: Size,
    seed: u64,
}

impl State {
    pub fn new(seed: u64) -> Self {
        Self::with_size(seed, Size::EMPTY)
    }

    pub fn with_size(seed: u64, size: Size) -> Self {
        Self {
            random: Random::new(seed),
            size,
            seed,
        }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The runner's size hint, which generators resolve against their own
    /// local size and type-specific default.
    pub const fn size(&self) -> Size {
        self.size
    }

    pub fn random(&mut self) -> &mut Random {
        &mut self.random
    }
}

/// The core trait for all value generators.
///
/// A generator produces a value *and* the [`Shrink`] instance that knows how
/// to simplify it. Generators are values: constructed once, reused across
/// examples; a fresh shrinker is handed out on every [`Generate::generate`]
/// call. For a given random state and size hint the returned pair is
/// deterministic.
///
/// Implementations must be total on legal inputs; panics are reserved for
/// construction-time programmer bugs such as an empty choice list.
///
/// Like [`Iterator`], the trait carries its combinators: [`Generate::map`],
/// [`Generate::filter`], [`Generate::bind`] and friends compose small
/// generators into larger ones while preserving shrinking.
#[must_use = "generators do nothing until used"]
pub trait Generate {
    /// The type of the value this generator produces.
    type Item;
    /// The shrinker paired with each generated value.
    type Shrink: Shrink<Item = Self::Item>;

    /// Generates a value and its shrinker.
    fn generate(&self, state: &mut State) -> (Self::Item, Self::Shrink);

    /// Transforms generated values with `map`, lifting every shrink
    /// candidate through it.
    fn map<T, F: Fn(Self::Item) -> T + Clone>(self, map: F) -> Map<Self, F>
    where
        Self: Sized,
    {
        Map::new(self, map)
    }

    /// Discards values that do not satisfy `filter`, retrying up to the
    /// default budget. The item becomes `Option<Self::Item>`: `None` means
    /// the budget ran out without a passing value.
    fn filter<F: Fn(&Self::Item) -> bool + Clone>(self, filter: F) -> Filter<Self, F>
    where
        Self: Sized,
    {
        Filter::new(self, filter, RETRIES)
    }

    /// As [`Generate::filter`], with an explicit retry budget.
    fn filter_with<F: Fn(&Self::Item) -> bool + Clone>(
        self,
        retries: usize,
        filter: F,
    ) -> Filter<Self, F>
    where
        Self: Sized,
    {
        Filter::new(self, filter, retries)
    }

    /// Value-dependent composition: generates with `self`, feeds the value
    /// to `bind` and generates from the resulting generator. Shrinking first
    /// exhausts the dependent value, then advances `self` and regenerates.
    fn bind<G: Generate, F: Fn(Self::Item) -> G + Clone>(self, bind: F) -> Flatten<Map<Self, F>>
    where
        Self: Sized,
    {
        Flatten(Map::new(self, bind))
    }

    /// Flattens a generator of generators.
    fn flatten(self) -> Flatten<Self>
    where
        Self: Sized,
        Self::Item: Generate,
    {
        Flatten(self)
    }

    /// Generates fixed-length arrays of `N` independent elements.
    fn array<const N: usize>(self) -> Array<Self, N>
    where
        Self: Sized,
    {
        Array(self)
    }

    /// Generates variable-length `Vec`s, with the length resolved from the
    /// runner hint, then the default `0..=16`.
    fn collect(self) -> Collect<Self>
    where
        Self: Sized,
    {
        Collect::new(self, Size::EMPTY)
    }

    /// As [`Generate::collect`], with a local length hint.
    fn collect_with(self, size: Size) -> Collect<Self>
    where
        Self: Sized,
    {
        Collect::new(self, size)
    }

    /// Erases the concrete generator type. Useful for recursive generators
    /// and for storing heterogeneous generators side by side.
    fn boxed(self) -> Boxed<Self::Item>
    where
        Self: Sized + Send + Sync + 'static,
        Self::Shrink: Send + 'static,
    {
        Boxed::new(self)
    }
}

impl<G: Generate + ?Sized> Generate for &G {
    type Item = G::Item;
    type Shrink = G::Shrink;

    fn generate(&self, state: &mut State) -> (Self::Item, Self::Shrink) {
        G::generate(self, state)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "seed={}", self.seed)
    }
}
