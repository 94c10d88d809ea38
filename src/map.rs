use crate::{
    generate::{Generate, State},
    shrink::Shrink,
};

/// Applies a function to generated values, lifting every shrink candidate
/// through it.
#[derive(Clone, Copy, Debug)]
pub struct Map<G, F>(F, G);

#[derive(Clone, Debug)]
pub struct Shrinker<S, F> {
    map: F,
    inner: S,
}

impl<G, F> Map<G, F> {
    pub const fn new(generator: G, map: F) -> Self {
        Self(map, generator)
    }
}

impl<G: Generate, T, F: Fn(G::Item) -> T + Clone> Generate for Map<G, F> {
    type Item = T;
    type Shrink = Shrinker<G::Shrink, F>;

    fn generate(&self, state: &mut State) -> (Self::Item, Self::Shrink) {
        let (value, inner) = self.1.generate(state);
        (
            (self.0)(value),
            Shrinker {
                map: self.0.clone(),
                inner,
            },
        )
    }
}

impl<S: Shrink, T, F: Fn(S::Item) -> T> Shrink for Shrinker<S, F> {
    type Item = T;

    fn step(&mut self, accept: bool) -> Option<Self::Item> {
        Some((self.map)(self.inner.step(accept)?))
    }
}
