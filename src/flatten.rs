use crate::{
    generate::{Generate, State},
    shrink::Shrink,
};

/// Flattens a generator of generators; [`crate::Generate::bind`] is
/// `map(f).flatten()`.
#[derive(Clone, Copy, Debug)]
pub struct Flatten<G>(pub(crate) G);

/// Shrinker for value-dependent composition, in two phases: first the inner
/// value is shrunk under the currently bound outer value; once that is
/// exhausted, each further step advances the outer shrinker and regenerates
/// a fresh inner value from the stored generation state.
pub struct Shrinker<O, G: Generate> {
    state: State,
    outer: O,
    inner: G::Shrink,
    advance: bool,
}

impl<G: Generate> Generate for Flatten<G>
where
    G::Item: Generate,
{
    type Item = <G::Item as Generate>::Item;
    type Shrink = Shrinker<G::Shrink, G::Item>;

    fn generate(&self, state: &mut State) -> (Self::Item, Self::Shrink) {
        let (generator, outer) = self.0.generate(state);
        let snapshot = state.clone();
        let (value, inner) = generator.generate(state);
        (
            value,
            Shrinker {
                state: snapshot,
                outer,
                inner,
                advance: false,
            },
        )
    }
}

impl<O, G> Shrink for Shrinker<O, G>
where
    G: Generate,
    O: Shrink<Item = G>,
{
    type Item = G::Item;

    fn step(&mut self, accept: bool) -> Option<Self::Item> {
        let mut accept = accept;
        if !self.advance {
            if let Some(item) = self.inner.step(accept) {
                return Some(item);
            }
            self.advance = true;
            accept = false;
        }
        let generator = self.outer.step(accept)?;
        let (value, inner) = generator.generate(&mut self.state.clone());
        self.inner = inner;
        Some(value)
    }
}
