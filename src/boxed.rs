use crate::{
    generate::{Generate, State},
    shrink::Shrink,
};
use core::fmt;

/// A type-erased generator.
///
/// Needed when generators of the same item type but different concrete
/// types must live side by side, as the state-machine commands do, and for
/// recursive generators. [`Shrink`] is object-safe, so the erased shrinker
/// is a plain boxed trait object.
pub struct Boxed<T> {
    generator: Box<dyn Erased<T> + Send + Sync>,
}

pub struct Shrinker<T>(Box<dyn Shrink<Item = T> + Send>);

trait Erased<T> {
    fn erased(&self, state: &mut State) -> (T, Shrinker<T>);
}

impl<G: Generate> Erased<G::Item> for G
where
    G::Shrink: Send + 'static,
{
    fn erased(&self, state: &mut State) -> (G::Item, Shrinker<G::Item>) {
        let (value, shrink) = self.generate(state);
        (value, Shrinker(Box::new(shrink)))
    }
}

impl<T> Boxed<T> {
    pub(crate) fn new<G>(generator: G) -> Self
    where
        G: Generate<Item = T> + Send + Sync + 'static,
        G::Shrink: Send + 'static,
    {
        Self {
            generator: Box::new(generator),
        }
    }
}

impl<T> Generate for Boxed<T> {
    type Item = T;
    type Shrink = Shrinker<T>;

    fn generate(&self, state: &mut State) -> (Self::Item, Self::Shrink) {
        self.generator.erased(state)
    }
}

impl<T> Shrink for Shrinker<T> {
    type Item = T;

    fn step(&mut self, accept: bool) -> Option<Self::Item> {
        self.0.step(accept)
    }
}

impl<T> fmt::Debug for Boxed<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Boxed").finish_non_exhaustive()
    }
}

impl<T> fmt::Debug for Shrinker<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Shrinker").finish_non_exhaustive()
    }
}
