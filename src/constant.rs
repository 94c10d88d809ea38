use crate::{
    generate::{Generate, State},
    shrink::Empty,
};

/// Always yields the same value, with an empty shrinker.
#[derive(Clone, Copy, Debug, Default)]
pub struct Constant<T>(pub(crate) T);

impl<T: Clone> Generate for Constant<T> {
    type Item = T;
    type Shrink = Empty<T>;

    fn generate(&self, _: &mut State) -> (Self::Item, Self::Shrink) {
        (self.0.clone(), Empty::default())
    }
}
