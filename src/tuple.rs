use crate::{
    generate::{Generate, State},
    shrink::{Empty, Shrink},
};

/// Shrinker for tuples of generators.
///
/// Candidates differ from the working minimum in exactly one component. The
/// component that proposed the previous candidate receives the caller's
/// accept signal so it can rebase internally; once a component exhausts, the
/// next one takes over. An accepted candidate becomes the working minimum of
/// the whole tuple.
#[derive(Clone, Debug)]
pub struct Shrinker<S, V> {
    shrinks: S,
    values: V,
    last: Option<V>,
    active: usize,
}

impl Generate for () {
    type Item = ();
    type Shrink = Empty<()>;

    fn generate(&self, _: &mut State) -> (Self::Item, Self::Shrink) {
        ((), Empty::default())
    }
}

macro_rules! tuple {
    ($($t:ident, $i:tt);+) => {
        impl<$($t: Generate,)+> Generate for ($($t,)+)
        where
            $($t::Item: Clone,)+
        {
            type Item = ($($t::Item,)+);
            type Shrink = Shrinker<($($t::Shrink,)+), ($($t::Item,)+)>;

            fn generate(&self, state: &mut State) -> (Self::Item, Self::Shrink) {
                let pairs = ($(self.$i.generate(state),)+);
                let values = ($(pairs.$i.0,)+);
                let shrinks = ($(pairs.$i.1,)+);
                (
                    values.clone(),
                    Shrinker {
                        shrinks,
                        values,
                        last: None,
                        active: 0,
                    },
                )
            }
        }

        impl<$($t: Shrink,)+> Shrink for Shrinker<($($t,)+), ($($t::Item,)+)>
        where
            $($t::Item: Clone,)+
        {
            type Item = ($($t::Item,)+);

            fn step(&mut self, accept: bool) -> Option<Self::Item> {
                if accept {
                    if let Some(last) = self.last.take() {
                        self.values = last;
                    }
                }
                let mut accept = accept;
                loop {
                    match self.active {
                        $($i => {
                            if let Some(value) = self.shrinks.$i.step(accept) {
                                let mut candidate = self.values.clone();
                                candidate.$i = value;
                                self.last = Some(candidate.clone());
                                return Some(candidate);
                            }
                        })+
                        _ => return None,
                    }
                    self.active += 1;
                    accept = false;
                }
            }
        }
    };
}

tuple!(T0, 0);
tuple!(T0, 0; T1, 1);
tuple!(T0, 0; T1, 1; T2, 2);
tuple!(T0, 0; T1, 1; T2, 2; T3, 3);
tuple!(T0, 0; T1, 1; T2, 2; T3, 3; T4, 4);
tuple!(T0, 0; T1, 1; T2, 2; T3, 3; T4, 4; T5, 5);
tuple!(T0, 0; T1, 1; T2, 2; T3, 3; T4, 4; T5, 5; T6, 6);
tuple!(T0, 0; T1, 1; T2, 2; T3, 3; T4, 4; T5, 5; T6, 6; T7, 7);
