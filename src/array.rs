use crate::{
    generate::{Generate, State},
    shrink::{Frontier, Shrink},
    utility,
};
use core::fmt;

/// Fixed-length array generator: `N` independent elements.
#[derive(Clone, Copy, Debug)]
pub struct Array<G, const N: usize>(pub(crate) G);

/// Shrinker for fixed-length arrays. Elements cannot be removed; the
/// frontier proposes, for each position right-to-left, the array with that
/// element's next shrink candidate substituted. Rebasing discards the
/// per-element shrinkers.
#[derive(Debug)]
pub struct Shrinker<T, S, const N: usize> {
    cur: [T; N],
    last: Option<[T; N]>,
    elements: Vec<Option<S>>,
    frontier: Frontier<[T; N], String>,
}

impl<G: Generate, const N: usize> Generate for Array<G, N>
where
    G::Item: Clone + fmt::Debug,
{
    type Item = [G::Item; N];
    type Shrink = Shrinker<G::Item, G::Shrink, N>;

    fn generate(&self, state: &mut State) -> (Self::Item, Self::Shrink) {
        let mut values = Vec::with_capacity(N);
        let mut elements = Vec::with_capacity(N);
        for _ in 0..N {
            let (value, shrink) = self.0.generate(state);
            values.push(value);
            elements.push(Some(shrink));
        }
        let values: [G::Item; N] = match values.try_into() {
            Ok(values) => values,
            Err(_) => unreachable!("exactly N elements were generated"),
        };
        (values.clone(), Shrinker::new(values, elements))
    }
}

impl<T: Clone + fmt::Debug, S: Shrink<Item = T>, const N: usize> Shrinker<T, S, N> {
    fn new(values: [T; N], elements: Vec<Option<S>>) -> Self {
        let mut shrinker = Self {
            cur: values,
            last: None,
            elements,
            frontier: Frontier::new(),
        };
        shrinker.frontier.record(utility::canon(&shrinker.cur[..]));
        shrinker.grow();
        shrinker
    }

    fn grow(&mut self) {
        self.frontier.clear();
        for index in (0..N).rev() {
            let stepped = match self.elements.get_mut(index) {
                Some(Some(element)) => element.step(false),
                _ => None,
            };
            if let Some(value) = stepped {
                let mut candidate = self.cur.clone();
                candidate[index] = value;
                self.frontier
                    .push(utility::canon(&candidate[..]), candidate);
            }
        }
    }
}

impl<T: Clone + fmt::Debug, S: Shrink<Item = T>, const N: usize> Shrink for Shrinker<T, S, N> {
    type Item = [T; N];

    fn step(&mut self, accept: bool) -> Option<Self::Item> {
        if accept {
            if let Some(last) = self.last.take() {
                if utility::canon(&last[..]) != utility::canon(&self.cur[..]) {
                    self.cur = last;
                    self.elements.clear();
                    self.grow();
                }
            }
        }
        let next = self.frontier.pop()?;
        self.last = Some(next.clone());
        Some(next)
    }
}
