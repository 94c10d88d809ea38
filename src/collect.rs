use crate::{
    generate::{Generate, State},
    shrink::{Frontier, Shrink},
    size::Size,
    utility, COLLECTS,
};
use core::fmt;

/// Variable-length sequence generator.
///
/// The length range is resolved from the runner hint if informative, else
/// the local size, else `0..=16`. Each element is generated independently.
#[derive(Clone, Copy, Debug)]
pub struct Collect<G> {
    element: G,
    size: Size,
}

/// Shrinker for sequences. Neighbours of the working minimum, in order:
/// block removals at chunk sizes `L/2, L/4, .. 1` over every aligned start,
/// single-element removals right-to-left, then one shrink step per position
/// right-to-left. Rebasing discards the stale element shrinkers; the regrown
/// frontier still proposes removals on the new minimum.
#[derive(Debug)]
pub struct Shrinker<T, S> {
    cur: Vec<T>,
    last: Option<Vec<T>>,
    elements: Vec<Option<S>>,
    frontier: Frontier<Vec<T>, String>,
}

impl<G> Collect<G> {
    pub const fn new(element: G, size: Size) -> Self {
        Self { element, size }
    }
}

impl<G: Generate> Generate for Collect<G>
where
    G::Item: Clone + fmt::Debug,
{
    type Item = Vec<G::Item>;
    type Shrink = Shrinker<G::Item, G::Shrink>;

    fn generate(&self, state: &mut State) -> (Self::Item, Self::Shrink) {
        let (min, max) = self.size.length(state.size(), COLLECTS);
        let count = if max > min {
            min + state.random().usize(0..=max - min)
        } else {
            min
        };
        let mut values = Vec::with_capacity(count);
        let mut elements = Vec::with_capacity(count);
        for _ in 0..count {
            let (value, shrink) = self.element.generate(state);
            values.push(value);
            elements.push(Some(shrink));
        }
        (values.clone(), Shrinker::new(values, elements))
    }
}

impl<T: Clone + fmt::Debug, S: Shrink<Item = T>> Shrinker<T, S> {
    fn new(values: Vec<T>, elements: Vec<Option<S>>) -> Self {
        let mut shrinker = Self {
            cur: values,
            last: None,
            elements,
            frontier: Frontier::new(),
        };
        shrinker.frontier.record(utility::canon(&shrinker.cur));
        shrinker.grow();
        shrinker
    }

    fn push(&mut self, candidate: Vec<T>) {
        self.frontier.push(utility::canon(&candidate), candidate);
    }

    fn without(&self, start: usize, end: usize) -> Vec<T> {
        let mut out = Vec::with_capacity(self.cur.len() - (end - start));
        out.extend_from_slice(&self.cur[..start]);
        out.extend_from_slice(&self.cur[end..]);
        out
    }

    fn grow(&mut self) {
        self.frontier.clear();
        let length = self.cur.len();
        if length == 0 {
            return;
        }
        let mut chunk = length / 2;
        while chunk >= 1 {
            let mut start = 0;
            while start + chunk <= length {
                let candidate = self.without(start, start + chunk);
                self.push(candidate);
                start += chunk;
            }
            chunk /= 2;
        }
        for index in (0..length).rev() {
            let candidate = self.without(index, index + 1);
            self.push(candidate);
        }
        for index in (0..length).rev() {
            let stepped = match self.elements.get_mut(index) {
                Some(Some(element)) => element.step(false),
                _ => None,
            };
            if let Some(value) = stepped {
                let mut candidate = self.cur.clone();
                candidate[index] = value;
                self.push(candidate);
            }
        }
    }
}

impl<T: Clone + fmt::Debug, S: Shrink<Item = T>> Shrink for Shrinker<T, S> {
    type Item = Vec<T>;

    fn step(&mut self, accept: bool) -> Option<Self::Item> {
        if accept {
            if let Some(last) = self.last.take() {
                if utility::canon(&last) != utility::canon(&self.cur) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Int;

    #[test]
    fn sequences_reach_empty_under_accept() {
        let _guard = crate::strategy::bfs_for_test();
        let mut state = State::new(4);
        let generator = Collect::new(Int::<i64>::new(Size::EMPTY), Size::new(5, 5));
        let (value, mut shrinker) = generator.generate(&mut state);
        assert_eq!(value.len(), 5);
        let mut reached = false;
        for _ in 0..100_000 {
            match shrinker.step(true) {
                Some(candidate) => reached |= candidate.is_empty(),
                None => break,
            }
        }
        assert!(reached);
    }

    #[test]
    fn first_candidate_removes_the_largest_block() {
        let _guard = crate::strategy::bfs_for_test();
        let shrinker = Shrinker::<i64, crate::shrink::Empty<i64>>::new(
            vec![1, 2, 3, 4],
            vec![None, None, None, None],
        );
        let mut shrinker = shrinker;
        assert_eq!(shrinker.step(false), Some(vec![3, 4]));
    }

    #[test]
    fn empty_sequences_are_exhausted_immediately() {
        let mut shrinker = Shrinker::<i64, crate::shrink::Empty<i64>>::new(vec![], vec![]);
        assert_eq!(shrinker.step(false), None);
        assert_eq!(shrinker.step(true), None);
    }
}
