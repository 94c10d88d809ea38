use crate::{
    generate::{Generate, State},
    shrink::Shrink,
};

/// Retries generation until the predicate passes, up to `retries` attempts.
///
/// The item is `Option<G::Item>`: when the budget runs out without a passing
/// value, the generator yields `None` with an empty shrinker. This is the
/// silent-sentinel reading of filter exhaustion, surfaced in the item type
/// rather than a side channel; a property observes it as "not enough
/// inputs" and reports accordingly. Shrink candidates that fail the
/// predicate are skipped, counting as rejected, until one passes or the
/// underlying shrinker is exhausted.
#[derive(Clone, Copy, Debug)]
pub struct Filter<G, F> {
    generator: G,
    filter: F,
    retries: usize,
}

#[derive(Clone, Debug)]
pub struct Shrinker<S, F> {
    inner: Option<S>,
    filter: F,
}

impl<G, F> Filter<G, F> {
    pub const fn new(generator: G, filter: F, retries: usize) -> Self {
        Self {
            generator,
            filter,
            retries,
        }
    }
}

impl<G: Generate, F: Fn(&G::Item) -> bool + Clone> Generate for Filter<G, F> {
    type Item = Option<G::Item>;
    type Shrink = Shrinker<G::Shrink, F>;

    fn generate(&self, state: &mut State) -> (Self::Item, Self::Shrink) {
        for _ in 0..self.retries.max(1) {
            let (value, inner) = self.generator.generate(state);
            if (self.filter)(&value) {
                return (
                    Some(value),
                    Shrinker {
                        inner: Some(inner),
                        filter: self.filter.clone(),
                    },
                );
            }
        }
        (
            None,
            Shrinker {
                inner: None,
                filter: self.filter.clone(),
            },
        )
    }
}

impl<S: Shrink, F: Fn(&S::Item) -> bool> Shrink for Shrinker<S, F> {
    type Item = Option<S::Item>;

    fn step(&mut self, accept: bool) -> Option<Self::Item> {
        let inner = self.inner.as_mut()?;
        let mut accept = accept;
        loop {
            let candidate = inner.step(accept)?;
            if (self.filter)(&candidate) {
                return Some(Some(candidate));
            }
            accept = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{primitive::Int, size::Size};

    #[test]
    fn generated_values_satisfy_the_predicate() {
        let mut state = State::new(2);
        let generator = Filter::new(Int::<i64>::new(Size::EMPTY), |value: &i64| value % 2 == 0, 1000);
        for _ in 0..200 {
            let (value, _) = generator.generate(&mut state);
            assert_eq!(value.unwrap() % 2, 0);
        }
    }

    #[test]
    fn shrink_candidates_satisfy_the_predicate() {
        let _guard = crate::strategy::bfs_for_test();
        let mut state = State::new(2);
        let generator = Filter::new(Int::<i64>::new(Size::EMPTY), |value: &i64| value % 2 == 0, 1000);
        let (_, mut shrinker) = generator.generate(&mut state);
        for _ in 0..10_000 {
            match shrinker.step(true) {
                Some(Some(candidate)) => assert_eq!(candidate % 2, 0),
                Some(None) => panic!("a sentinel is never a shrink candidate"),
                None => return,
            }
        }
        panic!("filter shrinker did not terminate");
    }

    #[test]
    fn an_impossible_predicate_yields_the_sentinel() {
        let mut state = State::new(2);
        let generator = Filter::new(Int::<i64>::new(Size::EMPTY), |_: &i64| false, 10);
        let (value, mut shrinker) = generator.generate(&mut state);
        assert_eq!(value, None);
        assert_eq!(shrinker.step(false), None);
    }
}
