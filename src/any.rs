use crate::{
    generate::{Generate, State},
    shrink::Shrink,
};
use std::collections::VecDeque;

/// Uniform choice among same-item generators.
///
/// Shrinking first exhausts the chosen generator's shrinker; on exhaustion
/// it migrates to a neighbour generator, generating a fresh value from the
/// stored generation state and continuing with that generator's shrinker.
/// Migration order is the original index order excluding the chosen.
///
/// Panics on an empty choice set; that is a programmer bug, not a runtime
/// condition.
#[derive(Clone, Copy, Debug)]
pub struct Any<G>(pub(crate) G);

/// Choice weighted by a function of the candidate value.
///
/// One candidate is drawn per branch, weighed with `weight`, and the winner
/// picked with probability proportional to its weight. Shrinking and
/// migration behave exactly as for [`Any`].
#[derive(Clone, Debug)]
pub struct Weighted<G, F> {
    generators: Vec<G>,
    weight: F,
}

pub struct Shrinker<G: Generate> {
    inner: G::Shrink,
    neighbors: VecDeque<G>,
    state: State,
}

impl<G, F> Weighted<G, F> {
    pub fn new(weight: F, generators: Vec<G>) -> Self {
        assert!(
            !generators.is_empty(),
            "weighted choice requires at least one generator"
        );
        Self { generators, weight }
    }
}

fn chosen<G: Generate + Clone>(
    generators: &[G],
    index: usize,
    value: G::Item,
    inner: G::Shrink,
    state: &State,
) -> (G::Item, Shrinker<G>) {
    let neighbors = generators
        .iter()
        .enumerate()
        .filter(|(other, _)| *other != index)
        .map(|(_, generator)| generator.clone())
        .collect();
    (
        value,
        Shrinker {
            inner,
            neighbors,
            state: state.clone(),
        },
    )
}

fn indexed<G: Generate + Clone>(generators: &[G], state: &mut State) -> (G::Item, Shrinker<G>) {
    assert!(
        !generators.is_empty(),
        "choice requires at least one generator"
    );
    let index = state.random().usize(0..generators.len());
    let (value, inner) = generators[index].generate(state);
    chosen(generators, index, value, inner, state)
}

impl<G: Generate + Clone> Generate for Any<Vec<G>> {
    type Item = G::Item;
    type Shrink = Shrinker<G>;

    fn generate(&self, state: &mut State) -> (Self::Item, Self::Shrink) {
        indexed(&self.0, state)
    }
}

impl<G: Generate + Clone, const N: usize> Generate for Any<[G; N]> {
    type Item = G::Item;
    type Shrink = Shrinker<G>;

    fn generate(&self, state: &mut State) -> (Self::Item, Self::Shrink) {
        indexed(&self.0, state)
    }
}

impl<G: Generate + Clone, F: Fn(&G::Item) -> f64> Generate for Weighted<G, F> {
    type Item = G::Item;
    type Shrink = Shrinker<G>;

    fn generate(&self, state: &mut State) -> (Self::Item, Self::Shrink) {
        let mut candidates = Vec::with_capacity(self.generators.len());
        for generator in &self.generators {
            candidates.push(generator.generate(state));
        }
        let weights: Vec<f64> = candidates
            .iter()
            .map(|(value, _)| (self.weight)(value))
            .collect();
        for weight in &weights {
            assert!(
                weight.is_finite() && *weight >= 0.0,
                "weights must be finite and non-negative"
            );
        }
        let total: f64 = weights.iter().sum();
        assert!(total > 0.0, "total weight must be positive");
        let mut roll = state.random().f64() * total;
        let mut index = weights.len() - 1;
        for (branch, weight) in weights.iter().enumerate() {
            if roll < *weight {
                index = branch;
                break;
            }
            roll -= weight;
        }
        let (value, inner) = candidates.swap_remove(index);
        chosen(&self.generators, index, value, inner, state)
    }
}

impl<G: Generate> Shrink for Shrinker<G> {
    type Item = G::Item;

    fn step(&mut self, accept: bool) -> Option<Self::Item> {
        if let Some(item) = self.inner.step(accept) {
            return Some(item);
        }
        let generator = self.neighbors.pop_front()?;
        let (value, inner) = generator.generate(&mut self.state);
        self.inner = inner;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constant::Constant, sample::Sample};

    #[test]
    fn every_branch_is_reachable() {
        let generator = Any([Constant(1u8), Constant(2), Constant(3)]);
        let mut seen = [false; 3];
        for value in generator.samples_with(13, 300) {
            seen[value as usize - 1] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn exhaustion_migrates_to_the_neighbours() {
        let _guard = crate::strategy::bfs_for_test();
        let generator = Any([Constant(1u8), Constant(2), Constant(3)]);
        let mut state = State::new(29);
        let (value, mut shrinker) = generator.generate(&mut state);
        let mut visited = vec![value];
        while let Some(candidate) = shrinker.step(false) {
            visited.push(candidate);
        }
        visited.sort_unstable();
        assert_eq!(visited, [1, 2, 3]);
    }

    #[test]
    fn weighting_follows_the_value() {
        // Weight 0 on one branch starves it entirely.
        let generator = Weighted::new(
            |value: &u8| if *value == 2 { 0.0 } else { 1.0 },
            vec![Constant(1u8), Constant(2), Constant(3)],
        );
        for value in generator.samples_with(31, 300) {
            assert_ne!(value, 2);
        }
    }

    #[test]
    #[should_panic]
    fn an_empty_choice_set_is_a_programmer_bug() {
        let generator: Any<Vec<Constant<u8>>> = Any(Vec::new());
        let mut state = State::new(0);
        let _ = generator.generate(&mut state);
    }
}
