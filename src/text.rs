use crate::{
    generate::{Generate, State},
    shrink::{Frontier, Shrink},
    size::Size,
    STRINGS,
};
use std::borrow::Cow;

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const ALPHABETIC: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const ALPHANUMERIC: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const ASCII: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 !\"#$%&'()*+,-./:;<=>?@[\\]^_{|}~";

/// String generator over a configurable alphabet.
///
/// Length defaults to `0..=32`; an informative runner hint overrides the
/// local size. An empty alphabet falls back to [`ALPHANUMERIC`]. Each
/// character is drawn uniformly from the alphabet.
#[derive(Clone, Debug)]
pub struct Text {
    alphabet: Cow<'static, str>,
    size: Size,
}

/// Shrinker for strings. Neighbours of the working minimum, in order: every
/// strict prefix longest-first, then for each position right-to-left the
/// string with that character replaced by the alphabet's first symbol.
#[derive(Clone, Debug)]
pub struct Shrinker {
    cur: String,
    last: Option<String>,
    first: char,
    frontier: Frontier<String>,
}

impl Text {
    pub fn new(alphabet: impl Into<Cow<'static, str>>, size: Size) -> Self {
        let alphabet = alphabet.into();
        let alphabet = if alphabet.is_empty() {
            Cow::Borrowed(ALPHANUMERIC)
        } else {
            alphabet
        };
        Self { alphabet, size }
    }
}

impl Generate for Text {
    type Item = String;
    type Shrink = Shrinker;

    fn generate(&self, state: &mut State) -> (Self::Item, Self::Shrink) {
        let (min, max) = self.size.length(state.size(), STRINGS);
        let count = if max > min {
            min + state.random().usize(0..=max - min)
        } else {
            min
        };
        let letters: Vec<char> = self.alphabet.chars().collect();
        let mut value = String::with_capacity(count);
        for _ in 0..count {
            value.push(letters[state.random().usize(0..letters.len())]);
        }
        (value.clone(), Shrinker::new(value, letters[0]))
    }
}

impl Shrinker {
    fn new(value: String, first: char) -> Self {
        let mut shrinker = Self {
            cur: value.clone(),
            last: None,
            first,
            frontier: Frontier::new(),
        };
        shrinker.frontier.record(value);
        shrinker.grow();
        shrinker
    }

    fn push(&mut self, candidate: String) {
        self.frontier.push(candidate.clone(), candidate);
    }

    fn grow(&mut self) {
        self.frontier.clear();
        let letters: Vec<char> = self.cur.chars().collect();
        for length in (0..letters.len()).rev() {
            self.push(letters[..length].iter().collect());
        }
        for index in (0..letters.len()).rev() {
            if letters[index] != self.first {
                let mut tamed = letters.clone();
                tamed[index] = self.first;
                self.push(tamed.into_iter().collect());
            }
        }
    }
}

impl Shrink for Shrinker {
    type Item = String;

    fn step(&mut self, accept: bool) -> Option<Self::Item> {
        if accept {
            if let Some(last) = self.last.take() {
                if last != self.cur {
                    self.cur = last;
                    self.grow();
                }
            }
        }
        let next = self.frontier.pop()?;
        self.last = Some(next.clone());
        Some(next)
    }
}
