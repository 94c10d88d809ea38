use core::ops::RangeBounds;
use fastrand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Deterministic pseudo-random source.
///
/// Given the same seed and the same call sequence, the same values are
/// produced. The rest of the crate draws through this bridge rather than the
/// rng crate directly.
#[derive(Debug, Clone)]
pub struct Random(Rng);

impl Random {
    pub fn new(seed: u64) -> Self {
        Self(Rng::with_seed(seed))
    }

    pub fn seed(&self) -> u64 {
        self.0.get_seed()
    }
}

/// A wall-clock derived seed, used when the configured seed is `0`.
pub(crate) fn entropy() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_nanos() as u64,
        Err(error) => error.duration().as_nanos() as u64,
    }
}

macro_rules! bridge {
    ($type:ident) => {
        impl Random {
            pub fn $type(&mut self) -> $type {
                self.0.$type()
            }
        }
    };
    ($($type:ident),*) => {$(bridge!($type);)*}
}

macro_rules! range {
    ($type:ident) => {
        impl Random {
            pub fn $type<R: RangeBounds<$type>>(&mut self, range: R) -> $type {
                self.0.$type(range)
            }
        }
    };
    ($($type:ident),*) => {$(range!($type);)*}
}

bridge!(f32, f64, bool);
range!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, char);
