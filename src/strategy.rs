use core::{
    fmt,
    sync::atomic::{AtomicU8, Ordering},
};

/// The queue discipline applied when a shrinker pops its next candidate.
///
/// Every shrinker keeps a frontier of pending candidates. Under
/// [`Strategy::Bfs`] the frontier behaves as a FIFO queue and shrinking
/// explores "wide" simplifications (such as the shrink target itself) before
/// local refinements. Under [`Strategy::Dfs`] the frontier behaves as a LIFO
/// stack and shrinking commits to one chain of refinements at a time.
///
/// The strategy is a process-wide register rather than a parameter threaded
/// through every generator. This keeps combinator signatures small at the
/// cost of forbidding concurrent properties with different strategies, which
/// the runner does not support anyway; it sets the register once per
/// property invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    #[default]
    Bfs = 0,
    Dfs = 1,
}

static STRATEGY: AtomicU8 = AtomicU8::new(Strategy::Bfs as u8);

impl Strategy {
    /// Parses a strategy name. Anything other than `"dfs"` is normalised to
    /// [`Strategy::Bfs`].
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("dfs") {
            Strategy::Dfs
        } else {
            Strategy::Bfs
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strategy::Bfs => f.write_str("bfs"),
            Strategy::Dfs => f.write_str("dfs"),
        }
    }
}

pub fn set(strategy: Strategy) {
    STRATEGY.store(strategy as u8, Ordering::Relaxed);
}

pub fn get() -> Strategy {
    if STRATEGY.load(Ordering::Relaxed) == Strategy::Dfs as u8 {
        Strategy::Dfs
    } else {
        Strategy::Bfs
    }
}

/// Serialises tests that depend on the process-wide register; the test
/// binary runs its cases concurrently and concurrent properties with
/// different strategies are unsupported.
#[cfg(test)]
pub(crate) static TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn bfs_for_test() -> std::sync::MutexGuard<'static, ()> {
    let guard = TEST_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    set(Strategy::Bfs);
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_normalise_to_bfs() {
        assert_eq!(Strategy::parse("dfs"), Strategy::Dfs);
        assert_eq!(Strategy::parse("DFS"), Strategy::Dfs);
        assert_eq!(Strategy::parse("bfs"), Strategy::Bfs);
        assert_eq!(Strategy::parse("zigzag"), Strategy::Bfs);
        assert_eq!(Strategy::parse(""), Strategy::Bfs);
    }
}
