#![allow(dead_code)]

use core::fmt;
use rapido::{Harness, Strategy};
use std::sync::{Mutex, MutexGuard};

/// Harness that records everything the runner does instead of printing or
/// panicking, so tests can assert on subtest sequences, diagnostics, and
/// fatal reports.
pub struct Recorder {
    name: String,
    record: Mutex<Record>,
}

#[derive(Default)]
struct Record {
    subtests: Vec<(String, bool)>,
    logs: Vec<String>,
    fatals: Vec<String>,
}

impl Recorder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record: Mutex::new(Record::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Record> {
        self.record
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn subtests(&self) -> Vec<(String, bool)> {
        self.lock().subtests.clone()
    }

    pub fn subtest_names(&self) -> Vec<String> {
        self.lock()
            .subtests
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn logs(&self) -> Vec<String> {
        self.lock().logs.clone()
    }

    pub fn fatals(&self) -> Vec<String> {
        self.lock().fatals.clone()
    }
}

impl Harness for Recorder {
    fn name(&self) -> &str {
        &self.name
    }

    fn subtest(&self, name: &str, body: &mut dyn FnMut() -> bool) -> bool {
        let passed = body();
        self.lock().subtests.push((name.to_string(), passed));
        passed
    }

    fn log(&self, message: fmt::Arguments) {
        self.lock().logs.push(message.to_string());
    }

    fn fatal(&self, message: fmt::Arguments) {
        self.lock().fatals.push(message.to_string());
    }
}

/// The shrink strategy register is process-wide and the test binary runs
/// its cases concurrently; tests that exercise shrinking hold this lock.
static STRATEGY: Mutex<()> = Mutex::new(());

pub fn bfs() -> MutexGuard<'static, ()> {
    let guard = STRATEGY
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    rapido::strategy::set(Strategy::Bfs);
    guard
}

pub fn locked() -> MutexGuard<'static, ()> {
    STRATEGY
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
