use core::fmt;

/// The contract the runner consumes from the host test harness.
///
/// The harness itself is an external collaborator; the runner only needs to
/// execute named subtests, emit diagnostics, and abort the enclosing
/// property. Subtest registration is assumed to be thread-safe when the
/// runner is configured with `parallelism >= 2`.
pub trait Harness {
    /// Name of the enclosing property, used in replay hints.
    fn name(&self) -> &str;

    /// Executes `body` as a named child test and reports whether it passed.
    fn subtest(&self, name: &str, body: &mut dyn FnMut() -> bool) -> bool;

    /// Emits a diagnostic message.
    fn log(&self, message: fmt::Arguments);

    /// Aborts the enclosing property immediately with a formatted message.
    fn fatal(&self, message: fmt::Arguments);

    /// Marks the calling frame as a helper. Cosmetic.
    fn helper(&self) {}
}

impl<H: Harness + ?Sized> Harness for &H {
    fn name(&self) -> &str {
        H::name(self)
    }

    fn subtest(&self, name: &str, body: &mut dyn FnMut() -> bool) -> bool {
        H::subtest(self, name, body)
    }

    fn log(&self, message: fmt::Arguments) {
        H::log(self, message)
    }

    fn fatal(&self, message: fmt::Arguments) {
        H::fatal(self, message)
    }

    fn helper(&self) {
        H::helper(self)
    }
}

/// Minimal harness: diagnostics go to stdout, fatal reports abort by
/// panicking with the formatted message.
pub struct Console {
    name: String,
}

impl Console {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Harness for Console {
    fn name(&self) -> &str {
        &self.name
    }

    fn subtest(&self, _: &str, body: &mut dyn FnMut() -> bool) -> bool {
        body()
    }

    fn log(&self, message: fmt::Arguments) {
        println!("[{}] {message}", self.name);
    }

    fn fatal(&self, message: fmt::Arguments) {
        panic!("[{}] {message}", self.name);
    }
}
