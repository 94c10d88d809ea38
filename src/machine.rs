use crate::{
    boxed::{self, Boxed},
    check::{self, Config},
    generate::{Generate, State},
    harness::Harness,
    shrink::{Frontier, Shrink},
    utility, STEPS,
};
use core::fmt;

/// A state-machine model: an initial state and the commands that may act on
/// it. Checking the machine generates command sequences, executes them
/// against the evolving state, and verifies every command's postcondition.
pub struct Machine<S, C> {
    initial: S,
    commands: Vec<Command<S, C>>,
    max_steps: usize,
}

type Execute<S, C> = Box<dyn Fn(&S, &C) -> Result<S, String> + Send + Sync>;
type Pre<S, C> = Box<dyn Fn(&S, &C) -> bool + Send + Sync>;
type Post<S, C> = Box<dyn Fn(&S, &C, &S) -> bool + Send + Sync>;

/// One command descriptor: a human-readable name, a generator for command
/// instances, a partial execution function, and optional pre/postconditions.
///
/// A command whose failure is part of its contract should return `Ok` with
/// the state unchanged; a returned error is recorded in the history and is
/// always a property failure.
pub struct Command<S, C> {
    name: String,
    generator: Boxed<C>,
    execute: Execute<S, C>,
    precondition: Option<Pre<S, C>>,
    postcondition: Option<Post<S, C>>,
}

/// A generated command instance, tagged with the index of its owning
/// descriptor. The tag makes descriptor resolution exact; there is no
/// matching heuristic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step<C> {
    pub command: usize,
    pub value: C,
}

/// One executed command: the states around it and the error, if any. The
/// state only advances when execution succeeds.
#[derive(Clone, Debug)]
pub struct Transition<S, C> {
    pub name: String,
    pub command: usize,
    pub value: C,
    pub from: S,
    pub to: S,
    pub error: Option<String>,
}

/// The result of executing a command sequence.
#[derive(Clone, Debug)]
pub struct Outcome<S, C> {
    pub state: S,
    pub history: Vec<Transition<S, C>>,
    pub skipped: Vec<Step<C>>,
}

/// Generates command sequences for a machine: length uniform in
/// `[0, max_steps]`, capped by the runner size hint when that is smaller;
/// each position picks a command index uniformly, then generates an
/// instance with that command's generator.
struct Sequences<'a, S, C> {
    machine: &'a Machine<S, C>,
}

/// Shrinker for command sequences: proposes the one-shorter prefix first,
/// then a local shrink of each command right-to-left via its own shrinker.
/// Rebasing discards the stale command shrinkers.
pub struct Shrinker<C> {
    cur: Vec<Step<C>>,
    last: Option<Vec<Step<C>>>,
    elements: Vec<Option<boxed::Shrinker<C>>>,
    frontier: Frontier<Vec<Step<C>>, String>,
}

impl<S, C> Command<S, C> {
    pub fn new<G, F>(name: impl Into<String>, generator: G, execute: F) -> Self
    where
        G: Generate<Item = C> + Send + Sync + 'static,
        G::Shrink: Send + 'static,
        F: Fn(&S, &C) -> Result<S, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            generator: Boxed::new(generator),
            execute: Box::new(execute),
            precondition: None,
            postcondition: None,
        }
    }

    /// Commands whose precondition rejects the current state are recorded as
    /// skipped and leave the state untouched.
    pub fn precondition<F>(mut self, precondition: F) -> Self
    where
        F: Fn(&S, &C) -> bool + Send + Sync + 'static,
    {
        self.precondition = Some(Box::new(precondition));
        self
    }

    /// Checked for every recorded transition of this command, with the
    /// states before and after execution.
    pub fn postcondition<F>(mut self, postcondition: F) -> Self
    where
        F: Fn(&S, &C, &S) -> bool + Send + Sync + 'static,
    {
        self.postcondition = Some(Box::new(postcondition));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<S, C> Machine<S, C> {
    pub fn new(initial: S) -> Self {
        Self {
            initial,
            commands: Vec::new(),
            max_steps: STEPS,
        }
    }

    pub fn command(mut self, command: Command<S, C>) -> Self {
        self.commands.push(command);
        self
    }

    /// Caps generated sequence lengths. Defaults to 20.
    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}

impl<S: Clone, C: Clone> Machine<S, C> {
    /// Executes a command sequence from the initial state.
    pub fn run(&self, sequence: &[Step<C>]) -> Outcome<S, C> {
        let mut state = self.initial.clone();
        let mut history = Vec::new();
        let mut skipped = Vec::new();
        for step in sequence {
            let Some(command) = self.commands.get(step.command) else {
                skipped.push(step.clone());
                continue;
            };
            if let Some(precondition) = &command.precondition {
                if !precondition(&state, &step.value) {
                    skipped.push(step.clone());
                    continue;
                }
            }
            match (command.execute)(&state, &step.value) {
                Ok(next) => {
                    history.push(Transition {
                        name: command.name.clone(),
                        command: step.command,
                        value: step.value.clone(),
                        from: state.clone(),
                        to: next.clone(),
                        error: None,
                    });
                    state = next;
                }
                Err(error) => {
                    history.push(Transition {
                        name: command.name.clone(),
                        command: step.command,
                        value: step.value.clone(),
                        from: state.clone(),
                        to: state.clone(),
                        error: Some(error),
                    });
                }
            }
        }
        Outcome {
            state,
            history,
            skipped,
        }
    }
}

impl<S, C> Machine<S, C>
where
    S: Clone + fmt::Debug + Send + Sync,
    C: Clone + fmt::Debug + Send + Sync,
{
    /// Checks the machine as a property: every generated sequence must
    /// execute without errors and satisfy every recorded transition's
    /// postcondition. Violations fail the example, naming the command, and
    /// the failing sequence shrinks like any other generated value.
    pub fn check<H>(&self, harness: &H, config: Config)
    where
        H: Harness + Sync + ?Sized,
    {
        let sequences = Sequences { machine: self };
        check::for_all(harness, config, &sequences, |sequence: Vec<Step<C>>| {
            let outcome = self.run(&sequence);
            for transition in &outcome.history {
                if let Some(error) = &transition.error {
                    harness.log(format_args!(
                        "command '{}' failed: {error}",
                        transition.name
                    ));
                    return false;
                }
                if let Some(postcondition) = &self.commands[transition.command].postcondition {
                    if !postcondition(&transition.from, &transition.value, &transition.to) {
                        harness.log(format_args!(
                            "postcondition violated by command '{}'",
                            transition.name
                        ));
                        return false;
                    }
                }
            }
            true
        });
    }
}

impl<'a, S, C> Generate for Sequences<'a, S, C>
where
    C: Clone + fmt::Debug,
{
    type Item = Vec<Step<C>>;
    type Shrink = Shrinker<C>;

    fn generate(&self, state: &mut State) -> (Self::Item, Self::Shrink) {
        let commands = &self.machine.commands;
        let mut max = self.machine.max_steps;
        let hint = state.size();
        if hint.informative() && hint.max >= 0 && (hint.max as usize) < max {
            max = hint.max as usize;
        }
        let count = if commands.is_empty() {
            0
        } else {
            state.random().usize(0..=max)
        };
        let mut steps = Vec::with_capacity(count);
        let mut elements = Vec::with_capacity(count);
        for _ in 0..count {
            let command = state.random().usize(0..commands.len());
            let (value, shrink) = commands[command].generator.generate(state);
            steps.push(Step { command, value });
            elements.push(Some(shrink));
        }
        (steps.clone(), Shrinker::new(steps, elements))
    }
}

impl<C: Clone + fmt::Debug> Shrinker<C> {
    fn new(steps: Vec<Step<C>>, elements: Vec<Option<boxed::Shrinker<C>>>) -> Self {
        let mut shrinker = Self {
            cur: steps,
            last: None,
            elements,
            frontier: Frontier::new(),
        };
        shrinker.frontier.record(utility::canon(&shrinker.cur));
        shrinker.grow();
        shrinker
    }

    fn push(&mut self, candidate: Vec<Step<C>>) {
        self.frontier.push(utility::canon(&candidate), candidate);
    }

    fn grow(&mut self) {
        self.frontier.clear();
        let length = self.cur.len();
        if length == 0 {
            return;
        }
        self.push(self.cur[..length - 1].to_vec());
        for index in (0..length).rev() {
            let stepped = match self.elements.get_mut(index) {
                Some(Some(element)) => element.step(false),
                _ => None,
            };
            if let Some(value) = stepped {
                let mut candidate = self.cur.clone();
                let command = candidate[index].command;
                candidate[index] = Step { command, value };
                self.push(candidate);
            }
        }
    }
}

impl<C: Clone + fmt::Debug> Shrink for Shrinker<C> {
    type Item = Vec<Step<C>>;

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
