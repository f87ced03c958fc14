//! This module defines the `Machine` struct, the execution engine of the
//! simulator. It drives the step loop over one tape, applies the transition
//! function, detects halting conditions, and delegates snapshot capture to
//! the recorder.

use crate::recorder::{format_configuration, Recorder, SamplingPolicy};
use crate::tape::Tape;
use crate::types::{Outcome, Specification};

/// The outcome of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine performed a transition and continues.
    Continue,
    /// The machine reached a terminal state.
    Halted(Outcome),
}

/// The completed product of one run, handed to the output sink: the sampled
/// trace of configurations, the terminal result, and the step count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub configurations: Vec<String>,
    pub outcome: Outcome,
    pub steps: usize,
}

/// One run of a machine: the mutable state (tape, current state, step
/// counter) driven against an immutable, borrowed [`Specification`].
///
/// The specification is read-only during execution and every run owns its
/// tape and trace privately, so independent runs against the same
/// specification may be executed in parallel by an external caller. The
/// engine itself is fully single-threaded and synchronous.
///
/// The caller must refuse to construct a `Machine` for a specification with
/// a non-empty [`crate::validator::validate`] result; once stepping begins
/// no error conditions exist and every path reaches an [`Outcome`].
pub struct Machine<'a> {
    spec: &'a Specification,
    state: String,
    tape: Tape,
    step_count: usize,
}

impl<'a> Machine<'a> {
    /// Creates a run over `spec` with the tape seeded from `input`, one cell
    /// per character (a single blank cell for empty input), the head on
    /// cell 0, and the initial state entered.
    pub fn new(spec: &'a Specification, input: &str) -> Self {
        Self {
            spec,
            state: spec.initial_state.clone(),
            tape: Tape::from_input(input, spec.blank),
            step_count: 0,
        }
    }

    /// Returns the current state of the run.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the number of transitions applied so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the tape of this run.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// The terminal outcome if the run has reached one, otherwise `None`.
    /// `StepLimitReached` is never returned here; the budget belongs to
    /// [`Machine::run`], not to the machine state.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.state == self.spec.accept_state {
            Some(Outcome::Accepted)
        } else if self.state == self.spec.reject_state {
            Some(Outcome::Rejected)
        } else {
            None
        }
    }

    /// Renders the current `(tape, state, head)` snapshot in `uqv` notation.
    pub fn configuration(&self) -> String {
        format_configuration(
            &self.tape.snapshot(),
            self.tape.head(),
            &self.state,
            self.spec.blank,
        )
    }

    /// Executes a single step.
    ///
    /// Grows the tape so the head is in bounds, reads the symbol under the
    /// head and looks up `(state, symbol)` in the transition function. A
    /// missing entry is not an error: it defines rejection, and the run
    /// moves to the reject state without counting a step. On a hit the
    /// target symbol is written, the head moves, the target state is
    /// entered, and the step counter advances.
    pub fn step(&mut self) -> Step {
        if let Some(outcome) = self.outcome() {
            return Step::Halted(outcome);
        }

        self.tape.ensure_head_in_bounds();
        let symbol = self.tape.read();

        let action = match self.spec.action(&self.state, symbol) {
            Some(action) => action.clone(),
            None => {
                // Undefined (state, symbol): deterministic rejection.
                self.state = self.spec.reject_state.clone();
                return Step::Halted(Outcome::Rejected);
            }
        };

        self.tape.write(action.write);
        self.tape.shift(action.direction);
        self.state = action.state;
        self.step_count += 1;

        match self.outcome() {
            Some(outcome) => Step::Halted(outcome),
            None => Step::Continue,
        }
    }

    /// Runs the machine until it accepts, rejects, or exhausts `max_steps`
    /// transitions, collecting the sampled trace along the way.
    ///
    /// The initial configuration is captured before any step. Terminal
    /// steps are always captured; intermediate steps pass through the
    /// sampling `policy`. A terminal state reached exactly on the budget's
    /// last step still reports the terminal outcome; `StepLimitReached` is
    /// only the fallback when neither terminal state was reached in budget.
    pub fn run(&mut self, max_steps: usize, policy: SamplingPolicy) -> Execution {
        let mut recorder = Recorder::new(policy);
        recorder.record(self.configuration());

        let outcome = loop {
            if let Some(outcome) = self.outcome() {
                break outcome;
            }
            if self.step_count >= max_steps {
                break Outcome::StepLimitReached;
            }

            match self.step() {
                Step::Continue => {
                    let step = self.step_count;
                    recorder.record_step(step, false, || self.configuration());
                }
                Step::Halted(outcome) => {
                    recorder.record(self.configuration());
                    break outcome;
                }
            }
        };

        Execution {
            configurations: recorder.into_trace(),
            outcome,
            steps: self.step_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Action, Direction, TransitionKey, BLANK_SYMBOL, DEFAULT_MAX_STEPS};
    use std::collections::{HashMap, HashSet};

    fn spec_base(transitions: HashMap<TransitionKey, Action>) -> Specification {
        Specification {
            states: ["q0", "qcheck", "qaccept", "qreject"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            input_alphabet: HashSet::from(['0', '1']),
            tape_alphabet: HashSet::from(['0', '1', BLANK_SYMBOL]),
            transitions,
            initial_state: "q0".to_string(),
            accept_state: "qaccept".to_string(),
            reject_state: "qreject".to_string(),
            blank: BLANK_SYMBOL,
        }
    }

    fn rule(state: &str, symbol: char, next: &str, write: char, direction: Direction) -> (TransitionKey, Action) {
        (
            TransitionKey {
                state: state.to_string(),
                symbol,
            },
            Action {
                state: next.to_string(),
                write,
                direction,
            },
        )
    }

    /// Accepts binary strings ending in 1: scan right to the first blank,
    /// step left, accept on 1. A 0 under the check state has no transition
    /// and rejects.
    fn ends_in_one_spec() -> Specification {
        spec_base(HashMap::from([
            rule("q0", '0', "q0", '0', Direction::Right),
            rule("q0", '1', "q0", '1', Direction::Right),
            rule("q0", BLANK_SYMBOL, "qcheck", BLANK_SYMBOL, Direction::Left),
            rule("qcheck", '1', "qaccept", '1', Direction::Right),
        ]))
    }

    /// Shuttles between two cells forever.
    fn endless_spec() -> Specification {
        spec_base(HashMap::from([
            rule("q0", BLANK_SYMBOL, "qcheck", BLANK_SYMBOL, Direction::Right),
            rule("qcheck", BLANK_SYMBOL, "q0", BLANK_SYMBOL, Direction::Left),
        ]))
    }

    #[test]
    fn test_ends_in_one_accepts_0101() {
        let spec = ends_in_one_spec();
        let mut machine = Machine::new(&spec, "0101");

        let execution = machine.run(DEFAULT_MAX_STEPS, SamplingPolicy::default());

        assert_eq!(execution.outcome, Outcome::Accepted);
        assert_eq!(machine.state(), "qaccept");
    }

    #[test]
    fn test_ends_in_one_rejects_0100() {
        let spec = ends_in_one_spec();
        let mut machine = Machine::new(&spec, "0100");

        let execution = machine.run(DEFAULT_MAX_STEPS, SamplingPolicy::default());

        assert_eq!(execution.outcome, Outcome::Rejected);
        assert_eq!(machine.state(), "qreject");
    }

    #[test]
    fn test_missing_transition_on_empty_input_rejects_immediately() {
        // No transition for (q0, blank): the very first step rejects.
        let spec = spec_base(HashMap::new());
        let mut machine = Machine::new(&spec, "");

        let execution = machine.run(DEFAULT_MAX_STEPS, SamplingPolicy::default());

        assert_eq!(execution.outcome, Outcome::Rejected);
        assert_eq!(execution.steps, 0);
        // Initial snapshot plus the single rejecting configuration.
        assert_eq!(execution.configurations.len(), 2);
        assert_eq!(execution.configurations[0], format!("q0{BLANK_SYMBOL}"));
        assert_eq!(execution.configurations[1], format!("qreject{BLANK_SYMBOL}"));
    }

    #[test]
    fn test_step_limit_reached_on_endless_machine() {
        let spec = endless_spec();
        let mut machine = Machine::new(&spec, "");

        let execution = machine.run(50, SamplingPolicy::default());

        assert_eq!(execution.outcome, Outcome::StepLimitReached);
        assert_eq!(execution.steps, 50);
        // Dense sampling keeps every step below 100: initial + steps 1..=50.
        assert_eq!(execution.configurations.len(), 51);
    }

    #[test]
    fn test_terminal_state_on_last_budgeted_step_wins_over_limit() {
        // Re-run the accepting machine with a budget equal to its exact
        // step count; the accept must still win over the limit.
        let spec = ends_in_one_spec();
        let mut machine = Machine::new(&spec, "0101");
        let steps = machine.run(DEFAULT_MAX_STEPS, SamplingPolicy::default()).steps;

        let mut exact = Machine::new(&spec, "0101");
        let execution = exact.run(steps, SamplingPolicy::default());

        assert_eq!(execution.outcome, Outcome::Accepted);
        assert_eq!(execution.steps, steps);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let spec = ends_in_one_spec();

        let first = Machine::new(&spec, "0101").run(DEFAULT_MAX_STEPS, SamplingPolicy::default());
        let second = Machine::new(&spec, "0101").run(DEFAULT_MAX_STEPS, SamplingPolicy::default());

        assert_eq!(first, second);
    }

    #[test]
    fn test_head_stays_in_bounds_throughout_a_run() {
        let spec = ends_in_one_spec();
        let mut machine = Machine::new(&spec, "0101");

        loop {
            match machine.step() {
                Step::Continue => {
                    assert!(machine.tape().head() < machine.tape().len());
                }
                Step::Halted(_) => break,
            }
        }
    }

    #[test]
    fn test_sampling_keeps_checkpoints_and_terminal_only() {
        // 250 cells of 1s: q0 scans right 250 steps, hits blank (step 251),
        // checks a 1 and accepts at step 252.
        let spec = ends_in_one_spec();
        let input = "1".repeat(250);
        let mut machine = Machine::new(&spec, &input);

        let execution = machine.run(DEFAULT_MAX_STEPS, SamplingPolicy::default());

        assert_eq!(execution.outcome, Outcome::Accepted);
        assert_eq!(execution.steps, 252);
        // Initial + steps 1..=99 + steps 100 and 200 + terminal step 252.
        assert_eq!(execution.configurations.len(), 1 + 99 + 2 + 1);
        let last = execution.configurations.last().unwrap();
        assert!(last.contains("qaccept"));
    }

    #[test]
    fn test_initial_configuration_captured_before_any_step() {
        let spec = ends_in_one_spec();
        let mut machine = Machine::new(&spec, "01");

        let execution = machine.run(DEFAULT_MAX_STEPS, SamplingPolicy::default());

        assert_eq!(execution.configurations[0], "q001");
    }

    #[test]
    fn test_run_mutates_tape_in_place_and_never_shrinks_it() {
        let spec = ends_in_one_spec();
        let mut machine = Machine::new(&spec, "11");

        let before = machine.tape().len();
        machine.run(DEFAULT_MAX_STEPS, SamplingPolicy::default());
        assert!(machine.tape().len() >= before);
    }

    #[test]
    fn test_step_on_halted_machine_reports_same_outcome() {
        let spec = spec_base(HashMap::new());
        let mut machine = Machine::new(&spec, "");

        assert_eq!(machine.step(), Step::Halted(Outcome::Rejected));
        assert_eq!(machine.step(), Step::Halted(Outcome::Rejected));
        assert_eq!(machine.step_count(), 0);
    }
}
