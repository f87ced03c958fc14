//! This module defines the core data structures and types used throughout the simulator:
//! the machine specification (the classical 7-tuple), transition records, run outcomes,
//! and error types.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

/// The blank symbol that fills unwritten tape cells. It belongs to the tape
/// alphabet and never to the input alphabet.
pub const BLANK_SYMBOL: char = '⊔';
/// The default maximum number of transition applications before a run is
/// abandoned as non-terminating within budget.
pub const DEFAULT_MAX_STEPS: usize = 10000;

/// A deterministic single-tape Turing machine specification,
/// `M = (Q, Sigma, Gamma, delta, q0, qaccept, qreject)` plus the blank symbol.
///
/// A `Specification` is plain data: it carries no run state and is shared by
/// reference into each run, so several independent runs may execute against
/// the same value. It must pass [`crate::validator::validate`] with an empty
/// error list before it is handed to a [`crate::machine::Machine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    /// The set of state identifiers, `Q`.
    pub states: HashSet<String>,
    /// The input alphabet `Sigma`: symbols readable from the original input.
    pub input_alphabet: HashSet<char>,
    /// The tape alphabet `Gamma`: symbols writable on the tape, a superset of
    /// `Sigma` that contains the blank symbol.
    pub tape_alphabet: HashSet<char>,
    /// The transition function `delta`. Determinism is structural: the map
    /// admits exactly one action per `(state, symbol)` key.
    pub transitions: HashMap<TransitionKey, Action>,
    /// The state a run starts in.
    pub initial_state: String,
    /// The accepting terminal state.
    pub accept_state: String,
    /// The rejecting terminal state.
    pub reject_state: String,
    /// The blank symbol for this machine.
    pub blank: char,
}

impl Specification {
    /// Returns the action for `(state, symbol)`, or `None` when the
    /// transition function is undefined there.
    pub fn action(&self, state: &str, symbol: char) -> Option<&Action> {
        self.transitions.get(&TransitionKey {
            state: state.to_string(),
            symbol,
        })
    }

    /// Checks whether `state` is one of the two terminal states.
    pub fn is_terminal(&self, state: &str) -> bool {
        state == self.accept_state || state == self.reject_state
    }
}

/// The domain of one transition entry: the current state and the symbol
/// under the head.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionKey {
    pub state: String,
    pub symbol: char,
}

/// The outcome of one transition entry: the state to enter, the symbol to
/// write, and the direction to move the head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub state: String,
    pub write: char,
    pub direction: Direction,
}

/// Represents the possible directions the tape head can move.
///
/// A deterministic single-tape machine only moves left or right; there is no
/// stay move, and an unrecognized direction token is rejected at parse time,
/// so an invalid direction is unrepresentable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
}

/// The terminal result of a completed run. Exactly one of these is produced
/// per run, never partially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The machine entered its accepting state.
    Accepted,
    /// The machine entered its rejecting state, either through an explicit
    /// transition or because no transition was defined.
    Rejected,
    /// Neither terminal state was reached within the step budget. This is a
    /// reported outcome, not an inference of true non-termination.
    StepLimitReached,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::Accepted => "ACCEPTED",
            Outcome::Rejected => "REJECTED",
            Outcome::StepLimitReached => "STEP LIMIT REACHED",
        };
        write!(f, "{}", text)
    }
}

/// A single consistency violation found in a [`Specification`].
///
/// Violations are accumulated, never raised: the validator reports every one
/// of them together, and a malformed specification is its expected output,
/// not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("state set Q is empty")]
    EmptyStates,
    #[error("input alphabet Sigma is empty")]
    EmptyInputAlphabet,
    #[error("tape alphabet Gamma is empty")]
    EmptyTapeAlphabet,
    #[error("blank symbol '{0}' is not in Gamma")]
    BlankNotInTapeAlphabet(char),
    #[error("Sigma is not a subset of Gamma, missing {0:?}")]
    InputNotSubsetOfTape(Vec<char>),
    #[error("blank symbol '{0}' must not be in Sigma")]
    BlankInInputAlphabet(char),
    #[error("initial state '{0}' is not in Q")]
    UnknownInitialState(String),
    #[error("accept state '{0}' is not in Q")]
    UnknownAcceptState(String),
    #[error("reject state '{0}' is not in Q")]
    UnknownRejectState(String),
    #[error("accept and reject state must differ, both are '{0}'")]
    AcceptEqualsReject(String),
    #[error("transition ({state},{symbol}) references state '{unknown}' not in Q")]
    UnknownTransitionState {
        state: String,
        symbol: char,
        unknown: String,
    },
    #[error("transition ({state},{symbol}) references symbol '{unknown}' not in Gamma")]
    UnknownTransitionSymbol {
        state: String,
        symbol: char,
        unknown: char,
    },
    #[error("input symbol '{0}' is not in Sigma")]
    InputSymbolOutsideAlphabet(char),
}

/// Represents the errors that can occur while loading or refusing to run a
/// machine. Once stepping begins no further error conditions exist; every
/// code path reaches an [`Outcome`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulatorError {
    /// The specification file is missing or unreadable.
    #[error("file error: {0}")]
    File(String),
    /// A line of the specification file does not match the required form.
    /// The payload carries the offending line's text.
    #[error("parse error: {0}")]
    Parse(String),
    /// The loaded specification failed one or more consistency checks.
    /// Execution is refused as long as this list is non-empty.
    #[error("specification has {} validation error(s)", .0.len())]
    Validation(Vec<ValidationError>),
}
