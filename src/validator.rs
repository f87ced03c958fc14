//! This module checks a loaded [`Specification`] for consistency before any
//! execution begins. All checks are evaluated independently and every
//! violation is collected; an empty error list is the sole precondition for
//! handing the specification to the execution engine.

use crate::types::{Specification, ValidationError};
use std::collections::HashSet;

/// Runs every consistency check over `spec` and returns the accumulated
/// violations. Never fails: a malformed specification is the expected
/// output, not an error of the validator itself.
///
/// The checks cover the seven categories of the 7-tuple definition:
/// non-empty sets, blank membership in Gamma, Sigma as a subset of Gamma,
/// blank absence from Sigma, special-state membership, distinct accept and
/// reject states, and transition entries referencing only known states and
/// symbols. Direction validity is enforced structurally by the
/// [`crate::types::Direction`] enum at parse time.
pub fn validate(spec: &Specification) -> Vec<ValidationError> {
    [
        check_non_empty_sets,
        check_blank_membership,
        check_alphabet_containment,
        check_special_states,
        check_transitions,
    ]
    .iter()
    .flat_map(|check| check(spec))
    .collect()
}

/// Checks every character of `input` against the input alphabet, one error
/// per distinct offending symbol.
///
/// The engine itself never inspects the input; callers run this alongside
/// [`validate`] to refuse inputs the machine was not defined over.
pub fn check_input(spec: &Specification, input: &str) -> Vec<ValidationError> {
    let mut seen = HashSet::new();

    input
        .chars()
        .filter(|c| !spec.input_alphabet.contains(c) && seen.insert(*c))
        .map(ValidationError::InputSymbolOutsideAlphabet)
        .collect()
}

fn check_non_empty_sets(spec: &Specification) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if spec.states.is_empty() {
        errors.push(ValidationError::EmptyStates);
    }
    if spec.input_alphabet.is_empty() {
        errors.push(ValidationError::EmptyInputAlphabet);
    }
    if spec.tape_alphabet.is_empty() {
        errors.push(ValidationError::EmptyTapeAlphabet);
    }

    errors
}

fn check_blank_membership(spec: &Specification) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !spec.tape_alphabet.contains(&spec.blank) {
        errors.push(ValidationError::BlankNotInTapeAlphabet(spec.blank));
    }
    if spec.input_alphabet.contains(&spec.blank) {
        errors.push(ValidationError::BlankInInputAlphabet(spec.blank));
    }

    errors
}

fn check_alphabet_containment(spec: &Specification) -> Vec<ValidationError> {
    let mut missing: Vec<char> = spec
        .input_alphabet
        .difference(&spec.tape_alphabet)
        .copied()
        .collect();

    if missing.is_empty() {
        return Vec::new();
    }

    // Sort for deterministic error output
    missing.sort_unstable();
    vec![ValidationError::InputNotSubsetOfTape(missing)]
}

fn check_special_states(spec: &Specification) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !spec.states.contains(&spec.initial_state) {
        errors.push(ValidationError::UnknownInitialState(
            spec.initial_state.clone(),
        ));
    }
    if !spec.states.contains(&spec.accept_state) {
        errors.push(ValidationError::UnknownAcceptState(
            spec.accept_state.clone(),
        ));
    }
    if !spec.states.contains(&spec.reject_state) {
        errors.push(ValidationError::UnknownRejectState(
            spec.reject_state.clone(),
        ));
    }
    if spec.accept_state == spec.reject_state {
        errors.push(ValidationError::AcceptEqualsReject(
            spec.accept_state.clone(),
        ));
    }

    errors
}

fn check_transitions(spec: &Specification) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Sort entries so the error list is deterministic across runs.
    let mut entries: Vec<_> = spec.transitions.iter().collect();
    entries.sort_by(|(a, _), (b, _)| (&a.state, a.symbol).cmp(&(&b.state, b.symbol)));

    for (key, action) in entries {
        if !spec.states.contains(&key.state) {
            errors.push(ValidationError::UnknownTransitionState {
                state: key.state.clone(),
                symbol: key.symbol,
                unknown: key.state.clone(),
            });
        }
        if !spec.tape_alphabet.contains(&key.symbol) {
            errors.push(ValidationError::UnknownTransitionSymbol {
                state: key.state.clone(),
                symbol: key.symbol,
                unknown: key.symbol,
            });
        }
        if !spec.states.contains(&action.state) {
            errors.push(ValidationError::UnknownTransitionState {
                state: key.state.clone(),
                symbol: key.symbol,
                unknown: action.state.clone(),
            });
        }
        if !spec.tape_alphabet.contains(&action.write) {
            errors.push(ValidationError::UnknownTransitionSymbol {
                state: key.state.clone(),
                symbol: key.symbol,
                unknown: action.write,
            });
        }
    }

    errors
}
