//! This module reads the line-oriented specification format and produces a
//! populated [`Specification`] plus the run's input string. Loading never
//! validates; consistency checking is the caller's next step, via
//! [`crate::validator::validate`].
//!
//! The format: blank lines and `#` comments are ignored; recognized section
//! prefixes are `Q:`, `Sigma:`, `Gamma:`, `q0:`, `qaccept:`, `qreject:`,
//! `delta:` and `input:`. Set sections are comma-separated. The `delta:`
//! block holds one `(state,symbol)->(state',symbol',direction)` line per
//! transition and ends at the first subsequent line containing a colon but
//! no arrow. The `input:` line supplies the input string and ends parsing.

use crate::types::{Action, Direction, SimulatorError, Specification, TransitionKey, BLANK_SYMBOL};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

lazy_static::lazy_static! {
    static ref TRANSITION_RE: Regex = Regex::new(
        r"^\(\s*([^,()]+?)\s*,\s*([^,()]+?)\s*\)\s*->\s*\(\s*([^,()]+?)\s*,\s*([^,()]+?)\s*,\s*([^,()]+?)\s*\)$"
    )
    .unwrap();
}

/// A fully populated specification together with the input string its file
/// supplied for the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedMachine {
    pub spec: Specification,
    pub input: String,
}

/// `SpecLoader` reads machine description files from disk.
pub struct SpecLoader;

impl SpecLoader {
    /// Loads a machine description from `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(LoadedMachine)` if the file was read and parsed.
    /// * `Err(SimulatorError::File)` if the file is missing or unreadable.
    /// * `Err(SimulatorError::Parse)` if a line does not match the format.
    pub fn load(path: &Path) -> Result<LoadedMachine, SimulatorError> {
        let content = fs::read_to_string(path).map_err(|e| {
            SimulatorError::File(format!("failed to read {}: {}", path.display(), e))
        })?;

        parse(&content)
    }
}

/// Parses a machine description from string content. See the module docs
/// for the format.
pub fn parse(content: &str) -> Result<LoadedMachine, SimulatorError> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    let mut states: HashSet<String> = HashSet::new();
    let mut input_alphabet: HashSet<char> = HashSet::new();
    let mut tape_alphabet: HashSet<char> = HashSet::new();
    let mut transitions: HashMap<TransitionKey, Action> = HashMap::new();
    let mut initial_state = String::new();
    let mut accept_state = String::new();
    let mut reject_state = String::new();
    let mut input = String::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if let Some(rest) = line.strip_prefix("Q:") {
            states = rest
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        } else if let Some(rest) = line.strip_prefix("Sigma:") {
            input_alphabet = parse_symbol_set(rest)?;
        } else if let Some(rest) = line.strip_prefix("Gamma:") {
            tape_alphabet = parse_symbol_set(rest)?;
        } else if let Some(rest) = line.strip_prefix("q0:") {
            initial_state = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("qaccept:") {
            accept_state = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("qreject:") {
            reject_state = rest.trim().to_string();
        } else if line.starts_with("delta:") {
            i += 1;
            while i < lines.len() {
                // The block ends at the next section header: a line with a
                // colon but no arrow.
                if lines[i].contains(':') && !lines[i].contains("->") {
                    break;
                }
                parse_transition(lines[i], &mut transitions)?;
                i += 1;
            }
            continue;
        } else if let Some(rest) = line.strip_prefix("input:") {
            // The input line ends specification parsing.
            input = rest.trim().to_string();
            break;
        }

        i += 1;
    }

    Ok(LoadedMachine {
        spec: Specification {
            states,
            input_alphabet,
            tape_alphabet,
            transitions,
            initial_state,
            accept_state,
            reject_state,
            blank: BLANK_SYMBOL,
        },
        input,
    })
}

/// Parses a comma-separated symbol section. Each token must be exactly one
/// character; tape cells hold single symbols.
fn parse_symbol_set(section: &str) -> Result<HashSet<char>, SimulatorError> {
    section
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| parse_symbol(token, section))
        .collect()
}

fn parse_symbol(token: &str, context: &str) -> Result<char, SimulatorError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(SimulatorError::Parse(format!(
            "symbol '{token}' must be a single character in: {context}"
        ))),
    }
}

/// Parses one `(state,symbol)->(state',symbol',direction)` line into the
/// transition map. A second entry for the same `(state, symbol)` pair would
/// make the function non-deterministic and is refused.
fn parse_transition(
    line: &str,
    transitions: &mut HashMap<TransitionKey, Action>,
) -> Result<(), SimulatorError> {
    let caps = TRANSITION_RE
        .captures(line)
        .ok_or_else(|| SimulatorError::Parse(format!("malformed transition line: {line}")))?;

    let key = TransitionKey {
        state: caps[1].to_string(),
        symbol: parse_symbol(&caps[2], line)?,
    };
    let action = Action {
        state: caps[3].to_string(),
        write: parse_symbol(&caps[4], line)?,
        direction: parse_direction(&caps[5], line)?,
    };

    if transitions.insert(key, action).is_some() {
        return Err(SimulatorError::Parse(format!(
            "duplicate transition for the same (state, symbol) pair: {line}"
        )));
    }

    Ok(())
}

fn parse_direction(token: &str, line: &str) -> Result<Direction, SimulatorError> {
    match token {
        "L" => Ok(Direction::Left),
        "R" => Ok(Direction::Right),
        other => Err(SimulatorError::Parse(format!(
            "direction must be L or R, got '{other}' in: {line}"
        ))),
    }
}
