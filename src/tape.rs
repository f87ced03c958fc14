//! This module defines the `Tape` struct: a dynamically growable bidirectional
//! sequence of symbols with a head position, emulating the conceptually
//! infinite tape with implicit blank fill at both ends.

use crate::types::Direction;
use std::collections::VecDeque;

/// A single machine tape, exclusively owned by one run.
///
/// Cells live in a double-ended buffer so extension at either end is
/// amortized O(1). The head index is always within `[0, len)` immediately
/// before a read; the buffer grows by exactly one blank cell whenever the
/// head would otherwise leave the current bounds. The live tape never
/// shrinks during a run; trailing-blank trimming happens only on the
/// formatted snapshot, in [`crate::recorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<char>,
    head: usize,
    blank: char,
}

impl Tape {
    /// Seeds a tape from the input string, one cell per character, with the
    /// head on the first cell. An empty input yields a single blank cell.
    pub fn from_input(input: &str, blank: char) -> Self {
        let cells: VecDeque<char> = if input.is_empty() {
            VecDeque::from([blank])
        } else {
            input.chars().collect()
        };

        Self {
            cells,
            head: 0,
            blank,
        }
    }

    /// Appends one blank cell if the head sits at or beyond the current end,
    /// so that the head always addresses an existing cell.
    pub fn ensure_head_in_bounds(&mut self) {
        if self.head >= self.cells.len() {
            self.cells.push_back(self.blank);
        }
    }

    /// Reads the symbol under the head. A head past the end reads as blank.
    pub fn read(&self) -> char {
        self.cells.get(self.head).copied().unwrap_or(self.blank)
    }

    /// Writes `symbol` at the head position.
    pub fn write(&mut self, symbol: char) {
        self.ensure_head_in_bounds();
        self.cells[self.head] = symbol;
    }

    /// Moves the head one cell in `direction`, growing the tape by a single
    /// blank cell when the move would leave the current bounds. Moving left
    /// from cell 0 inserts at the front and keeps the head on the (new)
    /// first cell.
    pub fn shift(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if self.head == 0 {
                    self.cells.push_front(self.blank);
                } else {
                    self.head -= 1;
                }
            }
            Direction::Right => {
                self.head += 1;
                if self.head >= self.cells.len() {
                    self.cells.push_back(self.blank);
                }
            }
        }
    }

    /// Returns the current head index.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A tape always holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the blank symbol of this tape.
    pub fn blank(&self) -> char {
        self.blank
    }

    /// Copies the materialized cells into a contiguous buffer, for snapshot
    /// formatting. The live tape is untouched.
    pub fn snapshot(&self) -> Vec<char> {
        self.cells.iter().copied().collect()
    }
}
