//! This module renders `(tape, state, head)` snapshots in the canonical
//! `uqv` notation and decides which steps of a run are retained in the
//! trace.

/// Decides which step indices are kept in a trace.
///
/// Long-running machines would otherwise produce unbounded traces, so the
/// recorder keeps dense detail near the start, a checkpoint at every
/// interval boundary, and always the terminal step. The thresholds are a
/// memory/detail trade-off and deliberately caller-configurable, not a
/// hidden constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPolicy {
    /// Every step whose index is below this bound is retained.
    pub dense_limit: usize,
    /// Every step whose index is a positive multiple of this interval is
    /// retained. Zero disables checkpointing.
    pub checkpoint_interval: usize,
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self {
            dense_limit: 100,
            checkpoint_interval: 100,
        }
    }
}

impl SamplingPolicy {
    /// Whether the configuration reached at `step` should be kept.
    /// Terminal steps are always kept.
    pub fn retains(&self, step: usize, terminal: bool) -> bool {
        terminal
            || step < self.dense_limit
            || (self.checkpoint_interval > 0 && step % self.checkpoint_interval == 0)
    }
}

/// Collects the formatted configurations of one run, applying a
/// [`SamplingPolicy`]. The trace is append-only while the run is live and
/// handed out once, after the run completes.
#[derive(Debug)]
pub struct Recorder {
    policy: SamplingPolicy,
    configurations: Vec<String>,
}

impl Recorder {
    pub fn new(policy: SamplingPolicy) -> Self {
        Self {
            policy,
            configurations: Vec::new(),
        }
    }

    /// Appends a configuration unconditionally. Used for the initial
    /// snapshot and for terminal steps.
    pub fn record(&mut self, configuration: String) {
        self.configurations.push(configuration);
    }

    /// Appends the configuration produced by `configuration` if the policy
    /// retains `step`. The closure is only invoked for retained steps, so
    /// skipped steps cost no formatting work.
    pub fn record_step(
        &mut self,
        step: usize,
        terminal: bool,
        configuration: impl FnOnce() -> String,
    ) {
        if self.policy.retains(step, terminal) {
            self.configurations.push(configuration());
        }
    }

    /// Number of configurations captured so far.
    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    /// Consumes the recorder and yields the completed trace.
    pub fn into_trace(self) -> Vec<String> {
        self.configurations
    }
}

/// Formats a snapshot as `left + state + right` (`uqv` notation).
///
/// Trailing blank cells are trimmed from a copy of the tape down to a
/// minimum length of one; the left part is everything before the head, the
/// right part everything from the head on, defaulting to a single blank
/// when the head sits past the last retained cell. The rendering is
/// lossless up to trailing-blank equivalence.
pub fn format_configuration(cells: &[char], head: usize, state: &str, blank: char) -> String {
    let mut end = cells.len();
    while end > 1 && cells[end - 1] == blank {
        end -= 1;
    }
    let trimmed = &cells[..end];

    let cut = head.min(trimmed.len());
    let left: String = trimmed[..cut].iter().collect();
    let mut right: String = trimmed[cut..].iter().collect();
    if right.is_empty() {
        right.push(blank);
    }

    format!("{left}{state}{right}")
}
