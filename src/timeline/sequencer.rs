//! Timed text sequencer for the intro scene.
//!
//! Steps display one at a time, each for its own configured duration. The
//! last entry is a designated empty-text sentinel: reaching it signals
//! completion instead of displaying anything. Dropping the sequencer with
//! its owning scene cancels any pending advance.

use std::time::{Duration, Instant};

/// One entry in the sequence: a line and how long it stays on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStep {
    pub text: String,
    pub display: Duration,
}

impl TextStep {
    pub fn new(text: impl Into<String>, display_ms: u64) -> Self {
        Self {
            text: text.into(),
            display: Duration::from_millis(display_ms),
        }
    }

    /// The designated completion marker.
    pub fn sentinel() -> Self {
        Self::new("", 0)
    }
}

/// Advances through [`TextStep`]s on their per-entry deadlines.
#[derive(Debug)]
pub struct TextSequencer {
    steps: Vec<TextStep>,
    index: usize,
    deadline: Option<Instant>,
    completed: bool,
}

impl TextSequencer {
    pub fn new(steps: Vec<TextStep>, now: Instant) -> Self {
        let deadline = steps
            .first()
            .filter(|step| !step.text.is_empty())
            .map(|step| now + step.display);
        Self {
            steps,
            index: 0,
            deadline,
            completed: false,
        }
    }

    /// The line currently on display, if any. `None` once the sentinel is
    /// reached.
    pub fn current_text(&self) -> Option<&str> {
        if self.completed {
            return None;
        }
        self.steps
            .get(self.index)
            .map(|step| step.text.as_str())
            .filter(|text| !text.is_empty())
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Drain every step whose deadline has passed. Returns `true` exactly
    /// once, on the update that reaches the sentinel.
    ///
    /// Each step's deadline is anchored to the previous step's deadline
    /// (not the tick that observed it), so per-entry durations add up
    /// exactly regardless of frame cadence.
    pub fn update(&mut self, now: Instant) -> bool {
        if self.completed {
            return false;
        }
        loop {
            match self.steps.get(self.index) {
                None => {
                    self.completed = true;
                    return true;
                }
                Some(step) if step.text.is_empty() => {
                    self.completed = true;
                    return true;
                }
                Some(_) => {
                    let Some(deadline) = self.deadline else {
                        return false;
                    };
                    if now < deadline {
                        return false;
                    }
                    self.index += 1;
                    self.deadline = self
                        .steps
                        .get(self.index)
                        .filter(|next| !next.text.is_empty())
                        .map(|next| deadline + next.display);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps() -> Vec<TextStep> {
        vec![
            TextStep::new("A", 4000),
            TextStep::new("B", 6500),
            TextStep::sentinel(),
        ]
    }

    #[test]
    fn displays_first_step_immediately() {
        let t0 = Instant::now();
        let seq = TextSequencer::new(steps(), t0);
        assert_eq!(seq.current_text(), Some("A"));
    }

    #[test]
    fn advances_on_per_entry_deadlines() {
        let t0 = Instant::now();
        let mut seq = TextSequencer::new(steps(), t0);

        assert!(!seq.update(t0 + Duration::from_millis(3999)));
        assert_eq!(seq.current_text(), Some("A"));

        assert!(!seq.update(t0 + Duration::from_millis(4000)));
        assert_eq!(seq.current_text(), Some("B"));

        // The outlier 6500ms entry holds until its own deadline.
        assert!(!seq.update(t0 + Duration::from_millis(10_499)));
        assert_eq!(seq.current_text(), Some("B"));
    }

    #[test]
    fn completes_exactly_once_at_the_sentinel() {
        let t0 = Instant::now();
        let mut seq = TextSequencer::new(steps(), t0);

        assert!(seq.update(t0 + Duration::from_millis(10_500)));
        assert!(seq.is_complete());
        assert_eq!(seq.current_text(), None);

        // No further signal, no further display.
        assert!(!seq.update(t0 + Duration::from_millis(60_000)));
        assert_eq!(seq.current_text(), None);
    }

    #[test]
    fn drains_multiple_elapsed_steps_in_one_update() {
        let t0 = Instant::now();
        let mut seq = TextSequencer::new(steps(), t0);
        // A tick that arrives long after both deadlines still completes.
        assert!(seq.update(t0 + Duration::from_secs(60)));
    }

    #[test]
    fn sentinel_only_list_completes_without_display() {
        let t0 = Instant::now();
        let mut seq = TextSequencer::new(vec![TextStep::sentinel()], t0);
        assert_eq!(seq.current_text(), None);
        assert!(seq.update(t0));
        assert!(!seq.update(t0));
    }
}
