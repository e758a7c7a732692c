//! Per-item outcomes and batch summaries.

use codetabs_host::{BlockId, HostError};
use codetabs_syntax::{Level, Notifier};

/// Which way a batch converts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Code blocks to tabs widgets.
    ToTabs,
    /// Tabs widgets to code blocks.
    ToCode,
}

/// Why a candidate was rejected before any host write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidReason {
    /// The block has no identifier.
    MissingId,
    /// The block has no text or no readable tab data.
    MissingPayload,
}

/// Why a candidate was left alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The text is not tab syntax at all.
    NotTabSyntax,
    /// The text looks like tab syntax but does not parse.
    InvalidSyntax,
}

/// Final state of one batch item.
#[derive(Debug)]
pub enum Outcome {
    /// All host writes for the block succeeded.
    Applied(BlockId),
    /// A host call failed.
    Failed { block: BlockId, error: HostError },
    /// The candidate could not be converted.
    Invalid {
        block: Option<BlockId>,
        reason: InvalidReason,
    },
    /// The candidate was not a conversion target.
    Skipped {
        block: Option<BlockId>,
        reason: SkipReason,
    },
}

/// Counts per outcome bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub success: usize,
    pub failure: usize,
    pub invalid: usize,
    pub skipped: usize,
}

impl Summary {
    /// User-facing messages: one per non-zero bucket, plus "nothing to
    /// convert" when nothing was attempted.
    #[must_use]
    pub fn messages(&self, direction: Direction) -> Vec<(Level, String)> {
        let target = match direction {
            Direction::ToTabs => "tabs",
            Direction::ToCode => "code blocks",
        };
        let mut messages = Vec::new();

        if self.success > 0 {
            messages.push((
                Level::Info,
                format!("Converted {} block(s) to {target}", self.success),
            ));
        }
        if self.failure > 0 {
            messages.push((
                Level::Error,
                format!("Failed to convert {} block(s)", self.failure),
            ));
        }
        if self.invalid > 0 {
            messages.push((
                Level::Warning,
                format!("Ignored {} invalid block(s)", self.invalid),
            ));
        }
        if self.skipped > 0 {
            messages.push((
                Level::Info,
                format!("Skipped {} block(s) without tab syntax", self.skipped),
            ));
        }
        if self.success == 0 && self.failure == 0 {
            messages.push((Level::Info, "Nothing to convert".to_owned()));
        }

        messages
    }
}

/// Outcomes of one batch, in the order the blocks were given.
#[derive(Debug)]
pub struct BatchReport {
    pub direction: Direction,
    pub outcomes: Vec<Outcome>,
}

impl BatchReport {
    /// Count outcomes per bucket.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for outcome in &self.outcomes {
            match outcome {
                Outcome::Applied(_) => summary.success += 1,
                Outcome::Failed { .. } => summary.failure += 1,
                Outcome::Invalid { .. } => summary.invalid += 1,
                Outcome::Skipped { .. } => summary.skipped += 1,
            }
        }
        summary
    }

    /// Blocks that were converted.
    pub fn applied(&self) -> impl Iterator<Item = &BlockId> {
        self.outcomes.iter().filter_map(|o| match o {
            Outcome::Applied(id) => Some(id),
            _ => None,
        })
    }

    /// Host failures with the block they happened on.
    pub fn failures(&self) -> impl Iterator<Item = (&BlockId, &HostError)> {
        self.outcomes.iter().filter_map(|o| match o {
            Outcome::Failed { block, error } => Some((block, error)),
            _ => None,
        })
    }

    /// Send the summary messages to `notifier`.
    pub fn notify(&self, notifier: &dyn Notifier) {
        for (level, message) in self.summary().messages(self.direction) {
            notifier.notify(level, &message);
        }
    }
}
