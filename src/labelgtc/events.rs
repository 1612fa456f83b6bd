//! Structured diagnostics of the correction pipeline.
//!
//! The pipeline reports what it does as [Event]s to an [EventSink] owned by
//! [LabelGtc](crate::labelgtc::LabelGtc). The default [TracingSink] forwards
//! them to `tracing`; [RecordingSink] keeps them for later inspection.

use crate::labelgtc::classifier::Strategy;
use tracing::{debug, info, warn};

/// Something the pipeline did, in the order it happened.
///
/// `depth` is the recursion depth of the instance (0 for the caller's instance).
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Processing of an instance started.
    InstanceStarted {
        depth: usize,
        leaves: usize,
        covering: usize,
    },
    /// Coverage statuses were assigned by the covering-set validation.
    CoverageLabelled {
        depth: usize,
        matched: usize,
        exact: usize,
    },
    /// The classifier chose a strategy.
    StrategySelected { depth: usize, strategy: Strategy },
    /// A trusted subtree was extracted to be solved as its own instance.
    SubproblemExtracted { depth: usize, leaves: usize },
    /// The remaining frontier subtrees were contracted to placeholders.
    SkeletonContracted {
        depth: usize,
        placeholders: usize,
        leaves: usize,
    },
    /// Resolved subtrees were spliced back into the skeleton.
    TreeRebuilt {
        depth: usize,
        leaves: usize,
        candidates: usize,
    },
    /// The chosen strategy is detected but has no implementation.
    StrategyUnavailable { depth: usize, strategy: Strategy },
}

/// Observer receiving the pipeline's [Event]s.
pub trait EventSink {
    /// Called once per event, in pipeline order.
    fn event(&mut self, event: &Event);
}

/// Sink logging every event with `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn event(&mut self, event: &Event) {
        match *event {
            Event::InstanceStarted {
                depth,
                leaves,
                covering,
            } => info!(depth, leaves, covering, "Instance started"),
            Event::CoverageLabelled {
                depth,
                matched,
                exact,
            } => debug!(depth, matched, exact, "Covering set validated"),
            Event::StrategySelected { depth, strategy } => {
                info!(depth, strategy = %strategy, "Strategy selected")
            }
            Event::SubproblemExtracted { depth, leaves } => {
                debug!(depth, leaves, "Subproblem extracted")
            }
            Event::SkeletonContracted {
                depth,
                placeholders,
                leaves,
            } => debug!(depth, placeholders, leaves, "Skeleton contracted"),
            Event::TreeRebuilt {
                depth,
                leaves,
                candidates,
            } => info!(depth, leaves, candidates, "Tree rebuilt"),
            Event::StrategyUnavailable { depth, strategy } => {
                warn!(depth, strategy = %strategy, "Strategy detected but not implemented")
            }
        }
    }
}

/// Sink collecting all events.
///
/// # Example
/// ```
/// use labelgtc::labelgtc::{Event, EventSink, RecordingSink};
///
/// let mut sink = RecordingSink::new();
/// sink.event(&Event::SubproblemExtracted { depth: 0, leaves: 4 });
/// assert_eq!(sink.events().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<Event>,
}

impl RecordingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the events received so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consumes the sink, returning the received events.
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl EventSink for RecordingSink {
    fn event(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}
