//! Event log of a single run

use crate::core::types::Position;
use crate::planning::TargetReason;

use super::metrics::Outcome;

/// Something that happened during a run, stamped with the step count
#[derive(Debug, Clone, PartialEq)]
pub struct SimEvent {
    pub step: u32,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    TargetChosen { target: Position, reason: TargetReason },
    PackagePicked { at: Position, cargo: u32 },
    Delivered { at: Position, cargo: u32 },
    Recharged { at: Position, battery: i32 },
    Terminated { outcome: Outcome },
}

/// Append-only list of events in the order they occurred
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: Vec<SimEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: u32, kind: EventKind) {
        self.events.push(SimEvent { step, kind });
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&SimEvent> {
        self.events.last()
    }

    /// Targets in the order the selector chose them
    pub fn targets(&self) -> impl Iterator<Item = (Position, TargetReason)> + '_ {
        self.events.iter().filter_map(|e| match e.kind {
            EventKind::TargetChosen { target, reason } => Some((target, reason)),
            _ => None,
        })
    }

    pub fn count_pickups(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, EventKind::PackagePicked { .. }))
            .count()
    }

    pub fn count_recharges(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Recharged { .. }))
            .count()
    }
}
