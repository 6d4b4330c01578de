use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::Agenda;
use super::AgendaContext;
use crate::containers::KeyedVec;
use crate::engine::propagation::Complexity;
use crate::engine::propagation::ConstraintId;

/// Filters the pending constraint with the lowest [`Complexity`] first. Among constraints of the
/// same complexity, the one scheduled earliest goes first.
#[derive(Clone, Debug, Default)]
pub struct ComplexityAgenda {
    queue: BinaryHeap<Reverse<Entry>>,
    scheduled_at: KeyedVec<ConstraintId, Option<u64>>,
    current: Option<ConstraintId>,
    /// Breaks ties between constraints scheduled at the same date.
    next_sequence_number: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    complexity: Complexity,
    date: u64,
    sequence_number: u64,
    constraint: ConstraintId,
}

impl Agenda for ComplexityAgenda {
    fn add(&mut self, context: &AgendaContext, constraint: ConstraintId) {
        if self.is_pending(constraint) || context.is_entailed(constraint) {
            return;
        }
        if self.current == Some(constraint) && context.is_idempotent(constraint) {
            return;
        }

        self.scheduled_at.accomodate(constraint, None);
        self.scheduled_at[constraint] = Some(context.date());

        self.queue.push(Reverse(Entry {
            complexity: context.complexity(constraint),
            date: context.date(),
            sequence_number: self.next_sequence_number,
            constraint,
        }));
        self.next_sequence_number += 1;
    }

    fn pop(&mut self, _context: &AgendaContext) -> Option<ConstraintId> {
        self.current = self.queue.pop().map(|Reverse(entry)| entry.constraint);

        if let Some(constraint) = self.current {
            self.scheduled_at[constraint] = None;
        }

        self.current
    }

    fn clear(&mut self) {
        for Reverse(entry) in self.queue.drain() {
            self.scheduled_at[entry.constraint] = None;
        }
        self.current = None;
    }

    fn currently_filtering(&self) -> Option<ConstraintId> {
        self.current
    }

    fn is_pending(&self, constraint: ConstraintId) -> bool {
        self.scheduled_at(constraint).is_some()
    }

    fn num_pending(&self) -> usize {
        self.queue.len()
    }

    fn scheduled_at(&self, constraint: ConstraintId) -> Option<u64> {
        self.scheduled_at.get(constraint).copied().flatten()
    }
}
