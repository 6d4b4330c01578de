use super::Agenda;
use super::AgendaContext;
use crate::containers::KeyedVec;
use crate::engine::propagation::ConstraintId;

/// Filters the most recently scheduled constraint first.
#[derive(Clone, Debug, Default)]
pub struct StackAgenda {
    stack: Vec<ConstraintId>,
    /// The date at which each pending constraint was scheduled, `None` if it is not pending.
    scheduled_at: KeyedVec<ConstraintId, Option<u64>>,
    current: Option<ConstraintId>,
}

impl Agenda for StackAgenda {
    fn add(&mut self, context: &AgendaContext, constraint: ConstraintId) {
        if self.is_pending(constraint) {
            return;
        }

        self.scheduled_at.accomodate(constraint, None);
        self.scheduled_at[constraint] = Some(context.date());
        self.stack.push(constraint);
    }

    fn pop(&mut self, _context: &AgendaContext) -> Option<ConstraintId> {
        self.current = self.stack.pop();

        if let Some(constraint) = self.current {
            self.scheduled_at[constraint] = None;
        }

        self.current
    }

    fn clear(&mut self) {
        for constraint in self.stack.drain(..) {
            self.scheduled_at[constraint] = None;
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
        self.stack.len()
    }

    fn scheduled_at(&self, constraint: ConstraintId) -> Option<u64> {
        self.scheduled_at.get(constraint).copied().flatten()
    }
}
