use enumset::EnumSet;

use super::Agenda;
use super::AgendaContext;
use super::ComplexityAgenda;
use crate::containers::HashMap;
use crate::engine::domains::DomainEvent;
use crate::engine::propagation::ConstraintId;
use crate::engine::trail::VariableId;

/// A [`ComplexityAgenda`] which, while a constraint is filtering, holds back the events on that
/// constraint's own variables. The accumulated events are turned into scheduling when the
/// constraint finishes or the next constraint is popped, so many small narrowings of one filter
/// call wake each dependent only once.
#[derive(Clone, Debug, Default)]
pub struct LazyComplexityAgenda {
    inner: ComplexityAgenda,
    deferred: HashMap<VariableId, EnumSet<DomainEvent>>,
    /// The variables in `deferred`, in the order their first event arrived.
    deferred_order: Vec<VariableId>,
}

impl LazyComplexityAgenda {
    /// The number of variables with events that have not been scheduled yet.
    pub fn num_deferred(&self) -> usize {
        self.deferred_order.len()
    }

    fn flush(&mut self, context: &AgendaContext) {
        for variable in std::mem::take(&mut self.deferred_order) {
            if let Some(events) = self.deferred.remove(&variable) {
                let mut dependents = context.dependents(variable, events);
                self.inner.add_all(context, &mut dependents);
            }
        }
    }
}

impl Agenda for LazyComplexityAgenda {
    fn add(&mut self, context: &AgendaContext, constraint: ConstraintId) {
        self.inner.add(context, constraint);
    }

    fn pop(&mut self, context: &AgendaContext) -> Option<ConstraintId> {
        self.flush(context);
        self.inner.pop(context)
    }

    fn clear(&mut self) {
        self.deferred.clear();
        self.deferred_order.clear();
        self.inner.clear();
    }

    fn update(&mut self, context: &AgendaContext, variable: VariableId, events: EnumSet<DomainEvent>) {
        match self.inner.currently_filtering() {
            Some(current) if context.constrains(current, variable) => {
                let accumulated = self.deferred.entry(variable).or_insert_with(|| {
                    self.deferred_order.push(variable);
                    EnumSet::empty()
                });
                *accumulated |= events;
            }
            _ => {
                let mut dependents = context.dependents(variable, events);
                self.inner.add_all(context, &mut dependents);
            }
        }
    }

    fn filtering_finished(&mut self, context: &AgendaContext) {
        self.flush(context);
    }

    fn currently_filtering(&self) -> Option<ConstraintId> {
        self.inner.currently_filtering()
    }

    fn is_pending(&self, constraint: ConstraintId) -> bool {
        self.inner.is_pending(constraint)
    }

    fn num_pending(&self) -> usize {
        self.inner.num_pending()
    }

    /// Deferred events keep the agenda non-empty, as flushing them may still schedule constraints.
    fn is_empty(&self) -> bool {
        self.inner.is_empty() && self.deferred_order.is_empty()
    }

    fn scheduled_at(&self, constraint: ConstraintId) -> Option<u64> {
        self.inner.scheduled_at(constraint)
    }
}
