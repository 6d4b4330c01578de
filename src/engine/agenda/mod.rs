//! The agenda decides which pending constraint is filtered next.
//!
//! Three policies are available, see [`AgendaPolicy`]. All of them ignore a request to schedule a
//! constraint which is already pending, and skip entailed constraints and the idempotent
//! constraint that is currently filtering when scheduling the dependents of a variable.
mod agenda;
mod agenda_context;
mod complexity_agenda;
mod lazy_complexity_agenda;
mod stack_agenda;

pub use agenda::*;
pub use agenda_context::*;
pub use complexity_agenda::*;
pub use lazy_complexity_agenda::*;
pub use stack_agenda::*;

pub use crate::options::AgendaPolicy;

/// Create an empty agenda following `policy`.
pub fn create_agenda(policy: AgendaPolicy) -> Box<dyn Agenda> {
    match policy {
        AgendaPolicy::Stack => Box::<StackAgenda>::default(),
        AgendaPolicy::Complexity => Box::<ComplexityAgenda>::default(),
        AgendaPolicy::LazyComplexity => Box::<LazyComplexityAgenda>::default(),
    }
}
