#![cfg(test)]
use enumset::EnumSet;

use crate::containers::StorageKey;
use crate::engine::agenda::create_agenda;
use crate::engine::agenda::Agenda;
use crate::engine::agenda::ComplexityAgenda;
use crate::engine::agenda::LazyComplexityAgenda;
use crate::engine::agenda::StackAgenda;
use crate::engine::test_helper::agenda_context;
use crate::engine::test_helper::build_network;
use crate::engine::test_helper::entail;
use crate::engine::test_helper::Inert;
use crate::AgendaPolicy;
use crate::Constraint;
use crate::ConstraintId;
use crate::DomainEvent;
use crate::VariableId;

fn variable(index: usize) -> VariableId {
    VariableId::create_from_index(index)
}

fn constraint(index: usize) -> ConstraintId {
    ConstraintId::create_from_index(index)
}

const ALL_POLICIES: [AgendaPolicy; 3] = [
    AgendaPolicy::Stack,
    AgendaPolicy::Complexity,
    AgendaPolicy::LazyComplexity,
];

#[test]
fn idempotent_constraint_is_not_rescheduled_by_its_own_narrowing() {
    for policy in ALL_POLICIES {
        let (network, cells) = build_network(
            1,
            vec![
                Box::new(Inert::new(&[variable(0)]).idempotent()),
                Box::new(Inert::new(&[variable(0)])),
            ],
        );
        let context = agenda_context(&network, &cells);
        let mut agenda = create_agenda(policy);

        agenda.add(&context, constraint(0));
        assert_eq!(Some(constraint(0)), agenda.pop(&context));

        let mut both = [constraint(0), constraint(1)].into_iter();
        agenda.add_all(&context, &mut both);

        assert_eq!(1, agenda.num_pending(), "{policy}");
        assert!(!agenda.is_pending(constraint(0)), "{policy}");
        assert!(agenda.is_pending(constraint(1)), "{policy}");
    }
}

#[test]
fn non_idempotent_constraint_is_rescheduled_by_its_own_narrowing() {
    let (network, cells) = build_network(1, vec![Box::new(Inert::new(&[variable(0)]))]);
    let context = agenda_context(&network, &cells);
    let mut agenda = ComplexityAgenda::default();

    agenda.add(&context, constraint(0));
    let _ = agenda.pop(&context);
    agenda.add(&context, constraint(0));

    assert_eq!(1, agenda.num_pending());
}

#[test]
fn complexity_agenda_ignores_the_filtering_idempotent_constraint() {
    let (network, cells) = build_network(1, vec![Box::new(Inert::new(&[variable(0)]).idempotent())]);
    let context = agenda_context(&network, &cells);
    let mut agenda = ComplexityAgenda::default();

    agenda.add(&context, constraint(0));
    let _ = agenda.pop(&context);
    agenda.add(&context, constraint(0));

    assert_eq!(0, agenda.num_pending());
    assert_eq!(Some(constraint(0)), agenda.currently_filtering());
}

#[test]
fn entailed_constraints_are_not_scheduled() {
    for policy in ALL_POLICIES {
        let (network, mut cells) = build_network(1, vec![Box::new(Inert::new(&[variable(0)]))]);
        entail(&network, &mut cells, constraint(0));
        let context = agenda_context(&network, &cells);
        let mut agenda = create_agenda(policy);

        agenda.update(&context, variable(0), EnumSet::only(DomainEvent::Removal));

        assert_eq!(0, agenda.num_pending(), "{policy}");
        assert!(agenda.is_empty(), "{policy}");
    }
}

#[test]
fn complexity_agenda_adds_no_entailed_constraint() {
    let (network, mut cells) = build_network(1, vec![Box::new(Inert::new(&[variable(0)]))]);
    entail(&network, &mut cells, constraint(0));
    let context = agenda_context(&network, &cells);
    let mut agenda = ComplexityAgenda::default();

    agenda.add(&context, constraint(0));

    assert_eq!(0, agenda.num_pending());
}

#[test]
fn cheapest_constraint_is_popped_first() {
    for policy in [AgendaPolicy::Complexity, AgendaPolicy::LazyComplexity] {
        let (network, cells) = build_network(
            1,
            vec![
                Box::new(Inert::new(&[variable(0)]).with_complexity(5)),
                Box::new(Inert::new(&[variable(0)]).with_complexity(1)),
                Box::new(Inert::new(&[variable(0)]).with_complexity(3)),
            ],
        );
        let context = agenda_context(&network, &cells);
        let mut agenda = create_agenda(policy);

        for index in 0..3 {
            agenda.add(&context, constraint(index));
        }

        let complexities: Vec<u32> = std::iter::from_fn(|| agenda.pop(&context))
            .map(|id| context.complexity(id).0)
            .collect();

        assert_eq!(vec![1, 3, 5], complexities, "{policy}");
    }
}

#[test]
fn equal_complexities_are_popped_in_scheduling_order() {
    let (network, cells) = build_network(
        1,
        (0..4)
            .map(|_| Box::new(Inert::new(&[variable(0)])) as Box<dyn Constraint>)
            .collect(),
    );
    let context = agenda_context(&network, &cells);
    let mut agenda = ComplexityAgenda::default();

    for index in [2, 0, 3, 1] {
        agenda.add(&context, constraint(index));
    }

    let order: Vec<_> = std::iter::from_fn(|| agenda.pop(&context)).collect();
    assert_eq!(
        vec![constraint(2), constraint(0), constraint(3), constraint(1)],
        order
    );
}

#[test]
fn stack_agenda_pops_the_last_scheduled_constraint_first() {
    let (network, cells) = build_network(
        1,
        (0..3)
            .map(|_| Box::new(Inert::new(&[variable(0)])) as Box<dyn Constraint>)
            .collect(),
    );
    let context = agenda_context(&network, &cells);
    let mut agenda = StackAgenda::default();

    agenda.add(&context, constraint(0));
    agenda.add(&context, constraint(1));
    agenda.add(&context, constraint(0));
    agenda.add(&context, constraint(2));

    assert_eq!(3, agenda.num_pending());
    assert_eq!(Some(0), agenda.scheduled_at(constraint(1)));

    assert_eq!(Some(constraint(2)), agenda.pop(&context));
    assert_eq!(Some(constraint(1)), agenda.pop(&context));
    assert_eq!(None, agenda.scheduled_at(constraint(1)));
    assert_eq!(Some(constraint(0)), agenda.pop(&context));
    assert_eq!(None, agenda.pop(&context));
}

#[test]
fn popping_an_empty_agenda_forgets_the_filtering_constraint() {
    for policy in ALL_POLICIES {
        let (network, cells) = build_network(1, vec![Box::new(Inert::new(&[variable(0)]))]);
        let context = agenda_context(&network, &cells);
        let mut agenda = create_agenda(policy);

        agenda.add(&context, constraint(0));
        let _ = agenda.pop(&context);
        assert_eq!(Some(constraint(0)), agenda.currently_filtering());

        assert_eq!(None, agenda.pop(&context));
        assert_eq!(None, agenda.currently_filtering(), "{policy}");
    }
}

#[test]
fn clearing_drops_pending_constraints_and_the_filtering_marker() {
    for policy in ALL_POLICIES {
        let (network, cells) = build_network(
            1,
            vec![
                Box::new(Inert::new(&[variable(0)])),
                Box::new(Inert::new(&[variable(0)])),
            ],
        );
        let context = agenda_context(&network, &cells);
        let mut agenda = create_agenda(policy);

        agenda.add(&context, constraint(0));
        agenda.add(&context, constraint(1));
        let _ = agenda.pop(&context);

        agenda.clear();

        assert!(agenda.is_empty(), "{policy}");
        assert_eq!(None, agenda.currently_filtering(), "{policy}");
        assert!(!agenda.is_pending(constraint(0)), "{policy}");
        assert!(!agenda.is_pending(constraint(1)), "{policy}");

        agenda.add(&context, constraint(1));
        assert_eq!(Some(constraint(1)), agenda.pop(&context), "{policy}");
    }
}

#[test]
fn lazy_agenda_coalesces_events_on_the_variables_of_the_filtering_constraint() {
    let (x, y) = (variable(0), variable(1));
    let (network, cells) = build_network(
        2,
        vec![
            Box::new(Inert::new(&[x])),
            Box::new(Inert::new(&[x, y])),
            Box::new(Inert::new(&[y])),
        ],
    );
    let context = agenda_context(&network, &cells);
    let mut agenda = LazyComplexityAgenda::default();

    agenda.add(&context, constraint(0));
    assert_eq!(Some(constraint(0)), agenda.pop(&context));

    agenda.update(&context, x, EnumSet::only(DomainEvent::LowerBound));
    agenda.update(&context, x, DomainEvent::UpperBound | DomainEvent::Removal);
    assert_eq!(0, agenda.num_pending());
    assert_eq!(1, agenda.num_deferred());
    assert!(!agenda.is_empty());

    // `y` is not a variable of the filtering constraint, so its dependents are scheduled at once.
    agenda.update(&context, y, EnumSet::only(DomainEvent::Removal));
    assert_eq!(2, agenda.num_pending());

    agenda.filtering_finished(&context);
    assert_eq!(0, agenda.num_deferred());
    assert_eq!(3, agenda.num_pending());
    assert!(agenda.is_pending(constraint(0)));
}

#[test]
fn lazy_agenda_flushes_before_popping_the_next_constraint() {
    let x = variable(0);
    let (network, cells) = build_network(
        1,
        vec![Box::new(Inert::new(&[x])), Box::new(Inert::new(&[x]))],
    );
    let context = agenda_context(&network, &cells);
    let mut agenda = LazyComplexityAgenda::default();

    agenda.add(&context, constraint(0));
    let _ = agenda.pop(&context);
    agenda.update(&context, x, EnumSet::only(DomainEvent::Removal));
    assert_eq!(0, agenda.num_pending());

    assert_eq!(Some(constraint(0)), agenda.pop(&context));
    assert_eq!(Some(constraint(1)), agenda.pop(&context));
    assert_eq!(None, agenda.pop(&context));
}

#[test]
fn clearing_the_lazy_agenda_discards_deferred_events() {
    let x = variable(0);
    let (network, cells) = build_network(
        1,
        vec![Box::new(Inert::new(&[x])), Box::new(Inert::new(&[x]))],
    );
    let context = agenda_context(&network, &cells);
    let mut agenda = LazyComplexityAgenda::default();

    agenda.add(&context, constraint(0));
    let _ = agenda.pop(&context);
    agenda.update(&context, x, EnumSet::only(DomainEvent::Removal));
    assert_eq!(1, agenda.num_deferred());

    agenda.clear();

    assert_eq!(0, agenda.num_deferred());
    assert_eq!(None, agenda.currently_filtering());
    assert_eq!(None, agenda.pop(&context));
}

#[test]
fn events_only_wake_constraints_watching_them() {
    use crate::engine::test_helper::LessOrEqual;

    let (x, y) = (variable(0), variable(1));
    let (network, cells) = build_network(2, vec![Box::new(LessOrEqual::new(x, y))]);
    let context = agenda_context(&network, &cells);
    let mut agenda = ComplexityAgenda::default();

    agenda.update(&context, x, EnumSet::only(DomainEvent::UpperBound));
    agenda.update(&context, y, EnumSet::only(DomainEvent::LowerBound));
    assert_eq!(0, agenda.num_pending());

    agenda.update(&context, x, EnumSet::only(DomainEvent::LowerBound));
    assert_eq!(1, agenda.num_pending());
}
