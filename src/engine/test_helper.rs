#![cfg(test)]
//! This module exposes helpers that aid testing the engine. The [`TestEngine`] sets up specific
//! scenarios, and the constraints defined here exercise the parts of the constraint contract
//! that the engine relies on.
use std::collections::BTreeSet;

use enumset::EnumSet;

use super::agenda::AgendaContext;
use super::domains::DomainEvent;
use super::propagation::binary;
use super::propagation::unary;
use super::propagation::Complexity;
use super::propagation::Constraint;
use super::propagation::ConstraintId;
use super::propagation::DependencyContext;
use super::propagation::Network;
use super::propagation::ternary;
use super::propagation::PropagationContextMut;
use super::trail::Cells;
use super::trail::VariableId;
use super::PropagationEngine;
use crate::basic_types::PropagationStatusCP;
use crate::options::AgendaPolicy;
use crate::options::EngineOptions;
use crate::Problem;

/// A [`PropagationEngine`] with shorthands for setting up and checking test scenarios.
#[derive(Debug)]
pub(crate) struct TestEngine {
    pub(crate) engine: PropagationEngine,
}

impl Default for TestEngine {
    fn default() -> Self {
        TestEngine::with_policy(AgendaPolicy::default())
    }
}

#[allow(unused)]
impl TestEngine {
    pub(crate) fn with_policy(agenda: AgendaPolicy) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        TestEngine {
            engine: PropagationEngine::new(EngineOptions {
                agenda,
                ..Default::default()
            }),
        }
    }

    pub(crate) fn new_variable(&mut self, lower_bound: i32, upper_bound: i32) -> VariableId {
        self.engine.new_interval_variable(lower_bound, upper_bound)
    }

    pub(crate) fn new_sparse_variable(&mut self, values: &[i32]) -> VariableId {
        self.engine.new_sparse_variable(values.iter().copied())
    }

    pub(crate) fn new_boolean(&mut self) -> VariableId {
        self.engine.new_boolean_variable()
    }

    /// Load `constraints` as a single problem, panicking if it is inconsistent at the root.
    pub(crate) fn load(&mut self, constraints: impl IntoIterator<Item = Box<dyn Constraint>>) {
        let mut problem = Problem::new("test");
        for constraint in constraints {
            let _ = problem.post_boxed(constraint);
        }
        self.engine
            .load(problem)
            .expect("the test problem should be consistent at the root");
    }

    pub(crate) fn assert_bounds(&self, variable: VariableId, lower_bound: i32, upper_bound: i32) {
        let domain = self.engine.domain(variable);
        assert_eq!(
            (Some(lower_bound), Some(upper_bound)),
            (domain.min(), domain.max()),
            "the bounds of {variable} are {domain}",
        );
    }

    pub(crate) fn assert_fixed(&self, variable: VariableId, value: i32) {
        assert_eq!(
            Some(value),
            self.engine.domain(variable).assigned_value(),
            "{variable} has domain {}",
            self.engine.domain(variable)
        );
    }

    /// Open a checkpoint, assign `value` to `variable` and propagate.
    pub(crate) fn decide_and_propagate(
        &mut self,
        variable: VariableId,
        value: i32,
    ) -> PropagationStatusCP {
        let _ = self.engine.decide(variable, value)?;
        self.engine.propagate()
    }
}

/// Build a loaded [`Network`] over fresh cells without an engine, for testing agendas in
/// isolation. `num_variables` boolean variables are created.
pub(crate) fn build_network(
    num_variables: usize,
    constraints: Vec<Box<dyn Constraint>>,
) -> (Network, Cells) {
    let mut cells = Cells::default();
    for _ in 0..num_variables {
        let _ = cells.new_variable(crate::Domain::interval(0, 1));
    }

    let mut network = Network::default();
    for constraint in constraints {
        let _ = network.constraints.push(constraint);
        let _ = network.entailment.push(cells.new_trailed_integer(0));
    }

    for id in network.constraint_ids() {
        let mut context = DependencyContext::new(&mut network.watch_list, id);
        network.constraints[id].update_dependencies(&mut context);
    }

    (network, cells)
}

/// Mark `constraint` as entailed directly in `cells`.
pub(crate) fn entail(network: &Network, cells: &mut Cells, constraint: ConstraintId) {
    cells.write_integer(network.entailment[constraint], 1);
}

pub(crate) fn agenda_context<'a>(network: &'a Network, cells: &'a Cells) -> AgendaContext<'a> {
    AgendaContext::new(network, cells, 0)
}

/// A constraint which never narrows anything, with a configurable complexity and idempotence.
#[derive(Clone, Debug)]
pub(crate) struct Inert {
    pub(crate) variables: Vec<VariableId>,
    pub(crate) complexity: Complexity,
    pub(crate) idempotent: bool,
}

impl Inert {
    pub(crate) fn new(variables: &[VariableId]) -> Self {
        Inert {
            variables: variables.to_vec(),
            complexity: Complexity::default(),
            idempotent: false,
        }
    }

    pub(crate) fn with_complexity(mut self, complexity: u32) -> Self {
        self.complexity = Complexity(complexity);
        self
    }

    pub(crate) fn idempotent(mut self) -> Self {
        self.idempotent = true;
        self
    }
}

impl Constraint for Inert {
    fn name(&self) -> &str {
        "inert"
    }

    fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    fn complexity(&self) -> Complexity {
        self.complexity
    }

    fn is_idempotent(&self) -> bool {
        self.idempotent
    }

    fn filter(&self, _context: PropagationContextMut) -> PropagationStatusCP {
        Ok(())
    }
}

/// `c = a AND b` over boolean variables.
#[derive(Clone, Copy, Debug)]
pub(crate) struct And {
    variables: [VariableId; 3],
}

impl And {
    pub(crate) fn new(a: VariableId, b: VariableId, c: VariableId) -> Self {
        And {
            variables: ternary(a, b, c),
        }
    }
}

impl Constraint for And {
    fn name(&self) -> &str {
        "and"
    }

    fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    fn complexity(&self) -> Complexity {
        Complexity::CONSTANT
    }

    fn filter(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let [a, b, c] = self.variables;

        if context.assigned_value(a) == Some(0) || context.assigned_value(b) == Some(0) {
            let _ = context.set_value(c, 0)?;
            context.set_entailed();
            return Ok(());
        }

        if context.assigned_value(a) == Some(1) && context.assigned_value(b) == Some(1) {
            let _ = context.set_value(c, 1)?;
            context.set_entailed();
            return Ok(());
        }

        match context.assigned_value(c) {
            Some(1) => {
                let _ = context.set_value(a, 1)?;
                let _ = context.set_value(b, 1)?;
                context.set_entailed();
            }
            Some(0) if context.assigned_value(a) == Some(1) => {
                let _ = context.set_value(b, 0)?;
                context.set_entailed();
            }
            Some(0) if context.assigned_value(b) == Some(1) => {
                let _ = context.set_value(a, 0)?;
                context.set_entailed();
            }
            _ => {}
        }

        Ok(())
    }
}

/// `x <= y`, filtered on bounds only.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LessOrEqual {
    variables: [VariableId; 2],
}

impl LessOrEqual {
    pub(crate) fn new(x: VariableId, y: VariableId) -> Self {
        LessOrEqual {
            variables: binary(x, y),
        }
    }
}

impl Constraint for LessOrEqual {
    fn name(&self) -> &str {
        "less_or_equal"
    }

    fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    fn complexity(&self) -> Complexity {
        Complexity::CONSTANT
    }

    fn is_idempotent(&self) -> bool {
        true
    }

    fn update_dependencies(&self, context: &mut DependencyContext) {
        let [x, y] = self.variables;
        context.register(x, EnumSet::only(DomainEvent::LowerBound) | DomainEvent::Assign);
        context.register(y, EnumSet::only(DomainEvent::UpperBound) | DomainEvent::Assign);
    }

    fn filter(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let [x, y] = self.variables;

        if let Some(max) = context.max(y) {
            let _ = context.set_max(x, max)?;
        }
        if let Some(min) = context.min(x) {
            let _ = context.set_min(y, min)?;
        }

        if context.max(x) <= context.min(y) {
            context.set_entailed();
        }

        Ok(())
    }
}

/// `result = if condition { then_value } else { else_value }` for a boolean `condition`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ConstantSelector {
    variables: [VariableId; 2],
    then_value: i32,
    else_value: i32,
}

impl ConstantSelector {
    pub(crate) fn new(
        condition: VariableId,
        result: VariableId,
        then_value: i32,
        else_value: i32,
    ) -> Self {
        ConstantSelector {
            variables: binary(condition, result),
            then_value,
            else_value,
        }
    }
}

impl Constraint for ConstantSelector {
    fn name(&self) -> &str {
        "constant_selector"
    }

    fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    fn complexity(&self) -> Complexity {
        Complexity::CONSTANT
    }

    fn init(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let [_, result] = self.variables;
        let _ = context.set_min(result, self.then_value.min(self.else_value))?;
        let _ = context.set_max(result, self.then_value.max(self.else_value))?;
        Ok(())
    }

    fn filter(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let [condition, result] = self.variables;

        match context.assigned_value(condition) {
            Some(1) => {
                let _ = context.set_value(result, self.then_value)?;
                context.set_entailed();
            }
            Some(_) => {
                let _ = context.set_value(result, self.else_value)?;
                context.set_entailed();
            }
            None => {
                if !context.contains(result, self.then_value) {
                    let _ = context.set_value(condition, 0)?;
                } else if !context.contains(result, self.else_value) {
                    let _ = context.set_value(condition, 1)?;
                }
            }
        }

        Ok(())
    }
}

/// Forbids a single value, reporting a conflict itself instead of emptying the domain.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NotEqualConstant {
    variables: [VariableId; 1],
    value: i32,
}

impl NotEqualConstant {
    pub(crate) fn new(x: VariableId, value: i32) -> Self {
        NotEqualConstant {
            variables: unary(x),
            value,
        }
    }
}

impl Constraint for NotEqualConstant {
    fn name(&self) -> &str {
        "not_equal_constant"
    }

    fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    fn is_idempotent(&self) -> bool {
        true
    }

    fn filter(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let [x] = self.variables;

        if context.assigned_value(x) == Some(self.value) {
            return Err(context.conflict());
        }

        let _ = context.remove_value(x, self.value)?;
        if !context.contains(x, self.value) {
            context.set_entailed();
        }

        Ok(())
    }
}

/// When the boolean `condition` is true, the set variable is fixed to `value`.
pub(crate) struct ImpliesSetValue {
    variables: [VariableId; 2],
    value: BTreeSet<i32>,
}

impl ImpliesSetValue {
    pub(crate) fn new(
        condition: VariableId,
        set: VariableId,
        value: impl IntoIterator<Item = i32>,
    ) -> Self {
        ImpliesSetValue {
            variables: binary(condition, set),
            value: value.into_iter().collect(),
        }
    }
}

impl Constraint for ImpliesSetValue {
    fn name(&self) -> &str {
        "implies_set_value"
    }

    fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    fn filter(&self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let [condition, set] = self.variables;

        match context.assigned_value(condition) {
            Some(1) => {
                let _ = context.set_set_value(set, &self.value)?;
                context.set_entailed();
            }
            Some(_) => context.set_entailed(),
            None => {}
        }

        Ok(())
    }
}
