use std::collections::BTreeSet;

use enumset::EnumSet;
use log::debug;
use log::trace;
use log::warn;

use crate::basic_types::EngineError;
use crate::basic_types::NarrowingResult;
use crate::basic_types::PropagationStatusCP;
use crate::engine::agenda::create_agenda;
use crate::engine::agenda::Agenda;
use crate::engine::agenda::AgendaContext;
use crate::engine::domains::Domain;
use crate::engine::domains::DomainEvent;
use crate::engine::domains::DomainEvents;
use crate::engine::problem::Problem;
use crate::engine::propagation::narrow;
use crate::engine::propagation::ConstraintId;
use crate::engine::propagation::DependencyContext;
use crate::engine::propagation::Network;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::trail::Cells;
use crate::engine::trail::ChoicePointStack;
use crate::engine::trail::VariableId;
use crate::options::EngineOptions;
use crate::print_quince_assert_warning_message;
use crate::quince_assert_advanced;
use crate::quince_assert_eq_simple;
use crate::quince_assert_moderate;
use crate::quince_assert_simple;
use crate::statistics::log_statistic;
use crate::statistics::log_statistic_postfix;
use crate::statistics::should_log_statistics;

/// The incremental propagation engine.
///
/// It owns the variables, the trail and the agenda of a single search. A search layer on top of
/// the engine drives it as follows:
/// 1. create the variables and [`PropagationEngine::load`] a [`Problem`];
/// 2. make a decision with [`PropagationEngine::decide`] (or push a checkpoint and narrow);
/// 3. call [`PropagationEngine::propagate`] to reach a fixpoint;
/// 4. on an inconsistency, [`PropagationEngine::rewind`] the checkpoint and try something else.
///
/// The engine itself never handles an inconsistency other than by clearing its agenda; deciding
/// whether to rewind or to give up is left to the caller.
#[derive(Debug)]
pub struct PropagationEngine {
    cells: Cells,
    trail: ChoicePointStack,
    agenda: Box<dyn Agenda>,
    network: Network,
    is_loaded: bool,
    counters: Counters,
    options: EngineOptions,
    /// Reused buffer for the decisions of a rewound checkpoint.
    undone_decisions: Vec<VariableId>,
}

impl Default for PropagationEngine {
    fn default() -> Self {
        PropagationEngine::new(EngineOptions::default())
    }
}

impl PropagationEngine {
    pub fn new(options: EngineOptions) -> Self {
        print_quince_assert_warning_message!();

        PropagationEngine {
            cells: Cells::default(),
            trail: ChoicePointStack::with_capacity(options.checkpoint_capacity),
            agenda: create_agenda(options.agenda),
            network: Network::default(),
            is_loaded: false,
            counters: Counters::default(),
            options,
            undone_decisions: vec![],
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }
}

// methods for creating variables
impl PropagationEngine {
    /// Create a variable which can take any value in `[lower_bound, upper_bound]`.
    pub fn new_interval_variable(&mut self, lower_bound: i32, upper_bound: i32) -> VariableId {
        quince_assert_simple!(
            lower_bound <= upper_bound,
            "cannot create a variable with an empty domain"
        );
        self.cells
            .new_variable(Domain::interval(lower_bound, upper_bound))
    }

    /// Create a variable which can take exactly the given values.
    pub fn new_sparse_variable(&mut self, values: impl IntoIterator<Item = i32>) -> VariableId {
        let domain = Domain::sparse(values);
        quince_assert_simple!(
            !domain.is_empty(),
            "cannot create a variable with an empty domain"
        );
        self.cells.new_variable(domain)
    }

    /// Create a set variable which contains at least `must_have` and at most `may_have`.
    pub fn new_set_variable(
        &mut self,
        must_have: impl IntoIterator<Item = i32>,
        may_have: impl IntoIterator<Item = i32>,
    ) -> VariableId {
        let domain = Domain::set(must_have, may_have);
        quince_assert_simple!(
            !domain.is_empty(),
            "the required elements of a set variable must be possible elements"
        );
        self.cells.new_variable(domain)
    }

    /// Create a variable with domain `[0, 1]`, where 0 stands for false.
    pub fn new_boolean_variable(&mut self) -> VariableId {
        self.new_interval_variable(0, 1)
    }

    pub fn num_variables(&self) -> usize {
        self.cells.num_variables()
    }
}

// methods for loading a problem and propagating
impl PropagationEngine {
    /// Load `problem` into the engine: flatten it, let every constraint register its
    /// dependencies, apply every [`init`](crate::Constraint::init) and propagate to a fixpoint.
    ///
    /// All of this happens at the root, so the narrowings are never undone. Only one problem can be
    /// loaded into an engine.
    pub fn load(&mut self, problem: Problem) -> Result<(), EngineError> {
        if self.is_loaded {
            return Err(EngineError::ProblemAlreadyLoaded);
        }
        quince_assert_simple!(
            self.trail.is_empty(),
            "a problem has to be loaded before any checkpoint is pushed"
        );

        let name = problem.name().to_owned();
        let constraints = problem.flatten();

        for constraint in constraints.iter() {
            if let Some(&unknown) = constraint
                .variables()
                .iter()
                .find(|&&variable| !self.cells.contains_variable(variable))
            {
                return Err(EngineError::UnknownVariable(unknown));
            }
        }

        if constraints.is_empty() {
            warn!("loading problem '{name}' without any constraints");
        }
        debug!(
            "loading problem '{name}' with {} constraints over {} variables",
            constraints.len(),
            self.cells.num_variables()
        );

        self.is_loaded = true;
        for constraint in constraints {
            let _ = self.network.constraints.push(constraint);
            let flag = self.cells.new_trailed_integer(0);
            let _ = self.network.entailment.push(flag);
        }
        quince_assert_eq_simple!(
            self.network.constraints.len(),
            self.network.entailment.len()
        );

        for id in self.network.constraint_ids() {
            let mut context = DependencyContext::new(&mut self.network.watch_list, id);
            self.network.constraints[id].update_dependencies(&mut context);
        }

        for id in self.network.constraint_ids() {
            let context = PropagationContextMut::new(
                &mut self.cells,
                &mut self.trail,
                self.agenda.as_mut(),
                &self.network,
                id,
            );
            if let Err(inconsistency) = self.network.constraints[id].init(context) {
                self.agenda.clear();
                return Err(EngineError::RootInconsistency(inconsistency));
            }
        }

        let context = AgendaContext::new(&self.network, &self.cells, self.trail.current_date());
        let mut all_constraints = self.network.constraint_ids();
        self.agenda.add_all(&context, &mut all_constraints);

        self.propagate().map_err(EngineError::RootInconsistency)
    }

    /// Filter pending constraints until the agenda is empty or an inconsistency is found.
    ///
    /// On an inconsistency the agenda is cleared; the domains are left as they were when the
    /// inconsistency was detected, so the caller is expected to rewind.
    pub fn propagate(&mut self) -> PropagationStatusCP {
        loop {
            let next = {
                let context =
                    AgendaContext::new(&self.network, &self.cells, self.trail.current_date());
                self.agenda.pop(&context)
            };

            let Some(id) = next else {
                quince_assert_moderate!(self.agenda.is_empty());
                return Ok(());
            };

            // A constraint can become entailed after it was scheduled.
            if self.network.is_entailed(id, &self.cells) {
                continue;
            }

            self.counters.num_filter_calls += 1;
            trace!("filtering {id} ({})", self.network.constraint(id).name());

            let context = PropagationContextMut::new(
                &mut self.cells,
                &mut self.trail,
                self.agenda.as_mut(),
                &self.network,
                id,
            );

            match self.network.constraints[id].filter(context) {
                Ok(()) => {
                    quince_assert_advanced!(
                        self.network
                            .constraint(id)
                            .variables()
                            .iter()
                            .all(|&variable| !self.cells.domain(variable).is_empty()),
                        "{id} emptied a domain without reporting an inconsistency"
                    );
                    let context =
                        AgendaContext::new(&self.network, &self.cells, self.trail.current_date());
                    self.agenda.filtering_finished(&context);
                }
                Err(inconsistency) => {
                    trace!("{id} failed: {inconsistency}");
                    self.agenda.clear();
                    self.counters.num_inconsistencies += 1;
                    return Err(inconsistency);
                }
            }
        }
    }

    /// Whether `constraint` is entailed under the current domains.
    pub fn is_entailed(&self, constraint: ConstraintId) -> bool {
        self.network.is_entailed(constraint, &self.cells)
    }

    pub fn num_constraints(&self) -> usize {
        self.network.num_constraints()
    }

    /// The number of constraints waiting to be filtered.
    pub fn num_pending(&self) -> usize {
        self.agenda.num_pending()
    }
}

// methods for branching and backtracking
impl PropagationEngine {
    /// Open a new checkpoint. Every narrowing from now on is undone by the matching rewind.
    pub fn push(&mut self) {
        self.trail.push();
        self.counters.num_checkpoints += 1;
    }

    /// Mark `variable` as decided in the current checkpoint. When the checkpoint is rewound, the
    /// constraints on `variable` are scheduled again.
    pub fn record_decision(&mut self, variable: VariableId) {
        self.trail.record_decision(variable);
    }

    /// Open a checkpoint and assign `value` to `variable` in it. The result of the assignment is
    /// returned; propagation has to be started separately with [`PropagationEngine::propagate`].
    pub fn decide(&mut self, variable: VariableId, value: i32) -> NarrowingResult {
        self.push();
        self.record_decision(variable);
        self.counters.num_decisions += 1;
        self.set_value(variable, value)
    }

    pub fn domain(&self, variable: VariableId) -> &Domain {
        self.cells.domain(variable)
    }

    /// # Panics
    ///
    /// Panics when `variable` is a set variable. The same holds for the other integer
    /// narrowings, while [`PropagationEngine::include`], [`PropagationEngine::exclude`] and
    /// [`PropagationEngine::set_set_value`] panic on integer variables.
    pub fn set_min(&mut self, variable: VariableId, value: i32) -> NarrowingResult {
        if self.domain(variable).min().is_some_and(|min| value <= min) {
            return Ok(false);
        }
        self.narrow(variable, |domain| domain.set_min(value))
    }

    pub fn set_max(&mut self, variable: VariableId, value: i32) -> NarrowingResult {
        if self.domain(variable).max().is_some_and(|max| value >= max) {
            return Ok(false);
        }
        self.narrow(variable, |domain| domain.set_max(value))
    }

    pub fn set_value(&mut self, variable: VariableId, value: i32) -> NarrowingResult {
        if self.domain(variable).assigned_value() == Some(value) {
            return Ok(false);
        }
        self.narrow(variable, |domain| domain.set_value(value))
    }

    pub fn remove_value(&mut self, variable: VariableId, value: i32) -> NarrowingResult {
        if !self.domain(variable).contains(value) {
            return Ok(false);
        }
        self.narrow(variable, |domain| domain.remove_value(value))
    }

    pub fn include(&mut self, variable: VariableId, element: i32) -> NarrowingResult {
        self.narrow(variable, |domain| domain.include(element))
    }

    pub fn exclude(&mut self, variable: VariableId, element: i32) -> NarrowingResult {
        self.narrow(variable, |domain| domain.exclude(element))
    }

    pub fn set_set_value(&mut self, variable: VariableId, set: &BTreeSet<i32>) -> NarrowingResult {
        self.narrow(variable, |domain| domain.set_set_value(set))
    }

    /// Undo every change since the last [`PropagationEngine::push`] and schedule the constraints
    /// on the decision variables of that checkpoint. Rewinding without open checkpoints does
    /// nothing.
    pub fn rewind(&mut self) {
        if self.trail.is_empty() {
            warn!("attempted to rewind without open checkpoints");
            return;
        }

        let undone = &mut self.undone_decisions;
        undone.clear();
        self.trail
            .rewind(&mut self.cells, |_, variable| undone.push(variable));

        self.counters.num_rewinds += 1;
        self.notify_undone_decisions();
    }

    /// Alias of [`PropagationEngine::rewind`].
    pub fn pop(&mut self) {
        self.rewind()
    }

    /// Rewind until `depth` checkpoints are open.
    pub fn rewind_to(&mut self, depth: usize) {
        quince_assert_simple!(depth <= self.depth(), "cannot rewind to a deeper level");
        while self.depth() > depth {
            self.rewind();
        }
    }

    /// Rewind every checkpoint and open a fresh one, restoring the state right after loading.
    pub fn reset(&mut self) {
        let rewound = self.trail.depth() as u64;

        let undone = &mut self.undone_decisions;
        undone.clear();
        self.trail
            .reset(&mut self.cells, |_, variable| undone.push(variable));

        self.counters.num_rewinds += rewound;
        self.counters.num_checkpoints += 1;
        self.agenda.clear();
        self.notify_undone_decisions();
    }

    /// Collapse the current checkpoint into the enclosing one without undoing anything. Requires
    /// at least two open checkpoints.
    pub fn merge(&mut self) {
        self.trail.merge();
    }

    /// The number of open checkpoints.
    pub fn depth(&self) -> usize {
        self.trail.depth()
    }

    pub fn max_depth(&self) -> usize {
        self.trail.max_depth()
    }

    /// The logical date: the number of checkpoints rewound so far.
    pub fn current_date(&self) -> u64 {
        self.trail.current_date()
    }

    fn narrow(
        &mut self,
        variable: VariableId,
        narrowing: impl FnOnce(&mut Domain) -> EnumSet<DomainEvent>,
    ) -> NarrowingResult {
        narrow(
            &mut self.cells,
            &mut self.trail,
            self.agenda.as_mut(),
            &self.network,
            variable,
            narrowing,
        )
    }

    fn notify_undone_decisions(&mut self) {
        let context = AgendaContext::new(&self.network, &self.cells, self.trail.current_date());
        for &variable in &self.undone_decisions {
            self.agenda.update(&context, variable, DomainEvents::ANY);
        }
    }
}

// methods for statistics
impl PropagationEngine {
    pub fn statistics(&self) -> Counters {
        let mut counters = self.counters;
        counters.max_depth = self.trail.max_depth() as u64;
        counters
    }

    /// Write the statistics through [`log_statistic`], if statistic logging was configured.
    pub fn log_statistics(&self) {
        if !should_log_statistics() {
            return;
        }

        self.statistics().log_statistics();
        log_statistic_postfix();
    }
}

/// Statistics gathered by a [`PropagationEngine`].
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Counters {
    pub num_decisions: u64,
    pub num_filter_calls: u64,
    pub num_inconsistencies: u64,
    pub num_checkpoints: u64,
    pub num_rewinds: u64,
    pub max_depth: u64,
}

impl Counters {
    fn log_statistics(&self) {
        log_statistic("numberOfDecisions", self.num_decisions);
        log_statistic("numberOfFilterCalls", self.num_filter_calls);
        log_statistic("numberOfInconsistencies", self.num_inconsistencies);
        log_statistic("numberOfCheckpoints", self.num_checkpoints);
        log_statistic("numberOfRewinds", self.num_rewinds);
        log_statistic("maximumDepth", self.max_depth);
    }
}
