//! A problem is a tree of constraints which is flattened once before propagation starts.
use std::fmt::Debug;

use crate::containers::KeyedVec;
use crate::engine::propagation::Constraint;
use crate::engine::propagation::ConstraintId;

/// A named group of relations. Sub-problems allow a model to be assembled from reusable parts;
/// the engine only sees the flattened list of constraints.
pub struct Problem {
    name: String,
    relations: Vec<Relation>,
}

/// An element of a [`Problem`].
pub enum Relation {
    Constraint(Box<dyn Constraint>),
    Problem(Problem),
}

/// The constraints of a [`Problem`] in depth-first order, indexed by the id they are propagated
/// under.
pub type FlatProblem = KeyedVec<ConstraintId, Box<dyn Constraint>>;

impl Problem {
    pub fn new(name: impl Into<String>) -> Self {
        Problem {
            name: name.into(),
            relations: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a constraint to this problem.
    pub fn post(&mut self, constraint: impl Constraint + 'static) -> &mut Self {
        self.post_boxed(Box::new(constraint))
    }

    /// Add a constraint which is already boxed, e.g. one of a heterogeneous collection.
    pub fn post_boxed(&mut self, constraint: Box<dyn Constraint>) -> &mut Self {
        self.relations.push(Relation::Constraint(constraint));
        self
    }

    /// Add a sub-problem to this problem.
    pub fn add_problem(&mut self, problem: Problem) -> &mut Self {
        self.relations.push(Relation::Problem(problem));
        self
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// The number of constraints in this problem and all of its sub-problems.
    pub fn num_constraints(&self) -> usize {
        self.relations
            .iter()
            .map(|relation| match relation {
                Relation::Constraint(_) => 1,
                Relation::Problem(problem) => problem.num_constraints(),
            })
            .sum()
    }

    /// Collect all constraints of the tree. Ids are handed out in depth-first order, starting at
    /// zero for every flattening.
    pub fn flatten(self) -> FlatProblem {
        let mut flat = FlatProblem::default();
        self.flatten_into(&mut flat);
        flat
    }

    fn flatten_into(self, flat: &mut FlatProblem) {
        for relation in self.relations {
            match relation {
                Relation::Constraint(constraint) => {
                    let _ = flat.push(constraint);
                }
                Relation::Problem(problem) => problem.flatten_into(flat),
            }
        }
    }
}

impl Debug for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Problem")
            .field("name", &self.name)
            .field("relations", &self.relations)
            .finish()
    }
}

impl Debug for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::Constraint(constraint) => write!(f, "Constraint({})", constraint.name()),
            Relation::Problem(problem) => problem.fmt(f),
        }
    }
}
