use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;

use super::Checkpoint;
#[cfg(doc)]
use super::ChoicePointStack;
use crate::containers::HashMap;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::domains::Domain;

/// A value which can be trailed. Taking a snapshot produces an independent copy, later writes to
/// the cell never affect a snapshot which was already taken.
pub trait StorableValue: Sized {
    fn snapshot(&self) -> Self;
}

impl StorableValue for Domain {
    fn snapshot(&self) -> Self {
        self.clone()
    }
}

impl StorableValue for i64 {
    fn snapshot(&self) -> Self {
        *self
    }
}

/// Identifies a variable, i.e. a cell holding a [`Domain`].
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct VariableId(u32);

impl VariableId {
    pub fn id(self) -> u32 {
        self.0
    }
}

impl StorageKey for VariableId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        VariableId(index as u32)
    }
}

impl Display for VariableId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Identifies an auxiliary trailed integer, such as the entailment marker of a constraint.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct TrailedInteger(u32);

impl StorageKey for TrailedInteger {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        TrailedInteger(index as u32)
    }
}

/// A handle to a trailed cell. The handle is the identity of the cell; a [`Checkpoint`] holds at
/// most one snapshot per handle.
pub trait TrailedCell: Copy + Eq + Hash + Debug + 'static {
    type Value: StorableValue + Debug;

    fn value(self, cells: &Cells) -> &Self::Value;

    fn value_mut(self, cells: &mut Cells) -> &mut Self::Value;

    fn snapshots(checkpoint: &Checkpoint) -> &HashMap<Self, Self::Value>;

    fn snapshots_mut(checkpoint: &mut Checkpoint) -> &mut HashMap<Self, Self::Value>;
}

impl TrailedCell for VariableId {
    type Value = Domain;

    fn value(self, cells: &Cells) -> &Domain {
        &cells.domains[self]
    }

    fn value_mut(self, cells: &mut Cells) -> &mut Domain {
        &mut cells.domains[self]
    }

    fn snapshots(checkpoint: &Checkpoint) -> &HashMap<Self, Domain> {
        &checkpoint.domains
    }

    fn snapshots_mut(checkpoint: &mut Checkpoint) -> &mut HashMap<Self, Domain> {
        &mut checkpoint.domains
    }
}

impl TrailedCell for TrailedInteger {
    type Value = i64;

    fn value(self, cells: &Cells) -> &i64 {
        &cells.integers[self]
    }

    fn value_mut(self, cells: &mut Cells) -> &mut i64 {
        &mut cells.integers[self]
    }

    fn snapshots(checkpoint: &Checkpoint) -> &HashMap<Self, i64> {
        &checkpoint.integers
    }

    fn snapshots_mut(checkpoint: &mut Checkpoint) -> &mut HashMap<Self, i64> {
        &mut checkpoint.integers
    }
}

/// The storage of all trailed cells.
///
/// Writes through [`Cells::domain_mut`] and [`Cells::write_integer`] are raw; the caller is
/// responsible for calling [`ChoicePointStack::memorise_if_first_write`] beforehand.
#[derive(Clone, Debug, Default)]
pub struct Cells {
    domains: KeyedVec<VariableId, Domain>,
    integers: KeyedVec<TrailedInteger, i64>,
}

impl Cells {
    pub fn new_variable(&mut self, domain: Domain) -> VariableId {
        self.domains.push(domain)
    }

    pub fn new_trailed_integer(&mut self, initial_value: i64) -> TrailedInteger {
        self.integers.push(initial_value)
    }

    pub fn num_variables(&self) -> usize {
        self.domains.len()
    }

    pub fn variables(&self) -> impl Iterator<Item = VariableId> {
        self.domains.keys()
    }

    pub fn contains_variable(&self, variable: VariableId) -> bool {
        self.domains.get(variable).is_some()
    }

    pub fn domain(&self, variable: VariableId) -> &Domain {
        &self.domains[variable]
    }

    pub fn read(&self, integer: TrailedInteger) -> i64 {
        self.integers[integer]
    }

    pub(crate) fn domain_mut(&mut self, variable: VariableId) -> &mut Domain {
        &mut self.domains[variable]
    }

    pub(crate) fn write_integer(&mut self, integer: TrailedInteger, value: i64) {
        self.integers[integer] = value;
    }
}
