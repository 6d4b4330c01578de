use std::collections::btree_set;
use std::collections::BTreeSet;

use enumset::EnumSet;

use super::DomainEvent;

/// A domain represented by the explicit sorted set of its values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SparseDomain {
    values: BTreeSet<i32>,
}

impl SparseDomain {
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        SparseDomain {
            values: values.into_iter().collect(),
        }
    }

    pub fn min(&self) -> Option<i32> {
        self.values.first().copied()
    }

    pub fn max(&self) -> Option<i32> {
        self.values.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.values.len() == 1
    }

    pub fn contains(&self, value: i32) -> bool {
        self.values.contains(&value)
    }

    pub fn size(&self) -> u64 {
        self.values.len() as u64
    }

    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        self.values.iter().copied()
    }

    pub(crate) fn iter(&self) -> btree_set::Iter<'_, i32> {
        self.values.iter()
    }

    /// Whether the values form the contiguous range `[min, max]`.
    pub(crate) fn is_contiguous(&self) -> bool {
        match (self.min(), self.max()) {
            (Some(min), Some(max)) => (max as i64 - min as i64 + 1) as u64 == self.size(),
            _ => true,
        }
    }

    /// Keep only the values within `[min, max]`.
    pub(crate) fn retain_range(&mut self, min: i32, max: i32) -> EnumSet<DomainEvent> {
        self.set_min(min) | self.set_max(max)
    }

    pub(crate) fn retain(&mut self, keep: impl Fn(i32) -> bool) -> EnumSet<DomainEvent> {
        let old_min = self.min();
        let old_max = self.max();
        let old_size = self.values.len();

        self.values.retain(|&value| keep(value));

        if self.values.len() == old_size {
            return EnumSet::empty();
        }

        let mut events = EnumSet::only(DomainEvent::Removal);
        if self.min() != old_min {
            events |= DomainEvent::LowerBound;
        }
        if self.max() != old_max {
            events |= DomainEvent::UpperBound;
        }
        if self.is_singleton() {
            events |= DomainEvent::Assign;
        }
        events
    }

    pub fn set_min(&mut self, value: i32) -> EnumSet<DomainEvent> {
        let Some(min) = self.min() else {
            return EnumSet::empty();
        };
        if value <= min {
            return EnumSet::empty();
        }

        self.values = self.values.split_off(&value);
        self.events_after_change(DomainEvent::LowerBound)
    }

    pub fn set_max(&mut self, value: i32) -> EnumSet<DomainEvent> {
        let Some(max) = self.max() else {
            return EnumSet::empty();
        };
        if value >= max {
            return EnumSet::empty();
        }

        // `value < max` so the increment cannot overflow.
        let _ = self.values.split_off(&(value + 1));
        self.events_after_change(DomainEvent::UpperBound)
    }

    pub fn set_value(&mut self, value: i32) -> EnumSet<DomainEvent> {
        self.retain(|candidate| candidate == value)
    }

    pub fn remove_value(&mut self, value: i32) -> EnumSet<DomainEvent> {
        let is_min = self.min() == Some(value);
        let is_max = self.max() == Some(value);

        if !self.values.remove(&value) {
            return EnumSet::empty();
        }

        let mut events = EnumSet::only(DomainEvent::Removal);
        if is_min {
            events |= DomainEvent::LowerBound;
        }
        if is_max {
            events |= DomainEvent::UpperBound;
        }
        if self.is_singleton() {
            events |= DomainEvent::Assign;
        }
        events
    }

    fn events_after_change(&self, bound_event: DomainEvent) -> EnumSet<DomainEvent> {
        let mut events = bound_event | DomainEvent::Removal;
        if self.is_singleton() {
            events |= DomainEvent::Assign;
        }
        events
    }
}
