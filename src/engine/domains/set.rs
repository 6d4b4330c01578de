use std::collections::BTreeSet;

use enumset::EnumSet;

use super::DomainEvent;

/// A set-lattice domain: the variable takes a set value `s` with `must_have ⊆ s ⊆ may_have`.
///
/// The domain is empty iff `must_have ⊄ may_have` and it is a singleton iff both sets are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SetDomain {
    must_have: BTreeSet<i32>,
    may_have: BTreeSet<i32>,
}

impl SetDomain {
    pub fn new(
        must_have: impl IntoIterator<Item = i32>,
        may_have: impl IntoIterator<Item = i32>,
    ) -> Self {
        SetDomain {
            must_have: must_have.into_iter().collect(),
            may_have: may_have.into_iter().collect(),
        }
    }

    pub fn must_have(&self) -> &BTreeSet<i32> {
        &self.must_have
    }

    pub fn may_have(&self) -> &BTreeSet<i32> {
        &self.may_have
    }

    pub fn is_empty(&self) -> bool {
        !self.must_have.is_subset(&self.may_have)
    }

    pub fn is_singleton(&self) -> bool {
        self.must_have == self.may_have
    }

    /// Whether `element` can still be part of the value of the variable.
    pub fn contains(&self, element: i32) -> bool {
        !self.is_empty() && self.may_have.contains(&element)
    }

    /// Whether `set` is one of the values of this domain.
    pub fn contains_set(&self, set: &BTreeSet<i32>) -> bool {
        self.must_have.is_subset(set) && set.is_subset(&self.may_have)
    }

    /// The number of set values, saturating at [`u64::MAX`].
    pub fn size(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let free = (self.may_have.len() - self.must_have.len()) as u32;
        1_u64.checked_shl(free).unwrap_or(u64::MAX)
    }

    /// Require `element` to be part of the value.
    pub fn include(&mut self, element: i32) -> EnumSet<DomainEvent> {
        if !self.must_have.insert(element) {
            return EnumSet::empty();
        }
        self.events_after_change(DomainEvent::LowerBound)
    }

    /// Forbid `element` from being part of the value.
    pub fn exclude(&mut self, element: i32) -> EnumSet<DomainEvent> {
        if !self.may_have.remove(&element) {
            return EnumSet::empty();
        }
        self.events_after_change(DomainEvent::UpperBound)
    }

    /// Fix the value to exactly `set`.
    pub fn set_value(&mut self, set: &BTreeSet<i32>) -> EnumSet<DomainEvent> {
        self.intersect_with(set, set)
    }

    /// Narrow to the values shared with the lattice `[must_have, may_have]`.
    pub(crate) fn intersect_with(
        &mut self,
        must_have: &BTreeSet<i32>,
        may_have: &BTreeSet<i32>,
    ) -> EnumSet<DomainEvent> {
        let old_must = self.must_have.len();
        let old_may = self.may_have.len();

        self.must_have.extend(must_have.iter().copied());
        self.may_have.retain(|element| may_have.contains(element));

        let mut events = EnumSet::empty();
        if self.must_have.len() != old_must {
            events |= DomainEvent::LowerBound;
        }
        if self.may_have.len() != old_may {
            events |= DomainEvent::UpperBound;
        }
        if !events.is_empty() {
            events |= DomainEvent::Removal;
            if self.is_singleton() {
                events |= DomainEvent::Assign;
            }
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
