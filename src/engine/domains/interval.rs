use enumset::EnumSet;

use super::DomainEvent;

/// A domain `[min, max]` which only tracks its bounds.
///
/// The domain is empty iff `min > max`. Removing a value strictly between the bounds cannot be
/// represented and leaves the domain unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntervalDomain {
    min: i32,
    max: i32,
}

impl IntervalDomain {
    pub fn new(min: i32, max: i32) -> Self {
        IntervalDomain { min, max }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn is_singleton(&self) -> bool {
        self.min == self.max
    }

    pub fn contains(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn size(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.max as i64 - self.min as i64 + 1) as u64
        }
    }

    pub fn set_min(&mut self, value: i32) -> EnumSet<DomainEvent> {
        if value <= self.min {
            return EnumSet::empty();
        }

        self.min = value;
        self.events_after_change(DomainEvent::LowerBound)
    }

    pub fn set_max(&mut self, value: i32) -> EnumSet<DomainEvent> {
        if value >= self.max {
            return EnumSet::empty();
        }

        self.max = value;
        self.events_after_change(DomainEvent::UpperBound)
    }

    pub fn set_value(&mut self, value: i32) -> EnumSet<DomainEvent> {
        // A value outside of the bounds makes one of the two bounds cross the other.
        self.set_min(value) | self.set_max(value)
    }

    /// Only a value on one of the bounds is actually removed.
    pub fn remove_value(&mut self, value: i32) -> EnumSet<DomainEvent> {
        if self.is_empty() {
            return EnumSet::empty();
        }

        if value == self.min {
            match value.checked_add(1) {
                Some(new_min) => self.set_min(new_min),
                None => self.set_max(value - 1),
            }
        } else if value == self.max {
            match value.checked_sub(1) {
                Some(new_max) => self.set_max(new_max),
                None => self.set_min(value + 1),
            }
        } else {
            EnumSet::empty()
        }
    }

    /// Remove every value.
    pub(crate) fn clear(&mut self) -> EnumSet<DomainEvent> {
        if self.is_empty() {
            return EnumSet::empty();
        }

        self.min = 1;
        self.max = 0;
        DomainEvent::LowerBound | DomainEvent::UpperBound | DomainEvent::Removal
    }

    fn events_after_change(&self, bound_event: DomainEvent) -> EnumSet<DomainEvent> {
        let mut events = bound_event | DomainEvent::Removal;
        if self.is_singleton() {
            events |= DomainEvent::Assign;
        }
        events
    }
}
