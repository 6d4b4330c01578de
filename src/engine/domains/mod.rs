//! The domains which variables can take: bound-only intervals ([`IntervalDomain`]), explicit sets
//! of integers ([`SparseDomain`]) and set-lattices ([`SetDomain`]).
//!
//! All narrowing operations are monotone; they never add a value to a domain. A narrowing which
//! removes the last value leaves the domain in its empty state, it is up to the caller (see
//! [`PropagationContextMut`](crate::engine::propagation::PropagationContextMut)) to turn this into
//! an [`Inconsistency`](crate::basic_types::Inconsistency).
mod domain_events;
mod interval;
mod set;
mod sparse;

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::RangeInclusive;

pub use domain_events::*;
use enumset::EnumSet;
pub use interval::*;
pub use set::*;
pub use sparse::*;

use crate::basic_types::DomainComparisonError;

/// How an empty domain is rendered, regardless of its kind.
pub const EMPTY_DOMAIN: &str = "<empty>";

/// The representation of a [`Domain`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DomainKind {
    Interval,
    Sparse,
    Set,
}

impl Display for DomainKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainKind::Interval => write!(f, "interval"),
            DomainKind::Sparse => write!(f, "sparse"),
            DomainKind::Set => write!(f, "set"),
        }
    }
}

/// The current set of values which a variable can still take.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Domain {
    Interval(IntervalDomain),
    Sparse(SparseDomain),
    Set(SetDomain),
}

impl Domain {
    pub fn interval(min: i32, max: i32) -> Domain {
        Domain::Interval(IntervalDomain::new(min, max))
    }

    pub fn sparse(values: impl IntoIterator<Item = i32>) -> Domain {
        Domain::Sparse(SparseDomain::new(values))
    }

    pub fn set(
        must_have: impl IntoIterator<Item = i32>,
        may_have: impl IntoIterator<Item = i32>,
    ) -> Domain {
        Domain::Set(SetDomain::new(must_have, may_have))
    }

    pub fn kind(&self) -> DomainKind {
        match self {
            Domain::Interval(_) => DomainKind::Interval,
            Domain::Sparse(_) => DomainKind::Sparse,
            Domain::Set(_) => DomainKind::Set,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Domain::Interval(domain) => domain.is_empty(),
            Domain::Sparse(domain) => domain.is_empty(),
            Domain::Set(domain) => domain.is_empty(),
        }
    }

    pub fn is_singleton(&self) -> bool {
        match self {
            Domain::Interval(domain) => domain.is_singleton(),
            Domain::Sparse(domain) => domain.is_singleton(),
            Domain::Set(domain) => domain.is_singleton(),
        }
    }

    /// For integer domains this is membership of `value`; for a set domain it tells whether
    /// `value` may still be an element of the set value.
    pub fn contains(&self, value: i32) -> bool {
        match self {
            Domain::Interval(domain) => domain.contains(value),
            Domain::Sparse(domain) => domain.contains(value),
            Domain::Set(domain) => domain.contains(value),
        }
    }

    /// The number of values in the domain.
    pub fn size(&self) -> u64 {
        match self {
            Domain::Interval(domain) => domain.size(),
            Domain::Sparse(domain) => domain.size(),
            Domain::Set(domain) => domain.size(),
        }
    }

    /// The smallest value of a non-empty integer domain.
    pub fn min(&self) -> Option<i32> {
        match self {
            Domain::Interval(domain) if !domain.is_empty() => Some(domain.min()),
            Domain::Sparse(domain) => domain.min(),
            _ => None,
        }
    }

    /// The largest value of a non-empty integer domain.
    pub fn max(&self) -> Option<i32> {
        match self {
            Domain::Interval(domain) if !domain.is_empty() => Some(domain.max()),
            Domain::Sparse(domain) => domain.max(),
            _ => None,
        }
    }

    /// The value of a fixed integer domain.
    pub fn assigned_value(&self) -> Option<i32> {
        if self.is_singleton() {
            self.min()
        } else {
            None
        }
    }

    /// Iterate over the values of an integer domain. A set domain yields nothing.
    pub fn values(&self) -> DomainValues<'_> {
        match self {
            Domain::Interval(domain) => DomainValues::Range(domain.min()..=domain.max()),
            Domain::Sparse(domain) => DomainValues::Sparse(domain.iter()),
            Domain::Set(_) => DomainValues::None,
        }
    }

    /// Compute the intersection of `self` and `other`, keeping the representation of `self`.
    ///
    /// An interval only tracks bounds, so intersecting it with a sparse domain moves its bounds to
    /// the closest shared values. Integer and set domains cannot be intersected.
    pub fn intersect(&self, other: &Domain) -> Result<Domain, DomainComparisonError> {
        let mut result = self.clone();
        let _ = result.intersect_in_place(other)?;
        Ok(result)
    }

    /// In-place version of [`Domain::intersect`], returning the events describing the change.
    pub fn intersect_in_place(
        &mut self,
        other: &Domain,
    ) -> Result<EnumSet<DomainEvent>, DomainComparisonError> {
        let events = match (&mut *self, other) {
            (Domain::Interval(domain), Domain::Interval(other)) => {
                domain.set_min(other.min()) | domain.set_max(other.max())
            }
            (Domain::Interval(domain), Domain::Sparse(other)) => {
                let (min, max) = (domain.min(), domain.max());
                let mut shared = other
                    .values()
                    .skip_while(|&value| value < min)
                    .take_while(|&value| value <= max);

                match shared.next() {
                    Some(first) => {
                        let last = shared.last().unwrap_or(first);
                        domain.set_min(first) | domain.set_max(last)
                    }
                    None => domain.clear(),
                }
            }
            (Domain::Sparse(domain), Domain::Interval(other)) => {
                domain.retain_range(other.min(), other.max())
            }
            (Domain::Sparse(domain), Domain::Sparse(other)) => {
                domain.retain(|value| other.contains(value))
            }
            (Domain::Set(domain), Domain::Set(other)) => {
                domain.intersect_with(other.must_have(), other.may_have())
            }
            (domain, other) => {
                return Err(DomainComparisonError {
                    left: domain.kind(),
                    right: other.kind(),
                })
            }
        };

        Ok(events)
    }

    /// Whether both domains contain exactly the same values. Interval and sparse domains compare
    /// by their value sets; an integer domain cannot be compared with a set domain.
    pub fn equals(&self, other: &Domain) -> Result<bool, DomainComparisonError> {
        let incomparable = || DomainComparisonError {
            left: self.kind(),
            right: other.kind(),
        };

        if (self.kind() == DomainKind::Set) != (other.kind() == DomainKind::Set) {
            return Err(incomparable());
        }

        if self.is_empty() || other.is_empty() {
            return Ok(self.is_empty() && other.is_empty());
        }

        let equal = match (self, other) {
            (Domain::Interval(domain), Domain::Interval(other)) => domain == other,
            (Domain::Interval(interval), Domain::Sparse(sparse))
            | (Domain::Sparse(sparse), Domain::Interval(interval)) => {
                sparse.is_contiguous()
                    && sparse.min() == Some(interval.min())
                    && sparse.max() == Some(interval.max())
            }
            (Domain::Sparse(domain), Domain::Sparse(other)) => domain == other,
            (Domain::Set(domain), Domain::Set(other)) => domain == other,
            _ => return Err(incomparable()),
        };

        Ok(equal)
    }

    /// # Panics
    ///
    /// The integer narrowings panic on a [`Domain::Set`], the set narrowings on the other
    /// variants. Mixing them is a modelling error.
    pub fn set_min(&mut self, value: i32) -> EnumSet<DomainEvent> {
        match self {
            Domain::Interval(domain) => domain.set_min(value),
            Domain::Sparse(domain) => domain.set_min(value),
            Domain::Set(_) => integer_narrowing_on_set_domain("set_min"),
        }
    }

    pub fn set_max(&mut self, value: i32) -> EnumSet<DomainEvent> {
        match self {
            Domain::Interval(domain) => domain.set_max(value),
            Domain::Sparse(domain) => domain.set_max(value),
            Domain::Set(_) => integer_narrowing_on_set_domain("set_max"),
        }
    }

    pub fn set_value(&mut self, value: i32) -> EnumSet<DomainEvent> {
        match self {
            Domain::Interval(domain) => domain.set_value(value),
            Domain::Sparse(domain) => domain.set_value(value),
            Domain::Set(_) => integer_narrowing_on_set_domain("set_value"),
        }
    }

    /// Remove `value`. An interval domain only honours this when `value` is one of its bounds.
    pub fn remove_value(&mut self, value: i32) -> EnumSet<DomainEvent> {
        match self {
            Domain::Interval(domain) => domain.remove_value(value),
            Domain::Sparse(domain) => domain.remove_value(value),
            Domain::Set(_) => integer_narrowing_on_set_domain("remove_value"),
        }
    }

    pub fn include(&mut self, element: i32) -> EnumSet<DomainEvent> {
        match self {
            Domain::Set(domain) => domain.include(element),
            _ => set_narrowing_on_integer_domain("include"),
        }
    }

    pub fn exclude(&mut self, element: i32) -> EnumSet<DomainEvent> {
        match self {
            Domain::Set(domain) => domain.exclude(element),
            _ => set_narrowing_on_integer_domain("exclude"),
        }
    }

    pub fn set_set_value(&mut self, set: &BTreeSet<i32>) -> EnumSet<DomainEvent> {
        match self {
            Domain::Set(domain) => domain.set_value(set),
            _ => set_narrowing_on_integer_domain("set_set_value"),
        }
    }
}

fn integer_narrowing_on_set_domain(operation: &str) -> ! {
    panic!("`{operation}` is an integer narrowing and cannot be applied to a set domain")
}

fn set_narrowing_on_integer_domain(operation: &str) -> ! {
    panic!("`{operation}` is a set narrowing and cannot be applied to an integer domain")
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "{EMPTY_DOMAIN}");
        }

        match self {
            Domain::Interval(domain) => write!(f, "[{}..{}]", domain.min(), domain.max()),
            Domain::Sparse(domain) => write_set(f, domain.values()),
            Domain::Set(domain) => {
                write!(f, "[")?;
                write_set(f, domain.must_have().iter().copied())?;
                write!(f, " .. ")?;
                write_set(f, domain.may_have().iter().copied())?;
                write!(f, "]")
            }
        }
    }
}

fn write_set(f: &mut Formatter<'_>, values: impl Iterator<Item = i32>) -> std::fmt::Result {
    write!(f, "{{")?;
    for (idx, value) in values.enumerate() {
        if idx > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{value}")?;
    }
    write!(f, "}}")
}

/// Iterator over the values of an integer [`Domain`].
#[derive(Debug)]
pub enum DomainValues<'a> {
    Range(RangeInclusive<i32>),
    Sparse(btree_set::Iter<'a, i32>),
    None,
}

impl Iterator for DomainValues<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            DomainValues::Range(range) => range.next(),
            DomainValues::Sparse(iter) => iter.next().copied(),
            DomainValues::None => None,
        }
    }
}
