use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// A change that happened to the domain of a variable.
///
/// Every narrowing raises [`DomainEvent::Removal`]; the other events further qualify the change.
/// For set domains the lower bound is the set of required elements and the upper bound the set of
/// possible elements.
#[derive(Debug, Hash, EnumSetType)]
pub enum DomainEvent {
    /// The domain became a single value.
    Assign,
    /// The lower bound of the domain was raised.
    LowerBound,
    /// The upper bound of the domain was lowered.
    UpperBound,
    /// At least one value was removed from the domain.
    Removal,
}

/// Commonly used groups of [`DomainEvent`]s to register a constraint on.
#[derive(Clone, Copy, Debug)]
pub struct DomainEvents;

impl DomainEvents {
    /// React only when the variable becomes fixed.
    pub const ASSIGN: EnumSet<DomainEvent> = enum_set!(DomainEvent::Assign);
    /// React when either bound moves (this includes the variable becoming fixed).
    pub const BOUNDS: EnumSet<DomainEvent> =
        enum_set!(DomainEvent::Assign | DomainEvent::LowerBound | DomainEvent::UpperBound);
    /// React on any narrowing. This is also the event raised when a decision is undone.
    pub const ANY: EnumSet<DomainEvent> = enum_set!(
        DomainEvent::Assign | DomainEvent::LowerBound | DomainEvent::UpperBound | DomainEvent::Removal
    );
}
