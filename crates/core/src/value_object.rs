//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. In the
/// order form these are things like a computed `Totals` snapshot or a
/// `ShippingMethod` token: two snapshots with the same numbers are the same
/// snapshot, and a "change" means producing a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
