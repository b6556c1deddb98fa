//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity: two instances holding the same values are
/// interchangeable. `Money`, duty rates and duty quotes are value objects; a
/// `Product` is not (it keeps its id across edits).
///
/// To "modify" a value object, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
