//! Compile-time index sets
//!
//! Fallback dispatch (running a CPU operator in place of an accelerator one)
//! needs to know which input/output positions to leave alone. Those
//! positions are fixed per operator and known at compile time, so they are
//! expressed as constants rather than run-time collections.
//!
//! Two spellings, same semantics:
//!
//! - a const value: `const SKIP: SkipIndices<2> = SkipIndices::new([0, 3]);`
//! - a zero-sized marker type declared with [`skip_indices!`](crate::skip_indices)
//!   and queried through [`IndexSet`], for code that carries the set as a
//!   type parameter
//!
//! `contains(i)` is true iff `i` equals any listed value. The empty set
//! contains nothing.

/// True iff `i` equals any element of `values`
///
/// Evaluates position by position: `values[0] == i || contains_any(rest, i)`.
pub const fn contains_any(values: &[i32], i: i32) -> bool {
    match values {
        [] => false,
        [first, rest @ ..] => *first == i || contains_any(rest, i),
    }
}

/// A fixed set of positions, usable in `const` items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkipIndices<const N: usize> {
    values: [i32; N],
}

impl SkipIndices<0> {
    /// The empty set
    pub const EMPTY: SkipIndices<0> = SkipIndices { values: [] };
}

impl<const N: usize> SkipIndices<N> {
    /// Build a set from its values
    pub const fn new(values: [i32; N]) -> Self {
        SkipIndices { values }
    }

    /// Membership test
    #[inline]
    pub const fn contains(&self, i: i32) -> bool {
        contains_any(&self.values, i)
    }

    /// The listed values, in declaration order
    pub const fn values(&self) -> &[i32] {
        &self.values
    }

    /// Number of listed values
    pub const fn len(&self) -> usize {
        N
    }

    /// True for the empty set
    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}

/// A compile-time index set carried as a type
pub trait IndexSet {
    /// The listed values, in declaration order
    const VALUES: &'static [i32];

    /// Membership test
    #[inline]
    fn contains(i: i32) -> bool {
        contains_any(Self::VALUES, i)
    }
}

/// Declare a zero-sized type implementing [`IndexSet`]
///
/// ```
/// use numkit_core::skip::IndexSet;
///
/// numkit_core::skip_indices!(pub SkipLabels = 1, 4);
///
/// assert!(SkipLabels::contains(4));
/// assert!(!SkipLabels::contains(2));
/// ```
#[macro_export]
macro_rules! skip_indices {
    ($(#[$meta:meta])* $vis:vis $name:ident = $($value:expr),* $(,)?) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::skip::IndexSet for $name {
            const VALUES: &'static [i32] = &[$($value),*];
        }
    };
}

skip_indices!(
    /// Skips nothing
    pub NoSkip =
);

#[cfg(test)]
mod tests {
    use super::*;

    const SPARSE: SkipIndices<3> = SkipIndices::new([2, 5, 9]);
    const SINGLE: SkipIndices<1> = SkipIndices::new([7]);

    skip_indices!(Outputs = 2, 5, 9);

    #[test]
    fn test_empty_contains_nothing() {
        for i in [-1, 0, 1, 2, i32::MAX, i32::MIN] {
            assert!(!SkipIndices::<0>::EMPTY.contains(i));
            assert!(!NoSkip::contains(i));
        }
        assert!(SkipIndices::<0>::EMPTY.is_empty());
    }

    #[test]
    fn test_multi_element_membership() {
        assert!(SPARSE.contains(2));
        assert!(SPARSE.contains(5));
        assert!(SPARSE.contains(9));
        assert!(!SPARSE.contains(3));
        assert!(!SPARSE.contains(0));
        assert_eq!(SPARSE.len(), 3);
        assert_eq!(SPARSE.values(), &[2, 5, 9]);
    }

    #[test]
    fn test_single_element_membership() {
        assert!(SINGLE.contains(7));
        assert!(!SINGLE.contains(8));
    }

    #[test]
    fn test_marker_type_matches_value_form() {
        for i in -2..12 {
            assert_eq!(Outputs::contains(i), SPARSE.contains(i), "index {}", i);
        }
        assert_eq!(std::mem::size_of::<Outputs>(), 0);
    }

    #[test]
    fn test_evaluates_in_const_context() {
        const HAS_FIVE: bool = SPARSE.contains(5);
        const HAS_THREE: bool = SPARSE.contains(3);
        assert!(HAS_FIVE);
        assert!(!HAS_THREE);
    }

    #[test]
    fn test_duplicates_are_harmless() {
        let dup = SkipIndices::new([4, 4, 1]);
        assert!(dup.contains(4));
        assert!(dup.contains(1));
        assert!(!dup.contains(2));
    }
}
