//! RTTI-optional downcasting
//!
//! Polymorphic values are reached through trait objects. A trait that wants
//! to support downcasting extends [`AsAny`]:
//!
//! ```
//! use numkit_core::cast::{checked_downcast, AsAny};
//!
//! trait Operator: AsAny {}
//!
//! struct Relu;
//! impl Operator for Relu {}
//!
//! let op: Box<dyn Operator> = Box::new(Relu);
//! assert!(checked_downcast::<Relu>(op.as_ref().as_any()).is_some());
//! ```
//!
//! ## Build-configuration-dependent contract
//!
//! [`dynamic_cast_if_rtti`] dispatches through [`ActiveCast`]:
//!
//! - with the `rtti` feature (default) it is [`Checked`]: a mismatched type
//!   yields `None`
//! - without it it is [`Unchecked`]: the pointer is reinterpreted and a
//!   mismatched type is undefined behavior. `None` is never returned, so
//!   callers must not use a `None` check to detect the wrong type.
//!
//! Code that needs a detectable failure in every build uses
//! [`checked_downcast`] instead.

use std::any::Any;

/// Upcast to `&dyn Any` from any trait object that extends this trait
pub trait AsAny: Any {
    /// View as `&dyn Any`
    fn as_any(&self) -> &dyn Any;

    /// View as `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A downcast strategy
pub trait CastStrategy {
    /// Whether a mismatched type is reported as `None`
    const CHECKED: bool;

    /// Downcast a shared reference
    ///
    /// # Safety
    /// Unchecked strategies require the concrete type of `src` to be `Dst`.
    unsafe fn cast_ref<Dst: Any>(src: &dyn Any) -> Option<&Dst>;

    /// Downcast an exclusive reference
    ///
    /// # Safety
    /// Same requirement as [`cast_ref`](Self::cast_ref).
    unsafe fn cast_mut<Dst: Any>(src: &mut dyn Any) -> Option<&mut Dst>;
}

/// Type-id checked downcast
#[derive(Debug, Clone, Copy, Default)]
pub struct Checked;

impl CastStrategy for Checked {
    const CHECKED: bool = true;

    unsafe fn cast_ref<Dst: Any>(src: &dyn Any) -> Option<&Dst> {
        src.downcast_ref::<Dst>()
    }

    unsafe fn cast_mut<Dst: Any>(src: &mut dyn Any) -> Option<&mut Dst> {
        src.downcast_mut::<Dst>()
    }
}

/// Pointer reinterpretation without a type check
#[derive(Debug, Clone, Copy, Default)]
pub struct Unchecked;

impl CastStrategy for Unchecked {
    const CHECKED: bool = false;

    unsafe fn cast_ref<Dst: Any>(src: &dyn Any) -> Option<&Dst> {
        // SAFETY: the caller guarantees the concrete type is `Dst`.
        Some(&*(src as *const dyn Any as *const Dst))
    }

    unsafe fn cast_mut<Dst: Any>(src: &mut dyn Any) -> Option<&mut Dst> {
        // SAFETY: the caller guarantees the concrete type is `Dst`.
        Some(&mut *(src as *mut dyn Any as *mut Dst))
    }
}

/// Strategy selected by the `rtti` feature
#[cfg(feature = "rtti")]
pub type ActiveCast = Checked;

/// Strategy selected by the `rtti` feature
#[cfg(not(feature = "rtti"))]
pub type ActiveCast = Unchecked;

/// Whether this build checks downcasts
pub const RTTI_ENABLED: bool = <ActiveCast as CastStrategy>::CHECKED;

/// Downcast with the build's active strategy
///
/// Returns `None` on a type mismatch when [`RTTI_ENABLED`]; otherwise always
/// returns `Some`.
///
/// # Safety
/// When the `rtti` feature is disabled, the concrete type of `src` must be
/// `Dst`; anything else is undefined behavior. With `rtti` enabled the call
/// is always sound.
#[inline]
pub unsafe fn dynamic_cast_if_rtti<Dst: Any>(src: &dyn Any) -> Option<&Dst> {
    ActiveCast::cast_ref(src)
}

/// Mutable counterpart of [`dynamic_cast_if_rtti`]
///
/// # Safety
/// Same requirement as [`dynamic_cast_if_rtti`].
#[inline]
pub unsafe fn dynamic_cast_if_rtti_mut<Dst: Any>(src: &mut dyn Any) -> Option<&mut Dst> {
    ActiveCast::cast_mut(src)
}

/// Type-checked downcast regardless of build configuration
#[inline]
pub fn checked_downcast<Dst: Any>(src: &dyn Any) -> Option<&Dst> {
    // SAFETY: `Checked` never dereferences a mismatched pointer.
    unsafe { Checked::cast_ref(src) }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Node: AsAny {
        fn arity(&self) -> usize;
    }

    #[derive(Debug, PartialEq)]
    struct Add {
        inputs: [i64; 2],
    }

    impl Node for Add {
        fn arity(&self) -> usize {
            2
        }
    }

    struct Neg;

    impl Node for Neg {
        fn arity(&self) -> usize {
            1
        }
    }

    fn data_addr<T: ?Sized>(r: &T) -> *const u8 {
        r as *const T as *const u8
    }

    #[test]
    fn test_checked_mismatch_returns_none() {
        let node: Box<dyn Node> = Box::new(Neg);
        assert_eq!(node.arity(), 1);
        assert!(checked_downcast::<Add>(node.as_ref().as_any()).is_none());
    }

    #[test]
    fn test_checked_match_preserves_address() {
        let node: Box<dyn Node> = Box::new(Add { inputs: [3, 4] });
        let base = node.as_ref().as_any();
        let add = checked_downcast::<Add>(base).unwrap();
        assert_eq!(add.inputs, [3, 4]);
        assert_eq!(data_addr(add), data_addr(base));
    }

    #[test]
    fn test_unchecked_match_preserves_address() {
        let node: Box<dyn Node> = Box::new(Add { inputs: [1, 2] });
        let base = node.as_ref().as_any();
        let add = unsafe { Unchecked::cast_ref::<Add>(base) }.unwrap();
        assert_eq!(add, &Add { inputs: [1, 2] });
        assert_eq!(data_addr(add), data_addr(base));
    }

    #[test]
    fn test_mutable_downcast() {
        let mut node: Box<dyn Node> = Box::new(Add { inputs: [0, 0] });
        if let Some(add) = unsafe { dynamic_cast_if_rtti_mut::<Add>(node.as_mut().as_any_mut()) } {
            add.inputs[1] = 9;
        }
        assert_eq!(checked_downcast::<Add>(node.as_ref().as_any()).unwrap().inputs, [0, 9]);
    }

    #[test]
    fn test_active_strategy_matches_feature() {
        assert_eq!(RTTI_ENABLED, cfg!(feature = "rtti"));
    }

    #[cfg(feature = "rtti")]
    #[test]
    fn test_dynamic_cast_with_rtti() {
        let node: Box<dyn Node> = Box::new(Neg);
        let hit = unsafe { dynamic_cast_if_rtti::<Neg>(node.as_ref().as_any()) };
        let miss = unsafe { dynamic_cast_if_rtti::<Add>(node.as_ref().as_any()) };
        assert!(hit.is_some());
        assert!(miss.is_none());
    }
}
