//! Construct-and-own allocation helpers
//!
//! Every helper allocates on the heap and hands back sole ownership as a
//! `Box`; the value is dropped when the box goes out of scope. `Box` is the
//! standard equivalent on every supported toolchain, so the helpers only
//! delegate to it and exist to give call sites one uniform spelling.
//!
//! Two forms:
//!
//! - scalar: [`make_unique`] / [`make_unique_with`] build one value from
//!   constructor arguments
//! - array: [`make_unique_array`] default-constructs a runtime number of
//!   elements
//!
//! The array form is keyed on the unsized slice type `[T]`. Asking for a
//! fixed extent such as `[T; 4]` together with a count is ambiguous, and it
//! does not compile:
//!
//! ```compile_fail
//! let fixed = numkit_core::make_unique_array::<[i32; 4]>(4);
//! ```

/// Allocate one value built from `args`
///
/// `args` is anything the target can be constructed from (`T: From<A>`):
/// a tuple of fields, a single value, or `T` itself.
///
/// ```
/// use numkit_core::make_unique;
///
/// struct Shape {
///     dims: Vec<i64>,
/// }
///
/// impl From<&[i64]> for Shape {
///     fn from(dims: &[i64]) -> Self {
///         Shape { dims: dims.to_vec() }
///     }
/// }
///
/// let shape: Box<Shape> = make_unique(&[2i64, 3][..]);
/// assert_eq!(shape.dims, vec![2, 3]);
/// ```
#[inline]
pub fn make_unique<T, A>(args: A) -> Box<T>
where
    T: From<A>,
{
    Box::new(T::from(args))
}

/// Allocate one value produced by a constructor closure
#[inline]
pub fn make_unique_with<T, F>(construct: F) -> Box<T>
where
    F: FnOnce() -> T,
{
    Box::new(construct())
}

/// Allocate `len` default-constructed elements
///
/// `S` is the unsized slice type, e.g. `make_unique_array::<[f32]>(16)`.
#[inline]
pub fn make_unique_array<S>(len: usize) -> Box<S>
where
    S: RuntimeExtent + ?Sized,
{
    S::alloc_default(len)
}

/// Array types whose length is only known at run time
///
/// Implemented for `[T]` only. Fixed-extent arrays `[T; N]` deliberately do
/// not implement it, which is what rejects them in [`make_unique_array`].
pub trait RuntimeExtent {
    /// Element type
    type Elem: Default;

    /// Allocate `len` default elements
    fn alloc_default(len: usize) -> Box<Self>;
}

impl<T: Default> RuntimeExtent for [T] {
    type Elem = T;

    fn alloc_default(len: usize) -> Box<[T]> {
        std::iter::repeat_with(T::default).take(len).collect()
    }
}
