//! Binary combinators for folding or merging two candidates into one
//!
//! Plain `fn` pointers so callers can pick one at runtime, e.g. from a
//! configured policy, and pass it to `reduce` or a map merge.

/// Keep the first argument
#[inline]
#[must_use]
pub fn first_arg<T>() -> fn(T, T) -> T {
    |a, _| a
}

/// Keep the second argument
#[inline]
#[must_use]
pub fn last_arg<T>() -> fn(T, T) -> T {
    |_, b| b
}

/// Keep the first present value
#[inline]
#[must_use]
pub fn first_some<T>() -> fn(Option<T>, Option<T>) -> Option<T> {
    |a, b| a.or(b)
}

/// Keep the second value when present, otherwise the first
#[inline]
#[must_use]
pub fn last_some<T>() -> fn(Option<T>, Option<T>) -> Option<T> {
    |a, b| b.or(a)
}
