//! Frame-synchronous shared values.
//!
//! A [`SharedValue`] is the single writable handle to an `f64` that changes
//! every display frame (a carousel translation, a fractional route position).
//! Any number of [`SharedValueReader`]s can observe it from any thread
//! without locking and without a commit step. Writers are never cloned: the
//! owner of the `SharedValue` is the only component allowed to move it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Writable handle to a frame-synchronous value.
pub struct SharedValue {
    cell: Arc<AtomicU64>,
}

impl SharedValue {
    /// Create a new value. Non-finite input is stored as `0.0`.
    #[must_use]
    pub fn new(initial: f64) -> Self {
        Self {
            cell: Arc::new(AtomicU64::new(finite_or_zero(initial).to_bits())),
        }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.cell.load(Ordering::Acquire))
    }

    /// Overwrite the value. Non-finite input is ignored so that a bad frame
    /// never poisons the readers.
    pub fn set(&self, value: f64) {
        if value.is_finite() {
            self.cell.store(value.to_bits(), Ordering::Release);
        }
    }

    /// A read-only handle observing this value.
    #[must_use]
    pub fn reader(&self) -> SharedValueReader {
        SharedValueReader {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl fmt::Debug for SharedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedValue").field(&self.get()).finish()
    }
}

/// Read-only handle to a [`SharedValue`].
#[derive(Clone)]
pub struct SharedValueReader {
    cell: Arc<AtomicU64>,
}

impl SharedValueReader {
    /// Current value.
    #[must_use]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.cell.load(Ordering::Acquire))
    }

    /// A reader that always yields `value`, for presentation code driven
    /// outside a carousel.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        SharedValue::new(value).reader()
    }
}

impl fmt::Debug for SharedValueReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedValueReader").field(&self.get()).finish()
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
