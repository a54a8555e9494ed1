//! Read/write lock with a feature-selected backend.
//!
//! `parking_lot::RwLock` when the `fast-lock` feature is enabled,
//! `std::sync::RwLock` otherwise. The std variant recovers from poisoning:
//! the guarded value is only ever replaced whole, so a panic elsewhere cannot
//! leave it half-written.

#[cfg(feature = "fast-lock")]
use parking_lot::RwLock as ParkingLotRwLock;

#[cfg(not(feature = "fast-lock"))]
use std::sync::RwLock as StdRwLock;

/// RwLock type that conditionally uses parking_lot or std.
///
/// # Example
///
/// ```rust
/// use hoverscope::sync::{read, write, RwLock};
///
/// let value = RwLock::new(1);
/// *write(&value) = 2;
/// assert_eq!(*read(&value), 2);
/// ```
#[cfg(feature = "fast-lock")]
pub type RwLock<T> = ParkingLotRwLock<T>;

#[cfg(not(feature = "fast-lock"))]
pub type RwLock<T> = StdRwLock<T>;

/// Acquire a shared read guard.
#[cfg(feature = "fast-lock")]
pub fn read<T>(lock: &RwLock<T>) -> parking_lot::RwLockReadGuard<'_, T> {
    lock.read()
}

/// Acquire a shared read guard, recovering from poisoning.
#[cfg(not(feature = "fast-lock"))]
pub fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

/// Acquire an exclusive write guard.
#[cfg(feature = "fast-lock")]
pub fn write<T>(lock: &RwLock<T>) -> parking_lot::RwLockWriteGuard<'_, T> {
    lock.write()
}

/// Acquire an exclusive write guard, recovering from poisoning.
#[cfg(not(feature = "fast-lock"))]
pub fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}
