//! Contains the definition of [`Handler`], the sink through which every
//! phase of the compiler reports its diagnostics, along with the stock
//! implementations used by drivers and tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use derive_more::{Deref, DerefMut};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Represents a trait responsible for receiving diagnostics reported by the
/// compiler.
///
/// The compiler never stops at the first problem it finds; it keeps going
/// and pushes everything it diagnoses into a [`Handler`]. What happens to
/// the diagnostics afterwards is the implementor's business.
pub trait Handler<T>: Send + Sync {
    /// Receives a diagnostic and handles it.
    fn receive(&self, diagnostic: T);
}

/// Is a [`Handler`] implementation that stores all received diagnostics in
/// a vector, preserving the order in which they were received.
#[derive(Debug, Deref, DerefMut)]
pub struct Storage<T: Send + Sync> {
    diagnostics: RwLock<Vec<T>>,
}

impl<T: Send + Sync> Storage<T> {
    /// Creates a new empty [`Storage`].
    #[must_use]
    pub const fn new() -> Self { Self { diagnostics: RwLock::new(Vec::new()) } }

    /// Consumes the [`Storage`] and returns the stored diagnostics.
    pub fn into_vec(self) -> Vec<T> { self.diagnostics.into_inner() }

    /// Returns a read guard over the stored diagnostics.
    pub fn as_vec(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.diagnostics.read()
    }

    /// Returns a write guard over the stored diagnostics.
    pub fn as_vec_mut(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.diagnostics.write()
    }

    /// Returns `true` if no diagnostics have been received.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.diagnostics.read().is_empty() }

    /// Moves all stored diagnostics into the given handler, leaving this
    /// [`Storage`] empty.
    pub fn propagate<U: From<T>, H: ?Sized + Handler<U>>(&self, handler: &H) {
        let diagnostics = std::mem::take(&mut *self.as_vec_mut());

        for diagnostic in diagnostics {
            handler.receive(diagnostic.into());
        }
    }

    /// Clears all stored diagnostics.
    pub fn clear(&self) { self.diagnostics.write().clear(); }
}

impl<T: Send + Sync> Default for Storage<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Send + Sync, U: Into<T>> Handler<U> for Storage<T> {
    fn receive(&self, diagnostic: U) {
        self.diagnostics.write().push(diagnostic.into());
    }
}

/// Is a [`Handler`] implementation that discards every diagnostic it
/// receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dummy;

impl<T> Handler<T> for Dummy {
    fn receive(&self, _diagnostic: T) {}
}

/// Is a [`Handler`] implementation that only counts how many diagnostics it
/// has received.
#[derive(Debug, Default)]
pub struct Counter {
    counter: AtomicUsize,
}

impl Counter {
    /// Returns the number of diagnostics received so far.
    #[must_use]
    pub fn count(&self) -> usize { self.counter.load(Ordering::Relaxed) }

    /// Resets the counter to zero.
    pub fn reset(&self) { self.counter.store(0, Ordering::Relaxed); }
}

impl<T> Handler<T> for Counter {
    fn receive(&self, _diagnostic: T) {
        self.counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Is a [`Handler`] implementation that panics on the first diagnostic it
/// receives, printing it along the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Panic;

impl<T: std::fmt::Debug> Handler<T> for Panic {
    fn receive(&self, diagnostic: T) {
        panic!("{diagnostic:?}");
    }
}
