//! Pluggable locking discipline for the domain index.
//!
//! The index is generic over a [`LockStrategy`] rather than hard-wiring a
//! lock: [`Shared`] wraps a reader/writer lock for concurrent use, while
//! [`SingleThreaded`] wraps a `RefCell` and costs nothing beyond a borrow
//! flag. The single-threaded variant is `!Sync`, so handing it to another
//! thread is a compile error rather than a data race.
//!
//! Guards release on drop, on every exit path.

use std::cell::{Ref, RefCell, RefMut};
use std::ops::{Deref, DerefMut};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared/exclusive access to a value, selected at index construction time.
pub trait LockStrategy<T> {
    type ReadGuard<'a>: Deref<Target = T>
    where
        Self: 'a;
    type WriteGuard<'a>: DerefMut<Target = T>
    where
        Self: 'a;

    fn new(value: T) -> Self;

    /// Acquires shared access, blocking in the concurrent variant while a
    /// writer holds the lock.
    fn read(&self) -> Self::ReadGuard<'_>;

    /// Acquires exclusive access.
    fn write(&self) -> Self::WriteGuard<'_>;
}

/// Multi-reader/single-writer locking for concurrent use.
#[derive(Debug, Default)]
pub struct Shared<T>(RwLock<T>);

impl<T> LockStrategy<T> for Shared<T> {
    type ReadGuard<'a>
        = RwLockReadGuard<'a, T>
    where
        Self: 'a;
    type WriteGuard<'a>
        = RwLockWriteGuard<'a, T>
    where
        Self: 'a;

    fn new(value: T) -> Self {
        Self(RwLock::new(value))
    }

    fn read(&self) -> Self::ReadGuard<'_> {
        self.0.read()
    }

    fn write(&self) -> Self::WriteGuard<'_> {
        self.0.write()
    }
}

/// No-synchronization variant for single-threaded embedders.
#[derive(Debug, Default)]
pub struct SingleThreaded<T>(RefCell<T>);

impl<T> LockStrategy<T> for SingleThreaded<T> {
    type ReadGuard<'a>
        = Ref<'a, T>
    where
        Self: 'a;
    type WriteGuard<'a>
        = RefMut<'a, T>
    where
        Self: 'a;

    fn new(value: T) -> Self {
        Self(RefCell::new(value))
    }

    fn read(&self) -> Self::ReadGuard<'_> {
        self.0.borrow()
    }

    fn write(&self) -> Self::WriteGuard<'_> {
        self.0.borrow_mut()
    }
}
