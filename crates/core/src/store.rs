use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Store owned by one manager. Writers hold the guard for the whole
/// read-modify-write sequence; readers clone what they need out of it.
#[derive(Debug, Default)]
pub(crate) struct Store<T> {
    inner: RwLock<T>,
}

impl<T> Store<T> {
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, T> {
        match self.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, T> {
        match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
