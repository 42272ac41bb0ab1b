//! Double-checked lazy initialization.

use std::sync::{Mutex, OnceLock, PoisonError};

/// A value constructed at most once, with lock-free reads afterwards.
///
/// Construction checks the cell without locking, then takes the mutex and
/// checks again before running the initializer. Once published, `get` and
/// the fast path of `get_or_try_init` never touch the mutex.
#[derive(Debug)]
pub struct Singleton<T> {
    cell: OnceLock<T>,
    init_lock: Mutex<()>,
}

impl<T> Singleton<T> {
    /// Creates an empty cell; usable in `static` items.
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }

    /// Returns the value if it has been constructed.
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Returns the value, constructing it with `init` if no one has yet.
    ///
    /// `init` runs at most once across all threads unless it fails, in which
    /// case the cell stays empty and a later caller may try again.
    pub fn get_or_try_init<E, F>(&self, init: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.cell.get() {
            return Ok(value);
        }

        // A panicking initializer leaves the cell empty, so the guard is still sound.
        let _guard = self
            .init_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(value) = self.cell.get() {
            return Ok(value);
        }

        let value = init()?;
        Ok(self.cell.get_or_init(|| value))
    }
}

impl<T> Default for Singleton<T> {
    fn default() -> Self {
        Self::new()
    }
}
