//! Helpers for safely mutating environment variables in tests.
//!
//! Each mutation acquires a global mutex for the duration of the operation
//! and returns an RAII guard that restores the previous state when dropped,
//! removing the variable if it was previously absent. Guards for the same
//! key stack and restore in LIFO order.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _g = env::set_var("KEY", "VALUE");
//! // `KEY` is set to `VALUE` for the duration of the guard.
//! ```

use parking_lot::Mutex;
use std::env;
use std::ffi::{OsStr, OsString};

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
#[derive(Debug)]
pub struct VarGuard {
    key: String,
    saved: Option<OsString>,
}

/// Sets an environment variable and returns a guard restoring its prior
/// value.
///
/// Access to the process environment is serialised by a global mutex during
/// the mutation and again during restoration.
pub fn set_var<K, V>(key: K, value: V) -> VarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    let key_string = key.into();
    let _lock = ENV_MUTEX.lock();
    let saved = env::var_os(&key_string);
    // SAFETY: the global mutex serialises every mutation made through this
    // module.
    unsafe { env::set_var(&key_string, value.as_ref()) };
    VarGuard {
        key: key_string,
        saved,
    }
}

/// Removes an environment variable and returns a guard restoring its prior
/// value.
pub fn remove_var<K>(key: K) -> VarGuard
where
    K: Into<String>,
{
    let key_string = key.into();
    let _lock = ENV_MUTEX.lock();
    let saved = env::var_os(&key_string);
    // SAFETY: the global mutex serialises every mutation made through this
    // module.
    unsafe { env::remove_var(&key_string) };
    VarGuard {
        key: key_string,
        saved,
    }
}

/// Runs a closure while holding the global environment lock.
pub fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_MUTEX.lock();
    f()
}

impl Drop for VarGuard {
    fn drop(&mut self) {
        let _lock = ENV_MUTEX.lock();
        if let Some(value) = self.saved.take() {
            // SAFETY: restoration happens while the global mutex is held.
            unsafe { env::set_var(&self.key, &value) };
        } else {
            // SAFETY: restoration happens while the global mutex is held.
            unsafe { env::remove_var(&self.key) };
        }
    }
}
