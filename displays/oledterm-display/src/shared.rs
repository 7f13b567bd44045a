//! Terminal shared between several producers
//!
//! [`Terminal`] holds all of its state inline and is not internally
//! locked. When more than one task or interrupt writes to the panel,
//! wrap it in a [`SharedTerminal`]: every call runs with the mutex held,
//! so escape sequences from different producers cannot interleave
//! inside a single call.
//!
//! ```ignore
//! static OLED: SharedTerminal<CriticalSectionRawMutex, Transport> = ...;
//!
//! OLED.write_str("\x1e Ready")?;
//! OLED.lock(|term| term.flush())?;
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use oledterm_hal::DisplayTransport;

use crate::error::Error;
use crate::terminal::Terminal;

/// Mutex-guarded [`Terminal`]
pub struct SharedTerminal<M: RawMutex, T> {
    inner: Mutex<M, RefCell<Terminal<T>>>,
}

impl<M: RawMutex, T: DisplayTransport> SharedTerminal<M, T> {
    /// Wrap a terminal
    pub const fn new(terminal: Terminal<T>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(terminal)),
        }
    }

    /// Run `f` with exclusive access to the terminal
    ///
    /// Calling back into this `SharedTerminal` from inside `f` panics.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Terminal<T>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Feed one byte
    pub fn feed(&self, byte: u8) -> Result<(), Error<T::Error>> {
        self.lock(|term| term.feed(byte))
    }

    /// Feed a whole string under one lock
    pub fn write_str(&self, s: &str) -> Result<(), Error<T::Error>> {
        self.lock(|term| term.feed_bytes(s.as_bytes()))
    }

    /// Recover the terminal
    pub fn into_inner(self) -> Terminal<T> {
        self.inner.into_inner().into_inner()
    }
}
