//! Driver errors

/// Errors reported by [`Terminal`](crate::Terminal)
///
/// Off-panel pixels and cells are clipped, never reported. The two
/// conditions a caller can act on are a failing bus and a cursor column
/// the host could not have meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The transport failed; the panel may be out of sync with the
    /// frame buffer until the next [`flush`](crate::Terminal::flush)
    Transport(E),
    /// `ESC '='` column byte outside `' '..='/'`
    ///
    /// The cursor was clamped into range and the sequence completed.
    ColumnOutOfRange {
        /// Raw column byte as received
        requested: u8,
    },
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Transport(e)
    }
}

impl<E> Error<E> {
    /// Check if this is a transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}
