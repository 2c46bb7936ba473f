use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every failure of the I/O layer is surfaced synchronously to the immediate caller as one of
/// these variants, so that calling code can branch on kind. Nothing is retried or recovered
/// internally - retry policy belongs to a caller that understands why an operation failed.
///
/// # Error Categories
///
/// ## Underlying I/O
/// - [`Error::Io`] - The open/close/stat/read/write primitive itself failed
///
/// ## Bounds and Consistency
/// - [`Error::InsufficientData`] - A read was requested past the known end of the file
/// - [`Error::TornIo`] - A read or write completed but moved fewer bytes than requested
///
/// ## Preconditions
/// - [`Error::UnsupportedWidth`] - A variable-width integer operation was asked for an
///   unsupported byte count
/// - [`Error::ValueOutOfRange`] - A value does not fit in the requested encoding width
/// - [`Error::Closed`] - The handle was never initialized or has been destroyed
///
/// # Examples
///
/// ```rust,no_run
/// use binfile::{Error, FileReader};
///
/// let mut reader = FileReader::new("data.bin");
/// match reader.init() {
///     Ok(()) => println!("opened"),
///     Err(Error::Io(io_err)) => eprintln!("I/O error: {}", io_err),
///     Err(e) => eprintln!("other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    ///
    /// Wraps the standard I/O error returned by the underlying open, close, metadata,
    /// positioned-read or positioned-write primitive (permission denied, not found,
    /// disk error, ...). Always surfaced to the caller unmodified, never retried.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Not enough data between the cursor and the end of the file to satisfy a read.
    ///
    /// Raised before any I/O is attempted; the cursor is left unchanged. Reading past
    /// end-of-file is always a hard failure - there is no "read what's available" mode.
    #[error("not enough data to read: requested {requested} bytes, {available} available")]
    InsufficientData {
        /// Number of bytes the caller asked for
        requested: usize,
        /// Number of bytes between the cursor and the end of the file
        available: u64,
    },

    /// A positioned read or write transferred fewer bytes than requested.
    ///
    /// The underlying primitive reported success but moved a short count (for example the
    /// file was truncated concurrently by another process). The cursor and, for writers,
    /// the tracked file size are left unmoved; a partially filled buffer is never returned.
    #[error("torn I/O: expected {expected} bytes, transferred {actual}")]
    TornIo {
        /// Number of bytes the operation should have transferred
        expected: usize,
        /// Number of bytes actually transferred
        actual: usize,
    },

    /// A variable-width integer operation was asked for a width outside `1..=8` bytes.
    ///
    /// Raised as an explicit precondition, before any I/O or cursor movement, on both
    /// the decode and the encode path.
    #[error("{operation} does not support a width of {width} bytes")]
    UnsupportedWidth {
        /// Name of the operation that rejected the width
        operation: &'static str,
        /// The rejected byte count
        width: usize,
    },

    /// A value does not fit in the requested variable-width encoding.
    ///
    /// Raised by the variable-width encoders before any I/O when the value cannot be
    /// represented in `width` bytes with the requested signedness.
    #[error("value does not fit in {width} bytes")]
    ValueOutOfRange {
        /// The encoding width the value was checked against
        width: usize,
    },

    /// An operation was attempted on a handle that is not open.
    ///
    /// The handle was either never initialized with `init()` or has already been torn
    /// down with `destroy()`. A destroyed handle is dead; no further operations are valid.
    #[error("handle is not open")]
    Closed,
}
