//! Encode engine over an open file with tracked logical size.
//!
//! This module provides [`crate::writer::FileWriter`], the writing half of the I/O layer.
//! It mirrors [`crate::FileReader`] symmetrically: a single raw
//! [`crate::writer::FileWriter::write`] primitive, plus typed scalar encoders that build
//! a correctly sized buffer and delegate to it.
//!
//! # Size Tracking
//!
//! Unlike the reader, whose length is sourced purely from file metadata, the writer owns
//! its `size`: it is initialized from metadata at `init` time and then grown by every
//! write that moves the cursor past the previous end. The tracked size is monotonically
//! non-decreasing - overwriting earlier territory never shrinks it, and it is never
//! re-queried from the operating system between writes.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use binfile::FileWriter;
//!
//! let mut writer = FileWriter::new("out.bin");
//! writer.init()?;
//!
//! writer.write_be(0x1234_5678u32)?;
//! writer.write_string("hi")?;
//! writer.write_uint_le(300, 2)?;
//! assert_eq!(writer.len(), 8);
//!
//! writer.destroy()?;
//! # Ok::<(), binfile::Error>(())
//! ```
//!
//! # Error Handling
//!
//! A short transfer surfaces as [`crate::Error::TornIo`] with the cursor and tracked
//! size unmoved; the bytes that may already have reached the file are indeterminate.
//! Width and range violations of the variable-width encoders fail before any I/O.

use log::trace;

use crate::codec::{self, ByteOrder, Scalar};
use crate::handle::{Handle, Mode, Target};
use crate::{Error, Result};

/// Writer over one binary file with a movable cursor, typed scalar encoders and a
/// tracked logical file size.
///
/// Construction performs no I/O; [`FileWriter::init`] acquires the descriptor and seeds
/// the tracked size from metadata. Every write performs exactly one positioned write at
/// the cursor, advances the cursor by the written length, and grows the tracked size if
/// the cursor now exceeds it. Writing at a cursor beyond the current size (a hole) is
/// permitted; the gap's content is whatever the filesystem produces for unwritten
/// regions - this layer does not zero-fill.
///
/// # Examples
///
/// ```rust,no_run
/// use binfile::FileWriter;
///
/// let mut writer = FileWriter::new("out.bin");
/// writer.init()?;
/// writer.write(&[0xDE, 0xAD, 0xBE, 0xEF])?;
/// assert_eq!(writer.pos(), 4);
/// assert_eq!(writer.len(), 4);
/// writer.destroy()?;
/// # Ok::<(), binfile::Error>(())
/// ```
#[derive(Debug)]
pub struct FileWriter {
    handle: Handle,
}

impl FileWriter {
    /// Create a writer for the given target with the default write/create mode
    /// (truncates an existing file, like the classic `"w"` flag).
    ///
    /// Accepts a path or an already-open raw descriptor; see [`crate::Target`].
    /// Performs no I/O.
    pub fn new(target: impl Into<Target>) -> Self {
        FileWriter {
            handle: Handle::new(target, Mode::Write),
        }
    }

    /// Create a writer with an explicit open mode for path targets
    /// (e.g. [`crate::Mode::ReadWrite`] to preserve existing content).
    pub fn with_mode(target: impl Into<Target>, mode: Mode) -> Self {
        FileWriter {
            handle: Handle::new(target, mode),
        }
    }

    /// Acquire the descriptor and seed the tracked size from metadata.
    /// See [`crate::Handle::init`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the open or the metadata query fails, or
    /// [`crate::Error::Closed`] if the writer has been destroyed.
    pub fn init(&mut self) -> Result<()> {
        self.handle.init()
    }

    /// Release the descriptor. See [`crate::Handle::destroy`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Closed`] if the writer was never initialized or has
    /// already been destroyed.
    pub fn destroy(&mut self) -> Result<()> {
        self.handle.destroy()
    }

    /// Advance the cursor by `n` bytes (no I/O). Returns `&mut Self` for chaining.
    pub fn offset(&mut self, n: i64) -> &mut Self {
        self.handle.offset(n);
        self
    }

    /// Set the cursor to an absolute byte offset (no I/O). Returns `&mut Self`.
    pub fn set_pointer(&mut self, pointer: u64) -> &mut Self {
        self.handle.set_pointer(pointer);
        self
    }

    /// Current cursor position in bytes.
    #[must_use]
    pub fn pos(&self) -> u64 {
        self.handle.pos()
    }

    /// Tracked logical file size in bytes.
    ///
    /// Writer-owned: seeded from metadata at `init`, grown monotonically by writes.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.handle.len()
    }

    /// Returns `true` if the tracked size is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handle.is_empty()
    }

    /// Access the underlying handle.
    #[must_use]
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Re-sync the tracked size from file metadata.
    ///
    /// Normally unnecessary - writes keep the tracked size consistent on their own -
    /// but available when the file is known to have changed underneath this writer.
    /// See [`crate::Handle::refresh_size`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Closed`] if the writer is not open, or
    /// [`crate::Error::Io`] if the metadata query fails.
    pub fn refresh_size(&mut self) -> Result<()> {
        self.handle.refresh_size()
    }

    /// Write all of `data` at the cursor and advance it.
    ///
    /// This is the single raw primitive every typed encoder is built on. Issues exactly
    /// one positioned write; on success the cursor advances by `data.len()` and the
    /// tracked size becomes `max(size, cursor)`. An empty `data` is a successful no-op.
    ///
    /// # Errors
    /// - [`crate::Error::Closed`] if the writer is not open
    /// - [`crate::Error::TornIo`] if the operating system accepted fewer bytes than
    ///   supplied; the cursor and tracked size are left unmoved even though the file may
    ///   hold a partial prefix of `data`
    /// - [`crate::Error::Io`] if the positioned write itself fails
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        self.handle.descriptor()?;
        if data.is_empty() {
            return Ok(());
        }

        let actual = self.handle.write_at(data, self.handle.pos())?;
        if actual != data.len() {
            return Err(Error::TornIo {
                expected: data.len(),
                actual,
            });
        }

        trace!("wrote {} bytes at {}", data.len(), self.handle.pos());
        self.handle.advance(data.len() as u64);
        let end = self.handle.pos();
        self.handle.grow_to(end);
        Ok(())
    }

    /// Write a string as its UTF-8 bytes.
    ///
    /// # Errors
    /// Same conditions as [`FileWriter::write`].
    pub fn write_string(&mut self, text: &str) -> Result<()> {
        self.write(text.as_bytes())
    }

    /// Write a fixed-width scalar in little-endian byte order.
    ///
    /// Covers every [`crate::codec::Scalar`] type, mirroring
    /// [`crate::FileReader::read_le`].
    ///
    /// # Errors
    /// Same conditions as [`FileWriter::write`].
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use binfile::FileWriter;
    ///
    /// let mut writer = FileWriter::new("out.bin");
    /// writer.init()?;
    /// writer.write_le(0xFFu8)?;
    /// writer.write_le(2.5f64)?;
    /// # Ok::<(), binfile::Error>(())
    /// ```
    pub fn write_le<T: Scalar>(&mut self, value: T) -> Result<()> {
        let bytes = codec::encode_le(value);
        self.write(&bytes)
    }

    /// Write a fixed-width scalar in big-endian byte order.
    ///
    /// # Errors
    /// Same conditions as [`FileWriter::write`].
    pub fn write_be<T: Scalar>(&mut self, value: T) -> Result<()> {
        let bytes = codec::encode_be(value);
        self.write(&bytes)
    }

    /// Write a signed two's-complement integer in `width` bytes, big-endian.
    ///
    /// # Errors
    /// [`crate::Error::UnsupportedWidth`] for widths outside `1..=8` and
    /// [`crate::Error::ValueOutOfRange`] if `value` does not fit in `width` bytes, both
    /// raised before any I/O; otherwise the same conditions as [`FileWriter::write`].
    pub fn write_int_be(&mut self, value: i64, width: usize) -> Result<()> {
        codec::check_width("write_int_be", width)?;
        let bytes = codec::encode_int(value, width, ByteOrder::Big)?;
        self.write(&bytes)
    }

    /// Write a signed two's-complement integer in `width` bytes, little-endian.
    ///
    /// # Errors
    /// [`crate::Error::UnsupportedWidth`] for widths outside `1..=8` and
    /// [`crate::Error::ValueOutOfRange`] if `value` does not fit in `width` bytes, both
    /// raised before any I/O; otherwise the same conditions as [`FileWriter::write`].
    pub fn write_int_le(&mut self, value: i64, width: usize) -> Result<()> {
        codec::check_width("write_int_le", width)?;
        let bytes = codec::encode_int(value, width, ByteOrder::Little)?;
        self.write(&bytes)
    }

    /// Write an unsigned integer in `width` bytes, big-endian.
    ///
    /// # Errors
    /// [`crate::Error::UnsupportedWidth`] for widths outside `1..=8` and
    /// [`crate::Error::ValueOutOfRange`] if `value` does not fit in `width` bytes, both
    /// raised before any I/O; otherwise the same conditions as [`FileWriter::write`].
    pub fn write_uint_be(&mut self, value: u64, width: usize) -> Result<()> {
        codec::check_width("write_uint_be", width)?;
        let bytes = codec::encode_uint(value, width, ByteOrder::Big)?;
        self.write(&bytes)
    }

    /// Write an unsigned integer in `width` bytes, little-endian.
    ///
    /// # Errors
    /// [`crate::Error::UnsupportedWidth`] for widths outside `1..=8` and
    /// [`crate::Error::ValueOutOfRange`] if `value` does not fit in `width` bytes, both
    /// raised before any I/O; otherwise the same conditions as [`FileWriter::write`].
    pub fn write_uint_le(&mut self, value: u64, width: usize) -> Result<()> {
        codec::check_width("write_uint_le", width)?;
        let bytes = codec::encode_uint(value, width, ByteOrder::Little)?;
        self.write(&bytes)
    }
}
