//! Bounds-checked decode engine over an open file.
//!
//! This module provides [`crate::reader::FileReader`], the reading half of the I/O layer.
//! It is built on a [`crate::Handle`] opened for reading and exposes a raw bounds-checked
//! [`crate::reader::FileReader::read`] plus typed scalar decoders that are all pure
//! post-processing of a raw read of the appropriate width - they inherit its bounds and
//! consistency guarantees.
//!
//! # Key Components
//!
//! - [`crate::reader::FileReader::read`] - The single raw read primitive
//! - [`crate::reader::FileReader::read_le`] / [`crate::reader::FileReader::read_be`] -
//!   Fixed-width typed decoders over [`crate::codec::Scalar`]
//! - [`crate::reader::FileReader::read_int_be`] and friends - Variable-width (1..=8 byte)
//!   two's-complement decoders
//! - [`crate::reader::FileReader::read_string`] - Byte-length-delimited UTF-8 text
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use binfile::FileReader;
//!
//! let mut reader = FileReader::new("data.bin");
//! reader.init()?;
//!
//! let magic: u32 = reader.read_be()?;
//! let count = reader.read_uint_le(3)?;
//! reader.offset(4);
//! let name = reader.read_string(16)?;
//!
//! reader.destroy()?;
//! # Ok::<(), binfile::Error>(())
//! ```
//!
//! # Error Handling
//!
//! Reading past the known end of the file always fails hard with
//! [`crate::Error::InsufficientData`] before any I/O - there is no partial-read mode. A
//! short transfer from the operating system (e.g. the file was truncated concurrently)
//! surfaces as [`crate::Error::TornIo`] with the cursor unmoved, since a partially filled
//! buffer cannot be trusted.

use log::trace;

use crate::codec::{self, ByteOrder, Scalar};
use crate::handle::{Handle, Mode, Target};
use crate::{Error, Result};

/// Reader over one binary file with a movable cursor and typed scalar decoders.
///
/// Construction performs no I/O; [`FileReader::init`] acquires the descriptor and loads
/// the file size, after which every read validates against that size, performs exactly
/// one positioned read, and advances the cursor by the number of bytes consumed.
/// [`FileReader::destroy`] releases the descriptor (unless it was adopted from the
/// caller, in which case it stays open).
///
/// # Examples
///
/// ```rust,no_run
/// use binfile::FileReader;
///
/// let mut reader = FileReader::new("image.bin");
/// reader.init()?;
/// let header = reader.read(8)?;
/// println!("header: {:02x?}, cursor now {}", header, reader.pos());
/// reader.destroy()?;
/// # Ok::<(), binfile::Error>(())
/// ```
#[derive(Debug)]
pub struct FileReader {
    handle: Handle,
}

impl FileReader {
    /// Create a reader for the given target with the default read-only mode.
    ///
    /// Accepts a path (`&str`, `String`, `&Path`, `PathBuf`) or an already-open raw
    /// descriptor; see [`crate::Target`]. Performs no I/O.
    pub fn new(target: impl Into<Target>) -> Self {
        FileReader {
            handle: Handle::new(target, Mode::Read),
        }
    }

    /// Create a reader with an explicit open mode for path targets.
    pub fn with_mode(target: impl Into<Target>, mode: Mode) -> Self {
        FileReader {
            handle: Handle::new(target, mode),
        }
    }

    /// Acquire the descriptor and load the file size. See [`crate::Handle::init`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the open or the metadata query fails, or
    /// [`crate::Error::Closed`] if the reader has been destroyed.
    pub fn init(&mut self) -> Result<()> {
        self.handle.init()
    }

    /// Release the descriptor. See [`crate::Handle::destroy`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Closed`] if the reader was never initialized or has
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

    /// File length in bytes, as loaded from metadata at `init` time.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.handle.len()
    }

    /// Returns `true` if the file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handle.is_empty()
    }

    /// Access the underlying handle.
    #[must_use]
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Re-query the file size from metadata, e.g. after another party extended the file.
    /// See [`crate::Handle::refresh_size`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Closed`] if the reader is not open, or
    /// [`crate::Error::Io`] if the metadata query fails.
    pub fn refresh_size(&mut self) -> Result<()> {
        self.handle.refresh_size()
    }

    /// Returns `true` if `size` bytes can be read from the current cursor without
    /// running past the end of the file.
    #[must_use]
    pub fn is_readable(&self, size: usize) -> bool {
        self.available() >= size as u64
    }

    /// Read exactly `size` bytes at the cursor and advance it.
    ///
    /// This is the single raw primitive every typed decoder is built on. A `size` of
    /// zero is a successful no-op that neither fails nor moves the cursor.
    ///
    /// # Errors
    /// - [`crate::Error::Closed`] if the reader is not open
    /// - [`crate::Error::InsufficientData`] if fewer than `size` bytes remain; raised
    ///   before any I/O, cursor unmoved
    /// - [`crate::Error::TornIo`] if the operating system returned fewer bytes than
    ///   requested; cursor unmoved
    /// - [`crate::Error::Io`] if the positioned read itself fails
    pub fn read(&mut self, size: usize) -> Result<Vec<u8>> {
        self.handle.descriptor()?;
        if size == 0 {
            return Ok(Vec::new());
        }

        let available = self.available();
        if (size as u64) > available {
            return Err(Error::InsufficientData {
                requested: size,
                available,
            });
        }

        let mut buffer = vec![0u8; size];
        let actual = self.handle.read_at(&mut buffer, self.handle.pos())?;
        if actual != size {
            return Err(Error::TornIo {
                expected: size,
                actual,
            });
        }

        trace!("read {} bytes at {}", size, self.handle.pos());
        self.handle.advance(size as u64);
        Ok(buffer)
    }

    /// Read `size` bytes and interpret them as UTF-8 text.
    ///
    /// `size` is a byte length, not a character count. Invalid UTF-8 sequences are
    /// replaced rather than rejected, so this never fails on content - only on bounds
    /// or I/O, exactly as [`FileReader::read`] does.
    ///
    /// # Errors
    /// Same conditions as [`FileReader::read`].
    pub fn read_string(&mut self, size: usize) -> Result<String> {
        let bytes = self.read(size)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read a fixed-width scalar in little-endian byte order and advance the cursor.
    ///
    /// Covers every [`crate::codec::Scalar`] type: integers of 1, 2, 4 and 8 bytes in
    /// both signednesses plus IEEE-754 single and double precision floats.
    ///
    /// # Errors
    /// Same conditions as [`FileReader::read`] for the width of `T`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use binfile::FileReader;
    ///
    /// let mut reader = FileReader::new("data.bin");
    /// reader.init()?;
    /// let flags: u16 = reader.read_le()?;
    /// let scale: f64 = reader.read_le()?;
    /// # Ok::<(), binfile::Error>(())
    /// ```
    pub fn read_le<T: Scalar>(&mut self) -> Result<T> {
        let bytes = self.read(std::mem::size_of::<T>())?;
        codec::decode_le(&bytes)
    }

    /// Read a fixed-width scalar in big-endian byte order and advance the cursor.
    ///
    /// # Errors
    /// Same conditions as [`FileReader::read`] for the width of `T`.
    pub fn read_be<T: Scalar>(&mut self) -> Result<T> {
        let bytes = self.read(std::mem::size_of::<T>())?;
        codec::decode_be(&bytes)
    }

    /// Read a signed two's-complement integer of `width` bytes, big-endian.
    ///
    /// Widths 1 through 8 are supported; the result is sign-extended to `i64`.
    ///
    /// # Errors
    /// [`crate::Error::UnsupportedWidth`] for widths outside `1..=8`, raised before any
    /// I/O; otherwise the same conditions as [`FileReader::read`].
    pub fn read_int_be(&mut self, width: usize) -> Result<i64> {
        let bytes = self.read_width("read_int_be", width)?;
        codec::decode_int(&bytes, ByteOrder::Big)
    }

    /// Read a signed two's-complement integer of `width` bytes, little-endian.
    ///
    /// # Errors
    /// [`crate::Error::UnsupportedWidth`] for widths outside `1..=8`, raised before any
    /// I/O; otherwise the same conditions as [`FileReader::read`].
    pub fn read_int_le(&mut self, width: usize) -> Result<i64> {
        let bytes = self.read_width("read_int_le", width)?;
        codec::decode_int(&bytes, ByteOrder::Little)
    }

    /// Read an unsigned integer of `width` bytes, big-endian.
    ///
    /// # Errors
    /// [`crate::Error::UnsupportedWidth`] for widths outside `1..=8`, raised before any
    /// I/O; otherwise the same conditions as [`FileReader::read`].
    pub fn read_uint_be(&mut self, width: usize) -> Result<u64> {
        let bytes = self.read_width("read_uint_be", width)?;
        codec::decode_uint(&bytes, ByteOrder::Big)
    }

    /// Read an unsigned integer of `width` bytes, little-endian.
    ///
    /// # Errors
    /// [`crate::Error::UnsupportedWidth`] for widths outside `1..=8`, raised before any
    /// I/O; otherwise the same conditions as [`FileReader::read`].
    pub fn read_uint_le(&mut self, width: usize) -> Result<u64> {
        let bytes = self.read_width("read_uint_le", width)?;
        codec::decode_uint(&bytes, ByteOrder::Little)
    }

    fn read_width(&mut self, operation: &'static str, width: usize) -> Result<Vec<u8>> {
        codec::check_width(operation, width)?;
        self.read(width)
    }

    fn available(&self) -> u64 {
        self.handle.len().saturating_sub(self.handle.pos())
    }
}
