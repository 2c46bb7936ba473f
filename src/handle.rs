//! Open-file session state shared by the reader and writer.
//!
//! This module provides the [`crate::handle::Handle`] type that owns one open binary file
//! session: the target being accessed, the live OS descriptor once acquired, the movable
//! byte cursor, and the last-known file size. [`crate::FileReader`] and
//! [`crate::FileWriter`] are both built on top of it.
//!
//! # Architecture
//!
//! The handle follows an explicit lifecycle: construction performs no I/O, `init()`
//! acquires the descriptor and loads the size from file metadata, and `destroy()` releases
//! the descriptor. Ownership of the descriptor is captured in the
//! [`crate::handle::Target`] sum type: a handle that opened a path owns its descriptor and
//! closes it on teardown, while a handle that adopted a caller-supplied raw descriptor
//! borrows it and must leave it open.
//!
//! Every read and write is a single positioned system call against the descriptor - there
//! is no buffering or caching layer between the cursor and the operating system.
//!
//! # Key Components
//!
//! - [`crate::handle::Handle`] - The session object owning cursor, size and descriptor
//! - [`crate::handle::Target`] - Owned path vs. borrowed descriptor
//! - [`crate::handle::Mode`] - Requested open mode
//! - [`crate::handle::RawDescriptor`] - Platform raw descriptor type (`RawFd` / `RawHandle`)
//!
//! # Concurrency
//!
//! A handle is single-owner: all mutating operations take `&mut self`, so no two
//! operations on the same handle can overlap and each bounds check observes the effects
//! of every prior operation. Callers needing concurrent access to the same underlying
//! file must open independent handles with independent cursors.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use log::debug;

use crate::{Error, Result};

/// Platform-specific raw descriptor type adopted by [`Target::Descriptor`].
///
/// `RawFd` on unix targets, `RawHandle` on windows targets.
#[cfg(unix)]
pub type RawDescriptor = std::os::unix::io::RawFd;

/// Platform-specific raw descriptor type adopted by [`Target::Descriptor`].
///
/// `RawFd` on unix targets, `RawHandle` on windows targets.
#[cfg(windows)]
pub type RawDescriptor = std::os::windows::io::RawHandle;

/// What a [`Handle`] operates on, and who owns the descriptor.
///
/// The variant decides the teardown behavior: a path-opened descriptor is owned by the
/// handle and closed by [`Handle::destroy`], while an adopted raw descriptor is borrowed
/// from the caller and left open on teardown.
///
/// # Examples
///
/// ```rust
/// use binfile::Target;
///
/// let by_path: Target = "/tmp/data.bin".into();
/// assert!(matches!(by_path, Target::Path(_)));
/// ```
#[derive(Debug, Clone)]
pub enum Target {
    /// A filesystem path; the handle opens and later closes the descriptor itself.
    Path(PathBuf),
    /// An externally owned, already-open descriptor; never closed by the handle.
    Descriptor(RawDescriptor),
}

impl From<&Path> for Target {
    fn from(path: &Path) -> Self {
        Target::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Target {
    fn from(path: PathBuf) -> Self {
        Target::Path(path)
    }
}

impl From<&str> for Target {
    fn from(path: &str) -> Self {
        Target::Path(PathBuf::from(path))
    }
}

impl From<String> for Target {
    fn from(path: String) -> Self {
        Target::Path(PathBuf::from(path))
    }
}

impl From<RawDescriptor> for Target {
    fn from(raw: RawDescriptor) -> Self {
        Target::Descriptor(raw)
    }
}

/// The open mode requested for a path target.
///
/// Ignored for adopted descriptors, whose access rights were decided by whoever opened
/// them. The variants map onto [`std::fs::OpenOptions`] as the classic `"r"` / `"w"` /
/// `"r+"` open flags do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Read-only; the file must exist. The default for [`crate::FileReader`].
    Read,
    /// Write-only; created if absent, truncated if present. The default for
    /// [`crate::FileWriter`].
    Write,
    /// Read and write; created if absent, existing content preserved.
    ReadWrite,
}

impl Mode {
    fn open_options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            Mode::Read => {
                options.read(true);
            }
            Mode::Write => {
                options.write(true).create(true).truncate(true);
            }
            Mode::ReadWrite => {
                options.read(true).write(true).create(true);
            }
        }
        options
    }
}

/// One open binary file session: descriptor, movable cursor and last-known size.
///
/// A handle is created without performing any I/O; [`Handle::init`] acquires the
/// descriptor and loads the size, after which read and write operations (issued through
/// [`crate::FileReader`] / [`crate::FileWriter`]) validate against the tracked size and
/// advance the cursor. [`Handle::destroy`] releases the descriptor; afterwards the handle
/// is dead and every operation fails with [`crate::Error::Closed`].
///
/// # Invariants
///
/// The cursor is never negative ([`Handle::offset`] saturates at zero), and after any
/// successful write the tracked size satisfies `size >= cursor`.
#[derive(Debug)]
pub struct Handle {
    /// What this handle operates on; decides descriptor ownership
    target: Target,
    /// Open mode used for path targets
    mode: Mode,
    /// The live descriptor, present only between `init` and `destroy`
    file: Option<File>,
    /// Byte offset at which the next read or write occurs
    cursor: u64,
    /// Last-known length of the file in bytes
    size: u64,
    /// Set once `destroy` has run; makes re-use of a dead handle detectable
    destroyed: bool,
}

impl Handle {
    /// Create a handle for the given target and mode. Performs no I/O.
    pub fn new(target: impl Into<Target>, mode: Mode) -> Self {
        Handle {
            target: target.into(),
            mode,
            file: None,
            cursor: 0,
            size: 0,
            destroyed: false,
        }
    }

    /// Acquire the descriptor and load the file size from metadata.
    ///
    /// For a path target this opens the file with the configured [`Mode`]; for a
    /// descriptor target it adopts the caller's descriptor directly. Calling `init` on a
    /// handle that is already open is a no-op.
    ///
    /// # Errors
    /// Returns [`crate::Error::Closed`] if the handle has been destroyed, or
    /// [`crate::Error::Io`] if the open or the metadata query fails.
    pub fn init(&mut self) -> Result<()> {
        if self.destroyed {
            return Err(Error::Closed);
        }
        if self.file.is_some() {
            return Ok(());
        }

        let file = match &self.target {
            Target::Path(path) => {
                let file = self.mode.open_options().open(path)?;
                debug!("opened {} ({:?})", path.display(), self.mode);
                file
            }
            Target::Descriptor(raw) => {
                debug!("adopted descriptor {:?}", raw);
                adopt_descriptor(*raw)
            }
        };

        self.file = Some(file);
        self.refresh_size()
    }

    /// Release the descriptor and mark the handle dead.
    ///
    /// An owned (path-opened) descriptor is closed; an adopted descriptor is relinquished
    /// and remains open for the caller that supplied it. Either way the handle answers
    /// every subsequent operation, including `init`, with [`crate::Error::Closed`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Closed`] if the handle was never initialized or has
    /// already been destroyed.
    pub fn destroy(&mut self) -> Result<()> {
        let Some(file) = self.file.take() else {
            return Err(Error::Closed);
        };

        self.destroyed = true;
        match &self.target {
            Target::Path(path) => {
                debug!("closing {}", path.display());
                drop(file);
            }
            Target::Descriptor(raw) => {
                debug!("relinquishing descriptor {:?}", raw);
                let _ = release_descriptor(file);
            }
        }

        Ok(())
    }

    /// Advance the cursor by `n` bytes (negative moves backwards, saturating at zero).
    ///
    /// Pure state mutation, no I/O; bounds are enforced only at the point of an actual
    /// read or write. Returns `&mut Self` for chaining into the next operation.
    pub fn offset(&mut self, n: i64) -> &mut Self {
        self.cursor = self.cursor.saturating_add_signed(n);
        self
    }

    /// Set the cursor to an absolute byte offset.
    ///
    /// Pure state mutation, no I/O; the caller is responsible for the offset being
    /// meaningful. Returns `&mut Self` for chaining.
    pub fn set_pointer(&mut self, pointer: u64) -> &mut Self {
        self.cursor = pointer;
        self
    }

    /// Current cursor position in bytes.
    #[must_use]
    pub fn pos(&self) -> u64 {
        self.cursor
    }

    /// Last-known length of the file in bytes.
    ///
    /// For a reader this is sourced from file metadata at `init` time; for a writer it is
    /// additionally grown by every write that extends the file.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.size
    }

    /// Returns `true` if the tracked file size is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if the descriptor is live (between `init` and `destroy`).
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Re-query the file size from descriptor metadata.
    ///
    /// # Errors
    /// Returns [`crate::Error::Closed`] if the handle is not open, or
    /// [`crate::Error::Io`] if the metadata query fails.
    pub fn refresh_size(&mut self) -> Result<()> {
        let metadata = self.descriptor()?.metadata()?;
        self.size = metadata.len();
        Ok(())
    }

    /// Access the live descriptor, failing if the handle is not open.
    pub(crate) fn descriptor(&self) -> Result<&File> {
        self.file.as_ref().ok_or(Error::Closed)
    }

    /// Move the cursor forward after a successful transfer.
    pub(crate) fn advance(&mut self, n: u64) {
        self.cursor += n;
    }

    /// Grow the tracked size to `end` if the file now extends that far.
    ///
    /// Monotonic: writing never shrinks the tracked size, even when the write lands
    /// entirely within previously written territory.
    pub(crate) fn grow_to(&mut self, end: u64) {
        if end > self.size {
            self.size = end;
        }
    }

    /// One positioned read against the descriptor. Does not move the cursor.
    pub(crate) fn read_at(&self, buf: &mut [u8], pos: u64) -> Result<usize> {
        Ok(positioned_read(self.descriptor()?, buf, pos)?)
    }

    /// One positioned write against the descriptor. Does not move the cursor.
    pub(crate) fn write_at(&self, buf: &[u8], pos: u64) -> Result<usize> {
        Ok(positioned_write(self.descriptor()?, buf, pos)?)
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        // Same ownership rule as destroy(): a borrowed descriptor must survive us.
        if let Some(file) = self.file.take() {
            if matches!(self.target, Target::Descriptor(_)) {
                let _ = release_descriptor(file);
            }
        }
    }
}

#[cfg(unix)]
fn adopt_descriptor(raw: RawDescriptor) -> File {
    use std::os::unix::io::FromRawFd;

    // Safety: the caller of init() vouches that `raw` is an open descriptor. Ownership
    // stays with the caller; destroy() and Drop relinquish the File without closing it.
    unsafe { File::from_raw_fd(raw) }
}

#[cfg(unix)]
fn release_descriptor(file: File) -> RawDescriptor {
    use std::os::unix::io::IntoRawFd;

    file.into_raw_fd()
}

#[cfg(windows)]
fn adopt_descriptor(raw: RawDescriptor) -> File {
    use std::os::windows::io::FromRawHandle;

    // Safety: the caller of init() vouches that `raw` is an open handle. Ownership
    // stays with the caller; destroy() and Drop relinquish the File without closing it.
    unsafe { File::from_raw_handle(raw) }
}

#[cfg(windows)]
fn release_descriptor(file: File) -> RawDescriptor {
    use std::os::windows::io::IntoRawHandle;

    file.into_raw_handle()
}

#[cfg(unix)]
fn positioned_read(file: &File, buf: &mut [u8], pos: u64) -> std::io::Result<usize> {
    use std::os::unix::fs::FileExt;

    file.read_at(buf, pos)
}

#[cfg(unix)]
fn positioned_write(file: &File, buf: &[u8], pos: u64) -> std::io::Result<usize> {
    use std::os::unix::fs::FileExt;

    file.write_at(buf, pos)
}

#[cfg(windows)]
fn positioned_read(file: &File, buf: &mut [u8], pos: u64) -> std::io::Result<usize> {
    use std::os::windows::fs::FileExt;

    file.seek_read(buf, pos)
}

#[cfg(windows)]
fn positioned_write(file: &File, buf: &[u8], pos: u64) -> std::io::Result<usize> {
    use std::os::windows::fs::FileExt;

    file.seek_write(buf, pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_movement_is_pure() {
        let mut handle = Handle::new("does-not-exist.bin", Mode::Read);
        handle.offset(10).offset(-4);
        assert_eq!(handle.pos(), 6);

        handle.set_pointer(100);
        assert_eq!(handle.pos(), 100);

        // Saturates at zero instead of wrapping.
        handle.set_pointer(2).offset(-5);
        assert_eq!(handle.pos(), 0);
    }

    #[test]
    fn operations_before_init_fail_closed() {
        let mut handle = Handle::new("does-not-exist.bin", Mode::Read);
        assert!(!handle.is_open());
        assert!(matches!(handle.refresh_size(), Err(Error::Closed)));
        assert!(matches!(handle.destroy(), Err(Error::Closed)));
    }

    #[test]
    fn init_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut handle = Handle::new(dir.path().join("missing.bin"), Mode::Read);
        match handle.init() {
            Err(Error::Io(io_err)) => {
                assert_eq!(io_err.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn init_loads_size_and_destroy_kills_handle() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("three.bin");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let mut handle = Handle::new(path, Mode::Read);
        handle.init().unwrap();
        assert!(handle.is_open());
        assert_eq!(handle.len(), 3);

        // init on an open handle is a no-op
        handle.init().unwrap();
        assert_eq!(handle.len(), 3);

        handle.destroy().unwrap();
        assert!(!handle.is_open());
        assert!(matches!(handle.destroy(), Err(Error::Closed)));
        assert!(matches!(handle.init(), Err(Error::Closed)));
        assert!(matches!(handle.refresh_size(), Err(Error::Closed)));
    }

    #[test]
    fn write_mode_truncates() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trunc.bin");
        std::fs::write(&path, [0u8; 16]).unwrap();

        let mut handle = Handle::new(path.clone(), Mode::Write);
        handle.init().unwrap();
        assert_eq!(handle.len(), 0);
        handle.destroy().unwrap();

        let mut handle = Handle::new(path, Mode::ReadWrite);
        handle.init().unwrap();
        assert_eq!(handle.len(), 0);
    }
}
