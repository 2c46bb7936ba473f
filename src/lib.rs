// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
//#![deny(unsafe_code)]
// - 'handle.rs' uses from_raw_fd / from_raw_handle to adopt caller-owned descriptors

//! # binfile
//!
//! Random-access binary file I/O with a movable cursor and endian-aware typed reads
//! and writes. `binfile` lets you open a file (or adopt an already-open descriptor),
//! move a byte cursor, and read or write fixed-width and variable-width scalar values -
//! signed and unsigned integers of 1 to 8 bytes, IEEE-754 single and double floats, and
//! raw byte strings - in either byte order, with automatic cursor advancement.
//!
//! ## Features
//!
//! - **Direct positioned I/O** - Every read and write is a single position-addressed
//!   system call; no buffering or caching layer in between
//! - **Bounds-checked reads** - Reading past end-of-file fails before any I/O, never
//!   with a partial result
//! - **Torn-I/O detection** - Short transfers surface as a distinct error with the
//!   cursor left unmoved
//! - **Explicit descriptor ownership** - A path-opened descriptor is closed on teardown,
//!   an adopted caller-supplied one is not
//! - **One parameterized codec** - All fixed-width typed accessors are instantiations of
//!   a single generic routine over the [`codec::Scalar`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use binfile::{FileReader, FileWriter};
//!
//! let mut writer = FileWriter::new("data.bin");
//! writer.init()?;
//! writer.write_be(0x1234_5678u32)?;
//! writer.write_string("hi")?;
//! writer.destroy()?;
//!
//! let mut reader = FileReader::new("data.bin");
//! reader.init()?;
//! let magic: u32 = reader.read_be()?;
//! assert_eq!(magic, 0x1234_5678);
//! let tag = reader.read_string(2)?;
//! assert_eq!(tag, "hi");
//! reader.destroy()?;
//! # Ok::<(), binfile::Error>(())
//! ```
//!
//! ## Architecture
//!
//! Three units, built bottom-up:
//!
//! - [`Handle`] - owns the open-file session: target, descriptor, cursor, size
//! - [`FileReader`] - bounds-checked raw reads plus typed scalar decoders
//! - [`FileWriter`] - raw writes plus typed scalar encoders and tracked file size
//!
//! The pure byte-order conversion lives in [`codec`] and carries no I/O; the reader and
//! writer compose it with exactly one positioned system call per operation.
//!
//! ## Concurrency
//!
//! A handle is single-owner: every operation takes `&mut self`, so operations on one
//! handle observe a total order and cursor bookkeeping needs no synchronization. For
//! concurrent access to the same file, open independent handles with independent
//! cursors and coordinate writes externally.

pub mod codec;
mod error;
pub mod handle;
pub mod prelude;
pub mod reader;
pub mod writer;

/// Convenience `Result` type used throughout the crate, with [`Error`] as error variant.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type covering every failure condition of the I/O layer.
///
/// All failures are surfaced to the immediate caller as a distinct, identifiable
/// variant so calling code can branch on kind; nothing is retried internally.
pub use error::Error;

/// The open-file session object owning cursor, size and descriptor state.
///
/// Usually accessed through [`FileReader`] or [`FileWriter`] rather than directly.
pub use handle::Handle;

/// Open mode for path targets: read-only, write/create/truncate, or read-write.
pub use handle::Mode;

/// Platform raw descriptor type accepted by [`Target::Descriptor`].
pub use handle::RawDescriptor;

/// What a handle operates on: an owned path or a borrowed, already-open descriptor.
pub use handle::Target;

/// Reader over one binary file: bounds-checked raw reads and typed scalar decoders.
///
/// # Example
///
/// ```rust,no_run
/// use binfile::FileReader;
/// let mut reader = FileReader::new("data.bin");
/// reader.init()?;
/// let value = reader.read_uint_be(3)?;
/// # Ok::<(), binfile::Error>(())
/// ```
pub use reader::FileReader;

/// Writer over one binary file: raw writes, typed scalar encoders, tracked size.
///
/// # Example
///
/// ```rust,no_run
/// use binfile::FileWriter;
/// let mut writer = FileWriter::new("out.bin");
/// writer.init()?;
/// writer.write_int_le(-2, 2)?;
/// # Ok::<(), binfile::Error>(())
/// ```
pub use writer::FileWriter;
