//! # binfile Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and
//! traits of the library. Import it to get quick access to the essentials of
//! cursor-based binary file I/O.
//!
//! ```rust,no_run
//! use binfile::prelude::*;
//!
//! let mut writer = FileWriter::new("out.bin");
//! writer.init()?;
//! writer.write_le(42u32)?;
//! # Ok::<(), binfile::Error>(())
//! ```

/// The main error type for all binfile operations
pub use crate::Error;

/// The result type used throughout binfile
pub use crate::Result;

/// Reading and writing entry points
pub use crate::{FileReader, FileWriter};

/// Open-file session state and its configuration
pub use crate::{Handle, Mode, Target};

/// Endian-aware scalar conversion
pub use crate::codec::{ByteOrder, Scalar};
