//! # ECG Text Parser for Rust
//!
//! A fast parser for two-column ECG text exports (LabChart and similar tools).
//! Files carry a small `Key=value` header followed by one `<time> <value>` row
//! per line, often millions of rows.
//!
//! ## Quick Start
//!
//! ```rust
//! use ecgparse::{parse_ecg_file, Result};
//! # use std::fs;
//!
//! fn main() -> Result<()> {
//!     # ecgparse::doctest_utils::create_sample_file("quick_start.txt", 2_000)?;
//!     let data = parse_ecg_file("quick_start.txt")?;
//!
//!     println!("Rows: {}", data.len());
//!     if let Some(fs) = data.frequency_hz {
//!         println!("Sampling rate: {:.1} Hz", fs);
//!     }
//!     if let Some(title) = &data.meta.channel_title {
//!         println!("Channel: {}", title);
//!     }
//!
//!     assert_eq!(data.times.len(), data.values.len());
//!     # fs::remove_file("quick_start.txt").ok();
//!     Ok(())
//! }
//! ```
//!
//! ## File format
//!
//! ```text
//! Interval=0.002 s
//! ChannelTitle=Lead II
//! Range=2.000 V
//! ExcelDateTime=45123.5
//! 0.000	0.0123
//! 0.002	0.0131
//! ```
//!
//! - `Interval=`, `ChannelTitle=` and `Range=` are kept in [`EcgMeta`].
//! - Any other line with `=` in its first token is skipped.
//! - Data lines contribute their first two numbers; the rest of the line is ignored.
//! - Blank, truncated or non-numeric lines are skipped silently.
//!
//! ## Sampling frequency
//!
//! A positive `Interval=` gives `1 / interval`. Without one the rate is
//! estimated as `1 / median(dt)` over successive timestamps:
//!
//! ```rust
//! let data = ecgparse::parse_ecg_bytes(b"0.00 1.0\n0.01 1.1\n0.03 1.2\n0.04 1.3\n")?;
//! let fs = data.frequency_hz.unwrap();
//! assert!((fs - 100.0).abs() < 1e-9);
//! # Ok::<(), ecgparse::EcgError>(())
//! ```
//!
//! ## Errors
//!
//! ```rust
//! use ecgparse::EcgError;
//!
//! match ecgparse::parse_ecg_bytes(b"Interval=0.001\nFoo=bar\n") {
//!     Err(EcgError::NoData) => println!("header only"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

pub mod error;
pub mod types;
pub mod utils;
pub mod reader;

#[doc(hidden)]
pub mod doctest_utils; // For internal doctest support

// Re-export main types for convenience
pub use error::{EcgError, Result};
pub use types::{EcgData, EcgMeta};
pub use reader::{parse_ecg_bytes, parse_ecg_file, Acquisition, EcgParser, ParseOptions};

// Important constants
pub const DEFAULT_BUFFER_SIZE: usize = 1 << 20; // 1 MiB read buffer
pub const BYTES_PER_ROW_ESTIMATE: usize = 32;
pub const MIN_RESERVED_ROWS: usize = 256_000;
pub const MAX_RESERVED_ROWS: usize = 50_000_000;

/// Library version
///
/// # Examples
///
/// ```rust
/// let version = ecgparse::version();
/// assert!(version.contains('.'));
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
