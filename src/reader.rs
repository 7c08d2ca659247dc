use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use memmap2::Mmap;

use crate::error::{EcgError, Result};
use crate::types::{EcgData, EcgMeta};
use crate::utils::{
    derive_frequency, has_key_separator, is_space, line_end, parse_f64, skip_spaces,
    trim_spaces,
};
use crate::{BYTES_PER_ROW_ESTIMATE, DEFAULT_BUFFER_SIZE, MAX_RESERVED_ROWS, MIN_RESERVED_ROWS};

const INTERVAL_KEY: &[u8] = b"Interval=";
const CHANNEL_TITLE_KEY: &[u8] = b"ChannelTitle=";
const RANGE_KEY: &[u8] = b"Range=";

/// How the file's bytes are brought into memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Acquisition {
    /// Memory-map the file, falling back to buffered streaming if mapping fails
    #[default]
    Auto,
    /// Memory-map only; a mapping failure is reported as an error
    Mmap,
    /// Stream the file through a single reusable buffer
    Buffered,
}

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub acquisition: Acquisition,
    /// Read buffer size for [`Acquisition::Buffered`] and the fallback path
    pub buffer_size: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            acquisition: Acquisition::Auto,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Parser for two-column ECG text exports
///
/// The parser holds only its configuration; every call is independent and
/// returns owned data.
///
/// # Examples
///
/// ```rust
/// use ecgparse::{Acquisition, EcgParser, ParseOptions};
///
/// # ecgparse::doctest_utils::create_sample_file("reader_doc.txt", 500)?;
/// let parser = EcgParser::with_options(ParseOptions {
///     acquisition: Acquisition::Buffered,
///     buffer_size: 64 * 1024,
/// });
///
/// let data = parser.parse_file("reader_doc.txt")?;
/// println!("{} rows at {:?} Hz", data.len(), data.frequency_hz);
/// assert_eq!(data.len(), 500);
///
/// # std::fs::remove_file("reader_doc.txt").ok();
/// # Ok::<(), ecgparse::EcgError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EcgParser {
    options: ParseOptions,
}

impl EcgParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        EcgParser { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses an ECG text file from disk
    ///
    /// # Errors
    ///
    /// * `EcgError::FileAccess` - the file can't be opened, inspected, mapped or read
    /// * `EcgError::EmptyFile` - the file has zero bytes
    /// * `EcgError::NoData` - no line parsed as a `<time> <value>` row
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ecgparse::{EcgError, EcgParser};
    ///
    /// match EcgParser::new().parse_file("does_not_exist.txt") {
    ///     Err(EcgError::FileAccess { path, .. }) => println!("cannot open {}", path),
    ///     other => panic!("unexpected: {:?}", other),
    /// }
    /// ```
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<EcgData> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| EcgError::file_access(path, e))?;

        let file_len = file
            .metadata()
            .map_err(|e| EcgError::file_access(path, e))?
            .len();
        if file_len == 0 {
            return Err(EcgError::EmptyFile(path.display().to_string()));
        }

        let mut scanner = LineScanner::with_capacity(reserved_rows(file_len));

        match self.options.acquisition {
            Acquisition::Mmap => {
                let map = map_file(&file).map_err(|e| EcgError::file_access(path, e))?;
                log::debug!("scanning {} ({} bytes, mapped)", path.display(), map.len());
                scanner.feed(&map);
            }
            Acquisition::Buffered => {
                log::debug!("scanning {} ({} bytes, buffered)", path.display(), file_len);
                stream_file(file, self.options.buffer_size, &mut scanner)
                    .map_err(|e| EcgError::file_access(path, e))?;
            }
            Acquisition::Auto => match map_file(&file) {
                Ok(map) => {
                    log::debug!("scanning {} ({} bytes, mapped)", path.display(), map.len());
                    scanner.feed(&map);
                }
                Err(e) => {
                    log::warn!(
                        "memory map of {} failed ({}), falling back to buffered read",
                        path.display(),
                        e
                    );
                    stream_file(file, self.options.buffer_size, &mut scanner)
                        .map_err(|e| EcgError::file_access(path, e))?;
                }
            },
        }

        scanner.finish()
    }

    /// Parses ECG text already held in memory
    ///
    /// Same line rules as [`EcgParser::parse_file`]. An empty buffer has no
    /// rows and yields `EcgError::NoData`.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<EcgData> {
        let mut scanner = LineScanner::with_capacity(
            (bytes.len() / BYTES_PER_ROW_ESTIMATE).min(MAX_RESERVED_ROWS),
        );
        scanner.feed(bytes);
        scanner.finish()
    }
}

/// Parses an ECG text file with default options
///
/// # Examples
///
/// ```rust
/// # ecgparse::doctest_utils::create_sample_file("parse_fn_doc.txt", 100)?;
/// let data = ecgparse::parse_ecg_file("parse_fn_doc.txt")?;
/// assert_eq!(data.times.len(), data.values.len());
/// assert_eq!(data.meta.channel_title.as_deref(), Some("ECG"));
/// # std::fs::remove_file("parse_fn_doc.txt").ok();
/// # Ok::<(), ecgparse::EcgError>(())
/// ```
pub fn parse_ecg_file<P: AsRef<Path>>(path: P) -> Result<EcgData> {
    EcgParser::new().parse_file(path)
}

/// Parses ECG text from a byte buffer with default options
///
/// ```rust
/// let data = ecgparse::parse_ecg_bytes(b"Interval=0.002 s\n0.000 0.1\n0.002 0.2\n")?;
/// assert_eq!(data.frequency_hz, Some(500.0));
/// # Ok::<(), ecgparse::EcgError>(())
/// ```
pub fn parse_ecg_bytes(bytes: &[u8]) -> Result<EcgData> {
    EcgParser::new().parse_bytes(bytes)
}

/// 按文件大小估计预分配行数
fn reserved_rows(file_len: u64) -> usize {
    let estimate = usize::try_from(file_len / BYTES_PER_ROW_ESTIMATE as u64)
        .unwrap_or(MAX_RESERVED_ROWS);
    estimate.clamp(MIN_RESERVED_ROWS, MAX_RESERVED_ROWS)
}

fn map_file(file: &File) -> std::io::Result<Mmap> {
    // SAFETY: the map is read-only and lives only for the duration of one scan.
    // Concurrent truncation by another process is outside what we guard against.
    unsafe { Mmap::map(file) }
}

/// Streams `file` through one buffer, scanning complete lines only
///
/// The unfinished tail line is moved to the front of the buffer and completed
/// by the next read. The buffer grows only when a single line exceeds it.
fn stream_file(mut file: File, buffer_size: usize, scanner: &mut LineScanner) -> std::io::Result<()> {
    let mut buf = vec![0u8; buffer_size.max(1)];
    let mut filled = 0;

    loop {
        if filled == buf.len() {
            let grown = buf.len() * 2;
            buf.resize(grown, 0);
        }

        let n = match file.read(&mut buf[filled..]) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        if n == 0 {
            scanner.feed(&buf[..filled]);
            return Ok(());
        }
        filled += n;

        if let Some(last_newline) = buf[..filled].iter().rposition(|&b| b == b'\n') {
            let complete = last_newline + 1;
            scanner.feed(&buf[..complete]);
            buf.copy_within(complete..filled, 0);
            filled -= complete;
        }
    }
}

/// Accumulates rows and header fields from line-aligned byte chunks
///
/// Every rule works within a single line, so feeding a buffer whole or in
/// newline-terminated pieces gives the same result.
struct LineScanner {
    times: Vec<f64>,
    values: Vec<f64>,
    meta: EcgMeta,
    header_lines: usize,
    skipped_lines: usize,
}

impl LineScanner {
    fn with_capacity(rows: usize) -> Self {
        LineScanner {
            times: Vec::with_capacity(rows),
            values: Vec::with_capacity(rows),
            meta: EcgMeta::default(),
            header_lines: 0,
            skipped_lines: 0,
        }
    }

    fn feed(&mut self, buf: &[u8]) {
        let mut pos = 0;
        while pos < buf.len() {
            pos = skip_spaces(buf, pos);
            if pos >= buf.len() {
                break;
            }

            let eol = line_end(buf, pos);
            self.scan_line(&buf[pos..eol]);
            pos = eol + 1;
        }
    }

    /// Classifies one line; `line` starts at a non-space byte and excludes `\n`
    fn scan_line(&mut self, line: &[u8]) {
        if let Some(rest) = line.strip_prefix(INTERVAL_KEY) {
            self.header_lines += 1;
            let rest = &rest[skip_spaces(rest, 0)..];
            if let Some((interval, _)) = parse_f64(rest) {
                self.meta.interval_seconds = Some(interval);
            }
            return;
        }

        if let Some(rest) = line.strip_prefix(CHANNEL_TITLE_KEY) {
            self.header_lines += 1;
            if let Some(title) = header_text(rest) {
                self.meta.channel_title = Some(title);
            }
            return;
        }

        if let Some(rest) = line.strip_prefix(RANGE_KEY) {
            self.header_lines += 1;
            if let Some(range) = header_text(rest) {
                self.meta.range_text = Some(range);
            }
            return;
        }

        if has_key_separator(line) {
            self.header_lines += 1;
            log::trace!(
                "ignoring header line {:?}",
                String::from_utf8_lossy(line.split(|&b| b == b'=').next().unwrap_or(line))
            );
            return;
        }

        match parse_row(line) {
            Some((time, value)) => {
                self.times.push(time);
                self.values.push(value);
            }
            None => self.skipped_lines += 1,
        }
    }

    fn finish(self) -> Result<EcgData> {
        log::debug!(
            "scan complete: {} rows, {} header lines, {} skipped lines",
            self.times.len(),
            self.header_lines,
            self.skipped_lines
        );

        if self.times.is_empty() {
            return Err(EcgError::NoData);
        }

        let frequency_hz = derive_frequency(self.meta.interval_seconds, &self.times);
        match frequency_hz {
            Some(fs) if self.meta.interval_seconds.is_some_and(|iv| iv > 0.0) => {
                log::debug!("sampling frequency {} Hz from Interval header", fs)
            }
            Some(fs) => log::debug!("sampling frequency {} Hz from median time step", fs),
            None => log::debug!("sampling frequency could not be determined"),
        }

        Ok(EcgData {
            times: self.times,
            values: self.values,
            frequency_hz,
            meta: self.meta,
        })
    }
}

/// Parses the first two whitespace-separated literals of a data line
///
/// Anything after the second literal is ignored.
fn parse_row(line: &[u8]) -> Option<(f64, f64)> {
    let (time, used) = parse_f64(line)?;

    let rest = &line[used..];
    if !rest.first().copied().is_some_and(is_space) {
        return None;
    }

    let rest = &rest[skip_spaces(rest, 0)..];
    let (value, _) = parse_f64(rest)?;
    Some((time, value))
}

/// 读取头部字段的文本值（去除首尾空白），空值返回 None
fn header_text(rest: &[u8]) -> Option<String> {
    let text = trim_spaces(rest);
    if text.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(text).into_owned())
    }
}
