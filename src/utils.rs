/// Whitespace as understood by the scanner (ASCII only, includes `\v` and `\f`)
#[inline]
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c)
}

/// 跳过空白字符（包括换行），返回第一个非空白字节的位置
#[inline]
pub fn skip_spaces(buf: &[u8], mut pos: usize) -> usize {
    while pos < buf.len() && is_space(buf[pos]) {
        pos += 1;
    }
    pos
}

/// 返回当前行的 `\n` 位置；没有换行符时返回缓冲区长度
#[inline]
pub fn line_end(buf: &[u8], pos: usize) -> usize {
    buf[pos..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(buf.len(), |offset| pos + offset)
}

/// Strips scanner whitespace from both ends of a byte slice
pub fn trim_spaces(bytes: &[u8]) -> &[u8] {
    let start = skip_spaces(bytes, 0);
    let mut end = bytes.len();
    while end > start && is_space(bytes[end - 1]) {
        end -= 1;
    }
    &bytes[start..end]
}

/// True when an `=` appears in the first whitespace-delimited token of the line
pub fn has_key_separator(line: &[u8]) -> bool {
    line.iter()
        .take_while(|&&b| !is_space(b))
        .any(|&b| b == b'=')
}

/// 有效数字上限，超过后交给标准库解析
const MAX_SIG_DIGITS: u32 = 19;

/// Largest mantissa that converts to `f64` without rounding
const MAX_EXACT_MANTISSA: u64 = 1 << 53;

/// Powers of ten that are exactly representable as `f64`
const POW10: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15,
    1e16, 1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

/// Parses a decimal floating-point literal at the start of `bytes`
///
/// Accepts an optional sign, digits, an optional fractional part and an
/// optional exponent (`e`/`E` with optional sign). At least one mantissa digit
/// is required. Hexadecimal, `inf` and `nan` spellings are rejected, and so is
/// any literal whose value overflows to infinity.
///
/// Returns the value and the number of bytes consumed. Leading whitespace is
/// not skipped. An exponent marker without digits is left unconsumed.
///
/// Short literals (up to 2^53 mantissa, decimal exponent within ±22) are
/// converted exactly with a single multiply or divide. Anything longer is
/// handed to `f64::from_str`, which is locale independent and does not
/// allocate.
///
/// # Examples
///
/// ```rust
/// use ecgparse::utils::parse_f64;
///
/// assert_eq!(parse_f64(b"1.5e-3 rest"), Some((0.0015, 6)));
/// assert_eq!(parse_f64(b"-2.0E+1"), Some((-20.0, 7)));
/// assert_eq!(parse_f64(b"nan"), None);
/// ```
pub fn parse_f64(bytes: &[u8]) -> Option<(f64, usize)> {
    let len = bytes.len();
    let mut i = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let mut mantissa: u64 = 0;
    let mut sig_digits = 0u32;
    let mut exp10: i64 = 0;
    let mut truncated = false;
    let mut saw_digit = false;

    // 整数部分
    while i < len && bytes[i].is_ascii_digit() {
        let d = u64::from(bytes[i] - b'0');
        saw_digit = true;
        if sig_digits < MAX_SIG_DIGITS {
            if mantissa != 0 || d != 0 {
                mantissa = mantissa * 10 + d;
                sig_digits += 1;
            }
        } else {
            truncated = true;
        }
        i += 1;
    }

    // 小数部分
    if i < len && bytes[i] == b'.' {
        i += 1;
        while i < len && bytes[i].is_ascii_digit() {
            let d = u64::from(bytes[i] - b'0');
            saw_digit = true;
            if sig_digits < MAX_SIG_DIGITS {
                if mantissa != 0 || d != 0 {
                    mantissa = mantissa * 10 + d;
                    sig_digits += 1;
                }
                exp10 -= 1;
            } else {
                truncated = true;
            }
            i += 1;
        }
    }

    if !saw_digit {
        return None;
    }

    // 指数部分
    if i < len && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        let exp_negative = match bytes.get(j) {
            Some(b'-') => {
                j += 1;
                true
            }
            Some(b'+') => {
                j += 1;
                false
            }
            _ => false,
        };

        let digits_start = j;
        let mut e: i64 = 0;
        while j < len && bytes[j].is_ascii_digit() {
            if e < 100_000 {
                e = e * 10 + i64::from(bytes[j] - b'0');
            }
            j += 1;
        }

        if j > digits_start {
            exp10 += if exp_negative { -e } else { e };
            i = j;
        }
    }

    let value = if mantissa == 0 {
        if negative { -0.0 } else { 0.0 }
    } else if !truncated
        && mantissa <= MAX_EXACT_MANTISSA
        && exp10.unsigned_abs() < POW10.len() as u64
    {
        let m = mantissa as f64;
        let magnitude = if exp10 >= 0 {
            m * POW10[exp10 as usize]
        } else {
            m / POW10[exp10.unsigned_abs() as usize]
        };
        if negative { -magnitude } else { magnitude }
    } else {
        // 慢路径：字节已验证为 ASCII 数字语法
        std::str::from_utf8(&bytes[..i]).ok()?.parse::<f64>().ok()?
    };

    if !value.is_finite() {
        return None;
    }

    Some((value, i))
}

/// Median of `values`, reordering the slice in place
///
/// Uses selection rather than a full sort. For an even count the result is
/// the mean of the element selected at `len / 2` and the largest element to
/// its left; selection guarantees everything left of the split is not greater
/// than the split value, so that largest element is the lower central order
/// statistic. Returns `None` for an empty slice.
pub fn median_in_place(values: &mut [f64]) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }

    let mid = n / 2;
    let (lower, &mut upper, _) = values.select_nth_unstable_by(mid, f64::total_cmp);
    if n % 2 == 1 {
        return Some(upper);
    }

    let lower_max = lower.iter().copied().max_by(f64::total_cmp).unwrap_or(upper);
    Some(0.5 * (upper + lower_max))
}

/// Sampling frequency in Hz for a parsed series
///
/// A strictly positive header interval wins unconditionally. Otherwise the
/// frequency is `1 / median(dt)` over successive time differences, provided
/// that median is positive and finite.
pub fn derive_frequency(interval_seconds: Option<f64>, times: &[f64]) -> Option<f64> {
    if let Some(interval) = interval_seconds.filter(|&iv| iv > 0.0) {
        return Some(1.0 / interval);
    }

    if times.len() < 2 {
        return None;
    }

    let mut dt: Vec<f64> = times.windows(2).map(|w| w[1] - w[0]).collect();
    let median_dt = median_in_place(&mut dt)?;

    if median_dt > 0.0 && median_dt.is_finite() {
        Some(1.0 / median_dt)
    } else {
        None
    }
}
