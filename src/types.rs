/// Descriptive header fields found in an ECG export
///
/// Each field is independently optional. Only the three recognized keys are
/// kept; any other `key=value` line is skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EcgMeta {
    /// Value of the `Interval=` header, in seconds
    pub interval_seconds: Option<f64>,
    /// Trimmed text of the `ChannelTitle=` header
    pub channel_title: Option<String>,
    /// Trimmed text of the `Range=` header
    pub range_text: Option<String>,
}

/// Result of parsing one ECG text file
///
/// `times` and `values` are paired row by row and always have the same length.
/// A successful parse never returns an empty series.
#[derive(Debug, Clone, PartialEq)]
pub struct EcgData {
    pub times: Vec<f64>,
    pub values: Vec<f64>,
    /// 采样频率（Hz），无法推断时为 None
    pub frequency_hz: Option<f64>,
    pub meta: EcgMeta,
}

impl EcgData {
    /// Number of data rows
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Sampling interval in seconds, the reciprocal of `frequency_hz`
    pub fn sample_interval(&self) -> Option<f64> {
        self.frequency_hz.map(|fs| 1.0 / fs)
    }

    /// Iterates over `(time, value)` pairs in file order
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    /// Splits the result into `(times, values, frequency_hz, meta)`
    ///
    /// This is the shape handed across language bridges that expect plain
    /// arrays plus scalar metadata.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Option<f64>, EcgMeta) {
        (self.times, self.values, self.frequency_hz, self.meta)
    }
}
