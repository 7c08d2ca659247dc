// Internal utilities for documentation tests
// This file contains helper functions to generate sample export files for doctests

use crate::error::{EcgError, Result};
use std::fmt::Write as _;
use std::path::Path;

/// Synthetic ECG-like value at time `t` (seconds)
pub fn synthetic_ecg_value(t: f64) -> f64 {
    let phase = (t * 1.2).fract();
    let r_wave = 1.2 * (-((phase - 0.3) / 0.015).powi(2)).exp();
    let t_wave = 0.25 * (-((phase - 0.6) / 0.06).powi(2)).exp();
    r_wave + t_wave + 0.02 * (2.0 * std::f64::consts::PI * 0.3 * t).sin()
}

/// Renders a LabChart-style export with `rows` samples at 500 Hz
pub fn sample_export_text(rows: usize) -> String {
    let interval = 0.002;
    let mut text = String::with_capacity(64 + rows * 24);
    text.push_str("Interval=0.002 s\n");
    text.push_str("ExcelDateTime=4.5e4\n");
    text.push_str("TimeFormat=StartOfBlock\n");
    text.push_str("ChannelTitle=ECG\n");
    text.push_str("Range=2.000 V\n");

    for i in 0..rows {
        let t = i as f64 * interval;
        // 写入 String 不会失败
        let _ = writeln!(text, "{:.3}\t{:.6}", t, synthetic_ecg_value(t));
    }
    text
}

/// Creates a sample ECG export file for documentation examples
pub fn create_sample_file<P: AsRef<Path>>(path: P, rows: usize) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, sample_export_text(rows)).map_err(|e| EcgError::file_access(path, e))
}
