use ecgparse::{parse_ecg_file, EcgError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// 写入测试文件的辅助函数
fn write_tmp(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("ecg.txt");
    fs::write(&path, text).unwrap();
    path
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_row_count_and_order() {
    let dir = TempDir::new().unwrap();
    let mut text = String::new();
    for i in 0..1000 {
        text.push_str(&format!("{} {}\n", i as f64 * 0.004, (i % 7) as f64 - 3.0));
    }
    let path = write_tmp(&dir, &text);

    let data = parse_ecg_file(&path).unwrap();
    assert_eq!(data.times.len(), 1000);
    assert_eq!(data.values.len(), 1000);
    for (i, (t, v)) in data.iter().enumerate() {
        assert_close(t, i as f64 * 0.004);
        assert_eq!(v, (i % 7) as f64 - 3.0);
    }
    assert_eq!(data.meta, ecgparse::EcgMeta::default());
}

#[test]
fn test_parses_with_interval_and_meta() {
    let dir = TempDir::new().unwrap();
    let path = write_tmp(
        &dir,
        &[
            "Interval=0.004",
            "ChannelTitle= Lead I  ",
            "Range= +/- 2 mV",
            "SomeOtherHeader=whatever",
            "0.000  0.1",
            "0.004  0.2  123 456", // 多余的列被忽略
            "0.008  0.3",
            "",
        ]
        .join("\n"),
    );

    let data = parse_ecg_file(&path).unwrap();
    assert_eq!(data.times, vec![0.0, 0.004, 0.008]);
    assert_eq!(data.values, vec![0.1, 0.2, 0.3]);
    assert_close(data.frequency_hz.unwrap(), 250.0);

    assert_eq!(data.meta.interval_seconds, Some(0.004));
    assert_eq!(data.meta.channel_title.as_deref(), Some("Lead I"));
    assert_eq!(data.meta.range_text.as_deref(), Some("+/- 2 mV"));
}

#[test]
fn test_interval_header_sets_frequency() {
    let dir = TempDir::new().unwrap();
    let path = write_tmp(&dir, "Interval=0.002\n0.0 1.0\n0.002 1.5\n0.004 2.0\n");

    let data = parse_ecg_file(&path).unwrap();
    assert_eq!(data.meta.interval_seconds, Some(0.002));
    assert_eq!(data.frequency_hz, Some(500.0));
}

#[test]
fn test_interval_with_unit_suffix() {
    let dir = TempDir::new().unwrap();
    let path = write_tmp(&dir, "Interval=\t0.001 s\r\n0 1\r\n0.001 2\r\n");

    let data = parse_ecg_file(&path).unwrap();
    assert_eq!(data.meta.interval_seconds, Some(0.001));
    assert_close(data.frequency_hz.unwrap(), 1000.0);
    assert_eq!(data.len(), 2);
}

#[test]
fn test_infers_frequency_from_median_dt() {
    let dir = TempDir::new().unwrap();
    let path = write_tmp(&dir, "0.0 5\n0.01 5\n0.02 5\n0.03 5\n");

    let data = parse_ecg_file(&path).unwrap();
    assert_eq!(data.meta.interval_seconds, None);
    assert_close(data.frequency_hz.unwrap(), 100.0);
}

#[test]
fn test_median_ignores_single_gap() {
    // dt: 0.01, 0.02, 0.01 → median 0.01
    let dir = TempDir::new().unwrap();
    let path = write_tmp(&dir, "ChannelTitle=X\n0.00 1.0\n0.01 1.1\n0.03 1.2\n0.04 1.3\n");

    let data = parse_ecg_file(&path).unwrap();
    assert_close(data.frequency_hz.unwrap(), 100.0);
    assert_eq!(data.meta.channel_title.as_deref(), Some("X"));
}

#[test]
fn test_even_dt_count_averages_central_pair() {
    // dt = 1, 2, 3, 4 (shuffled) → median 2.5 → fs 0.4
    let dir = TempDir::new().unwrap();
    let path = write_tmp(&dir, "0 0\n3 0\n4 0\n8 0\n10 0\n");

    let data = parse_ecg_file(&path).unwrap();
    assert_close(data.frequency_hz.unwrap(), 0.4);
}

#[test]
fn test_invalid_interval_falls_back_to_time_inference() {
    let dir = TempDir::new().unwrap();
    let path = write_tmp(&dir, "Interval=abc\n0.0 1.0\n0.5 2.0\n1.0 3.0\n");

    let data = parse_ecg_file(&path).unwrap();
    assert_eq!(data.meta.interval_seconds, None);
    assert_close(data.frequency_hz.unwrap(), 2.0);
}

#[test]
fn test_zero_interval_is_kept_but_not_used() {
    let dir = TempDir::new().unwrap();
    let path = write_tmp(&dir, "Interval=0\n0.0 1.0\n0.1 2.0\n0.2 3.0\n");

    let data = parse_ecg_file(&path).unwrap();
    assert_eq!(data.meta.interval_seconds, Some(0.0));
    assert_close(data.frequency_hz.unwrap(), 10.0);
}

#[test]
fn test_frequency_absent_for_single_row_or_flat_time() {
    let dir = TempDir::new().unwrap();

    let path = write_tmp(&dir, "0.5 1.0\n");
    let data = parse_ecg_file(&path).unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data.frequency_hz, None);

    let path = write_tmp(&dir, "1 1\n1 2\n1 3\n");
    let data = parse_ecg_file(&path).unwrap();
    assert_eq!(data.frequency_hz, None);
}

#[test]
fn test_malformed_lines_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = write_tmp(
        &dir,
        &[
            "",
            "0.0 1.0",
            "   ",
            "0.5",
            "garbage here",
            "0.1 2.0",
            "1.0 x",
            "\t0.2\t3.0",
            "nan 4.0",
            "0.3 1e999",
            "0.4 4.0",
        ]
        .join("\n"),
    );

    let data = parse_ecg_file(&path).unwrap();
    assert_eq!(data.times, vec![0.0, 0.1, 0.2, 0.4]);
    assert_eq!(data.values, vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_unknown_headers_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = write_tmp(
        &dir,
        "Foo=bar\nRandomKey=RandomValue\nExcelDateTime=4.5e4 1.0\n0 1\n1 2\n",
    );

    let data = parse_ecg_file(&path).unwrap();
    assert_eq!(data.times, vec![0.0, 1.0]);
    assert_eq!(data.values, vec![1.0, 2.0]);
    assert_eq!(data.meta, ecgparse::EcgMeta::default());
}

#[test]
fn test_headers_interspersed_with_data() {
    let dir = TempDir::new().unwrap();
    let path = write_tmp(&dir, "0 1\nChannelTitle=Late\n1 2\nInterval=0.5\n2 3\n");

    let data = parse_ecg_file(&path).unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data.meta.channel_title.as_deref(), Some("Late"));
    assert_eq!(data.frequency_hz, Some(2.0));
}

#[test]
fn test_empty_header_text_is_absent() {
    let dir = TempDir::new().unwrap();
    let path = write_tmp(&dir, "ChannelTitle=\nRange=   \t\n0 1\n");

    let data = parse_ecg_file(&path).unwrap();
    assert_eq!(data.meta.channel_title, None);
    assert_eq!(data.meta.range_text, None);
}

#[test]
fn test_scientific_notation_and_signs() {
    let dir = TempDir::new().unwrap();
    let path = write_tmp(&dir, "Interval=1e-2\n1.5e-3 -2.0E+1\n-1e0   +2.5E+2\n.5     -3.0\n");

    let data = parse_ecg_file(&path).unwrap();
    assert_eq!(data.times, vec![0.0015, -1.0, 0.5]);
    assert_eq!(data.values, vec![-20.0, 250.0, -3.0]);
    assert_eq!(data.meta.interval_seconds, Some(0.01));
    assert_close(data.frequency_hz.unwrap(), 100.0);
}

#[test]
fn test_no_trailing_newline() {
    let dir = TempDir::new().unwrap();
    let path = write_tmp(&dir, "0 1\n1 2");

    let data = parse_ecg_file(&path).unwrap();
    assert_eq!(data.values, vec![1.0, 2.0]);
}

#[test]
fn test_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = write_tmp(&dir, "");

    match parse_ecg_file(&path) {
        Err(EcgError::EmptyFile(p)) => assert!(p.ends_with("ecg.txt")),
        other => panic!("expected EmptyFile, got {:?}", other),
    }
}

#[test]
fn test_header_only_file() {
    let dir = TempDir::new().unwrap();
    let path = write_tmp(&dir, "Interval=0.001\n");

    assert!(matches!(parse_ecg_file(&path), Err(EcgError::NoData)));
}

#[test]
fn test_no_numeric_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_tmp(
        &dir,
        "Interval=0.01\nChannelTitle=Lead\nRange=2mV\nNotNumeric notnumeric\nFoo=Bar\n",
    );

    let err = parse_ecg_file(&path).unwrap_err();
    assert!(matches!(err, EcgError::NoData));
    assert_eq!(err.to_string(), "No numeric data rows were found");
}

#[test]
fn test_whitespace_only_file_has_no_data() {
    let dir = TempDir::new().unwrap();
    let path = write_tmp(&dir, "\n\n  \r\n\t");

    assert!(matches!(parse_ecg_file(&path), Err(EcgError::NoData)));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.txt");

    match parse_ecg_file(&path) {
        Err(EcgError::FileAccess { path: p, source }) => {
            assert!(p.ends_with("missing.txt"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected FileAccess, got {:?}", other),
    }
}

#[test]
fn test_directory_is_not_a_file() {
    let dir = TempDir::new().unwrap();
    let result = parse_ecg_file(dir.path());
    assert!(result.is_err());
}
