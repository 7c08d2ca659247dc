use ecgparse::doctest_utils::sample_export_text;
use ecgparse::{parse_ecg_file, EcgError, Result};
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = PathBuf::from(args.next().unwrap_or_else(|| "test_generated_ecg.txt".to_string()));
    let rows = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1_000_000);

    println!("创建测试ECG文件: {} ({} rows at 500 Hz)", path.display(), rows);

    let text = sample_export_text(rows);
    std::fs::write(&path, &text).map_err(|source| EcgError::FileAccess {
        path: path.display().to_string(),
        source,
    })?;
    println!("Wrote {:.1} MB", text.len() as f64 / 1_048_576.0);

    // 读回验证
    let data = parse_ecg_file(&path)?;
    if data.len() != rows {
        eprintln!("Row count mismatch: wrote {}, parsed {}", rows, data.len());
    }
    println!("Verified {} rows, fs = {:?} Hz", data.len(), data.frequency_hz);

    Ok(())
}
