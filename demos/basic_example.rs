use ecgparse::{Acquisition, EcgParser, ParseOptions, Result};
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("ECG Text Parser Example");
    println!("Library Version: {}", ecgparse::version());

    // 未指定文件时生成一个示例文件
    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            let path = std::env::temp_dir().join("ecgparse_basic_example.txt");
            ecgparse::doctest_utils::create_sample_file(&path, 100_000)?;
            println!("No file given, generated {}", path.display());
            path.display().to_string()
        }
    };

    for acquisition in [Acquisition::Mmap, Acquisition::Buffered] {
        let parser = EcgParser::with_options(ParseOptions {
            acquisition,
            ..ParseOptions::default()
        });

        let start = Instant::now();
        let data = parser.parse_file(&path)?;
        let elapsed = start.elapsed();

        println!("{:?}: {} rows in {:.2?}", acquisition, data.len(), elapsed);
        if let (Some(first), Some(last)) = (data.times.first(), data.times.last()) {
            println!("  Time span: {:.3} s to {:.3} s", first, last);
        }
        match data.frequency_hz {
            Some(fs) => println!("  Sampling rate: {:.2} Hz", fs),
            None => println!("  Sampling rate: unknown"),
        }
        println!("  Interval: {:?}", data.meta.interval_seconds);
        println!("  Channel: {}", data.meta.channel_title.as_deref().unwrap_or("-"));
        println!("  Range: {}", data.meta.range_text.as_deref().unwrap_or("-"));
    }

    Ok(())
}
