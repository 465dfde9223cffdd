//! Print the most recent lines of a file, newest first
//!
//! Usage: `cargo run --example tail_recent -- <FILE> [COUNT]`

use linestream_core::{Direction, LineStream, StreamConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or("usage: tail_recent <FILE> [COUNT]")?;
    let count: usize = match args.next() {
        Some(n) => n.parse()?,
        None => 10,
    };

    let config = StreamConfig::builder().chunk_kb(64).build()?;
    let mut lines = LineStream::open(&path, Direction::Reverse, &config)?;

    for _ in 0..count {
        match lines.next_line_lossy()? {
            Some(line) => println!("{line}"),
            None => break,
        }
    }

    println!(
        "--- read {} of {} bytes",
        lines.bytes_processed(),
        lines.file_size()
    );
    lines.close()?;
    Ok(())
}
