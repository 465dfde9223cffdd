//! Property tests: round-trip, reconstruction and chunk-size independence

use linestream_core::{split, Direction, LineStream, StreamConfig};
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

fn raw_lines(content: &[u8], direction: Direction, chunk_size: usize) -> (Vec<Vec<u8>>, u64, u64) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("input.bin");
    fs::write(&path, content).unwrap();

    let config = StreamConfig::with_chunk_size(chunk_size).unwrap();
    let mut stream = LineStream::open(&path, direction, &config).unwrap();
    let mut lines = Vec::new();
    while let Some(line) = stream.next_line_bytes().unwrap() {
        lines.push(line);
    }
    (lines, stream.bytes_processed(), stream.file_size())
}

/// Byte content biased towards separators so short and empty lines are common
fn content_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![3 => Just(b'\n'), 1 => Just(b'\r'), 6 => any::<u8>()],
        0..300,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reverse_is_forward_reversed(content in content_strategy(), chunk_size in 1usize..40) {
        let (forward, _, _) = raw_lines(&content, Direction::Forward, chunk_size);
        let (mut reverse, _, _) = raw_lines(&content, Direction::Reverse, chunk_size);
        reverse.reverse();
        prop_assert_eq!(reverse, forward);
    }

    #[test]
    fn lines_rebuild_original_bytes(content in content_strategy(), chunk_size in 1usize..40) {
        let (forward, _, _) = raw_lines(&content, Direction::Forward, chunk_size);

        let mut rebuilt = forward.join(&b'\n');
        if content.last() == Some(&b'\n') {
            rebuilt.push(b'\n');
        }
        prop_assert_eq!(rebuilt, content);
    }

    #[test]
    fn chunk_size_does_not_change_lines(
        content in content_strategy(),
        small in 1usize..8,
        large in 8usize..512,
    ) {
        for direction in [Direction::Forward, Direction::Reverse] {
            let (a, _, _) = raw_lines(&content, direction, small);
            let (b, _, _) = raw_lines(&content, direction, large);
            let (c, _, _) = raw_lines(&content, direction, 5_000_000);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(&b, &c);
        }
    }

    #[test]
    fn exhaustion_accounts_for_every_byte(content in content_strategy(), chunk_size in 1usize..64) {
        for direction in [Direction::Forward, Direction::Reverse] {
            let (_, processed, size) = raw_lines(&content, direction, chunk_size);
            prop_assert_eq!(processed, size);
            prop_assert_eq!(size, content.len() as u64);
        }
    }

    #[test]
    fn no_line_contains_a_separator(content in content_strategy(), chunk_size in 1usize..16) {
        for direction in [Direction::Forward, Direction::Reverse] {
            let (lines, _, _) = raw_lines(&content, direction, chunk_size);
            prop_assert!(lines.iter().all(|line| !line.contains(&b'\n')));
        }
    }

    #[test]
    fn splitter_reconstructs_buffer(content in content_strategy()) {
        let pieces: Vec<&[u8]> = split(&content, b'\n').collect();
        prop_assert_eq!(pieces.len(), content.iter().filter(|&&b| b == b'\n').count() + 1);
        prop_assert_eq!(pieces.join(&b'\n'), content);
    }
}
