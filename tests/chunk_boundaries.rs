use std::fs::File;

use readings::BlockChunker;
use tempfile::tempdir;

fn chunks_from_file(contents: &[u8], block_size: usize) -> Vec<Vec<u8>> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.txt");
    std::fs::write(&path, contents).unwrap();
    let file = File::open(&path).unwrap();
    BlockChunker::new(file, block_size)
        .collect::<Result<Vec<_>, _>>()
        .expect("chunking a readable file succeeds")
}

#[test]
fn every_block_size_reproduces_the_file_byte_for_byte() {
    let contents = b"Hamburg;12.0\nBulawayo;8.9\nHamburg;12.0\nPalembang;38.8\nHamburg;10.0\n";
    for block_size in 1..=contents.len() + 5 {
        let rebuilt: Vec<u8> = chunks_from_file(contents, block_size).concat();
        assert_eq!(
            rebuilt, contents,
            "block_size {block_size} corrupted the stream"
        );
    }
}

#[test]
fn no_record_is_split_across_chunks() {
    let contents = b"Hamburg;12.0\nBulawayo;8.9\nPalembang;38.8\n";
    for block_size in 1..=contents.len() {
        for chunk in chunks_from_file(contents, block_size) {
            let text = std::str::from_utf8(&chunk).unwrap();
            for line in text.lines() {
                assert!(
                    line.contains(';'),
                    "block_size {block_size} produced a torn record: {line:?}"
                );
            }
        }
    }
}

#[test]
fn file_without_trailing_newline_loses_no_bytes() {
    let contents = b"Hamburg;12.0\nBulawayo;8.9";
    for block_size in [1, 2, 3, 7, 13, 64] {
        let chunks = chunks_from_file(contents, block_size);
        let rebuilt: Vec<u8> = chunks.concat();
        assert_eq!(rebuilt, contents);
    }
}

#[test]
fn record_larger_than_the_block_is_carried_whole() {
    let long_key = "k".repeat(200);
    let contents = format!("{long_key};42.0\nOslo;1.0\n");
    let chunks = chunks_from_file(contents.as_bytes(), 16);
    let first = std::str::from_utf8(&chunks[0]).unwrap();
    assert!(
        first.contains(&format!("{long_key};42.0\n")),
        "oversized record was not dispatched whole"
    );
    let rebuilt: Vec<u8> = chunks.concat();
    assert_eq!(rebuilt, contents.as_bytes());
}
