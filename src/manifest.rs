//! Rebuild manifest
//!
//! A manifest is UTF-8 text.  The first line names the archive-level
//! compression kind; every later line beginning with `COMPRESSION` is a
//! member entry of the form `<KIND_NAME>,<relative_path>`, resolved
//! against the directory holding the manifest.  Lines without a comma
//! and lines that start with anything else are skipped, and an unknown
//! kind name reads as `COMPRESSION_NONE`.

use std::path::{Path, PathBuf};
use crate::CompressionKind;

/// a parsed manifest with entry paths already resolved
pub struct Manifest {
    pub archive_kind: CompressionKind,
    pub entries: Vec<(CompressionKind, PathBuf)>
}

/// Parse manifest text, resolving entry paths against `base`
pub fn parse(text: &str, base: &Path) -> Manifest {
    let mut lines = text.lines();
    let archive_kind = match lines.next() {
        Some(line) => CompressionKind::from_name(line.trim_end()),
        None => CompressionKind::None
    };
    let mut entries = Vec::new();
    for line in lines {
        let line = line.trim_end();
        if !line.starts_with("COMPRESSION") {
            continue;
        }
        let comma = match line.find(',') {
            Some(pos) => pos,
            None => continue
        };
        let kind = CompressionKind::from_name(&line[0..comma]);
        entries.push((kind, base.join(&line[comma + 1..])));
    }
    Manifest {
        archive_kind,
        entries
    }
}

/// Render a manifest: archive kind, a blank line, then one entry per member
pub fn render(archive_kind: CompressionKind, entries: &[(CompressionKind, String)]) -> String {
    let mut ans = String::new();
    ans += archive_kind.name();
    ans += "\n\n";
    for (kind, path) in entries {
        ans += &format!("{},{}\n", kind.name(), path);
    }
    ans
}

#[test]
fn parse_works() {
    let text = "COMPRESSION_LZ11\n\nCOMPRESSION_LZ77,sub/0.bin\nnote to self\nCOMPRESSION_HUFFMAN_4,sub/1.bin\nCOMPRESSION_BOGUS,sub/2.bin\nCOMPRESSION no comma here\n";
    let list = parse(text, Path::new("root"));
    assert_eq!(list.archive_kind, CompressionKind::Lz11);
    assert_eq!(
        list.entries,
        vec![
            (CompressionKind::Lz77, PathBuf::from("root/sub/0.bin")),
            (CompressionKind::Huffman4, PathBuf::from("root/sub/1.bin")),
            (CompressionKind::None, PathBuf::from("root/sub/2.bin"))
        ]
    );
}

#[test]
fn render_and_parse_invert() {
    let entries = vec![
        (CompressionKind::Lz77Header, "arc/0.bin".to_string()),
        (CompressionKind::None, "arc/1.bin".to_string())
    ];
    let text = render(CompressionKind::Huffman8, &entries);
    assert!(text.starts_with("COMPRESSION_HUFFMAN_8\n\n"));
    let list = parse(&text, Path::new(""));
    assert_eq!(list.archive_kind, CompressionKind::Huffman8);
    assert_eq!(list.entries.len(), 2);
    assert_eq!(list.entries[0].0, CompressionKind::Lz77Header);
    assert_eq!(list.entries[1].1, PathBuf::from("arc/1.bin"));
}

#[test]
fn empty_manifest() {
    let list = parse("", Path::new(""));
    assert_eq!(list.archive_kind, CompressionKind::None);
    assert!(list.entries.is_empty());
}
