//! # DS Pack Library
//!
//! Compress, expand, and identify the container formats used by DS-era
//! indexed archives, plus the archive layer itself.
//! * `lz77` handles 0x10 streams and the `LZ77`-tagged wrapper
//! * `lz11` handles 0x11 streams with their three backreference sizes
//! * `huffman` handles 0x24 (4-bit) and 0x28 (8-bit) streams
//! * `sniff` classifies an unknown buffer by structural trial decode
//! * `archive` packs and unpacks the indexed container
//! * `manifest` reads and writes the rebuild list
//!
//! All codec operations are whole-buffer transforms.  The facade
//! functions below dispatch on [`CompressionKind`], with `None` acting
//! as a plain copy.
//!
//! ## Example
//!
//! ```rs
//! use dspack::*;
//! let stream = compress("compress me".as_bytes(), CompressionKind::Lz11)
//!     .expect("compression failed");
//! assert_eq!(kind_of(&stream), CompressionKind::Lz11);
//! let back = decompress(&stream).expect("expansion failed");
//! ```

mod tools;
pub mod lz77;
pub mod lz11;
pub mod huffman;
pub mod sniff;
pub mod archive;
pub mod manifest;

type DYNERR = Box<dyn std::error::Error>;
type STDRESULT = Result<(), Box<dyn std::error::Error>>;

/// Codec Errors
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("header incomplete or stream cut short")]
    TruncatedInput,
    #[error("magic byte mismatch")]
    MagicMismatch,
    #[error("backreference outside the produced window")]
    InvalidBackreference,
    #[error("declared size exceeds the 24-bit header range")]
    OversizeOutput,
    #[error("huffman tree child offset exceeds 6 bits")]
    HuffmanTreeUnrepresentable
}

/// The closed set of stream formats, with the stable ids and names the
/// archive manifest uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, num_derive::FromPrimitive, num_derive::ToPrimitive)]
pub enum CompressionKind {
    None = 0,
    Lz77 = 1,
    Lz11 = 2,
    Huffman4 = 3,
    Huffman8 = 4,
    Lz77Header = 5
}

impl CompressionKind {
    /// the manifest spelling of this kind
    pub fn name(&self) -> &'static str {
        match self {
            CompressionKind::None => "COMPRESSION_NONE",
            CompressionKind::Lz77 => "COMPRESSION_LZ77",
            CompressionKind::Lz11 => "COMPRESSION_LZ11",
            CompressionKind::Huffman4 => "COMPRESSION_HUFFMAN_4",
            CompressionKind::Huffman8 => "COMPRESSION_HUFFMAN_8",
            CompressionKind::Lz77Header => "COMPRESSION_LZ77_HEADER"
        }
    }
    /// Map a manifest spelling back to the kind.
    /// Anything unrecognized reads as `None`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "COMPRESSION_LZ77" => CompressionKind::Lz77,
            "COMPRESSION_LZ11" => CompressionKind::Lz11,
            "COMPRESSION_HUFFMAN_4" => CompressionKind::Huffman4,
            "COMPRESSION_HUFFMAN_8" => CompressionKind::Huffman8,
            "COMPRESSION_LZ77_HEADER" => CompressionKind::Lz77Header,
            _ => CompressionKind::None
        }
    }
    /// Map a stable id back to the kind, unknown ids read as `None`.
    pub fn from_id(id: u32) -> Self {
        match num_traits::FromPrimitive::from_u32(id) {
            Some(kind) => kind,
            None => CompressionKind::None
        }
    }
}

impl std::fmt::Display for CompressionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Compress a buffer with the given kind, `None` copies
pub fn compress(ibuf: &[u8], kind: CompressionKind) -> Result<Vec<u8>, Error> {
    log::debug!("compress {} bytes as {}", ibuf.len(), kind);
    match kind {
        CompressionKind::None => Ok(ibuf.to_vec()),
        CompressionKind::Lz77 => lz77::compress(ibuf),
        CompressionKind::Lz11 => lz11::compress(ibuf),
        CompressionKind::Huffman4 => huffman::compress(ibuf, 4),
        CompressionKind::Huffman8 => huffman::compress(ibuf, 8),
        CompressionKind::Lz77Header => lz77::compress_header(ibuf)
    }
}

/// Expand a buffer, inferring its kind; an unrecognized buffer copies
pub fn decompress(ibuf: &[u8]) -> Result<Vec<u8>, Error> {
    let kind = sniff::kind_of(ibuf);
    log::debug!("expand {} bytes sniffed as {}", ibuf.len(), kind);
    match kind {
        CompressionKind::None => Ok(ibuf.to_vec()),
        CompressionKind::Lz77 => lz77::expand(ibuf),
        CompressionKind::Lz11 => lz11::expand(ibuf),
        CompressionKind::Huffman4 => huffman::expand(ibuf),
        CompressionKind::Huffman8 => huffman::expand(ibuf),
        CompressionKind::Lz77Header => lz77::expand_header(ibuf)
    }
}

/// Identify a buffer without touching it
pub fn kind_of(ibuf: &[u8]) -> CompressionKind {
    sniff::kind_of(ibuf)
}

#[test]
fn facade_round_trips_every_kind() {
    let dat = b"I am Sam. Sam I am. I do not like this Sam I am.\n".to_vec();
    let kinds = [
        CompressionKind::None,
        CompressionKind::Lz77,
        CompressionKind::Lz11,
        CompressionKind::Huffman4,
        CompressionKind::Huffman8,
        CompressionKind::Lz77Header
    ];
    for kind in kinds {
        let stream = compress(&dat, kind).expect("compression failed");
        assert_eq!(decompress(&stream).expect("expansion failed"), dat);
        if kind != CompressionKind::None {
            assert_eq!(kind_of(&stream), kind);
        }
    }
}

#[test]
fn names_and_ids_are_stable() {
    for (id, name) in [
        (0, "COMPRESSION_NONE"),
        (1, "COMPRESSION_LZ77"),
        (2, "COMPRESSION_LZ11"),
        (3, "COMPRESSION_HUFFMAN_4"),
        (4, "COMPRESSION_HUFFMAN_8"),
        (5, "COMPRESSION_LZ77_HEADER")
    ] {
        let kind = CompressionKind::from_id(id);
        assert_eq!(kind.name(), name);
        assert_eq!(CompressionKind::from_name(name), kind);
    }
    assert_eq!(CompressionKind::from_id(99), CompressionKind::None);
    assert_eq!(CompressionKind::from_name("COMPRESSION_LZSS"), CompressionKind::None);
}
