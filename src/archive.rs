//! Indexed archive container
//!
//! A decompressed archive starts with a little-endian 32-bit member
//! count, then one `(offset, size)` record per member, both 32-bit
//! little-endian.  Offsets are relative to the start of the record
//! table, so the first payload begins at `8 * count`.  Payloads are
//! padded to 4-byte boundaries and each one is an independently
//! compressed blob whose kind the sniffer recovers.
//!
//! Member slicing runs on offset deltas: a member ends where the next
//! one begins (the last runs to the end of the archive), so trailing
//! pad bytes ride along and the decoders discard them.  The archive as
//! a whole is compressed once more with the archive-level kind, and the
//! finished file is padded to a multiple of four.

use std::path::Path;
use crate::{CompressionKind, Error, DYNERR, STDRESULT};
use crate::manifest;

/// a member recovered from an archive
pub struct Member {
    /// how the payload was compressed inside the archive
    pub kind: CompressionKind,
    /// the decompressed payload
    pub data: Vec<u8>
}

fn u32_at(buf: &[u8], offset: usize) -> Result<u32, Error> {
    if offset + 4 > buf.len() {
        return Err(Error::TruncatedInput);
    }
    Ok(u32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3]
    ]))
}

/// Lay compressed blobs out as an archive body
pub fn pack(blobs: &[Vec<u8>]) -> Vec<u8> {
    let mut ans = Vec::new();
    ans.extend_from_slice(&u32::to_le_bytes(blobs.len() as u32));
    let mut offset = blobs.len() as u32 * 8;
    for blob in blobs {
        ans.extend_from_slice(&u32::to_le_bytes(offset));
        ans.extend_from_slice(&u32::to_le_bytes(blob.len() as u32));
        offset += blob.len() as u32;
        offset = (offset + 3) & !3;
    }
    for blob in blobs {
        ans.extend_from_slice(blob);
        while ans.len() & 3 != 0 {
            ans.push(0);
        }
    }
    ans
}

/// Slice a decompressed archive body into members and expand each one
pub fn unpack(archive: &[u8]) -> Result<Vec<Member>, Error> {
    let count = u32_at(archive, 0)? as usize;
    log::debug!("archive lists {} members", count);
    let mut members = Vec::new();
    for i in 0..count {
        let start = u32_at(archive, 4 + i * 8)? as usize + 4;
        let end = match i + 1 == count {
            true => archive.len(),
            false => u32_at(archive, 4 + (i + 1) * 8)? as usize + 4
        };
        if start > end || end > archive.len() {
            return Err(Error::TruncatedInput);
        }
        let blob = &archive[start..end];
        members.push(Member {
            kind: crate::kind_of(blob),
            data: crate::decompress(blob)?
        });
    }
    Ok(members)
}

/// Compress members with their kinds, wrap them, and compress the whole
/// archive with the archive-level kind
pub fn build(members: &[(CompressionKind, Vec<u8>)], archive_kind: CompressionKind) -> Result<Vec<u8>, Error> {
    let mut blobs = Vec::new();
    for (kind, data) in members {
        blobs.push(crate::compress(data, *kind)?);
    }
    let body = pack(&blobs);
    let mut ans = crate::compress(&body, archive_kind)?;
    while ans.len() & 3 != 0 {
        ans.push(0);
    }
    Ok(ans)
}

/// Expand the outer layer of an archive file and unpack its members,
/// reporting the archive-level kind alongside
pub fn extract(file: &[u8]) -> Result<(CompressionKind, Vec<Member>), Error> {
    let archive_kind = crate::kind_of(file);
    let body = crate::decompress(file)?;
    let members = unpack(&body)?;
    Ok((archive_kind, members))
}

/// Extract an archive file to a manifest plus one decompressed file per
/// member, laid out the way `rebuild_file` expects them back
pub fn extract_file(in_path: &Path, out_path: &Path) -> STDRESULT {
    let dat = std::fs::read(in_path)?;
    let (archive_kind, members) = extract(&dat)?;
    let stem = match out_path.file_stem() {
        Some(stem) => stem.to_string_lossy().to_string(),
        None => return Err(DYNERR::from("output path has no file name"))
    };
    let dest_dir = out_path.with_extension("");
    std::fs::create_dir_all(&dest_dir)?;
    let mut entries = Vec::new();
    for (i, member) in members.iter().enumerate() {
        let filename = format!("{}.bin", i);
        std::fs::write(dest_dir.join(&filename), &member.data)?;
        entries.push((member.kind, format!("{}/{}", stem, filename)));
    }
    std::fs::write(out_path, manifest::render(archive_kind, &entries))?;
    Ok(())
}

/// Rebuild an archive file from a manifest and the files it lists
pub fn rebuild_file(in_path: &Path, out_path: &Path) -> STDRESULT {
    let text = std::fs::read_to_string(in_path)?;
    let base = match in_path.parent() {
        Some(parent) => parent.to_path_buf(),
        None => std::path::PathBuf::new()
    };
    let list = manifest::parse(&text, &base);
    let mut members = Vec::new();
    for (kind, path) in &list.entries {
        log::debug!("read member {} as {}", path.display(), kind);
        let data = std::fs::read(path)?;
        members.push((*kind, data));
    }
    let dat = build(&members, list.archive_kind)?;
    std::fs::write(out_path, dat)?;
    Ok(())
}

#[test]
fn pack_layout() {
    let blobs = vec![vec![1, 2, 3], vec![4, 5, 6, 7, 8]];
    let body = pack(&blobs);
    // count, then (16, 3) and (20, 5), then padded payloads
    assert_eq!(
        body,
        vec![
            2, 0, 0, 0, 16, 0, 0, 0, 3, 0, 0, 0, 20, 0, 0, 0, 5, 0, 0, 0, 1, 2, 3, 0, 4, 5, 6, 7,
            8, 0, 0, 0
        ]
    );
}

#[test]
fn archive_round_trip() {
    let members: Vec<(CompressionKind, Vec<u8>)> = vec![
        (CompressionKind::Lz77, b"I am Sam. Sam I am. I do not like this Sam I am.\n".to_vec()),
        (CompressionKind::None, b"tiny".to_vec()),
        (CompressionKind::Huffman4, vec![0x42; 64]),
        (CompressionKind::Lz11, (0..1000u32).map(|i| (i % 7) as u8).collect())
    ];
    for archive_kind in [CompressionKind::None, CompressionKind::Lz11, CompressionKind::Lz77Header] {
        let file = build(&members, archive_kind).expect("build failed");
        assert_eq!(file.len() & 3, 0);
        let (found_kind, found) = extract(&file).expect("extract failed");
        assert_eq!(found_kind, archive_kind);
        assert_eq!(found.len(), members.len());
        for (member, (kind, data)) in found.iter().zip(members.iter()) {
            assert_eq!(member.kind, *kind);
            assert_eq!(&member.data, data);
        }
    }
}

#[test]
fn empty_archive() {
    let file = build(&[], CompressionKind::None).expect("build failed");
    let (_, members) = extract(&file).expect("extract failed");
    assert!(members.is_empty());
}

#[test]
fn junk_archive_is_rejected() {
    // claims 100 members in 4 bytes
    assert!(unpack(&[100, 0, 0, 0]).is_err());
    assert!(unpack(&[]).is_err());
}
