use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*;
use std::process::Command; // Run programs
use tempfile;
type STDRESULT = Result<(), Box<dyn std::error::Error>>;

/// write a manifest and its member files, returning the manifest path
fn stage_inputs(dir: &std::path::Path) -> Result<std::path::PathBuf, Box<dyn std::error::Error>> {
    let members: Vec<(&str, Vec<u8>)> = vec![
        ("COMPRESSION_LZ77", b"I am Sam. Sam I am. I do not like this Sam I am.\n".to_vec()),
        ("COMPRESSION_LZ11", (0..600u32).map(|i| (i % 5) as u8).collect()),
        ("COMPRESSION_HUFFMAN_4", vec![0x42; 64]),
        // a NONE member reads back with its alignment pad attached, so
        // keep it a multiple of four bytes
        ("COMPRESSION_NONE", b"left alone!\n".to_vec())
    ];
    std::fs::create_dir(dir.join("members"))?;
    let mut manifest = String::from("COMPRESSION_LZ11\n\n");
    for (i, (kind, data)) in members.iter().enumerate() {
        let rel = format!("members/{}.dat", i);
        std::fs::write(dir.join(&rel), data)?;
        manifest += &format!("{},{}\n", kind, rel);
    }
    let list_path = dir.join("archive.lst");
    std::fs::write(&list_path, manifest)?;
    Ok(list_path)
}

#[test]
fn rebuild_then_extract() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let list_path = stage_inputs(temp_dir.path())?;

    // rebuild: list in, default output name archive.bin
    let mut cmd = Command::cargo_bin("dspack")?;
    cmd.current_dir(temp_dir.path()).arg(&list_path).assert().success();
    let bin_path = temp_dir.path().join("archive.bin");
    assert!(bin_path.exists());

    // extract to a fresh name so the inputs stay untouched
    let out_list = temp_dir.path().join("check.lst");
    let mut cmd = Command::cargo_bin("dspack")?;
    cmd.arg(&bin_path).arg(&out_list).assert().success();

    // the round trip reproduces every member byte for byte
    for i in 0..4 {
        let original = std::fs::read(temp_dir.path().join(format!("members/{}.dat", i)))?;
        let extracted = std::fs::read(temp_dir.path().join("check").join(format!("{}.bin", i)))?;
        assert_eq!(original, extracted, "member {}", i);
    }
    // and the new manifest lists the same kinds
    let text = std::fs::read_to_string(&out_list)?;
    assert!(text.starts_with("COMPRESSION_LZ11\n"));
    assert!(text.contains("COMPRESSION_LZ77,check/0.bin"));
    assert!(text.contains("COMPRESSION_NONE,check/3.bin"));
    Ok(())
}

#[test]
fn missing_member_fails() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let list_path = temp_dir.path().join("broken.lst");
    std::fs::write(&list_path, "COMPRESSION_NONE\n\nCOMPRESSION_LZ77,nowhere.dat\n")?;
    let mut cmd = Command::cargo_bin("dspack")?;
    cmd.arg(&list_path).assert().failure();
    Ok(())
}

#[test]
fn junk_archive_fails() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let bin_path = temp_dir.path().join("junk.bin");
    // sniffs as nothing, so the copy passes through and the member table
    // points past the end
    std::fs::write(&bin_path, [0xAAu8; 32])?;
    let mut cmd = Command::cargo_bin("dspack")?;
    cmd.arg(&bin_path)
        .assert()
        .failure()
        .stderr(predicate::str::is_empty().not());
    Ok(())
}
