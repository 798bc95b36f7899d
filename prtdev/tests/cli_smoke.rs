use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn prtdev(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("prtdev").expect("binary built");
    cmd.current_dir(cwd).env_remove("RUST_LOG");
    cmd
}

fn setup(len: usize) -> (TempDir, Vec<u8>) {
    let td = TempDir::new().expect("tempdir");
    let data: Vec<u8> = (0..len).map(|i| (i % 253) as u8).collect();
    fs::write(td.path().join("game.iso"), &data).expect("write source");
    (td, data)
}

#[test]
fn split_then_resume() {
    let (td, data) = setup(10_000);

    prtdev(td.path())
        .args(["split", "game.iso", "--parts", "3", "--run", "r1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("game_r1_3.prt  3334 bytes"))
        .stdout(predicate::str::contains("resume: stitch.toml"));

    assert!(td.path().join("game_hash_r1").exists());
    assert!(td.path().join("stitch.toml").exists());
    fs::remove_file(td.path().join("game.iso")).unwrap();

    prtdev(td.path())
        .arg("resume")
        .assert()
        .success()
        .stdout(predicate::str::contains("hash: OK"));
    assert_eq!(fs::read(td.path().join("game.iso")).unwrap(), data);
}

#[test]
fn stitch_with_hash_and_out() {
    let (td, data) = setup(5000);
    prtdev(td.path())
        .args(["split", "game.iso", "-s", "4096", "--run", "r1", "--no-config"])
        .assert()
        .success();
    assert!(!td.path().join("stitch.toml").exists());

    prtdev(td.path())
        .args([
            "stitch",
            "game.iso",
            "--out",
            "copy.iso",
            "--hash-file",
            "game_hash_r1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("hash: OK"));
    assert_eq!(fs::read(td.path().join("copy.iso")).unwrap(), data);

    prtdev(td.path())
        .args(["verify", "copy.iso", "--hash-file", "game_hash_r1"])
        .assert()
        .success();
}

#[test]
fn corrupted_part_exits_with_mismatch() {
    let (td, _) = setup(3000);
    prtdev(td.path())
        .args(["split", "game.iso", "-p", "2", "--run", "r1", "--no-config"])
        .assert()
        .success();
    fs::write(td.path().join("game_r1_2.prt"), vec![0u8; 1500]).unwrap();

    prtdev(td.path())
        .args([
            "stitch",
            "game.iso",
            "-o",
            "bad.iso",
            "--hash-file",
            "game_hash_r1",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("hash: MISMATCH"));
    assert!(td.path().join("bad.iso").exists());
}

#[test]
fn list_groups_runs() {
    let (td, _) = setup(100);
    for run in ["r1", "r2"] {
        prtdev(td.path())
            .args(["split", "game.iso", "-p", "2", "--run", run, "--no-config"])
            .assert()
            .success();
    }
    prtdev(td.path())
        .args(["list", "game.iso"])
        .assert()
        .success()
        .stdout(predicate::str::contains("run r1  2 parts  100 bytes"))
        .stdout(predicate::str::contains("run r2  2 parts  100 bytes"));
}

#[test]
fn argument_errors() {
    let (td, _) = setup(10);

    // clap rejects missing and conflicting size options
    prtdev(td.path()).args(["split", "game.iso"]).assert().failure();
    prtdev(td.path())
        .args(["split", "game.iso", "-p", "2", "-s", "4"])
        .assert()
        .failure();

    prtdev(td.path())
        .args(["split", "game.iso", "-s", "11", "--no-config"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("larger than the file"));
    prtdev(td.path())
        .args(["split", "game.iso", "-p", "11", "--no-config"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("at least 1 byte"));
    prtdev(td.path())
        .args(["stitch", "other.iso"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no part files"));
}

#[test]
fn progress_goes_through_the_log() {
    let (td, _) = setup(1000);
    prtdev(td.path())
        .args(["split", "game.iso", "-p", "2", "--run", "r1", "--no-config"])
        .assert()
        .success()
        .stderr(predicate::str::contains("split finished").not());

    prtdev(td.path())
        .args(["-v", "stitch", "game.iso", "-o", "copy.iso"])
        .assert()
        .success()
        .stderr(predicate::str::contains("stitch finished"));
}

#[test]
fn verify_finds_bare_record_next_to_the_file() {
    let (td, _) = setup(2000);
    prtdev(td.path())
        .args(["split", "game.iso", "-p", "2", "--run", "r1", "--no-config"])
        .assert()
        .success();

    let elsewhere = TempDir::new().expect("tempdir");
    let file = td.path().join("game.iso");
    prtdev(elsewhere.path())
        .arg("verify")
        .arg(&file)
        .args(["--hash-file", "game_hash_r1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hash: OK"));
}
