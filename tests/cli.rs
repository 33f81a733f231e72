use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_petition_scraper");

#[test]
fn missing_petition_name_exits_nonzero_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(BIN)
        .arg("https://www.peticie.com/signatures.php?page_number=1&num_rows=100")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Can't find petition name"), "stderr: {}", stderr);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn blank_petition_name_is_treated_as_missing() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(BIN)
        .arg("https://www.peticie.com/signatures.php?tunnus=")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn unparseable_url_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(BIN)
        .arg("not a url")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
