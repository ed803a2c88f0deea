//! Tests driving the `samhita` binary.

use std::fs;
use std::process::Command;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn samhita() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_samhita"));
    cmd.env_remove("RUST_LOG").env_remove("SAMHITA_METER");
    cmd
}

#[test]
fn test_cli_converts_and_reports_progress() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.json");

    let result = samhita()
        .arg(format!("{FIXTURES_DIR}/rv_book_02.tei"))
        .arg(&output)
        .output()
        .unwrap();

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Parsing TEI file:"), "{stdout}");
    assert!(stdout.contains("processing hymn"), "{stdout}");
    assert!(stdout.contains("Found 2 hymns"), "{stdout}");
    assert!(stdout.contains("Generated 1 hymns with 1 verses"), "{stdout}");
    assert!(!stdout.contains('\x1b'), "escape codes in piped output: {stdout:?}");

    let json = fs::read_to_string(&output).unwrap();
    assert!(json.contains("\"suktaId\": \"2-3\""));
}

#[test]
fn test_cli_quiet_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.json");

    let result = samhita()
        .arg("--quiet")
        .arg(format!("{FIXTURES_DIR}/rv_book_02.tei"))
        .arg(&output)
        .output()
        .unwrap();

    assert!(result.status.success());
    assert!(result.stdout.is_empty());
    assert!(output.exists());
}

#[test]
fn test_cli_missing_book_fails_with_one_line() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.tei");
    let output = dir.path().join("out.json");
    fs::write(&input, "<TEI><text/></TEI>").unwrap();

    let result = samhita().arg("-q").arg(&input).arg(&output).output().unwrap();

    assert!(!result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert_eq!(stdout.trim_end(), "error: book container not found");
    assert!(!output.exists());
}

#[test]
fn test_cli_requires_output_path() {
    let result = samhita()
        .arg(format!("{FIXTURES_DIR}/rv_book_02.tei"))
        .output()
        .unwrap();
    assert!(!result.status.success());
}

#[test]
fn test_cli_check_mode() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.json");
    let bad = dir.path().join("bad.json");

    let convert = samhita()
        .arg("-q")
        .arg(format!("{FIXTURES_DIR}/rv_book_02.tei"))
        .arg(&good)
        .output()
        .unwrap();
    assert!(convert.status.success());

    let result = samhita().arg("--check").arg(&good).output().unwrap();
    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Mandalas: 1, Suktas: 1, Verses: 1"), "{stdout}");

    fs::write(&bad, r#"{"mandalas": [{"mandala": 12, "suktas": []}]}"#).unwrap();
    let result = samhita().arg("--check").arg(&bad).output().unwrap();
    assert!(!result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("mandala 12: number must be between 1 and 10"), "{stdout}");
}

#[test]
fn test_cli_metre_feature_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.tei");
    let output = dir.path().join("out.json");
    fs::write(
        &input,
        r#"<TEI><div xml:id="b01" type="book"><div type="hymn" ana="1">
<fs type="metre_info"><f name="metre">Gāyatrī</f></fs>
<div type="stanza"><lg xml:lang="eng" source="griffith"><l>I laud Agni</l></lg></div>
</div></div></TEI>"#,
    )
    .unwrap();

    let result = samhita()
        .env("SAMHITA_METER", "metre-feature")
        .arg("-q")
        .arg(&input)
        .arg(&output)
        .output()
        .unwrap();
    assert!(result.status.success());

    let json = fs::read_to_string(&output).unwrap();
    assert!(json.contains("\"meter\": \"Gāyatrī\""), "{json}");
}
