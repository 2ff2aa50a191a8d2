use assert_cmd::Command;
use assert_fs::{prelude::FileWriteStr, NamedTempFile};
use predicates::prelude::predicate;

const BLOCKS_CORPUS: &str = r#"trace.
state(holding(b1:block)=false).
action(pickup(b1:block)).
state(holding(b1:block)=true).
action(scan(b1:block)).
state(holding(b1:block)=true).
action(putdown(b1:block)).
state(holding(b1:block)=false).
"#;

const SINGLE_ACTION_CORPUS: &str = r#"trace.
state(holding(b1:block)=false).
action(pickup(b1:block)).
state(holding(b1:block)=true).
"#;

fn corpus_file(content: &str) -> Result<NamedTempFile, Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("corpus.txt")?;
    file.write_str(content)?;
    Ok(file)
}

#[test]
fn test_encode_writes_a_wcnf_preamble() -> Result<(), Box<dyn std::error::Error>> {
    let file = corpus_file(BLOCKS_CORPUS)?;
    let mut cmd = Command::cargo_bin("tracelearn")?;
    cmd.arg("encode")
        .arg("-f")
        .arg(file.path())
        .arg("--upper-bound")
        .arg("1")
        .arg("--min-support")
        .arg("1");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("p wcnf"));
    file.close().unwrap();
    Ok(())
}

#[test]
fn test_encode_to_output_file() -> Result<(), Box<dyn std::error::Error>> {
    let file = corpus_file(BLOCKS_CORPUS)?;
    let out = NamedTempFile::new("instance.wcnf")?;
    let mut cmd = Command::cargo_bin("tracelearn")?;
    cmd.arg("encode")
        .arg("-f")
        .arg(file.path())
        .arg("--upper-bound")
        .arg("1")
        .arg("-o")
        .arg(out.path());
    cmd.assert().success();
    let content = std::fs::read_to_string(out.path())?;
    assert!(content.starts_with("p wcnf "));
    out.close().unwrap();
    file.close().unwrap();
    Ok(())
}

#[test]
fn test_encode_requires_an_upper_bound() -> Result<(), Box<dyn std::error::Error>> {
    let file = corpus_file(BLOCKS_CORPUS)?;
    let mut cmd = Command::cargo_bin("tracelearn")?;
    cmd.arg("encode").arg("-f").arg(file.path());
    cmd.assert().failure();
    file.close().unwrap();
    Ok(())
}

#[test]
fn test_encode_rejects_a_non_numeric_upper_bound() -> Result<(), Box<dyn std::error::Error>> {
    let file = corpus_file(BLOCKS_CORPUS)?;
    let mut cmd = Command::cargo_bin("tracelearn")?;
    cmd.arg("encode")
        .arg("-f")
        .arg(file.path())
        .arg("--upper-bound")
        .arg("many");
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("invalid value"));
    file.close().unwrap();
    Ok(())
}

#[test]
fn test_encode_rejects_a_null_upper_bound() -> Result<(), Box<dyn std::error::Error>> {
    let file = corpus_file(BLOCKS_CORPUS)?;
    let mut cmd = Command::cargo_bin("tracelearn")?;
    cmd.arg("encode")
        .arg("-f")
        .arg(file.path())
        .arg("--upper-bound")
        .arg("0");
    cmd.assert().failure();
    file.close().unwrap();
    Ok(())
}

#[test]
fn test_encode_reports_a_missing_input_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("tracelearn")?;
    cmd.arg("encode")
        .arg("-f")
        .arg("/this/corpus/does/not/exist")
        .arg("--upper-bound")
        .arg("1");
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("while opening file"));
    Ok(())
}

#[test]
fn test_encode_reports_a_corpus_syntax_error() -> Result<(), Box<dyn std::error::Error>> {
    let file = corpus_file("trace.\nnot-a-step.\n")?;
    let mut cmd = Command::cargo_bin("tracelearn")?;
    cmd.arg("encode")
        .arg("-f")
        .arg(file.path())
        .arg("--upper-bound")
        .arg("1");
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("line 2"));
    file.close().unwrap();
    Ok(())
}

#[test]
fn test_learn_with_an_all_negative_oracle() -> Result<(), Box<dyn std::error::Error>> {
    if !cfg!(target_family = "unix") {
        return Ok(());
    }
    let file = corpus_file(SINGLE_ACTION_CORPUS)?;
    let mut cmd = Command::cargo_bin("tracelearn")?;
    cmd.arg("learn")
        .arg("-f")
        .arg(file.path())
        .arg("--upper-bound")
        .arg("1")
        .arg("--min-support")
        .arg("1")
        .arg("--solver")
        .arg("printf")
        .arg("--solver-opt")
        .arg(r"s OPTIMUM FOUND\nv -1 -2 -3 0\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("fluent: holding"))
        .stdout(predicate::str::contains("action: pickup"));
    file.close().unwrap();
    Ok(())
}

#[test]
fn test_learn_with_an_inconclusive_oracle() -> Result<(), Box<dyn std::error::Error>> {
    if !cfg!(target_family = "unix") {
        return Ok(());
    }
    let file = corpus_file(SINGLE_ACTION_CORPUS)?;
    let mut cmd = Command::cargo_bin("tracelearn")?;
    cmd.arg("learn")
        .arg("-f")
        .arg(file.path())
        .arg("--upper-bound")
        .arg("1")
        .arg("--solver")
        .arg("echo")
        .arg("--solver-opt")
        .arg("s UNSATISFIABLE");
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("did not prove an optimum"));
    file.close().unwrap();
    Ok(())
}

#[test]
fn test_learn_with_an_unknown_solver() -> Result<(), Box<dyn std::error::Error>> {
    let file = corpus_file(SINGLE_ACTION_CORPUS)?;
    let mut cmd = Command::cargo_bin("tracelearn")?;
    cmd.arg("learn")
        .arg("-f")
        .arg(file.path())
        .arg("--upper-bound")
        .arg("1")
        .arg("--solver")
        .arg("/this/solver/does/not/exist");
    cmd.assert().failure();
    file.close().unwrap();
    Ok(())
}
