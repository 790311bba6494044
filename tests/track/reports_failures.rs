use crate::common::lineage_command;
use crate::common::parse_stub::ParseStub;
use crate::common::repo::TestRepo;
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn refuses_to_run_without_the_parse_service() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init();
    repo.commit_file("notes.txt", "alpha beta\n", "add notes");

    // port 1 is never listening
    Command::cargo_bin("lineage")?
        .current_dir(repo.path())
        .args(["--parser-endpoint", "127.0.0.1:1"])
        .args(["--file-path", "notes.txt", "--id", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "can't connect to the parse service at 127.0.0.1:1",
        ));

    Ok(())
}

#[test]
fn fails_when_the_file_was_never_committed() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init();
    repo.commit_file("other.txt", "alpha\n", "unrelated file");
    let stub = ParseStub::spawn();

    lineage_command(repo.path(), &stub)
        .args(["--file-path", "notes.txt", "--id", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no commits found for notes.txt"));

    Ok(())
}

#[test]
fn fails_for_a_node_id_the_file_does_not_have() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init();
    repo.commit_file("notes.txt", "alpha beta\n", "add notes");
    let stub = ParseStub::spawn();

    lineage_command(repo.path(), &stub)
        .args(["--file-path", "notes.txt", "--id", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("node with id 99 not found"));

    Ok(())
}

#[test]
fn surfaces_a_parser_rejection() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init();
    repo.commit_file("notes.txt", "PARSE_ERROR alpha\n", "unparseable content");
    let stub = ParseStub::spawn();

    lineage_command(repo.path(), &stub)
        .args(["--file-path", "notes.txt", "--id", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse service rejected notes.txt"));

    Ok(())
}
