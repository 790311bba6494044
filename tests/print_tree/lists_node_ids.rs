use crate::common::lineage_command;
use crate::common::parse_stub::ParseStub;
use crate::common::repo::TestRepo;
use predicates::prelude::*;

#[test]
fn every_node_gets_a_line_with_span_and_id() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init();
    repo.commit_file("notes.txt", "alpha beta\n", "add notes");
    let stub = ParseStub::spawn();

    lineage_command(repo.path(), &stub)
        .args(["--file-path", "notes.txt"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "Choose node id:\n\
             file [0..11) 2\n\
             - alpha [0..5) 0\n\
             - beta [6..10) 1\n",
        ));

    Ok(())
}

#[test]
fn shows_the_file_as_it_stands_at_head() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init();
    repo.commit_file("notes.txt", "alpha\n", "start small");
    repo.commit_file("notes.txt", "alpha beta\n", "grow");
    let stub = ParseStub::spawn();

    lineage_command(repo.path(), &stub)
        .args(["--file-path", "notes.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- beta [6..10) 1"));

    Ok(())
}

#[test]
fn fails_when_the_file_is_missing_at_head() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init();
    repo.commit_file("other.txt", "alpha\n", "unrelated file");
    let stub = ParseStub::spawn();

    lineage_command(repo.path(), &stub)
        .args(["--file-path", "notes.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "file notes.txt does not exist at commit",
        ));

    Ok(())
}
