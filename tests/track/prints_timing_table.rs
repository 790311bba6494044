use crate::common::lineage_command;
use crate::common::parse_stub::ParseStub;
use crate::common::repo::TestRepo;
use predicates::prelude::*;

#[test]
fn timing_flag_appends_the_phase_table() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init();
    repo.commit_file("notes.txt", "alpha beta\n", "add notes");
    let stub = ParseStub::spawn();

    lineage_command(repo.path(), &stub)
        .args(["--file-path", "notes.txt", "--id", "0", "--timing"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Total time\t\S+\t100%")?)
        .stdout(predicate::str::is_match(r"Repository operations\t\S+\t\d+%")?)
        .stdout(predicate::str::is_match(r"Parse service calls\t\S+\t\d+%")?)
        .stdout(predicate::str::is_match(r"Tree matching\t\S+\t\d+%")?);

    Ok(())
}

#[test]
fn timing_table_is_opt_in() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init();
    repo.commit_file("notes.txt", "alpha beta\n", "add notes");
    let stub = ParseStub::spawn();

    lineage_command(repo.path(), &stub)
        .args(["--file-path", "notes.txt", "--id", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total time").not());

    Ok(())
}
