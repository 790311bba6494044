use crate::common::lineage_command;
use crate::common::parse_stub::ParseStub;
use crate::common::repo::TestRepo;
use predicates::prelude::*;

#[test]
fn the_walk_never_looks_past_the_introduction() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init();
    let ancient = repo.commit_file("notes.txt", "alpha gamma\n", "before beta existed");
    let added = repo.commit_file("notes.txt", "alpha beta gamma\n", "add beta");
    let reformatted = repo.commit_file("notes.txt", "alpha  beta gamma\n", "reformat");
    let stub = ParseStub::spawn();

    lineage_command(repo.path(), &stub)
        .args(["--file-path", "notes.txt", "--id", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("commit {added}")))
        .stdout(predicate::str::contains("@@ -0,0 +1,1 @@\n+beta"))
        .stdout(predicate::str::contains(ancient).not())
        .stdout(predicate::str::contains(reformatted).not());

    Ok(())
}
