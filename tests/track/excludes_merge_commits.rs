use crate::common::lineage_command;
use crate::common::parse_stub::ParseStub;
use crate::common::repo::TestRepo;
use predicates::prelude::*;

#[test]
fn merge_commits_never_appear_in_the_records() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init();
    let base = repo.commit_file("notes.txt", "alpha beta\n", "base");
    let default_branch = repo.current_branch();
    repo.create_branch("rename");
    let renamed = repo.commit_file("notes.txt", "alpha betta\n", "rename beta");
    repo.checkout(&default_branch);
    let merge = repo.merge("rename", "merge the rename");
    let stub = ParseStub::spawn();

    lineage_command(repo.path(), &stub)
        .args(["--file-path", "notes.txt", "--id", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("commit {renamed}")))
        .stdout(predicate::str::contains(format!("commit {base}")))
        .stdout(predicate::str::contains("-beta\n+betta"))
        .stdout(predicate::str::contains(merge).not());

    Ok(())
}
