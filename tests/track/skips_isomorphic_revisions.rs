use crate::common::lineage_command;
use crate::common::parse_stub::ParseStub;
use crate::common::repo::TestRepo;
use predicates::prelude::*;

#[test]
fn formatting_only_history_collapses_to_the_introduction() -> Result<(), Box<dyn std::error::Error>>
{
    let repo = TestRepo::init();
    let introduced = repo.commit_file("notes.txt", "alpha beta\n", "add notes");
    let spaced = repo.commit_file("notes.txt", "alpha  beta\n", "double the space");
    let tabbed = repo.commit_file("notes.txt", "alpha\tbeta\n", "use a tab");
    let stub = ParseStub::spawn();

    lineage_command(repo.path(), &stub)
        .args(["--file-path", "notes.txt", "--id", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("commit {introduced}")))
        .stdout(predicate::str::contains("@@ -0,0 +1,1 @@\n+alpha"))
        .stdout(predicate::str::contains(spaced).not())
        .stdout(predicate::str::contains(tabbed).not());

    Ok(())
}
