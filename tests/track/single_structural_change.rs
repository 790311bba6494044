use crate::common::lineage_command;
use crate::common::parse_stub::ParseStub;
use crate::common::repo::TestRepo;
use predicates::prelude::*;

#[test]
fn reports_the_change_and_the_introduction() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init();
    let introduced = repo.commit_file("notes.txt", "alpha betta gamma\n", "add greek letters");
    let fixed = repo.commit_file("notes.txt", "alpha beta gamma\n", "fix beta spelling");
    let reformatted = repo.commit_file("notes.txt", "alpha  beta gamma\n", "reformat spacing");
    let stub = ParseStub::spawn();

    let pattern = format!(
        "(?s)commit {fixed}\n\
         Author: Jane Doe <jane@example\\.com>\n\
         Date:   .*\
             fix beta spelling.*\
         --- Original\n\
         \\+\\+\\+ Current\n\
         @@ -1,1 \\+1,1 @@\n\
         -betta\n\
         \\+beta\n\
         .*commit {introduced}.*\
         @@ -0,0 \\+1,1 @@\n\
         \\+betta\n"
    );

    lineage_command(repo.path(), &stub)
        .args(["--file-path", "notes.txt", "--id", "1"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(pattern)?)
        // the formatting-only revision contributes no record
        .stdout(predicate::str::contains(reformatted).not());

    Ok(())
}
