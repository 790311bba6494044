use crate::common::lineage_command;
use crate::common::parse_stub::ParseStub;
use crate::common::repo::TestRepo;
use pretty_assertions::assert_eq;

#[test]
fn two_runs_print_identical_bytes() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init();
    repo.commit_file("notes.txt", "alpha betta gamma\n", "add greek letters");
    repo.commit_file("notes.txt", "alpha beta gamma\n", "fix beta spelling");
    repo.commit_file("notes.txt", "gamma alpha beta\n", "reorder");
    let stub = ParseStub::spawn();

    let mut runs = Vec::new();
    for _ in 0..2 {
        let output = lineage_command(repo.path(), &stub)
            .args(["--file-path", "notes.txt", "--id", "2"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        runs.push(output);
    }

    assert_eq!(runs[0], runs[1]);

    Ok(())
}
