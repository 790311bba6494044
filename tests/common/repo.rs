use assert_fs::TempDir;
use assert_fs::prelude::*;
use std::cell::Cell;
use std::path::Path;
use std::process::Command;

/// A throwaway git repository with pinned identity and a ticking clock
///
/// Every commit gets a fixed author and a committer date 100 seconds after
/// the previous one, so object ids and history order are stable across runs
/// of the same scenario.
pub struct TestRepo {
    dir: TempDir,
    clock: Cell<i64>,
}

impl TestRepo {
    pub fn init() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let repo = TestRepo {
            dir,
            clock: Cell::new(1_700_000_000),
        };
        repo.git(&["init", "-q"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name`, stage it, and commit; returns the new HEAD
    pub fn commit_file(&self, name: &str, content: &str, message: &str) -> String {
        self.tick();
        self.dir.child(name).write_str(content).expect("write file");
        self.git(&["add", name]);
        self.git(&["commit", "-q", "-m", message]);
        self.head()
    }

    pub fn head(&self) -> String {
        self.git_stdout(&["rev-parse", "HEAD"])
    }

    pub fn current_branch(&self) -> String {
        self.git_stdout(&["symbolic-ref", "--short", "HEAD"])
    }

    pub fn create_branch(&self, name: &str) {
        self.git(&["checkout", "-q", "-b", name]);
    }

    pub fn checkout(&self, name: &str) {
        self.git(&["checkout", "-q", name]);
    }

    /// Merge `other` into the current branch with a forced merge commit
    pub fn merge(&self, other: &str, message: &str) -> String {
        self.tick();
        self.git(&["merge", "-q", "--no-ff", "-m", message, other]);
        self.head()
    }

    fn tick(&self) {
        self.clock.set(self.clock.get() + 100);
    }

    fn git(&self, args: &[&str]) {
        let output = self.command(args).output().expect("git runs");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn git_stdout(&self, args: &[&str]) -> String {
        let output = self.command(args).output().expect("git runs");
        assert!(output.status.success(), "git {args:?} failed");
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    fn command(&self, args: &[&str]) -> Command {
        let timestamp = format!("{} +0000", self.clock.get());
        let mut command = Command::new("git");
        command
            .current_dir(self.dir.path())
            // host git config must not leak into the fixture
            .env("GIT_CONFIG_GLOBAL", "/dev/null")
            .env("GIT_CONFIG_SYSTEM", "/dev/null")
            .env("GIT_AUTHOR_NAME", "Jane Doe")
            .env("GIT_AUTHOR_EMAIL", "jane@example.com")
            .env("GIT_COMMITTER_NAME", "Jane Doe")
            .env("GIT_COMMITTER_EMAIL", "jane@example.com")
            .env("GIT_AUTHOR_DATE", &timestamp)
            .env("GIT_COMMITTER_DATE", &timestamp)
            .args(args);
        command
    }
}
