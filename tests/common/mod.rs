#![allow(dead_code)]

pub mod parse_stub;
pub mod repo;

use assert_cmd::Command;
use self::parse_stub::ParseStub;
use std::path::Path;

/// The binary pointed at a repository and a running parse stub
pub fn lineage_command(repository: &Path, stub: &ParseStub) -> Command {
    let mut command = Command::cargo_bin("lineage").expect("binary builds");
    command
        .current_dir(repository)
        .arg("--parser-endpoint")
        .arg(stub.endpoint());
    command
}
