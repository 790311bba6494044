//! List the file's node ids so the user can pick one to track

use crate::areas::parse_service::ParseClient;
use crate::areas::repository::Repository;
use crate::artifacts::tracking::tracker::SourceParser;
use anyhow::Context;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PrintTreeOptions {
    pub repository_path: PathBuf,
    pub file_path: PathBuf,
    pub parser_endpoint: String,
}

/// Parse the file as it stands at HEAD and print every node with its id
pub async fn run(options: &PrintTreeOptions, writer: &mut impl Write) -> anyhow::Result<()> {
    let repository = Repository::open(&options.repository_path)?;
    let head = repository.head_commit()?;
    let content = repository.content_at(&head, &options.file_path)?;

    let parser = ParseClient::new(options.parser_endpoint.clone());
    let tree = parser
        .parse(&options.file_path, &content)
        .await
        .with_context(|| format!("unable to parse {}", options.file_path.display()))?;

    writeln!(writer, "Choose node id:")?;
    let mut failed: Option<std::io::Error> = None;
    tree.walk(|depth, node| {
        if failed.is_some() {
            return;
        }
        let written = if depth == 0 {
            writeln!(writer, "{} {} {}", node.label(), node.span(), node.id())
        } else {
            writeln!(
                writer,
                "{} {} {} {}",
                "-".repeat(depth),
                node.label(),
                node.span(),
                node.id()
            )
        };
        if let Err(error) = written {
            failed = Some(error);
        }
    });

    match failed {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}
