//! Follow one node backward and print its change records

use crate::areas::parse_service::ParseClient;
use crate::areas::repository::Repository;
use crate::artifacts::diff::myers::MyersDiff;
use crate::artifacts::log::file_history::FileHistory;
use crate::artifacts::matching::matcher::GreedyMatcher;
use crate::artifacts::tracking::record::ChangeRecord;
use crate::artifacts::tracking::tracker::NodeTracker;
use anyhow::Context;
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct TrackOptions {
    pub repository_path: PathBuf,
    pub file_path: PathBuf,
    pub node_id: u32,
    pub parser_endpoint: String,
    pub timing: bool,
}

pub async fn run(options: &TrackOptions, writer: &mut impl Write) -> anyhow::Result<()> {
    let run_started = Instant::now();

    let repository = Repository::open(&options.repository_path)?;
    let history = FileHistory::new(&repository, options.file_path.clone());
    let parser = ParseClient::new(options.parser_endpoint.clone());
    let tracker = NodeTracker::new(
        history,
        parser,
        GreedyMatcher::default(),
        options.file_path.clone(),
    );

    let outcome = tracker.track(options.node_id).await.with_context(|| {
        format!(
            "unable to track node {} of {}",
            options.node_id,
            options.file_path.display()
        )
    })?;

    for record in outcome.records() {
        print_record(writer, record)?;
    }

    if options.timing {
        writeln!(
            writer,
            "{}",
            outcome.timings().render(run_started.elapsed())
        )?;
    }

    Ok(())
}

/// Commit header in git's medium format, then a unified diff of the node text
fn print_record(writer: &mut impl Write, record: &ChangeRecord) -> anyhow::Result<()> {
    let commit = record.commit();
    writeln!(writer, "commit {}", commit.oid())?;
    writeln!(writer, "Author: {}", commit.author().display_name())?;
    writeln!(writer, "Date:   {}", commit.author().readable_timestamp())?;
    writeln!(writer)?;
    for message_line in commit.message().lines() {
        writeln!(writer, "    {}", message_line)?;
    }
    writeln!(writer)?;

    writeln!(writer, "{}", "--- Original".bold())?;
    writeln!(writer, "{}", "+++ Current".bold())?;

    let previous = record.previous_text();
    let current = record.current_text();
    let previous_lines: Vec<&str> = previous.lines().collect();
    let current_lines: Vec<&str> = current.lines().collect();

    for hunk in MyersDiff::new(&previous_lines, &current_lines).hunks() {
        let a_offset = format!("{},{}", hunk.a_start(), hunk.a_size());
        let b_offset = format!("{},{}", hunk.b_start(), hunk.b_size());
        writeln!(writer, "{}", format!("@@ -{a_offset} +{b_offset} @@").cyan())?;

        for edit in hunk.edits() {
            writeln!(writer, "{}", edit)?;
        }
    }
    writeln!(writer)?;

    Ok(())
}
