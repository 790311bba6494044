use anyhow::Result;
use clap::Parser;
use lineage::areas::parse_service::DEFAULT_ENDPOINT;
use lineage::commands::print_tree::{self, PrintTreeOptions};
use lineage::commands::track::{self, TrackOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lineage",
    version = "0.1.0",
    about = "Track a syntax node backward through a file's git history",
    long_about = "Given a file and the id of one of its syntax nodes, lineage walks the \
    repository history backward, re-parses every revision that touched the file, and \
    prints a change record wherever the node's structure really changed. Run it without \
    --id first to list the file's nodes and pick one.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        short = 'r',
        long,
        default_value = ".",
        help = "Path to the git repository"
    )]
    repository_path: PathBuf,
    #[arg(
        short = 'f',
        long,
        help = "File whose history to walk, relative to the repository root"
    )]
    file_path: PathBuf,
    #[arg(
        long,
        help = "Post-order id of the node to track; omit to list the file's nodes"
    )]
    id: Option<u32>,
    #[arg(
        long,
        default_value = DEFAULT_ENDPOINT,
        help = "TCP endpoint of the parse service"
    )]
    parser_endpoint: String,
    #[arg(long, help = "Log debug detail to stderr")]
    debug: bool,
    #[arg(long, help = "Print a phase timing table after the records")]
    timing: bool,
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let mut stdout = std::io::stdout().lock();
    match cli.id {
        Some(node_id) => {
            track::run(
                &TrackOptions {
                    repository_path: cli.repository_path,
                    file_path: cli.file_path,
                    node_id,
                    parser_endpoint: cli.parser_endpoint,
                    timing: cli.timing,
                },
                &mut stdout,
            )
            .await
        }
        None => {
            print_tree::run(
                &PrintTreeOptions {
                    repository_path: cli.repository_path,
                    file_path: cli.file_path,
                    parser_endpoint: cli.parser_endpoint,
                },
                &mut stdout,
            )
            .await
        }
    }
}
