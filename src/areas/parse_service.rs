//! Client for the external parse service
//!
//! The service listens on TCP and speaks length-prefixed JSON: a 4-byte
//! big-endian length followed by that many bytes of payload. Each call opens
//! one connection, sends one [`ParseRequest`], and reads one
//! [`ParseResponse`] carrying either the parsed tree or a rejection.

use crate::artifacts::syntax::tree::{NodeId, Span, SyntaxTree, TreeBuilder};
use crate::artifacts::tracking::tracker::SourceParser;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// Where the parse service listens when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "127.0.0.1:9432";

/// Upper bound on a single frame, request or reply
const MAX_FRAME_LEN: usize = 64 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("can't connect to the parse service at {endpoint}")]
    Connect {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse service transport failed: {0}")]
    Transport(#[from] std::io::Error),
    #[error("parse service rejected {path}: {message}")]
    Rejected { path: String, message: String },
    #[error("parse service protocol violation: {0}")]
    Protocol(String),
    #[error("{path} is not valid UTF-8")]
    NonUtf8 { path: String },
}

/// One request: parse `content` as the language implied by `path`
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseRequest {
    pub path: String,
    pub content: String,
}

/// One node of the reply tree, spanning byte offsets of the request content
#[derive(Debug, Serialize, Deserialize)]
pub struct WireNode {
    pub label: String,
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub children: Vec<WireNode>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ParseResponse {
    Ok { root: WireNode },
    Error { message: String },
}

/// Talks to one parse service endpoint, one connection per request
#[derive(Debug, Clone, new)]
pub struct ParseClient {
    endpoint: String,
}

impl SourceParser for ParseClient {
    async fn parse(&self, path: &Path, content: &[u8]) -> Result<SyntaxTree, ParseError> {
        let Ok(content) = std::str::from_utf8(content) else {
            return Err(ParseError::NonUtf8 {
                path: path.display().to_string(),
            });
        };

        let mut stream =
            TcpStream::connect(&self.endpoint)
                .await
                .map_err(|source| ParseError::Connect {
                    endpoint: self.endpoint.clone(),
                    source,
                })?;

        let request = ParseRequest {
            path: path.display().to_string(),
            content: content.to_string(),
        };
        let payload = serde_json::to_vec(&request)
            .map_err(|error| ParseError::Protocol(error.to_string()))?;
        write_frame(&mut stream, &payload).await?;
        let reply = read_frame(&mut stream).await?;

        let response: ParseResponse = serde_json::from_slice(&reply)
            .map_err(|error| ParseError::Protocol(error.to_string()))?;

        match response {
            ParseResponse::Ok { root } => {
                let tree = build_tree(&root, content.len())?;
                debug!("parse service returned {} nodes for {}", tree.len(), request.path);
                Ok(tree)
            }
            ParseResponse::Error { message } => Err(ParseError::Rejected {
                path: request.path,
                message,
            }),
        }
    }
}

async fn write_frame(stream: &mut TcpStream, payload: &[u8]) -> Result<(), ParseError> {
    if payload.len() > MAX_FRAME_LEN {
        return Err(ParseError::Protocol(format!(
            "request frame of {} bytes exceeds the {MAX_FRAME_LEN}-byte limit",
            payload.len()
        )));
    }

    stream.write_u32(payload.len() as u32).await?;
    stream.write_all(payload).await?;
    Ok(())
}

async fn read_frame(stream: &mut TcpStream) -> Result<Vec<u8>, ParseError> {
    let len = stream.read_u32().await? as usize;
    if len > MAX_FRAME_LEN {
        return Err(ParseError::Protocol(format!(
            "reply frame of {len} bytes exceeds the {MAX_FRAME_LEN}-byte limit"
        )));
    }

    let mut payload = vec![0; len];
    stream.read_exact(&mut payload).await?;
    Ok(payload)
}

fn build_tree(root: &WireNode, content_len: usize) -> Result<SyntaxTree, ParseError> {
    let mut builder = TreeBuilder::new();
    add_node(root, content_len, &mut builder)?;
    builder
        .finish()
        .map_err(|error| ParseError::Protocol(error.to_string()))
}

fn add_node(
    node: &WireNode,
    content_len: usize,
    builder: &mut TreeBuilder,
) -> Result<NodeId, ParseError> {
    if node.start > node.end || node.end > content_len {
        return Err(ParseError::Protocol(format!(
            "node {} has span [{}..{}) outside the {content_len}-byte content",
            node.label, node.start, node.end
        )));
    }

    let children = node
        .children
        .iter()
        .map(|child| add_node(child, content_len, builder))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(builder.add_node(node.label.clone(), Span::new(node.start, node.end), children))
}
