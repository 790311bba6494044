//! Storage and service areas
//!
//! - [`repository`]: the opened repository and its error boundary
//! - [`database`]: loose object storage under `.git/objects`
//! - [`refs`]: HEAD and ref resolution under `.git`
//! - [`parse_service`]: TCP client for the external parser

pub mod database;
pub mod parse_service;
pub mod refs;
pub mod repository;
