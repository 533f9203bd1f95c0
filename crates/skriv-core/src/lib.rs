//! skriv core library
//!
//! This crate provides the core functionality for skriv, a small document
//! editor that talks to a remote backend whose exact API contract is not
//! known ahead of time.
//!
//! # Architecture
//!
//! The backend may speak a "modern" JSON REST dialect (`/docs`,
//! `/api/docs`) or a legacy form/redirect dialect (`/list`, form-POST to
//! `/` and `/update`). The [`api::DocClient`] adapter probes candidate
//! endpoints in order, falling back to the next candidate only on a 404,
//! and hands every caller a uniformly shaped [`models::Document`] no
//! matter which dialect answered.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let client = DocClient::new(&config)?;
//!
//! // List documents
//! let docs = client.list().await?;
//!
//! // Create a document
//! let created = client.create(&DocumentDraft::new("Title", "Content")).await?;
//! ```
//!
//! # Modules
//!
//! - `api`: the document client adapter (main entry point)
//! - `models`: data structures for documents and drafts
//! - `config`: application configuration

pub mod api;
pub mod config;
pub mod models;

pub use api::{ApiError, ApiResult, DocClient};
pub use config::Config;
pub use models::{Document, DocumentDraft};
