//! techrecord-sync Library
//!
//! A library for converting DynamoDB change-stream events carrying vehicle
//! technical-record documents into a normalized, MySQL-compatible relational
//! schema.
//!
//! # Pipeline
//!
//! - Decode: the self-describing attribute-value wire format becomes typed
//!   values (`dynamodb-types` crate)
//! - Parse: documents become entity models with tagged SQL parameters
//!   (`models`, `sql-params` crate)
//! - Write: the orchestrator runs lookup-or-create upserts for shared
//!   entities and always-inserts for technical-record versions and their
//!   children, one transaction per version (`upsert`, `statements`)
//! - Drive: the stream processor walks event batches sequentially, honoring
//!   the configured delete and batch policies (`stream`, `config`)
//!
//! All database access goes through the [`executor::SqlExecutor`] trait; a
//! `mysql_async`-backed implementation lives in [`mysql`], and an in-memory
//! fake for tests in [`testing`].

pub mod config;
pub mod error;
pub mod executor;
pub mod models;
pub mod mysql;
pub mod statements;
pub mod stream;
pub mod testing;
pub mod upsert;

pub use config::{BatchPolicy, DeletePolicy, ProcessorConfig};
pub use error::ConvertError;
pub use executor::{ExecutionError, ExecutionOutcome, SqlExecutor};
pub use stream::{process_stream_event, RecordOutcome, SkipReason, StreamEvent};
pub use upsert::{convert_tech_record_document, TechRecordUpsertResult};
