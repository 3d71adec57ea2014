//! quizreport-core — Report layout engine for graded connector quizzes.
//!
//! This crate takes graded exercise and answer data and lays out a paginated,
//! styled document that highlights every wrong connector inside its original
//! sentence. It performs no I/O during layout; exporters live in
//! `quizreport-render`.

pub mod compose;
pub mod config;
pub mod error;
pub mod flow;
pub mod measure;
pub mod mismatch;
pub mod model;
pub mod naming;
pub mod segment;

pub use compose::ReportComposer;
pub use config::ReportConfig;
pub use error::ReportError;
pub use flow::{Document, TextFlow};
pub use model::{Exercise, ReportRequest, UserAnswer};
