//! Table schema model and the interactive editor state behind the page
//! scaffolder.
//!
//! A [`Schema`] describes one table (columns, derived indexes and
//! constraints) plus the page metadata the generated screens display.
//! [`SchemaBuilder`] owns the editable copy and reports every distinct
//! state upward; [`sql::emit_create_table`] renders it as DDL.

pub mod assist;
pub mod builder;
pub mod config;
pub mod draft;
pub mod error;
pub mod kind;
pub mod model;
pub mod sql;
pub mod suggest;

pub use assist::{AssistError, FieldAssistant, HttpFieldAssistant};
pub use builder::{AssistOutcome, FieldUpdate, SchemaBuilder};
pub use config::{PageGenerationConfig, Relationship};
pub use draft::DraftStore;
pub use error::SchemaError;
pub use kind::FieldKind;
pub use model::{Constraint, ConstraintType, Field, Index, IndexType, References, Schema};
pub use sql::emit_create_table;
pub use suggest::{Suggestion, boilerplate_fields, suggest, suggest_constraints, suggest_fields, suggest_indexes};
