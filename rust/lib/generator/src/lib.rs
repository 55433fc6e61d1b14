//! Page generation pipeline.
//!
//! Validates a [`PageGenerationConfig`](stagehand_schema::PageGenerationConfig),
//! creates the page directories through a filesystem gateway and writes the
//! rendered templates, reporting progress step by step:
//!
//! | step | what |
//! |------|------|
//! | 0 | validate the config |
//! | 1 | derive the directory layout |
//! | 2 | page directory |
//! | 3 | components directory |
//! | 4 | api directory |
//! | 5 | page, list and form files |
//! | 6 | api route file |
//! | 7 | done |

pub mod error;
pub mod service;
pub mod step;

pub use error::GenerateError;
pub use service::{GenerationReport, PageGenerator, ProgressFn, ScopedProgress, normalize};
pub use step::{GenerationStep, Progress};
