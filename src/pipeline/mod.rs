//! Pipeline entry points.
//!
//! - `validate`: check the output name and the unit URL against the index
//! - `run_crawler`: fetch every municipality of a unit
//! - `run_pipeline`: validate, crawl and write the CSV file

pub mod crawl;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod validate;

pub use crawl::run_crawler;
pub use pipeline::{PipelineSummary, run_pipeline};
pub use validate::{ValidatedArgs, validate_arguments, validate_output_path, validate_unit_url};
