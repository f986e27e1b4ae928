//! Output generation for the aggregated article table.
//!
//! One run produces exactly one artifact: a CSV file written after all fetch
//! work has completed.
//!
//! # Submodules
//!
//! - [`csv`]: Materializes the collected `ArticleRecord`s as CSV and writes
//!   the run's output file
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! └── stocktitan_2025-05-06.csv
//! ```

pub mod csv;
