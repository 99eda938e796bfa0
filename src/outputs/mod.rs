//! Output writers for scraped batches.
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── inshorts.json
//!     └── hindustan_times.json
//! ```
//!
//! A later pass on the same day overwrites the file for that source.

pub mod json;
