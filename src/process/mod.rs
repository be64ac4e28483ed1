//! Reformatting pipelines
//!
//! Dispatches a source text to the matching language/mode pipeline.

pub mod pipeline;

pub use pipeline::{format_file, minify, reformat, FormatOptions, Language, MinifyOptions, Mode};
