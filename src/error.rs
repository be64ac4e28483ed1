//! Error types and result aliases for webtidy.
//!
//! This module defines the error handling infrastructure:
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used throughout the crate
//!
//! The reformatting engine itself never fails on string input; this alias
//! serves the file-processing and configuration layers.

use anyhow::Result as AnyhowResult;

pub type Result<T> = AnyhowResult<T>;
