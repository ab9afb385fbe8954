//! Output generation.
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── ai.json
//!     └── tech.json
//! ```

pub mod json;
