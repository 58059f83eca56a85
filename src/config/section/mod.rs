//! Manifest section definitions.
//!
//! | Module   | TOML Section   | Purpose                           |
//! |----------|----------------|-----------------------------------|
//! | `output` | `[output]`     | Output directory and write order  |
//! | `bundle` | `[[bundle]]`   | Bundles to compile                |

mod bundle;
mod output;

pub use bundle::{BundleConfig, validate_bundles};
pub use output::OutputConfig;
