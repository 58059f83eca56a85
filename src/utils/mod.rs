//! Utility modules shared by the compiler, resolver and CLI.

pub mod hash;
pub mod path;
pub mod plural;

pub use plural::plural_count;
