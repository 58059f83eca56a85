//! Minification hook for compiled bundles.
//!
//! Bundles are currently written as concatenated; `apply` is the single
//! place a JS/CSS minifier would plug in.

use super::AssetKind;

/// Transform a concatenated bundle before it is fingerprinted and written.
#[inline]
pub fn apply(_kind: &AssetKind, buf: Vec<u8>) -> Vec<u8> {
    buf
}
