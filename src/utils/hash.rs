//! Content hashing for compiled bundle names.
//!
//! Uses MD5 for:
//! - Deterministic digests (same bytes → same name across builds and hosts)
//! - Fixed 32-char lowercase hex, embedded verbatim in output filenames
//!
//! # Usage
//!
//! ```ignore
//! use crate::utils::hash;
//!
//! let d = hash::compute("body{}"); // -> [u8; 16]
//! let fp = hash::fingerprint("body{}"); // -> 32 hex chars
//! ```

/// Length of a hex fingerprint.
pub const FINGERPRINT_LEN: usize = 32;

/// Compute the 128-bit digest of byte data.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> [u8; 16] {
    md5::compute(data.as_ref()).0
}

/// Compute digest and return it as lowercase hex.
///
/// Used for cache-busting filenames (e.g. `__app-<fingerprint>.min.css`).
#[inline]
pub fn fingerprint<T: AsRef<[u8]> + ?Sized>(value: &T) -> String {
    hex::encode(compute(value))
}
