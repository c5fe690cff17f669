//! URL handling module for Vestnik
//!
//! URL identity is deliberately coarse: only the fragment is stripped during
//! normalization, so query strings and trailing slashes distinguish pages.

mod normalize;

pub use normalize::normalize_url;
