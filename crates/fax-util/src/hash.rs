//! DJB2 string hashing.
//!
//! Used to tag interned identifiers (see `fax_lex::IdentTable`) with a cheap
//! hash for fast negative lookups before falling back to byte comparison.

/// Computes the DJB2 hash of a byte slice.
///
/// `hash = 5381; hash = hash * 33 + byte` for each byte, wrapping on overflow.
pub fn djb2(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 5381;
    for &b in bytes {
        hash = hash.wrapping_mul(33).wrapping_add(b as u64);
    }
    hash
}
