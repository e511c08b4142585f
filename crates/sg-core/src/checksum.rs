//! SHA-256 checksum utility for migration drift detection.

use sha2::{Digest, Sha256};

/// Compute SHA256 checksum of a string
pub fn compute_checksum(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_stable() {
        assert_eq!(
            compute_checksum("CREATE TABLE t (id INT)"),
            compute_checksum("CREATE TABLE t (id INT)")
        );
    }

    #[test]
    fn test_checksum_detects_change() {
        assert_ne!(
            compute_checksum("CREATE TABLE t (id INT)"),
            compute_checksum("CREATE TABLE t (id BIGINT)")
        );
    }
}
