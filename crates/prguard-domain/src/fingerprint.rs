use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a changed-file finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - the repo-relative paths that triggered the finding, in order
pub fn fingerprint_for_change(check_id: &str, code: &str, paths: &[&str]) -> String {
    let mut parts = vec![check_id, code];
    parts.extend_from_slice(paths);
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
