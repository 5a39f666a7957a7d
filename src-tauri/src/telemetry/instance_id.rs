use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Generate a fresh installation identifier.
///
/// A SHA-256 over stable machine identity inputs (hostname, username, home
/// directory), rendered as 64 lowercase hex characters. The hash is one-way;
/// telemetry only ever sees the digest, never the inputs.
pub fn generate() -> String {
    let mut hasher = Sha256::new();
    for var in ["HOSTNAME", "COMPUTERNAME", "USER", "USERNAME"] {
        if let Ok(value) = std::env::var(var) {
            hasher.update(value.as_bytes());
        }
    }
    if let Some(home) = dirs::home_dir() {
        hasher.update(home.to_string_lossy().as_bytes());
    }

    let digest = hasher.finalize();
    let mut out = String::with_capacity(64);
    for byte in digest {
        // infallible for String
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

/// Check whether a stored identifier has the expected format:
/// exactly 64 lowercase hex characters.
pub fn is_valid_format(id: &str) -> bool {
    id.len() == 64
        && id
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_pass_validation() {
        let id = generate();
        assert!(is_valid_format(&id), "generated id not valid: {}", id);
    }

    #[test]
    fn generation_is_stable_within_a_machine() {
        assert_eq!(generate(), generate());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!is_valid_format(""));
        assert!(!is_valid_format("abc123"));
        assert!(!is_valid_format(&"a".repeat(65)));
    }

    #[test]
    fn rejects_non_hex_and_uppercase() {
        assert!(!is_valid_format(&"g".repeat(64)));
        assert!(!is_valid_format(&"A".repeat(64)));
        assert!(is_valid_format(&"0".repeat(64)));
        assert!(is_valid_format(&"f".repeat(64)));
    }
}
