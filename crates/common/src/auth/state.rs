//! Anti-replay `state` values for the authorization redirect

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;

/// Number of random bytes behind each state value.
pub const STATE_BYTES: usize = 32;

/// Generate a random state token for CSRF protection
///
/// Returns a URL-safe base64-encoded random string of 32 bytes (43
/// characters), safe to place in a query string without further escaping.
#[must_use]
pub fn generate_state() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..STATE_BYTES).map(|_| rng.gen()).collect();
    URL_SAFE_NO_PAD.encode(random_bytes)
}

/// Validate that the state token matches
///
/// The comparison touches every byte regardless of where the first
/// difference is.
///
/// # Arguments
/// * `expected` - The state that was sent in the authorization request
/// * `actual` - The state received in the callback
///
/// # Returns
/// `true` if states match, `false` otherwise
#[must_use]
pub fn validate_state(expected: &str, actual: &str) -> bool {
    let (expected, actual) = (expected.as_bytes(), actual.as_bytes());
    if expected.len() != actual.len() || expected.is_empty() {
        return false;
    }
    expected.iter().zip(actual).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
}

#[cfg(test)]
mod tests {
    //! Unit tests for auth::state.
    use super::*;

    /// Validates `generate_state` behavior for the state format scenario.
    ///
    /// Assertions:
    /// - Confirms `state.len()` equals `43`.
    /// - Ensures the state only uses URL-safe characters.
    #[test]
    fn test_generate_state_format() {
        let state = generate_state();
        assert_eq!(state.len(), 43);
        assert!(state.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_generate_state_is_random() {
        assert_ne!(generate_state(), generate_state());
    }

    #[test]
    fn test_validate_state() {
        let state = generate_state();
        assert!(validate_state(&state, &state.clone()));
        assert!(!validate_state(&state, "other"));
        assert!(!validate_state("", ""));
    }
}
