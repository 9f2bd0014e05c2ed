use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

/// Length of a 128-bit value in unpadded base64url.
pub const TOKEN_LENGTH: usize = 22;

/// Fresh random token: 16 random bytes in unpadded base64url.
pub fn generate_token() -> String {
    let bytes: [u8; 16] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Shape check only; says nothing about whether the token is cached.
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_LENGTH
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_well_formed() {
        for _ in 0..256 {
            let token = generate_token();
            assert!(is_well_formed(&token), "{token}");
            assert!(!token.contains('='));
        }
    }

    #[test]
    fn rejects_wrong_length_and_alphabet() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("abc"));
        assert!(!is_well_formed("AAAAAAAAAAAAAAAAAAAAA+"));
        assert!(!is_well_formed("AAAAAAAAAAAAAAAAAAAAA/"));
        assert!(!is_well_formed("AAAAAAAAAAAAAAAAAAAA=="));
        assert!(!is_well_formed("AAAAAAAAAAAAAAAAAAAAAAA"));
        assert!(is_well_formed("AAAAAAAAAAAAAAAAAAAA-_"));
    }
}
