use rand::Rng;

/// Random 32-byte hex token, used for both session ids and CSRF tokens.
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// Constant-time string comparison.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// A submitted token is valid only when a token was issued and both match.
pub fn token_matches(issued: Option<&str>, submitted: &str) -> bool {
    match issued {
        Some(expected) if !expected.is_empty() => constant_time_eq(expected, submitted),
        _ => false,
    }
}
