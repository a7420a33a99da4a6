// src/session/token.rs
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

pub const SESSION_TOKEN_BYTES: usize = 24;

/// Fresh session id from the OS RNG.
pub fn new_session_id() -> String {
    let mut rng = OsRng;
    generate_token(&mut rng, SESSION_TOKEN_BYTES)
}

/// URL-safe base64 (no padding) over `nbytes` random bytes, so the value can
/// sit in a cookie without quoting.
pub fn generate_token<R: RngCore>(rng: &mut R, nbytes: usize) -> String {
    let mut buf = vec![0u8; nbytes];
    rng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buf)
}

/// Rejects cookie values we could never have issued.
pub fn looks_valid(token: &str) -> bool {
    (16..=64).contains(&token.len())
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
