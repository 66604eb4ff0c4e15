/// Raw token length in bytes; hex encoding doubles it.
pub const TOKEN_BYTES: usize = 32;

/// 32 bytes from the thread-local CSPRNG, lowercase hex.
pub fn generate_reset_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::random();
    hex::encode(bytes)
}

/// Shape check for tokens arriving in request paths.
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_BYTES * 2 && token.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
