use rand::rngs::OsRng;
use rand::RngCore;

/// Generates an opaque, high-entropy session token: 16 bytes (128 bits)
/// from an OS-backed CSPRNG, hex-encoded so it's safe to carry in the
/// wire protocol's UTF-8 string fields.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
