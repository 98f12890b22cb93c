//! Generated secret values

use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random bytes in a generated secret (256 bits)
pub const SECRET_BYTES: usize = 32;

/// Generate a 256-bit secret encoded as 64 lowercase hex characters.
pub fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
