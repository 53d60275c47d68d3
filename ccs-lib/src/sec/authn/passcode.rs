use data_encoding::HEXUPPER;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// number of characters in an issued passcode
pub const PASSCODE_CHARS: usize = 8;

/// width of one derivation window. codes derived anywhere inside the same
/// window are identical
pub const WINDOW_MILLIS: i64 = 5 * 60 * 1000;

const CODE_BYTES: usize = PASSCODE_CHARS / 2;

type HmacSha256 = Hmac<Sha256>;

pub fn window_index(epoch_millis: i64) -> i64 {
    epoch_millis.div_euclid(WINDOW_MILLIS)
}

/// derives the passcode for an identity inside a given window.
///
/// the mac input is the identity followed by the decimal window index so
/// that issuer and verifier agree without storing anything between them.
pub fn derive_code(key: &[u8], identity: &str, window: i64) -> String {
    let mut mac = HmacSha256::new_from_slice(key).unwrap();

    mac.update(identity.as_bytes());
    mac.update(window.to_string().as_bytes());

    let digest = mac.finalize().into_bytes();

    HEXUPPER.encode(&digest[..CODE_BYTES])
}

pub fn passcode_valid(given: &str) -> bool {
    let mut char_count = 0;

    for ch in given.chars() {
        if !ch.is_ascii_hexdigit() || ch.is_ascii_lowercase() {
            return false;
        }

        char_count += 1;

        if char_count > PASSCODE_CHARS {
            return false;
        }
    }

    char_count == PASSCODE_CHARS
}
