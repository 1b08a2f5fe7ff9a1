//! Registration identifiers and the attendance URL payload format

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Build the attendance URL for a registration id.
///
/// This is both the payload the encode path receives and the string the
/// decode path reports.
pub fn attendance_url(base_url: &str, registration_id: &str) -> String {
    format!("{base_url}/attendance/{registration_id}")
}

/// Generate a fresh registration id: `reg_<unix-millis>_<9 base-36 chars>`
pub fn registration_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);

    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();

    format!("reg_{millis}_{suffix}")
}
