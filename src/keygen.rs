//! License key generation.

use rand::Rng;
use rand::rngs::OsRng;

/// Uppercase letters and digits minus the look-alikes (`0`/`O`,
/// `1`/`I`/`L`), so keys survive being read over the phone.
const ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

const GROUPS: usize = 4;
const GROUP_LEN: usize = 5;

/// Generate a license key like `KW-A7C2P-M4QRT-XXXXX-XXXXX`.
///
/// The 20 random characters are drawn from the OS CSPRNG (~99 bits);
/// the key carries no information about the owner, the plan, or the
/// issuance time. Uniqueness is enforced by the store at insert, not
/// assumed here.
pub fn generate_license_key(prefix: &str) -> String {
    let mut rng = OsRng;
    let mut key = String::with_capacity(prefix.len() + GROUPS * (GROUP_LEN + 1));
    key.push_str(prefix);
    for _ in 0..GROUPS {
        key.push('-');
        for _ in 0..GROUP_LEN {
            let idx = rng.gen_range(0..ALPHABET.len());
            key.push(ALPHABET[idx] as char);
        }
    }
    key
}
