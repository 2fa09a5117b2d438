//! Unique ids for rooms and objects.
//!
//! An id is the current Unix time in milliseconds, a dash, and 64 random bits
//! in base 36. The random half keeps ids apart when many are minted within the
//! same millisecond, so no shared counter is needed.

#[cfg(test)]
#[path = "id_test.rs"]
mod id_test;

use std::time::{SystemTime, UNIX_EPOCH};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Mint a new id, e.g. `"1760000000000-3k9x0q2m1d7ab"`.
#[must_use]
pub fn generate_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    format!("{millis}-{}", to_base36(rand::random::<u64>()))
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".into();
    }
    let mut digits = Vec::with_capacity(13);
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}
