//! Base-62 codec for short ids.
//!
//! Digits are taken from `0-9A-Za-z` and written most-significant first,
//! so `0` encodes to `"0"`, `61` to `"z"` and `62` to `"10"`.

use crate::error::Base62Error;

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const BASE: u64 = 62;

/// Encodes a non-negative integer as a base-62 string.
pub fn encode(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    // u64::MAX needs 11 digits.
    let mut digits = Vec::with_capacity(11);
    while value > 0 {
        digits.push(ALPHABET[(value % BASE) as usize]);
        value /= BASE;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

/// Decodes a base-62 string produced by [`encode`].
pub fn decode(input: &str) -> Result<u64, Base62Error> {
    if input.is_empty() {
        return Err(Base62Error::Empty);
    }

    input
        .chars()
        .enumerate()
        .try_fold(0_u64, |acc, (position, character)| {
            let digit = digit_value(character).ok_or(Base62Error::InvalidCharacter {
                character,
                position,
            })?;
            acc.checked_mul(BASE)
                .and_then(|v| v.checked_add(digit))
                .ok_or(Base62Error::Overflow)
        })
}

fn digit_value(c: char) -> Option<u64> {
    let v = match c {
        '0'..='9' => c as u64 - '0' as u64,
        'A'..='Z' => c as u64 - 'A' as u64 + 10,
        'a'..='z' => c as u64 - 'a' as u64 + 36,
        _ => return None,
    };
    Some(v)
}
