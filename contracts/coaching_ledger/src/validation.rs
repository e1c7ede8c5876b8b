//! Input validation for free-text fields.

use crate::types::Error;
use soroban_sdk::{Env, String};

/// Upper bound for any stored text field, in bytes.
pub const MAX_TEXT_BYTES: u32 = 512;

/// Upper bound for a mobile number, in bytes.
pub const MAX_MOBILE_BYTES: u32 = 32;

/// Rejects text longer than [`MAX_TEXT_BYTES`].
pub fn validate_text_len(text: &String) -> Result<(), Error> {
    if text.len() > MAX_TEXT_BYTES {
        return Err(Error::TextTooLong);
    }
    Ok(())
}

/// Copies `text` into `buf` and returns the filled prefix.
fn text_bytes<'a>(text: &String, buf: &'a mut [u8]) -> Result<&'a [u8], Error> {
    let len = text.len() as usize;
    if len > buf.len() {
        return Err(Error::TextTooLong);
    }
    let bytes = &mut buf[..len];
    text.copy_into_slice(bytes);
    Ok(bytes)
}

/// Requires at least one non-whitespace byte; `blank` is returned otherwise.
///
/// # Errors
///
/// * [`Error::TextTooLong`] - `text` exceeds [`MAX_TEXT_BYTES`].
/// * `blank` - `text` is empty or whitespace only.
pub fn require_non_blank(text: &String, blank: Error) -> Result<(), Error> {
    let mut buf = [0u8; MAX_TEXT_BYTES as usize];
    let bytes = text_bytes(text, &mut buf)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(blank);
    }
    Ok(())
}

/// Trims surrounding whitespace from a mobile number and validates it: the
/// result must contain at least one ASCII digit.
pub fn normalize_mobile_number(env: &Env, mobile_number: &String) -> Result<String, Error> {
    let mut buf = [0u8; MAX_MOBILE_BYTES as usize];
    let bytes = text_bytes(mobile_number, &mut buf).map_err(|_| Error::InvalidMobileNumber)?;

    let first = bytes.iter().position(|b| !b.is_ascii_whitespace());
    let last = bytes.iter().rposition(|b| !b.is_ascii_whitespace());
    let trimmed = match (first, last) {
        (Some(first), Some(last)) => &bytes[first..=last],
        _ => return Err(Error::InvalidMobileNumber),
    };
    if !trimmed.iter().any(u8::is_ascii_digit) {
        return Err(Error::InvalidMobileNumber);
    }
    Ok(String::from_bytes(env, trimmed))
}
