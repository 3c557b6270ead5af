//! Helpers for the document identifiers stored in journal `IDDOC` columns.
//!
//! An identifier is nine characters wide: the first four hold the document
//! kind as a base-36 number, the rest is the document's own id.

use crate::error::IdentifierError;

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub fn base36_encode(mut number: u64) -> String {
    if number == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while number != 0 {
        digits.push(ALPHABET[(number % 36) as usize]);
        number /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// Decodes a base-36 number, ignoring surrounding padding.
pub fn base36_decode(raw: &str) -> Result<u64, IdentifierError> {
    u64::from_str_radix(raw.trim(), 36).map_err(|_| IdentifierError::InvalidBase36(raw.into()))
}

/// The document kind encoded in the first four characters.
pub fn doc_index(doc: &str) -> Result<u64, IdentifierError> {
    let head: String = doc.chars().take(4).collect();
    base36_decode(&head)
}

/// The document id following the kind prefix.
pub fn doc_id(doc: &str) -> &str {
    match doc.char_indices().nth(4) {
        Some((pos, _)) => &doc[pos..],
        None => "",
    }
}
