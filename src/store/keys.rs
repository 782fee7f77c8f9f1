//! Inspection key generation.
//!
//! Keys are `insp-NNN`: the highest existing numeric suffix plus one,
//! zero-padded to three digits. The scan runs against a snapshot of the
//! existing keys, so two creations racing on the same snapshot produce the
//! same key.

pub const INSPECTION_KEY_PREFIX: &str = "insp-";

/// Numeric suffix of an `insp-<digits>` key.
pub fn inspection_sequence(key: &str) -> Option<u64> {
    let digits = key.strip_prefix(INSPECTION_KEY_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// The key that follows every `insp-<digits>` key in `existing`.
///
/// Keys that do not follow the pattern are ignored; with none, the first
/// key is `insp-001`.
pub fn next_inspection_key<'a, I>(existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let max = existing
        .into_iter()
        .filter_map(inspection_sequence)
        .max()
        .unwrap_or(0);
    format!("{}{:03}", INSPECTION_KEY_PREFIX, max.saturating_add(1))
}
