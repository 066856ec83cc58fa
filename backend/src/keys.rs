//! Collision-avoiding object key generation

use chrono::Utc;
use rand::Rng;

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix appended to generated keys
pub const RANDOM_SUFFIX_LEN: usize = 6;

/// Derives a unique object key from an uploaded file's original name
///
/// `photo.png` becomes `photo-{unix millis}-{6 base36 chars}.png`. Names
/// without an extension get no trailing dot.
#[must_use]
pub fn unique_object_key(original_file_name: &str) -> String {
    let suffix = random_base36(&mut rand::thread_rng(), RANDOM_SUFFIX_LEN);
    compose_key(original_file_name, Utc::now().timestamp_millis(), &suffix)
}

/// Builds a key from its parts
#[must_use]
pub fn compose_key(original_file_name: &str, timestamp_millis: i64, suffix: &str) -> String {
    match split_extension(original_file_name) {
        (stem, Some(extension)) => format!("{stem}-{timestamp_millis}-{suffix}.{extension}"),
        (stem, None) => format!("{stem}-{timestamp_millis}-{suffix}"),
    }
}

/// Random lowercase base36 string of `len` characters
#[must_use]
pub fn random_base36<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(BASE36_ALPHABET[rng.gen_range(0..BASE36_ALPHABET.len())]))
        .collect()
}

// A leading dot (".env") marks a hidden file, not an extension.
fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() && !extension.is_empty() => {
            (stem, Some(extension))
        }
        _ => (file_name, None),
    }
}
