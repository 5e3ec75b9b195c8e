// src/domain/media/normalization.rs
//
// File-name normalization used to correlate reminders with media files.
//
// Reminders may reference either a bare name ("clip1") or a full file
// identifier ("clip1.mp4"), so comparisons go through `strip_extension`
// on both sides.

use super::entity::MediaType;

/// Remove one trailing extension from `filename` if it is in `known_extensions`.
///
/// Matching is case-sensitive and exact on the suffix. Input without a known
/// extension is returned unchanged.
pub fn strip_extension<'a>(filename: &'a str, known_extensions: &[&str]) -> &'a str {
    known_extensions
        .iter()
        .find_map(|ext| filename.strip_suffix(ext))
        .unwrap_or(filename)
}

pub(crate) fn has_known_extension(filename: &str, known_extensions: &[&str]) -> bool {
    known_extensions.iter().any(|ext| filename.ends_with(ext))
}

/// Extension-agnostic comparison of two media names of the same type
pub fn same_media(media_type: MediaType, left: &str, right: &str) -> bool {
    let extensions = media_type.known_extensions();
    strip_extension(left, extensions) == strip_extension(right, extensions)
}
