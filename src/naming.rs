//! Layer-name sanitizing for output filenames.
//!
//! Layer names are human display names, mostly Swedish ("Västindien",
//! "Skåne", "Sydamerika 3"), and become the region's display name in the
//! game verbatim. On disk they need a stable ASCII-ish stem, so
//! [`safe_stem`] folds the accented letters the source documents actually
//! use and squashes separators to underscores.
//!
//! Two distinct display names can reduce to the same stem; that collision is
//! accepted (last write wins) rather than handled.

/// Convert a layer display name into a safe, lowercase file stem.
///
/// Trim, lowercase, fold the fixed diacritic table, turn spaces and hyphens
/// into underscores, then drop anything that is not alphanumeric or an
/// underscore. Pure and idempotent: sanitizing an already-sanitized stem
/// returns it unchanged.
///
/// - `"Sydamerika 3"` → `"sydamerika_3"`
/// - `"Västindien"` → `"vastindien"`
/// - `"Skåne"` → `"skane"`
pub fn safe_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    for c in name.trim().to_lowercase().chars() {
        match c {
            'å' | 'ä' => stem.push('a'),
            'ö' => stem.push('o'),
            'é' | 'è' | 'ë' => stem.push('e'),
            'ü' => stem.push('u'),
            'ñ' => stem.push('n'),
            ' ' | '-' => stem.push('_'),
            _ if c.is_alphanumeric() || c == '_' => stem.push(c),
            _ => {}
        }
    }
    stem
}
