use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold text for location matching: lowercase, NFD with diacritics removed,
/// punctuation turned into spaces, whitespace collapsed and trimmed.
///
/// `"  Saint-Denis (La Réunion) "` becomes `"saint denis la reunion"`.
pub fn normalize_location(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
