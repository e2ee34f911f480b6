//! Token filters applied after tokenization.

/// English stop words removed by the english analyzer.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Lowercase every token.
pub fn lowercase(tokens: Vec<String>) -> Vec<String> {
    tokens.into_iter().map(|t| t.to_lowercase()).collect()
}

/// Strip a trailing possessive (`'s` or `’s`).
pub fn possessive(tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .map(|token| {
            for suffix in ["'s", "\u{2019}s"] {
                if let Some(stripped) = token.strip_suffix(suffix) {
                    return stripped.to_string();
                }
            }
            token
        })
        .collect()
}

/// Drop tokens found in `stop_words`.
pub fn stop(tokens: Vec<String>, stop_words: &[&str]) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|t| !stop_words.contains(&t.as_str()))
        .collect()
}

/// Light plural stemming: `ies` -> `y`, otherwise a trailing `s` is dropped
/// unless it follows `s`, `u` or `i`.
///
/// Tokens of three characters or fewer are left alone.
pub fn plural_stem(tokens: Vec<String>) -> Vec<String> {
    tokens.into_iter().map(|t| stem_plural(&t)).collect()
}

fn stem_plural(token: &str) -> String {
    if token.chars().count() <= 3 {
        return token.to_string();
    }
    if let Some(stem) = token.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if let Some(stem) = token.strip_suffix('s')
        && !(stem.ends_with('s') || stem.ends_with('u') || stem.ends_with('i'))
    {
        return stem.to_string();
    }
    token.to_string()
}
