//! Filename suggestions for saved configs

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fields::{display_value, ConfigDocument};

/// Name suggested when there is nothing to derive one from
pub const FALLBACK_FILENAME: &str = "modified_config.json";

const FALLBACK_BASE: &str = "modified";

/// Connector words dropped when they are the second word of a comment
const CONNECTOR_WORDS: &[&str] = &[
    "a", "an", "and", "at", "by", "for", "in", "of", "on", "the", "with",
];

/// Anything other than letters, digits, underscore and hyphen
static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w-]").unwrap());

/// Suggest a filename for a working document
pub fn suggest_filename(working: &ConfigDocument) -> String {
    if working.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }

    let field = |key: &str| working.get(key).map(display_value).unwrap_or_default();
    suggest_from_inputs(&field("output_name"), &field("training_comment"))
}

/// Suggest a filename from raw output-name and training-comment inputs.
///
/// `output_name` wins when present; otherwise the first two words of the
/// training comment are used, dropping a second word such as "by".
pub fn suggest_from_inputs(output_name: &str, training_comment: &str) -> String {
    let base = if !output_name.is_empty() {
        output_name.to_string()
    } else if !training_comment.is_empty() {
        comment_stem(training_comment)
    } else {
        String::new()
    };

    let base = if base.is_empty() {
        FALLBACK_BASE.to_string()
    } else {
        base
    };

    format!("{}_config.json", UNSAFE_CHARS.replace_all(&base, "_"))
}

fn comment_stem(comment: &str) -> String {
    let words: Vec<String> = comment
        .split_whitespace()
        .take(2)
        .map(|word| UNSAFE_CHARS.replace_all(word, "").into_owned())
        .filter(|word| !word.is_empty())
        .collect();

    words
        .iter()
        .enumerate()
        .filter(|(i, word)| *i == 0 || !CONNECTOR_WORDS.contains(&word.to_lowercase().as_str()))
        .map(|(_, word)| word.as_str())
        .collect::<Vec<_>>()
        .join("_")
}
