//! Static ISO 639-1 language table
//!
//! Maps the two-letter codes found in the metadata catalog to the full
//! language names the tokenizer understands. Books in any other language
//! fall back to English rules.

/// Language used when a code is missing or unrecognized
pub const DEFAULT_LANGUAGE: &str = "english";

/// Two-letter code to language name, for every language with sentence rules
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("cs", "czech"),
    ("da", "danish"),
    ("nl", "dutch"),
    ("en", "english"),
    ("et", "estonian"),
    ("fi", "finnish"),
    ("fr", "french"),
    ("de", "german"),
    ("el", "greek"),
    ("it", "italian"),
    ("no", "norwegian"),
    ("pl", "polish"),
    ("pt", "portuguese"),
    ("sl", "slovene"),
    ("es", "spanish"),
    ("sv", "swedish"),
];

/// Full language name for an ISO 639-1 code, if supported
pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Resolve a list of declared language codes to a tokenizer language.
///
/// Only the first code counts (multi-language books are treated as their
/// primary language); unknown or absent codes default to English.
pub fn resolve_language<S: AsRef<str>>(codes: &[S]) -> &'static str {
    codes
        .first()
        .and_then(|code| language_name(code.as_ref()))
        .unwrap_or(DEFAULT_LANGUAGE)
}
