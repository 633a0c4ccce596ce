//! Header and footer stripping
//!
//! Removes the legal boilerplate wrapped around every Project Gutenberg
//! e-text. A line-oriented state machine scans the file once: lines before
//! the last header-end marker are discarded, everything from the first
//! footer marker on is dropped, and embedded legalese blocks are skipped.
//!
//! Ported from the marker-based stripper used by the original corpus
//! tooling (itself derived from Johannes Krugel's C++ utility).

pub mod markers;

use markers::{
    starts_with_any, LEGALESE_END_MARKERS, LEGALESE_START_MARKERS, TEXT_END_MARKERS,
    TEXT_START_MARKERS,
};

/// Header markers are only honored within the first 600 body lines
const HEADER_WINDOW: usize = 600;

/// Footer markers are only honored after the first 100 body lines
const FOOTER_MIN_LINE: usize = 100;

/// Strip Project Gutenberg header and footer boilerplate from `text`.
///
/// Lines are rejoined with `\n` regardless of the input's line endings so
/// that the cleaned artifact is byte-identical across platforms and runs.
///
/// Known quirks, kept intentionally:
/// - a header-end marker may fire several times; only the last one before
///   line 600 matters, earlier output is discarded each time,
/// - footer detection is one-shot with no recovery,
/// - a legalese block with no end marker swallows the rest of the file.
pub fn strip_headers(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut line_index = 0usize;
    let mut ignore_section = false;

    for line in text.lines() {
        if line_index <= HEADER_WINDOW && starts_with_any(line, TEXT_START_MARKERS) {
            // End of the header: everything emitted so far was boilerplate.
            out.clear();
            continue;
        }

        if line_index >= FOOTER_MIN_LINE && starts_with_any(line, TEXT_END_MARKERS) {
            // Start of the footer: drop this line and the rest of the file.
            break;
        }

        if starts_with_any(line, LEGALESE_START_MARKERS) {
            ignore_section = true;
            continue;
        } else if starts_with_any(line, LEGALESE_END_MARKERS) {
            ignore_section = false;
            continue;
        }

        if !ignore_section {
            out.push(line);
            line_index += 1;
        }
    }

    out.join("\n")
}
