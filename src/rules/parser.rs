use std::ops::Range;

use crate::segmentation::{
    normalizer::{
        Normalizer,
        EXACT_MARKER,
    },
    tokenizer::split_words,
};

const REGEX_DELIMITER: char = '/';
const ALTERNATION: char = '|';
const LIST_SEPARATOR: char = ',';
const WILDCARD: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Single normalized word, full match.
    Exact,
    /// `*` expands to any run of word characters, substring search.
    Wildcard,
    /// User regex from `/.../`, substring search.
    Regex,
    /// Several normalized words separated by whitespace, full match.
    Phrase,
}

/// One classified exclusion entry, before compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSpec {
    pub entry: String,
    pub pattern: String,
    pub kind: RuleKind,
    /// Entry carried the `!` marker: its words were not reduced, so it is
    /// compared against the lower-cased surface form as well.
    pub exact_form: bool,
}

pub fn parse_exclusion_spec(text: &str, normalizer: &Normalizer) -> Vec<PatternSpec> {
    split_entries(text).iter().filter_map(|entry| classify_entry(entry, normalizer)).collect()
}

/// Splits free-form exclusion text into raw entries.
///
/// Newlines win over parenthesised alternations, which win over `|`, which
/// wins over `,`. Separators inside a `/.../` literal are never structural.
pub fn split_entries(text: &str) -> Vec<String> {
    if text.contains('\n') {
        return text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .flat_map(split_entries)
            .collect();
    }

    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let literals = regex_literal_spans(text);

    if let Some(groups) = alternation_groups(text, &literals) {
        let mut entries = Vec::new();
        let mut cursor = 0;

        for group in groups {
            entries.extend(split_entries(&text[cursor..group.start]));
            for alternative in split_alternatives(&text[group.start + 1..group.end - 1]) {
                entries.extend(split_entries(alternative));
            }
            cursor = group.end;
        }

        entries.extend(split_entries(&text[cursor..]));
        return entries;
    }

    let separator =
        if has_structural(text, ALTERNATION, &literals) { ALTERNATION } else { LIST_SEPARATOR };

    split_structural(text, separator, &literals)
        .into_iter()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn classify_entry(entry: &str, normalizer: &Normalizer) -> Option<PatternSpec> {
    let entry = entry.trim();

    if let Some(inner) = regex_literal(entry) {
        if inner.trim().is_empty() {
            log::debug!("Skipping empty regex entry '{}'", entry);
            return None;
        }
        return Some(PatternSpec {
            entry: entry.to_string(),
            pattern: inner.to_string(),
            kind: RuleKind::Regex,
            exact_form: false,
        });
    }

    let (exact, body) = match entry.strip_prefix(EXACT_MARKER) {
        Some(rest) => (true, rest.trim()),
        None => (false, entry),
    };

    // Words are what the tokenizer yields; an entry without any can never match.
    let words: Vec<&str> = split_words(body).collect();
    if words.is_empty() {
        log::debug!("Skipping exclusion entry '{}' without words", entry);
        return None;
    }

    let (pattern, kind) = if body.contains(WILDCARD) {
        let escaped = regex::escape(&body.to_lowercase()).replace(r"\*", r"\w*");
        (bounded(&escaped), RuleKind::Wildcard)
    } else if words.len() > 1 {
        // "wi-fi" and "24/7" are split by the tokenizer like any other
        // multi-word entry.
        let words: Vec<String> =
            words.iter().map(|word| regex::escape(&normalizer.normalize(word, exact))).collect();
        (bounded(&words.join(r"\s+")), RuleKind::Phrase)
    } else {
        let word = normalizer.normalize(words[0], exact);
        if word.is_empty() {
            return None;
        }
        (bounded(&regex::escape(&word)), RuleKind::Exact)
    };

    log::debug!("Exclusion entry '{}' -> {:?} {}", entry, kind, pattern);

    Some(PatternSpec { entry: entry.to_string(), pattern, kind, exact_form: exact })
}

fn bounded(pattern: &str) -> String {
    format!(r"\b{}\b", pattern)
}

fn regex_literal(entry: &str) -> Option<&str> {
    let inner = entry.strip_prefix(REGEX_DELIMITER)?.strip_suffix(REGEX_DELIMITER)?;
    Some(inner)
}

/// Byte ranges of `/.../` literals that open at the start of an entry.
fn regex_literal_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut at_entry_start = true;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        match c {
            ',' | '|' | '(' | ')' => at_entry_start = true,
            c if c.is_whitespace() => {}
            REGEX_DELIMITER if at_entry_start => {
                let mut escaped = false;
                let mut close = None;
                for (j, d) in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if d == '\\' {
                        escaped = true;
                    } else if d == REGEX_DELIMITER {
                        close = Some(j);
                        break;
                    }
                }

                match close {
                    Some(j) => spans.push(idx..j + REGEX_DELIMITER.len_utf8()),
                    // Unterminated: leave the rest as plain text.
                    None => return spans,
                }
                at_entry_start = false;
            }
            _ => at_entry_start = false,
        }
    }

    spans
}

fn in_literal(idx: usize, literals: &[Range<usize>]) -> bool {
    literals.iter().any(|span| span.contains(&idx))
}

fn has_structural(text: &str, separator: char, literals: &[Range<usize>]) -> bool {
    text.char_indices().any(|(idx, c)| c == separator && !in_literal(idx, literals))
}

fn split_structural<'a>(
    text: &'a str,
    separator: char,
    literals: &[Range<usize>],
) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        if c == separator && !in_literal(idx, literals) {
            parts.push(&text[start..idx]);
            start = idx + c.len_utf8();
        }
    }

    parts.push(&text[start..]);
    parts
}

/// Outermost `(...)` groups outside regex literals, as ranges including both
/// parentheses. Nested groups stay inside their outer group; an unclosed `(`
/// and a stray `)` are plain text. Returns `None` unless at least one group
/// holds an alternation.
fn alternation_groups(text: &str, literals: &[Range<usize>]) -> Option<Vec<Range<usize>>> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut open = 0usize;

    for (idx, c) in text.char_indices() {
        if in_literal(idx, literals) {
            continue;
        }
        match c {
            '(' => {
                if depth == 0 {
                    open = idx;
                }
                depth += 1;
            }
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    groups.push(open..idx + c.len_utf8());
                }
            }
            _ => {}
        }
    }

    let has_alternation = groups.iter().any(|group| text[group.clone()].contains(ALTERNATION));

    if has_alternation {
        Some(groups)
    } else {
        None
    }
}

/// Splits the inside of a group on `|` at its own top level, leaving nested
/// groups and regex literals whole.
fn split_alternatives(content: &str) -> Vec<&str> {
    let literals = regex_literal_spans(content);
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, c) in content.char_indices() {
        if in_literal(idx, &literals) {
            continue;
        }
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ALTERNATION if depth == 0 => {
                parts.push(&content[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }

    parts.push(&content[start..]);
    parts
}
