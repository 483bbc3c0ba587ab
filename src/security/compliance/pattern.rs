use regex::Regex;
use std::sync::LazyLock;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("url pattern compiles"));

/// How a rule recognises content. Literal and regex rules match anywhere in
/// the text; the structural variants inspect the text as a whole.
#[derive(Debug, Clone)]
pub enum RulePattern {
    /// ASCII case-insensitive substring.
    Literal(String),
    Regex(Regex),
    /// Matches the whole text when it has at least this many characters.
    MinChars(usize),
    /// Matches the whole text when it has at most this many characters.
    MaxChars(usize),
    /// One match per run of the same character at least this long.
    RepeatedChar(usize),
    /// One match spanning all links when at least this many are present.
    UrlCount(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub text: String,
    /// Character offset into the inspected text.
    pub position: usize,
}

impl RulePattern {
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::Regex)
    }

    pub fn find_matches(&self, text: &str) -> Vec<PatternMatch> {
        match self {
            Self::Literal(needle) => find_literal(text, needle),
            Self::Regex(regex) => regex
                .find_iter(text)
                .map(|m| PatternMatch {
                    text: m.as_str().to_string(),
                    position: char_offset(text, m.start()),
                })
                .collect(),
            Self::MinChars(min) => whole_text_if(text, text.chars().count() >= *min),
            Self::MaxChars(max) => whole_text_if(text, text.chars().count() <= *max),
            Self::RepeatedChar(min_run) => repeated_runs(text, *min_run),
            Self::UrlCount(min_links) => url_cluster(text, *min_links),
        }
    }
}

/// All non-overlapping ASCII case-insensitive occurrences of `needle`.
/// Non-ASCII letters must match exactly. Every phrase and disclaimer
/// comparison in the crate goes through here.
pub fn find_literal(text: &str, needle: &str) -> Vec<PatternMatch> {
    if needle.is_empty() {
        return Vec::new();
    }
    // ASCII lowercasing keeps byte offsets aligned with the original text.
    let haystack = text.to_ascii_lowercase();
    let needle = needle.to_ascii_lowercase();
    haystack
        .match_indices(&needle)
        .map(|(start, _)| PatternMatch {
            text: text[start..start + needle.len()].to_string(),
            position: char_offset(text, start),
        })
        .collect()
}

/// The generator's forbidden-phrase pre-check: first phrase found in
/// `text`, if any.
pub fn first_forbidden_phrase<'a, S: AsRef<str>>(text: &str, phrases: &'a [S]) -> Option<&'a str> {
    phrases
        .iter()
        .map(|phrase| phrase.as_ref())
        .find(|phrase| !find_literal(text, phrase).is_empty())
}

fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

fn whole_text_if(text: &str, matched: bool) -> Vec<PatternMatch> {
    if matched {
        vec![PatternMatch {
            text: text.to_string(),
            position: 0,
        }]
    } else {
        Vec::new()
    }
}

fn repeated_runs(text: &str, min_run: usize) -> Vec<PatternMatch> {
    let mut matches = Vec::new();
    let mut run_char: Option<char> = None;
    let mut run_start = 0;
    let mut run_len = 0;

    let mut flush = |run_char: Option<char>, run_start: usize, run_len: usize| {
        if let Some(c) = run_char {
            if c != '\n' && run_len >= min_run.max(1) {
                matches.push(PatternMatch {
                    text: std::iter::repeat_n(c, run_len).collect(),
                    position: run_start,
                });
            }
        }
    };

    for (index, c) in text.chars().enumerate() {
        if run_char == Some(c) {
            run_len += 1;
        } else {
            flush(run_char, run_start, run_len);
            run_char = Some(c);
            run_start = index;
            run_len = 1;
        }
    }
    flush(run_char, run_start, run_len);

    matches
}

fn url_cluster(text: &str, min_links: usize) -> Vec<PatternMatch> {
    let links: Vec<_> = URL_RE.find_iter(text).collect();
    match (links.first(), links.last()) {
        (Some(first), Some(last)) if links.len() >= min_links.max(1) => vec![PatternMatch {
            text: text[first.start()..last.end()].to_string(),
            position: char_offset(text, first.start()),
        }],
        _ => Vec::new(),
    }
}
