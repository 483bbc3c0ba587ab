use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Every placeholder a template pattern may use.
pub const KNOWN_PLACEHOLDERS: [&str; 20] = [
    "vision",
    "metaphor",
    "fragment",
    "story",
    "riddle",
    "terminal_output",
    "hash",
    "sign",
    "website",
    "telegram",
    "twitter",
    "time",
    "rate",
    "wallet",
    "tx",
    "status",
    "disclaimer",
    "supply",
    "self_locked",
    "presale_allocation",
];

/// Placeholders whose values are inserted after voice transforms so that
/// links, addresses and the legal disclaimer stay byte-exact.
pub const VERBATIM_PLACEHOLDERS: [&str; 6] =
    ["disclaimer", "website", "telegram", "twitter", "wallet", "tx"];

/// Private-use characters bracketing a verbatim slot index.
const SLOT_OPEN: char = '\u{E000}';
const SLOT_CLOSE: char = '\u{E001}';

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern compiles")
});

static SLOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}(\d+)\x{E001}").expect("slot pattern compiles"));

pub type Replacements = BTreeMap<&'static str, String>;

/// Replace every `{token}` that has an entry in `values`. Tokens without an
/// entry are left intact. Runs in a single pass, so inserted values are never
/// themselves re-expanded.
pub fn substitute(pattern: &str, values: &Replacements) -> String {
    PLACEHOLDER_RE
        .replace_all(pattern, |caps: &Captures<'_>| {
            values
                .get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Names of all `{token}` occurrences in `pattern`, in order of appearance.
pub fn placeholders_in(pattern: &str) -> Vec<&str> {
    PLACEHOLDER_RE
        .captures_iter(pattern)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

pub fn unknown_placeholders(pattern: &str) -> Vec<String> {
    let mut unknown: Vec<String> = placeholders_in(pattern)
        .into_iter()
        .filter(|token| !KNOWN_PLACEHOLDERS.contains(token))
        .map(str::to_string)
        .collect();
    unknown.dedup();
    unknown
}

/// Split a full replacement map into (stylized, verbatim) halves. Stylized
/// values are stripped of slot characters so they cannot forge a slot.
pub fn split_verbatim(values: Replacements) -> (Replacements, Replacements) {
    let (mut styled, verbatim): (Replacements, Replacements) = values
        .into_iter()
        .partition(|(token, _)| !VERBATIM_PLACEHOLDERS.contains(token));
    for value in styled.values_mut() {
        value.retain(|c| c != SLOT_OPEN && c != SLOT_CLOSE);
    }
    (styled, verbatim)
}

/// Swap each verbatim `{token}` in `pattern` for an opaque slot. Slots pass
/// through substitution and voice transforms untouched.
pub fn reserve_verbatim(pattern: &str) -> String {
    PLACEHOLDER_RE
        .replace_all(pattern, |caps: &Captures<'_>| {
            VERBATIM_PLACEHOLDERS
                .iter()
                .position(|token| *token == &caps[1])
                .map_or_else(
                    || caps[0].to_string(),
                    |index| format!("{SLOT_OPEN}{index}{SLOT_CLOSE}"),
                )
        })
        .into_owned()
}

/// Fill slots left by `reserve_verbatim`. Only slots are touched, so text
/// already inserted by earlier passes is never expanded again. A slot with
/// no value turns back into its `{token}`.
pub fn fill_verbatim(text: &str, values: &Replacements) -> String {
    SLOT_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let token = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| VERBATIM_PLACEHOLDERS.get(index).copied());
            match token {
                Some(token) => values
                    .get(token)
                    .cloned()
                    .unwrap_or_else(|| format!("{{{token}}}")),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
