use rand::Rng;

const TRICKSTER_ELLIPSIS_PROBABILITY: f64 = 0.3;
const TRICKSTER_EXCLAIM_PROBABILITY: f64 = 0.5;

/// Per-persona text transform. Transforms are independent and composable;
/// the generator applies them in persona selection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Voice {
    /// Glitchy tone: stochastically stretches terminating `.` and `!`.
    Trickster,
    /// Declarative tone: terminating `?` becomes `.`.
    Oracle,
    Analyst,
    Cultivator,
    Archivist,
    /// Personas without a dedicated voice.
    Plain,
}

impl Voice {
    pub fn for_persona(name: &str) -> Self {
        match name {
            "trickster" => Self::Trickster,
            "oracle" => Self::Oracle,
            "analyst" => Self::Analyst,
            "cultivator" => Self::Cultivator,
            "archivist" => Self::Archivist,
            _ => Self::Plain,
        }
    }

    pub fn apply<R: Rng + ?Sized>(self, text: &str, rng: &mut R) -> String {
        match self {
            Self::Trickster => glitch(text, rng),
            Self::Oracle => declarative(text),
            Self::Analyst | Self::Cultivator | Self::Archivist | Self::Plain => text.to_string(),
        }
    }
}

/// Punctuation counts as terminating when followed by whitespace or the end
/// of the text, which keeps URLs, decimals and addresses untouched.
fn map_terminating<F>(text: &str, mut map: F) -> String
where
    F: FnMut(char, &mut String) -> bool,
{
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let terminating = chars.peek().is_none_or(|next| next.is_whitespace());
        if !(terminating && map(c, &mut out)) {
            out.push(c);
        }
    }
    out
}

fn glitch<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    map_terminating(text, |c, out| match c {
        '.' if rng.random_bool(TRICKSTER_ELLIPSIS_PROBABILITY) => {
            out.push_str("...");
            true
        }
        '!' if rng.random_bool(TRICKSTER_EXCLAIM_PROBABILITY) => {
            out.push_str("!!");
            true
        }
        _ => false,
    })
}

fn declarative(text: &str) -> String {
    map_terminating(text, |c, out| {
        if c == '?' {
            out.push('.');
            true
        } else {
            false
        }
    })
}
