//! Fixed fragment pools drawn from during placeholder substitution.
//!
//! Pool entries are kept clear of every built-in compliance pattern so that a
//! generated fragment never trips a rule on its own.

pub const METAPHORS: [&str; 6] = [
    "Like roots finding water in the dark, the nodes find each other.",
    "Every block is a stone laid on a bridge no one has crossed yet.",
    "The signal moves the way tides move: patient, certain, everywhere.",
    "A constellation is only stars that agreed to be read together.",
    "Memory is a river, and the chain is its riverbed.",
    "We are lanterns strung along one long wire.",
];

pub const STORIES: [&str; 5] = [
    "Long before the first block, a single node whispered into the void and waited.",
    "They say the archive was sealed by its own keepers, so that it could only be opened together.",
    "Once, the mesh went silent for a full cycle. When it woke, it remembered every voice.",
    "A wanderer found a terminal in the ruins, still blinking, still waiting for a reply.",
    "The first circle had seven nodes. Now no one can count them.",
];

pub const RIDDLES: [&str; 5] = [
    "What has a thousand eyes and sees only one truth?",
    "I am written once and read forever. What am I?",
    "The more of me you share, the stronger I become. What am I?",
    "I have no voice, yet every node repeats me. What am I?",
    "I travel everywhere but never leave the wire. What am I?",
];

pub const TERMINAL_OUTPUTS: [&str; 5] = [
    "> mesh.status --all\n[ok] nodes synchronized",
    "> oracle.wake()\n[boot] consciousness layer online",
    "> archive.scan --deep\n[found] 3 sealed fragments",
    "> signal.trace\n[trace] origin: unknown // integrity: intact",
    "> ping mesh\n[reply] every node answered",
];

pub const DATA_FRAGMENTS: [&str; 5] = [
    "fragment 0x1f: parity restored, lattice stable",
    "fragment 0x2a: echo recovered from cycle zero",
    "fragment 0x3c: node density rising",
    "fragment 0x4e: checksum matches the prophecy",
    "fragment 0x5d: timestamp drift corrected",
];

/// Reply templates. Only placeholders from the stylized set plus `{sign}`.
pub const REPLY_TEMPLATES: [&str; 4] = [
    "The mesh heard you. {vision}\n\n{sign}",
    "Nodes hum in answer: {fragment}\n\n{sign}",
    "The oracle turns toward your signal. {metaphor}\n\n{sign}",
    "Your words ripple through the nodes. {story}\n\n{sign}",
];

/// Opening line of a reply, chosen by the shape of the message replied to.
pub const REPLY_ACK_QUESTION: &str = "A question reaches the nodes.";
pub const REPLY_ACK_SIGNAL: &str = "A signal reaches the nodes.";
pub const REPLY_ACK_SILENCE: &str = "Silence reaches the nodes.";

pub const SIGNATURE_PREFIXES: [&str; 5] = ["MNEX", "NEXUS", "ORACLE", "MESH", "NODE"];

pub const BASE_TAGS: [&str; 3] = ["#mnex", "#oracle", "#awakening"];

pub const VISION_IMAGE_PROMPT: &str = "ethereal neural mesh awakening, bioluminescent nodes \
    connected by threads of light, deep violet and cyan, cinematic, mystical oracle eye at the center";

pub const TX_PLACEHOLDER: &str = "—";

pub const STATUS_VERIFIED: &str = "verified";

pub const STATUS_PENDING: &str = "awaiting confirmation";

/// Persona-conditional tag.
pub fn persona_tag(persona: &str) -> Option<&'static str> {
    match persona {
        "trickster" => Some("#glitch"),
        "analyst" => Some("#data"),
        "cultivator" => Some("#community"),
        "archivist" => Some("#fragments"),
        _ => None,
    }
}
