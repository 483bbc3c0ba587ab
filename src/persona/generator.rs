use super::context::{EventType, PostContext};
use super::corpus::{DEFAULT_PERSONA, FALLBACK_TEMPLATE, PersonaCorpus};
use super::entropy::{EntropySource, OsEntropy, SeedCounter, to_base36};
use super::fragments::{
    BASE_TAGS, DATA_FRAGMENTS, METAPHORS, REPLY_ACK_QUESTION, REPLY_ACK_SIGNAL,
    REPLY_ACK_SILENCE, REPLY_TEMPLATES, RIDDLES, SIGNATURE_PREFIXES, STATUS_PENDING,
    STATUS_VERIFIED, STORIES, TERMINAL_OUTPUTS, TX_PLACEHOLDER, VISION_IMAGE_PROMPT,
    persona_tag,
};
use super::pacing::PostPacer;
use super::post::{GeneratedPost, PostMetadata};
use super::template::{self, Replacements};
use super::voice::Voice;
use crate::config::ProjectConfig;
use crate::error::ConfigError;
use crate::security::compliance::first_forbidden_phrase;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::{debug, info, warn};

const IMAGE_PROMPT_PROBABILITY: f64 = 0.3;
const SIGNATURE_CODE_LEN: usize = 6;
const REPLY_TEMPLATE: &str = "reply";

/// Template-driven post generator for one persona corpus.
///
/// The corpus is injected and read-only. The only mutable state is the
/// unseeded-call counter and the posting gate, both safe to share by
/// reference.
pub struct PostGenerator {
    corpus: PersonaCorpus,
    project: ProjectConfig,
    seed_counter: SeedCounter,
    entropy: Box<dyn EntropySource>,
    pacer: PostPacer,
}

/// Per-call state: the reported seed, the RNG derived from it and the post time.
struct Draw {
    seed: u64,
    rng: StdRng,
    timestamp: DateTime<Utc>,
}

impl PostGenerator {
    /// Fails fast on an invalid corpus; that is the generator's only error path.
    pub fn new(corpus: PersonaCorpus, project: ProjectConfig) -> Result<Self, ConfigError> {
        corpus.validate()?;
        let pacer = PostPacer::from_minutes(corpus.posting_rules.rate_limit_minutes);
        Ok(Self {
            corpus,
            project,
            seed_counter: SeedCounter::from_clock(),
            entropy: Box::new(OsEntropy),
            pacer,
        })
    }

    pub fn with_entropy(mut self, entropy: Box<dyn EntropySource>) -> Self {
        self.entropy = entropy;
        self
    }

    pub fn with_seed_counter(mut self, seed_counter: SeedCounter) -> Self {
        self.seed_counter = seed_counter;
        self
    }

    pub fn corpus(&self) -> &PersonaCorpus {
        &self.corpus
    }

    pub fn generate_post(&self, context: &PostContext) -> GeneratedPost {
        let mut draw = self.begin(context);
        let personas = self.select_personas(&mut draw.rng);
        let template_name =
            self.select_template(&personas, context.event_type.as_ref(), &mut draw.rng);
        let pattern = self
            .corpus
            .templates
            .get(&template_name)
            .map(|spec| spec.pattern.clone())
            .unwrap_or_default();

        let values = self.placeholder_values(context, &mut draw);
        let text = render(&pattern, values, &personas, &mut draw.rng);

        let image_prompt = (template_name == FALLBACK_TEMPLATE
            && draw.rng.random_bool(IMAGE_PROMPT_PROBABILITY))
        .then(|| VISION_IMAGE_PROMPT.to_string());

        let post = self.finish(text, personas, template_name, draw.seed, context, image_prompt);
        info!(
            template = %post.template,
            personas = ?post.personas_used,
            seed = post.seed,
            length = post.metadata.length,
            safety_checked = post.safety_checked,
            "persona.post.generated"
        );
        post
    }

    /// A short reply in the mesh voice. `original` is acknowledged by its
    /// shape only (question or statement); its words are never echoed or
    /// parsed for meaning.
    pub fn generate_reply(&self, original: &str, context: &PostContext) -> GeneratedPost {
        let mut draw = self.begin(context);
        let personas = self.select_personas(&mut draw.rng);
        let pattern = REPLY_TEMPLATES
            .choose(&mut draw.rng)
            .copied()
            .unwrap_or(REPLY_TEMPLATES[0]);
        let acknowledgement = acknowledgement(original);
        debug!(
            original_chars = original.chars().count(),
            acknowledgement, "composing reply"
        );

        let values = self.placeholder_values(context, &mut draw);
        let text = render(
            &format!("{acknowledgement} {pattern}"),
            values,
            &personas,
            &mut draw.rng,
        );

        let post = self.finish(
            text,
            personas,
            REPLY_TEMPLATE.to_string(),
            draw.seed,
            context,
            None,
        );
        info!(
            personas = ?post.personas_used,
            seed = post.seed,
            safety_checked = post.safety_checked,
            "persona.reply.generated"
        );
        post
    }

    pub fn can_post(&self) -> bool {
        self.pacer.can_post()
    }

    pub fn mark_post_sent(&self) {
        self.pacer.mark_sent();
    }

    pub fn time_until_next_post(&self) -> Duration {
        self.pacer.time_until_next_post()
    }

    /// Explicit seeds are used as-is. Otherwise the counter supplies the
    /// reported seed and the entropy source is mixed into the RNG seed.
    fn begin(&self, context: &PostContext) -> Draw {
        let (seed, rng_seed) = match context.seed {
            Some(seed) => (seed, seed),
            None => {
                let seed = self.seed_counter.next();
                (seed, seed ^ self.entropy.next_u64())
            }
        };
        debug!(seed, entropy = self.entropy.name(), "generation seed resolved");
        Draw {
            seed,
            rng: StdRng::seed_from_u64(rng_seed),
            timestamp: context.timestamp.unwrap_or_else(Utc::now),
        }
    }

    /// Weighted sampling without replacement. Each slot draws once; a draw
    /// that lands on nothing selectable leaves the slot empty. Drawing stops
    /// once every positive-weight persona is taken.
    fn select_personas<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let total: f64 = self.corpus.personas.values().map(|p| p.weight).sum();
        let selectable = self
            .corpus
            .personas
            .values()
            .filter(|p| p.weight > 0.0)
            .count();
        let mut selected: Vec<String> = Vec::new();

        if total > 0.0 {
            for _ in 0..self.corpus.posting_rules.max_personas_per_post {
                if selected.len() == selectable {
                    break;
                }
                let roll: f64 = rng.random();
                let mut cumulative = 0.0;
                for (name, layer) in &self.corpus.personas {
                    cumulative += layer.weight / total;
                    if roll < cumulative && layer.weight > 0.0 && !selected.contains(name) {
                        selected.push(name.clone());
                        break;
                    }
                }
            }
        }

        if selected.is_empty() {
            warn!("persona selection came up empty; falling back to {DEFAULT_PERSONA}");
            selected.push(DEFAULT_PERSONA.to_string());
        }
        debug!(personas = ?selected, "personas selected");
        selected
    }

    fn select_template<R: Rng + ?Sized>(
        &self,
        personas: &[String],
        event: Option<&EventType>,
        rng: &mut R,
    ) -> String {
        if let Some(preferred) = event.and_then(preferred_template) {
            if self.corpus.templates.contains_key(preferred) {
                debug!(template = preferred, "event override");
                return preferred.to_string();
            }
        }

        let matching: Vec<&String> = self
            .corpus
            .templates
            .iter()
            .filter(|(_, spec)| spec.personas.iter().any(|p| personas.contains(p)))
            .map(|(name, _)| name)
            .collect();

        matching
            .choose(rng)
            .map_or_else(|| FALLBACK_TEMPLATE.to_string(), |name| (*name).clone())
    }

    fn placeholder_values(&self, context: &PostContext, draw: &mut Draw) -> Replacements {
        let presale = context.presale_data.clone().unwrap_or_default();
        let rng = &mut draw.rng;

        let mut values = Replacements::new();
        values.insert(
            "vision",
            self.corpus
                .vision_metaphors
                .choose(rng)
                .cloned()
                .unwrap_or_default(),
        );
        values.insert("metaphor", pick(&METAPHORS, rng));
        values.insert("fragment", pick(&DATA_FRAGMENTS, rng));
        values.insert("story", pick(&STORIES, rng));
        values.insert("riddle", pick(&RIDDLES, rng));
        values.insert("terminal_output", pick(&TERMINAL_OUTPUTS, rng));
        values.insert("hash", to_base36(draw.seed % 10_000));
        values.insert("sign", self.signature(draw.seed, draw.timestamp, rng));

        values.insert(
            "website",
            presale
                .website
                .unwrap_or_else(|| self.project.website.clone()),
        );
        values.insert("telegram", self.project.telegram.clone());
        values.insert("twitter", self.project.twitter.clone());
        values.insert(
            "time",
            presale
                .start_time
                .unwrap_or_else(|| draw.timestamp.to_rfc3339()),
        );
        values.insert(
            "rate",
            presale
                .rate
                .unwrap_or_else(|| self.project.default_rate.clone()),
        );
        values.insert(
            "wallet",
            presale
                .wallet
                .unwrap_or_else(|| self.project.default_wallet.clone()),
        );
        values.insert(
            "tx",
            context
                .tx_hash
                .clone()
                .unwrap_or_else(|| TX_PLACEHOLDER.to_string()),
        );
        let status = if context.tx_hash.is_some() {
            STATUS_VERIFIED
        } else {
            STATUS_PENDING
        };
        values.insert("status", status.to_string());
        values.insert(
            "disclaimer",
            self.corpus.safety_rules.required_disclaimer.clone(),
        );
        values.insert("supply", self.project.supply.clone());
        values.insert("self_locked", self.project.self_locked.clone());
        values.insert(
            "presale_allocation",
            self.project.presale_allocation.clone(),
        );
        values
    }

    /// `signature_format` with a random prefix and a short code hashed from
    /// the post time, the seed and two extra random draws.
    fn signature<R: Rng + ?Sized>(&self, seed: u64, timestamp: DateTime<Utc>, rng: &mut R) -> String {
        let prefix = SIGNATURE_PREFIXES
            .choose(rng)
            .copied()
            .unwrap_or(SIGNATURE_PREFIXES[0]);
        let r1: u32 = rng.random();
        let r2: u32 = rng.random();

        let digest = Sha256::digest(format!("{}:{seed}:{r1}:{r2}", timestamp.timestamp_millis()));
        let mut head = [0_u8; 8];
        head.copy_from_slice(&digest[..8]);
        let code: String = to_base36(u64::from_be_bytes(head))
            .chars()
            .take(SIGNATURE_CODE_LEN)
            .collect();

        self.corpus
            .posting_rules
            .signature_format
            .replace("{prefix}", prefix)
            .replace("{code}", &code)
    }

    fn finish(
        &self,
        text: String,
        personas: Vec<String>,
        template: String,
        seed: u64,
        context: &PostContext,
        image_prompt: Option<String>,
    ) -> GeneratedPost {
        let forbidden =
            first_forbidden_phrase(&text, &self.corpus.safety_rules.forbidden_phrases);
        if let Some(phrase) = forbidden {
            warn!(phrase, "generated text contains a forbidden phrase");
        }

        let length = text.chars().count();
        if length > self.corpus.posting_rules.max_length {
            warn!(
                length,
                max_length = self.corpus.posting_rules.max_length,
                template = %template,
                "generated post exceeds max length"
            );
        }

        let metadata = PostMetadata {
            length,
            intensity: self.intensity(&personas),
            tags: tags(&personas, context),
            image_prompt,
        };

        GeneratedPost {
            text,
            personas_used: personas,
            template,
            seed,
            metadata,
            safety_checked: forbidden.is_none(),
        }
    }

    fn intensity(&self, personas: &[String]) -> f64 {
        let scores: Vec<f64> = personas
            .iter()
            .filter_map(|name| self.corpus.persona(name))
            .map(|layer| layer.tone_vector.cryptic + layer.tone_vector.technical)
            .collect();
        if scores.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(0.0, 1.0)
    }
}

fn preferred_template(event: &EventType) -> Option<&'static str> {
    match event {
        EventType::PresaleStart => Some("announcement"),
        EventType::PresalePre => Some("countdown"),
        EventType::Community => Some("community"),
        EventType::DataFragment => Some("data_fragment"),
        EventType::TxVerification => Some("tx_verification"),
        EventType::Vision | EventType::Custom(_) => None,
    }
}

fn acknowledgement(original: &str) -> &'static str {
    let trimmed = original.trim();
    if trimmed.is_empty() {
        REPLY_ACK_SILENCE
    } else if trimmed.ends_with('?') {
        REPLY_ACK_QUESTION
    } else {
        REPLY_ACK_SIGNAL
    }
}

fn pick<R: Rng + ?Sized>(pool: &[&str], rng: &mut R) -> String {
    pool.choose(rng).copied().unwrap_or_default().to_string()
}

/// Stylized placeholders first, then voice transforms in persona order,
/// then verbatim placeholders so they reach the output untouched. Verbatim
/// tokens are reserved up front, so caller values are inserted exactly once.
fn render<R: Rng + ?Sized>(
    pattern: &str,
    values: Replacements,
    personas: &[String],
    rng: &mut R,
) -> String {
    let (styled, verbatim) = template::split_verbatim(values);
    let mut text = template::substitute(&template::reserve_verbatim(pattern), &styled);
    for persona in personas {
        text = Voice::for_persona(persona).apply(&text, rng);
    }
    template::fill_verbatim(&text, &verbatim)
}

fn tags(personas: &[String], context: &PostContext) -> Vec<String> {
    let mut tags: Vec<String> = BASE_TAGS.iter().map(|t| (*t).to_string()).collect();
    let conditional = personas
        .iter()
        .filter_map(|p| persona_tag(p))
        .chain(
            matches!(context.event_type, Some(EventType::PresaleStart)).then_some("#presale"),
        )
        .chain(context.tx_hash.is_some().then_some("#verified"));

    for tag in conditional {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
