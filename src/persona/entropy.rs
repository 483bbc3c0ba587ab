use rand::RngCore;
use std::sync::atomic::{AtomicU64, Ordering};

/// Extra randomness mixed into unseeded generations so that two calls with
/// the same context differ. Swap in `NoEntropy` for test harnesses.
pub trait EntropySource: Send + Sync {
    fn next_u64(&self) -> u64;

    /// Human-readable name of this source
    fn name(&self) -> &str;
}

/// Thread-local OS-seeded RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn next_u64(&self) -> u64 {
        rand::rng().next_u64()
    }

    fn name(&self) -> &str {
        "os"
    }
}

/// Contributes nothing; unseeded output then depends only on the counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEntropy;

impl EntropySource for NoEntropy {
    fn next_u64(&self) -> u64 {
        0
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Auto-incrementing seed for calls without an explicit seed.
#[derive(Debug)]
pub struct SeedCounter {
    next: AtomicU64,
}

impl SeedCounter {
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Start from the wall clock, in milliseconds since the epoch.
    pub fn from_clock() -> Self {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_else(|_| std::time::Duration::from_secs(0))
            .as_millis();
        Self::starting_at(u64::try_from(millis).unwrap_or(u64::MAX))
    }

    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// Lowercase base-36 rendering.
pub fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::with_capacity(13);
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
