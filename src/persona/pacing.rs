use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Process-local posting gate. Two pacers never share state.
#[derive(Debug)]
pub struct PostPacer {
    interval: Duration,
    /// When the last post went out, if any.
    last_sent: Mutex<Option<Instant>>,
}

impl PostPacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_sent: Mutex::new(None),
        }
    }

    pub fn from_minutes(minutes: u64) -> Self {
        Self::new(Duration::from_secs(minutes.saturating_mul(60)))
    }

    /// `true` once more than the interval has elapsed since `mark_sent`,
    /// or when nothing has been sent yet.
    pub fn can_post(&self) -> bool {
        let last_sent = self
            .last_sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        (*last_sent).is_none_or(|at| at.elapsed() > self.interval)
    }

    pub fn mark_sent(&self) {
        let mut last_sent = self
            .last_sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *last_sent = Some(Instant::now());
    }

    /// Remaining wait before `can_post` turns true; zero when already allowed.
    pub fn time_until_next_post(&self) -> Duration {
        let last_sent = self
            .last_sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        (*last_sent).map_or(Duration::ZERO, |at| {
            self.interval.saturating_sub(at.elapsed())
        })
    }
}
