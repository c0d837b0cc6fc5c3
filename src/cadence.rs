//! Human cadence scheduler — pacing delays for outgoing replies.
//!
//! Delays are advisory: they shape when a reply is delivered, never whether
//! or what. Each range is carried in `CadenceConfig` so tests can zero them.

use std::ops::Range;
use std::time::Duration;

use rand::Rng;

/// Reply length (in chars) below which the short-reply delay range applies.
const SHORT_REPLY_CHARS: usize = 40;

/// Reply length below which the medium-reply delay range applies.
const MEDIUM_REPLY_CHARS: usize = 120;

/// "Briefly occupied" notice variants, picked at random.
const BUSY_VARIANTS: &[&str] = &[
    "Я сейчас немного занята, дайте мне пару минут, я вернусь 🙏",
    "Секунду… заканчиваю консультацию.",
    "Спасибо, что написали. Одну минутку, пожалуйста.",
    "Ненадолго отвлеклась, сейчас отвечу.",
];

/// Pacing parameters. All delay ranges are in milliseconds.
#[derive(Debug, Clone)]
pub struct CadenceConfig {
    /// Delay range for replies under [`SHORT_REPLY_CHARS`].
    pub short_reply_ms: Range<u64>,
    /// Delay range for replies under [`MEDIUM_REPLY_CHARS`].
    pub medium_reply_ms: Range<u64>,
    /// Delay range for longer replies.
    pub long_reply_ms: Range<u64>,
    /// Pause choices after a "busy" notice, one picked uniformly.
    pub busy_pause_ms: &'static [u64],
    /// Probability of injecting a "busy" notice before a reply.
    pub busy_probability: f64,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            short_reply_ms: 2_000..4_000,
            medium_reply_ms: 4_000..7_000,
            long_reply_ms: 7_000..12_000,
            busy_pause_ms: &[5_000, 7_000, 10_000],
            busy_probability: 0.15,
        }
    }
}

impl CadenceConfig {
    /// Zero-delay configuration for tests.
    pub fn instant() -> Self {
        Self {
            short_reply_ms: 0..0,
            medium_reply_ms: 0..0,
            long_reply_ms: 0..0,
            busy_pause_ms: &[0],
            busy_probability: 0.0,
        }
    }

    /// Delay before sending `text`, drawn from the length-tiered range.
    pub fn human_delay(&self, text: &str) -> Duration {
        let chars = text.chars().count();
        let range = if chars < SHORT_REPLY_CHARS {
            &self.short_reply_ms
        } else if chars < MEDIUM_REPLY_CHARS {
            &self.medium_reply_ms
        } else {
            &self.long_reply_ms
        };
        Duration::from_millis(sample(range))
    }

    /// Pause after a "busy" notice, one of the configured choices.
    pub fn busy_delay(&self) -> Duration {
        let choices = self.busy_pause_ms;
        if choices.is_empty() {
            return Duration::ZERO;
        }
        let idx = rand::thread_rng().gen_range(0..choices.len());
        Duration::from_millis(choices[idx])
    }

    /// Roll whether to simulate being briefly occupied before replying.
    pub fn roll_busy(&self) -> bool {
        self.busy_probability > 0.0 && rand::thread_rng().gen_bool(self.busy_probability)
    }
}

/// Pick a "briefly occupied" notice variant.
pub fn busy_notice() -> &'static str {
    let idx = rand::thread_rng().gen_range(0..BUSY_VARIANTS.len());
    BUSY_VARIANTS[idx]
}

/// Sample a millisecond range; an empty range yields its start.
fn sample(range: &Range<u64>) -> u64 {
    if range.is_empty() {
        range.start
    } else {
        rand::thread_rng().gen_range(range.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_uses_short_range() {
        let cadence = CadenceConfig::default();
        for _ in 0..50 {
            let d = cadence.human_delay("привет");
            assert!(d >= Duration::from_millis(2_000) && d < Duration::from_millis(4_000));
        }
    }

    #[test]
    fn medium_text_uses_medium_range() {
        let cadence = CadenceConfig::default();
        let text = "а".repeat(80);
        for _ in 0..50 {
            let d = cadence.human_delay(&text);
            assert!(d >= Duration::from_millis(4_000) && d < Duration::from_millis(7_000));
        }
    }

    #[test]
    fn long_text_uses_long_range() {
        let cadence = CadenceConfig::default();
        let text = "а".repeat(300);
        for _ in 0..50 {
            let d = cadence.human_delay(&text);
            assert!(d >= Duration::from_millis(7_000) && d < Duration::from_millis(12_000));
        }
    }

    #[test]
    fn tier_boundaries_are_exact() {
        let cadence = CadenceConfig::default();
        // 39 chars → short; 40 chars → medium.
        let at_39 = "x".repeat(39);
        let at_40 = "x".repeat(40);
        for _ in 0..50 {
            assert!(cadence.human_delay(&at_39) < Duration::from_millis(4_000));
            assert!(cadence.human_delay(&at_40) >= Duration::from_millis(4_000));
        }
    }

    #[test]
    fn length_is_measured_in_chars_not_bytes() {
        let cadence = CadenceConfig::default();
        // 30 Cyrillic chars = 60 bytes; still the short tier.
        let text = "ж".repeat(30);
        for _ in 0..50 {
            assert!(cadence.human_delay(&text) < Duration::from_millis(4_000));
        }
    }

    #[test]
    fn busy_delay_picks_a_configured_choice() {
        let cadence = CadenceConfig::default();
        for _ in 0..50 {
            let ms = cadence.busy_delay().as_millis() as u64;
            assert!(cadence.busy_pause_ms.contains(&ms));
        }
    }

    #[test]
    fn instant_config_never_delays_or_rolls_busy() {
        let cadence = CadenceConfig::instant();
        assert_eq!(cadence.human_delay("привет"), Duration::ZERO);
        assert_eq!(cadence.human_delay(&"а".repeat(500)), Duration::ZERO);
        assert_eq!(cadence.busy_delay(), Duration::ZERO);
        for _ in 0..100 {
            assert!(!cadence.roll_busy());
        }
    }

    #[test]
    fn busy_notice_is_one_of_the_variants() {
        for _ in 0..20 {
            assert!(BUSY_VARIANTS.contains(&busy_notice()));
        }
    }
}
