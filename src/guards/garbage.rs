//! Garbage filter — drops meaningless input before any stage logic runs.

use regex::Regex;

/// Minimum trimmed length (in chars) for input to be processable.
pub const MIN_MEANINGFUL_CHARS: usize = 4;

/// Vowels counted by the keyboard-mash heuristic.
const VOWELS: &str = "аеёиоуыэюяaeiou";

/// Classifies raw text as garbage: too short, keyboard mash, repeated
/// characters, or symbol noise.
pub struct GarbageFilter {
    latin_run: Regex,
    letters_only: Regex,
    symbols_only: Regex,
}

impl GarbageFilter {
    pub fn new() -> Self {
        Self {
            latin_run: Regex::new(r"^[a-zA-Z]+$").unwrap(),
            letters_only: Regex::new(r"^[a-zA-Zа-яА-ЯёЁ]{3,}$").unwrap(),
            symbols_only: Regex::new(r"^[^a-zA-Zа-яА-ЯёЁ0-9]+$").unwrap(),
        }
    }

    /// Whether `text` is too low-quality to process further.
    pub fn is_garbage(&self, text: &str) -> bool {
        let t = text.trim();
        if t.is_empty() {
            return true;
        }

        let chars = t.chars().count();
        if chars < MIN_MEANINGFUL_CHARS {
            return true;
        }

        // Single character repeated 3+ times. The regex crate has no
        // backreferences, so this rule is plain char comparison.
        if is_repeated_char(t) {
            return true;
        }

        // An unbroken Latin run under 8 chars ("asdf", "hello") — the
        // dialogue is Russian, short Latin runs are noise here.
        if self.latin_run.is_match(t) && chars < 8 {
            return true;
        }

        // All-letters token with zero vowels: keyboard mash like "qwrtp".
        if self.letters_only.is_match(t) && !has_vowel(t) {
            return true;
        }

        // Nothing but punctuation/symbols.
        if self.symbols_only.is_match(t) {
            return true;
        }

        false
    }
}

impl Default for GarbageFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Tiered strict reply for consecutive garbage input.
pub fn strict_reply(count: u32) -> &'static str {
    match count {
        0 | 1 => "Прошу отвечать по существу.",
        2 => "Давайте без шуточек. Это рабочий диалог.",
        _ => "Хватит поясничать. Соберитесь. Мы здесь работаем, не играем.",
    }
}

fn is_repeated_char(t: &str) -> bool {
    let mut chars = t.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    t.chars().count() >= 3 && chars.all(|c| c == first)
}

fn has_vowel(t: &str) -> bool {
    t.to_lowercase().chars().any(|c| VOWELS.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> GarbageFilter {
        GarbageFilter::new()
    }

    // ── Length threshold ────────────────────────────────────────────

    #[test]
    fn empty_and_whitespace_are_garbage() {
        let f = filter();
        assert!(f.is_garbage(""));
        assert!(f.is_garbage("   "));
        assert!(f.is_garbage("\n\t"));
    }

    #[test]
    fn threshold_boundary_is_exact() {
        let f = filter();
        // 3 chars → garbage, 4 chars (with vowels, non-Latin) → not.
        assert!(f.is_garbage("дел"));
        assert!(!f.is_garbage("дела"));
    }

    #[test]
    fn short_greeting_is_garbage() {
        let f = filter();
        assert!(f.is_garbage("hi"));
        assert!(f.is_garbage("ок"));
    }

    #[test]
    fn leading_trailing_whitespace_is_trimmed_before_measuring() {
        let f = filter();
        assert!(f.is_garbage("  дел  "));
        assert!(!f.is_garbage("  дела  "));
    }

    // ── Repeated characters ─────────────────────────────────────────

    #[test]
    fn repeated_char_is_garbage_regardless_of_length() {
        let f = filter();
        assert!(f.is_garbage("ааа"));
        assert!(f.is_garbage("аааааааааааа"));
        assert!(f.is_garbage("ыыыыы"));
        assert!(f.is_garbage("?????"));
    }

    #[test]
    fn two_distinct_chars_are_not_the_repeat_rule() {
        assert!(!is_repeated_char("абаб"));
        assert!(!is_repeated_char("аа"));
    }

    // ── Latin runs and keyboard mash ────────────────────────────────

    #[test]
    fn short_latin_runs_are_garbage() {
        let f = filter();
        assert!(f.is_garbage("asdf"));
        assert!(f.is_garbage("hello"));
        assert!(f.is_garbage("qwerty"));
    }

    #[test]
    fn long_latin_run_with_vowels_passes() {
        let f = filter();
        assert!(!f.is_garbage("marketing"));
    }

    #[test]
    fn vowelless_letters_are_garbage() {
        let f = filter();
        assert!(f.is_garbage("стрнг"));
        assert!(f.is_garbage("qwrtpsdfg"));
    }

    #[test]
    fn cyrillic_with_vowels_passes() {
        let f = filter();
        assert!(!f.is_garbage("привет"));
        assert!(!f.is_garbage("Иванов Иван"));
    }

    // ── Symbols ─────────────────────────────────────────────────────

    #[test]
    fn symbols_only_is_garbage() {
        let f = filter();
        assert!(f.is_garbage("?!?!"));
        assert!(f.is_garbage("-- ++ =="));
        assert!(f.is_garbage("....,,,,"));
    }

    #[test]
    fn text_with_digits_is_not_symbol_noise() {
        let f = filter();
        assert!(!f.is_garbage("01.01.1990"));
        assert!(!f.is_garbage("3 года"));
    }

    // ── Strict reply tiers ──────────────────────────────────────────

    #[test]
    fn strict_reply_tiers_follow_count() {
        let tier1 = strict_reply(1);
        let tier2 = strict_reply(2);
        let tier3 = strict_reply(3);
        assert_ne!(tier1, tier2);
        assert_ne!(tier2, tier3);
        assert_eq!(strict_reply(4), tier3);
        assert_eq!(strict_reply(100), tier3);
    }
}
