//! Tone filter — distinguishes disrespectful or non-serious input from
//! genuine answers during registration stages.

use regex::Regex;

/// Disrespect markers, matched as case-folded substrings.
const RUDE_MARKERS: &[&str] = &[
    "нах", "иди на", "пошел", "пошёл", "долбо", "тупая", "дура", "идиот", "ебан", "глупая",
    "отстань", "заткнись",
];

/// Laughter markers.
const LAUGHTER_MARKERS: &[&str] = &["ахах", "хаха", "лол", "кек"];

/// Minimum letter count before the vowel-ratio heuristic applies.
const VOWEL_RATIO_MIN_LETTERS: usize = 4;

/// Letter-only vowel ratio below which text reads as noise.
const VOWEL_RATIO_THRESHOLD: f64 = 0.2;

const VOWELS: &str = "аеёиоуыэюяaeiou";

/// Tone classification, evaluated in fixed priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Rude,
    Joke,
    Acceptable,
}

/// Escalation notice for disrespectful input. The conduct concern is logged
/// by the pipeline; the answer never advances the stage.
pub const RUDE_REPLY: &str = "Такой тон *недопустим*.\n\n\
    Я фиксирую это как случай неуважительного обращения.\n\
    Информация будет передана вашему руководителю.\n\n\
    Давайте продолжим в рабочем формате.";

/// Light redirect for joking/noise input.
pub const JOKE_REPLY: &str = "Давайте без шуточек. Мы сейчас работаем над вашей \
    профессиональной программой развития. Ответьте корректно, пожалуйста.";

/// Classifies registration-stage input as rude, joke/noise, or acceptable.
pub struct ToneFilter {
    emoji_only: Regex,
}

impl ToneFilter {
    pub fn new() -> Self {
        Self {
            // Pictographs plus the joiners/selectors emoji sequences carry.
            emoji_only: Regex::new(r"^(?:\p{Extended_Pictographic}|\u{FE0F}|\u{200D}|\s)+$")
                .unwrap(),
        }
    }

    /// Classify `text`. Rude takes priority over joke.
    pub fn classify(&self, text: &str) -> Classification {
        if self.is_rude(text) {
            Classification::Rude
        } else if self.looks_like_joke(text) {
            Classification::Joke
        } else {
            Classification::Acceptable
        }
    }

    /// Whether the text contains a disrespect marker.
    pub fn is_rude(&self, text: &str) -> bool {
        let t = text.to_lowercase();
        RUDE_MARKERS.iter().any(|m| t.contains(m))
    }

    /// Whether the text reads as a joke or noise rather than an answer.
    pub fn looks_like_joke(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        let t = trimmed.to_lowercase();

        if LAUGHTER_MARKERS.iter().any(|m| t.contains(m)) {
            return true;
        }

        if self.emoji_only.is_match(trimmed) {
            return true;
        }

        if t.chars().count() <= 3 && !t.chars().any(|c| c.is_alphabetic()) {
            return true;
        }

        // Vowel-starved letters read as mumbling ("кхм пжлст").
        let letters: Vec<char> = t.chars().filter(|c| is_ru_or_latin_letter(*c)).collect();
        if letters.len() >= VOWEL_RATIO_MIN_LETTERS {
            let vowels = letters.iter().filter(|c| VOWELS.contains(**c)).count();
            if (vowels as f64) / (letters.len() as f64) < VOWEL_RATIO_THRESHOLD {
                return true;
            }
        }

        false
    }
}

impl Default for ToneFilter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ru_or_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
        || ('а'..='я').contains(&c)
        || ('А'..='Я').contains(&c)
        || c == 'ё'
        || c == 'Ё'
}
