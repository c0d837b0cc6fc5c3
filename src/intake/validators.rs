//! Field validators and normalizers — pure acceptance rules, one per
//! registration field.

use regex::Regex;

/// Canonical experience buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceBucket {
    Newcomer,
    UnderYear,
    OneYear,
    TwoYears,
    ThreePlusYears,
    FivePlusYears,
}

impl ExperienceBucket {
    /// Canonical string stored against the registration record.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newcomer => "новичок",
            Self::UnderYear => "менее года",
            Self::OneYear => "1 год",
            Self::TwoYears => "2 года",
            Self::ThreePlusYears => "3+ лет",
            Self::FivePlusYears => "5+ лет",
        }
    }
}

impl std::fmt::Display for ExperienceBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compiled per-field validators.
pub struct FieldValidators {
    birthday: Regex,
    letter: Regex,
}

impl FieldValidators {
    pub fn new() -> Self {
        Self {
            birthday: Regex::new(r"^(\d{2})\.(\d{2})\.(\d{4})$").unwrap(),
            letter: Regex::new(r"[a-zA-Zа-яА-ЯёЁ]").unwrap(),
        }
    }

    /// Full name: ≥5 chars, no digits, at least two tokens of ≥2 chars each.
    pub fn full_name(&self, text: &str) -> bool {
        let t = text.trim();
        if t.chars().count() < 5 {
            return false;
        }
        if t.chars().any(|c| c.is_ascii_digit()) {
            return false;
        }
        let tokens: Vec<&str> = t.split_whitespace().collect();
        tokens.len() >= 2 && tokens.iter().all(|tok| tok.chars().count() >= 2)
    }

    /// Birthday: exact `DD.MM.YYYY`, year 1950–2007, real calendar bounds
    /// (30-day months capped at 30, February at 29).
    pub fn birthday(&self, text: &str) -> bool {
        let t = text.trim();
        let Some(caps) = self.birthday.captures(t) else {
            return false;
        };
        // The pattern guarantees the groups parse.
        let day: u32 = caps[1].parse().unwrap();
        let month: u32 = caps[2].parse().unwrap();
        let year: i32 = caps[3].parse().unwrap();

        if !(1950..=2007).contains(&year) {
            return false;
        }
        if !(1..=12).contains(&month) {
            return false;
        }
        if !(1..=31).contains(&day) {
            return false;
        }
        match month {
            4 | 6 | 9 | 11 => day <= 30,
            2 => day <= 29,
            _ => true,
        }
    }

    /// Position: 3–50 chars, contains a letter, not purely numeric.
    pub fn position(&self, text: &str) -> bool {
        let t = text.trim();
        let chars = t.chars().count();
        if !(3..=50).contains(&chars) {
            return false;
        }
        if !self.letter.is_match(t) {
            return false;
        }
        !t.chars().all(|c| c.is_ascii_digit())
    }
}

impl Default for FieldValidators {
    fn default() -> Self {
        Self::new()
    }
}

/// Map free-form experience text to a canonical bucket.
///
/// Keyword buckets win; otherwise the first contiguous digit run decides.
/// Idempotent on its own canonical outputs.
pub fn normalize_experience(text: &str) -> Option<ExperienceBucket> {
    let t = text.trim().to_lowercase();
    if t.is_empty() {
        return None;
    }

    if t.contains("новичок") || t.contains("начина") {
        return Some(ExperienceBucket::Newcomer);
    }
    if t.contains("менее") || t.contains("меньше") || t.contains("без опыта") {
        return Some(ExperienceBucket::UnderYear);
    }
    if t.contains("больше") {
        return Some(ExperienceBucket::FivePlusYears);
    }

    let years = first_integer(&t)?;
    Some(match years {
        0 => ExperienceBucket::UnderYear,
        1 => ExperienceBucket::OneYear,
        2 => ExperienceBucket::TwoYears,
        3 | 4 => ExperienceBucket::ThreePlusYears,
        _ => ExperienceBucket::FivePlusYears,
    })
}

/// First contiguous run of ASCII digits, capped so parsing cannot overflow.
fn first_integer(t: &str) -> Option<u32> {
    let run: String = t
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .take(9)
        .collect();
    run.parse().ok()
}
