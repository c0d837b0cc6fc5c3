//! Reply catalog for the registration dialogue.
//!
//! All participant-visible text lives here. Markup uses the transport's
//! lightweight bold/italic markers.

use super::stage::Stage;

/// Greeting sent when a record is first created.
pub const INTRO: &str = "Здравствуйте 👋\nМеня зовут *Айна Муратовна*. Давайте начнём с \
    простого — напишите, пожалуйста, ваше *ФИО полностью*.";

/// Welcome sequence sent after the final field is accepted, in strict order.
pub const WELCOME_SEQUENCE: [&str; 5] = [
    "Спасибо 🙏\nРегистрация завершена. Дайте мне минутку…",
    "Я — *Айна Муратовна*: корпоративный психолог, адаптолог и бизнес-тренер с 15-летним \
     опытом. Буду сопровождать вас, помогать развиваться и усиливать результаты.",
    "Мы будем работать над:\n\
     • продажами и переговорами\n\
     • дисциплиной\n\
     • стрессоустойчивостью\n\
     • уверенностью и мотивацией\n\
     • вашим личным развитием",
    "Всё, что вы пишете — *конфиденциально*. Руководству передаются только результаты \
     тестов и факты нарушения деловой этики.",
    "Можете писать в любое время. Что сейчас актуально?",
];

/// The question asked when the dialogue enters `stage`.
pub fn prompt_for(stage: Stage) -> &'static str {
    match stage {
        Stage::Start | Stage::AwaitingFullname => INTRO,
        Stage::AwaitingBirthday => {
            "Спасибо 🙌\nТеперь напишите, пожалуйста, вашу *дату рождения* в формате ДД.ММ.ГГГГ."
        }
        Stage::AwaitingPosition => "Хорошо 👍\nТеперь напишите вашу *должность*.",
        Stage::AwaitingExperience => {
            "Хорошо. Теперь напишите ваш *опыт работы* — например: новичок, 1 год, 3+ лет."
        }
        Stage::Complete => WELCOME_SEQUENCE[0],
    }
}

/// The corrective reply for a rejected answer at `stage`.
pub fn reject_for(stage: Stage) -> &'static str {
    match stage {
        Stage::AwaitingFullname => {
            "ФИО выглядит некорректно. Укажите, пожалуйста, фамилию и имя."
        }
        Stage::AwaitingBirthday => "Дата рождения неверна. Укажите в формате *ДД.ММ.ГГГГ*.",
        Stage::AwaitingPosition => "Должность указана некорректно. Напишите реальную должность.",
        Stage::AwaitingExperience => {
            "Опыт не распознан. Напишите: новичок / 1 год / 2 года / 3+ лет / 5+ лет."
        }
        // No field is collected at these stages.
        Stage::Start | Stage::Complete => "Давайте продолжим по порядку.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_stage_has_distinct_prompts_and_rejects() {
        use Stage::*;
        let stages = [AwaitingFullname, AwaitingBirthday, AwaitingPosition, AwaitingExperience];
        for (i, a) in stages.iter().enumerate() {
            for b in &stages[i + 1..] {
                assert_ne!(reject_for(*a), reject_for(*b));
            }
        }
    }

    #[test]
    fn welcome_sequence_is_five_messages() {
        assert_eq!(WELCOME_SEQUENCE.len(), 5);
        assert!(WELCOME_SEQUENCE.iter().all(|m| !m.is_empty()));
    }
}
