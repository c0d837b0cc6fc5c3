//! Registration state machine — evaluates one inbound answer against the
//! current stage.
//!
//! `step()` is pure: it returns what should happen (replies to send, field
//! to persist, stage to advance to) and the pipeline applies it. Garbage
//! filtering happens before the machine; topic routing after `Complete`.

use crate::guards::tone::{Classification, JOKE_REPLY, RUDE_REPLY};
use crate::guards::ToneFilter;
use crate::store::RegistrationField;

use super::replies;
use super::stage::Stage;
use super::validators::{normalize_experience, FieldValidators};

/// Result of evaluating one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Rude or joking input: send the tone reply, stage unchanged.
    Tone {
        classification: Classification,
        reply: &'static str,
    },
    /// The answer failed its field validator: corrective reply, stage
    /// unchanged, nothing persisted.
    Rejected { reply: &'static str },
    /// The answer was accepted: persist `value` under `field`, advance to
    /// `next`, send `replies` in order.
    Accepted {
        field: RegistrationField,
        value: String,
        next: Stage,
        replies: Vec<&'static str>,
    },
}

/// Evaluates answers for the four field-collecting stages.
pub struct IntakeMachine {
    tone: ToneFilter,
    validators: FieldValidators,
}

impl IntakeMachine {
    pub fn new() -> Self {
        Self {
            tone: ToneFilter::new(),
            validators: FieldValidators::new(),
        }
    }

    /// Evaluate `text` at a field-collecting stage.
    ///
    /// Callers handle `Start` (record creation + intro) and `Complete`
    /// (topic routing) themselves; for those stages this returns a generic
    /// rejection rather than panicking.
    pub fn step(&self, stage: Stage, text: &str) -> StepOutcome {
        match self.tone.classify(text) {
            Classification::Rude => {
                return StepOutcome::Tone {
                    classification: Classification::Rude,
                    reply: RUDE_REPLY,
                };
            }
            Classification::Joke => {
                return StepOutcome::Tone {
                    classification: Classification::Joke,
                    reply: JOKE_REPLY,
                };
            }
            Classification::Acceptable => {}
        }

        match stage {
            Stage::AwaitingFullname => {
                self.field_step(stage, self.validators.full_name(text), || {
                    (RegistrationField::FullName, text.trim().to_string())
                })
            }
            Stage::AwaitingBirthday => {
                self.field_step(stage, self.validators.birthday(text), || {
                    (RegistrationField::Birthday, text.trim().to_string())
                })
            }
            Stage::AwaitingPosition => {
                self.field_step(stage, self.validators.position(text), || {
                    (RegistrationField::Position, text.trim().to_string())
                })
            }
            Stage::AwaitingExperience => match normalize_experience(text) {
                Some(bucket) => StepOutcome::Accepted {
                    field: RegistrationField::Experience,
                    value: bucket.as_str().to_string(),
                    next: Stage::Complete,
                    replies: replies::WELCOME_SEQUENCE.to_vec(),
                },
                None => StepOutcome::Rejected {
                    reply: replies::reject_for(stage),
                },
            },
            Stage::Start | Stage::Complete => StepOutcome::Rejected {
                reply: replies::reject_for(stage),
            },
        }
    }

    fn field_step(
        &self,
        stage: Stage,
        valid: bool,
        accept: impl FnOnce() -> (RegistrationField, String),
    ) -> StepOutcome {
        if !valid {
            return StepOutcome::Rejected {
                reply: replies::reject_for(stage),
            };
        }
        let (field, value) = accept();
        // Field stages always have a successor.
        let next = stage.next().expect("field stage has a next stage");
        StepOutcome::Accepted {
            field,
            value,
            next,
            replies: vec![replies::prompt_for(next)],
        }
    }
}

impl Default for IntakeMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> IntakeMachine {
        IntakeMachine::new()
    }

    #[test]
    fn valid_name_advances_to_birthday() {
        let m = machine();
        match m.step(Stage::AwaitingFullname, "Иванов Иван") {
            StepOutcome::Accepted {
                field,
                value,
                next,
                replies,
            } => {
                assert_eq!(field, RegistrationField::FullName);
                assert_eq!(value, "Иванов Иван");
                assert_eq!(next, Stage::AwaitingBirthday);
                assert_eq!(replies.len(), 1);
            }
            other => panic!("Expected Accepted, got {other:?}"),
        }
    }

    #[test]
    fn invalid_name_is_rejected() {
        let m = machine();
        assert!(matches!(
            m.step(Stage::AwaitingFullname, "Иванов"),
            StepOutcome::Rejected { .. }
        ));
    }

    #[test]
    fn accepted_value_is_trimmed() {
        let m = machine();
        match m.step(Stage::AwaitingFullname, "  Иванов Иван  ") {
            StepOutcome::Accepted { value, .. } => assert_eq!(value, "Иванов Иван"),
            other => panic!("Expected Accepted, got {other:?}"),
        }
    }

    #[test]
    fn impossible_birthday_is_rejected() {
        let m = machine();
        assert!(matches!(
            m.step(Stage::AwaitingBirthday, "31.02.1990"),
            StepOutcome::Rejected { .. }
        ));
    }

    #[test]
    fn valid_birthday_advances_to_position() {
        let m = machine();
        match m.step(Stage::AwaitingBirthday, "12.05.1990") {
            StepOutcome::Accepted { field, next, .. } => {
                assert_eq!(field, RegistrationField::Birthday);
                assert_eq!(next, Stage::AwaitingPosition);
            }
            other => panic!("Expected Accepted, got {other:?}"),
        }
    }

    #[test]
    fn experience_is_normalized_before_persisting() {
        let m = machine();
        match m.step(Stage::AwaitingExperience, "работаю уже 2 года") {
            StepOutcome::Accepted {
                field,
                value,
                next,
                replies,
            } => {
                assert_eq!(field, RegistrationField::Experience);
                assert_eq!(value, "2 года");
                assert_eq!(next, Stage::Complete);
                assert_eq!(replies, replies::WELCOME_SEQUENCE.to_vec());
            }
            other => panic!("Expected Accepted, got {other:?}"),
        }
    }

    #[test]
    fn rude_input_short_circuits_validation() {
        let m = machine();
        // The text also contains a plausible name; rudeness wins.
        match m.step(Stage::AwaitingFullname, "заткнись Иванов Иван") {
            StepOutcome::Tone { classification, .. } => {
                assert_eq!(classification, Classification::Rude);
            }
            other => panic!("Expected Tone, got {other:?}"),
        }
    }

    #[test]
    fn joke_input_does_not_advance() {
        let m = machine();
        match m.step(Stage::AwaitingBirthday, "ахахах 12.05.1990") {
            StepOutcome::Tone { classification, .. } => {
                assert_eq!(classification, Classification::Joke);
            }
            other => panic!("Expected Tone, got {other:?}"),
        }
    }
}
