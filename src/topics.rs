//! Topic router — post-registration keyword dispatch.
//!
//! Priority order: the non-work redirect short-circuits everything, then the
//! four diagnostic topics, then a clarifying fallback. Casual phrasing is
//! tolerated here, so the tone filter's joke branch does not apply.

/// Off-topic markers: small talk and personal questions.
const NON_WORK_MARKERS: &[&str] = &[
    "как дела",
    "что делаешь",
    "чем занимаешься",
    "скучаешь",
    "поболтаем",
    "поговорим",
    "кофе",
    "чай",
    "любишь",
    "нравится",
    "ты кто",
    "кто ты",
    "расскажи о себе",
    "давай просто",
    "ничего не хочу",
    "не хочу работать",
];

const SALES_MARKERS: &[&str] = &["продаж", "клиент", "выручк"];
const MOTIVATION_MARKERS: &[&str] = &["мотивац", "не хочу", "устал"];
const STRESS_MARKERS: &[&str] = &["стресс", "нерв", "тревог"];
const DISCIPLINE_MARKERS: &[&str] = &["дисциплин", "опаздыв", "режим"];

const NON_WORK_REPLY: &str = "Я здесь исключительно для рабочих вопросов: продажи, клиенты, \
    дисциплина, мотивация, стресс, эффективность.\nДавайте вернёмся к делу.";

const SALES_REPLY: &str = "Поняла. Давайте перейдём к продажам.\nОпишите, пожалуйста, что \
    именно сейчас вызывает трудности: клиент, возражение, отсутствие мотивации, или что-то ещё?";

const MOTIVATION_REPLY: &str = "Поняла. Давайте разберём вашу мотивацию.\nЧто именно ощущаете \
    сейчас: усталость, потеря интереса, эмоциональное выгорание, давление?";

const STRESS_REPLY: &str = "Хорошо. Разберём стресс.\nЧто стало причиной: клиенты, коллектив, \
    личная ситуация или перегруз?";

const DISCIPLINE_REPLY: &str = "Давайте обсудим дисциплину.\nС чем именно сложности: режим \
    дня, график, внимание или обещания самому себе?";

const FALLBACK_REPLY: &str = "Я с вами. Давайте точно сформулируем вопрос: продажи, мотивация, \
    клиентская ситуация, стресс или дисциплина?";

/// A support topic a completed participant can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Sales,
    Motivation,
    Stress,
    Discipline,
}

impl Topic {
    /// Tag recorded on the session.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Motivation => "motivation",
            Self::Stress => "stress",
            Self::Discipline => "discipline",
        }
    }
}

/// Routing decision: the reply to send and, for topic branches, the tag to
/// record on the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedReply {
    pub topic: Option<Topic>,
    pub text: &'static str,
}

/// Keyword dispatcher for completed participants.
pub struct TopicRouter;

impl TopicRouter {
    pub fn new() -> Self {
        Self
    }

    /// Route case-folded text to a reply. First match wins.
    pub fn route(&self, text: &str) -> RoutedReply {
        let t = text.to_lowercase();

        if contains_any(&t, NON_WORK_MARKERS) {
            return RoutedReply {
                topic: None,
                text: NON_WORK_REPLY,
            };
        }
        if contains_any(&t, SALES_MARKERS) {
            return RoutedReply {
                topic: Some(Topic::Sales),
                text: SALES_REPLY,
            };
        }
        if contains_any(&t, MOTIVATION_MARKERS) {
            return RoutedReply {
                topic: Some(Topic::Motivation),
                text: MOTIVATION_REPLY,
            };
        }
        if contains_any(&t, STRESS_MARKERS) {
            return RoutedReply {
                topic: Some(Topic::Stress),
                text: STRESS_REPLY,
            };
        }
        if contains_any(&t, DISCIPLINE_MARKERS) {
            return RoutedReply {
                topic: Some(Topic::Discipline),
                text: DISCIPLINE_REPLY,
            };
        }

        RoutedReply {
            topic: None,
            text: FALLBACK_REPLY,
        }
    }
}

impl Default for TopicRouter {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_any(t: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| t.contains(m))
}
