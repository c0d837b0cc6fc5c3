//! Message processor — runs one inbound message through the full pipeline.
//!
//! Flow:
//! 1. Garbage filter (unconditional) → tiered strict reply, stop
//! 2. Sales hook → may short-circuit
//! 3. No record yet → create one, send the intro prompt
//! 4. `complete` → topic router; otherwise the registration state machine
//!
//! Stage transitions and store writes happen before delivery; a transport
//! failure never corrupts session state.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::PipelineError;
use crate::guards::tone::Classification;
use crate::guards::{strict_reply, GarbageFilter};
use crate::intake::machine::StepOutcome;
use crate::intake::{replies, IntakeMachine, Stage};
use crate::sales::{SalesContext, SalesFlow};
use crate::session::SessionStore;
use crate::store::RegistrationStore;
use crate::topics::TopicRouter;
use crate::transport::PacedSender;

/// Orchestrates guards, the state machine, and the topic router for one
/// participant message at a time.
pub struct MessageProcessor {
    sessions: Arc<SessionStore>,
    store: Arc<dyn RegistrationStore>,
    sender: PacedSender,
    sales: Arc<dyn SalesFlow>,
    garbage: GarbageFilter,
    machine: IntakeMachine,
    topics: TopicRouter,
}

impl MessageProcessor {
    pub fn new(
        sessions: Arc<SessionStore>,
        store: Arc<dyn RegistrationStore>,
        sender: PacedSender,
        sales: Arc<dyn SalesFlow>,
    ) -> Self {
        Self {
            sessions,
            store,
            sender,
            sales,
            garbage: GarbageFilter::new(),
            machine: IntakeMachine::new(),
            topics: TopicRouter::new(),
        }
    }

    /// Process one message, absorbing internal faults at this boundary so
    /// the webhook always acknowledges success upstream.
    pub async fn handle_message(&self, participant_id: &str, text: &str) {
        if let Err(e) = self.process(participant_id, text).await {
            warn!(
                participant = participant_id,
                error = %e,
                "Message processing failed"
            );
        }
    }

    async fn process(&self, participant_id: &str, text: &str) -> Result<(), PipelineError> {
        let text = text.trim();
        let session = self.sessions.get_or_create(participant_id).await;
        let mut session = session.lock().await;

        // Unconditional first line: the garbage filter.
        if self.garbage.is_garbage(text) {
            let count = session.increment_invalid();
            debug!(participant = participant_id, count, "Garbage input");
            self.sender.send(participant_id, strict_reply(count)).await;
            return Ok(());
        }
        session.reset_invalid();

        // Sales hook.
        if self.sales.is_trigger(text) {
            session.last_topic = Some("sales".to_string());
            let handled = self
                .sales
                .handle(SalesContext {
                    participant_id,
                    text,
                    session: &mut session,
                    sender: &self.sender,
                })
                .await;
            if handled {
                return Ok(());
            }
        }

        // First contact: create the record and open the dialogue.
        let Some(record) = self.store.get(participant_id).await? else {
            self.store
                .create(participant_id, Stage::AwaitingFullname)
                .await?;
            session.stage = Stage::AwaitingFullname;
            info!(participant = participant_id, "Registration started");
            self.sender.send(participant_id, replies::INTRO).await;
            return Ok(());
        };

        // The durable record is authoritative after a restart.
        if session.stage != record.stage {
            session.stage = record.stage;
        }

        // Occasionally simulate being briefly occupied. Latency only.
        if self.sender.cadence().roll_busy() {
            self.sender.send_busy_notice(participant_id).await;
        }

        match session.stage {
            Stage::Complete => {
                let routed = self.topics.route(text);
                if let Some(topic) = routed.topic {
                    debug!(participant = participant_id, topic = topic.as_str(), "Topic routed");
                    session.last_topic = Some(topic.as_str().to_string());
                }
                self.sender.send(participant_id, routed.text).await;
            }
            Stage::Start => {
                // A record exists but its stage never advanced past start;
                // reopen the dialogue.
                self.sender.send(participant_id, replies::INTRO).await;
            }
            stage => match self.machine.step(stage, text) {
                StepOutcome::Tone {
                    classification,
                    reply,
                } => {
                    if classification == Classification::Rude {
                        warn!(
                            participant = participant_id,
                            stage = %stage,
                            "Disrespectful input recorded as a conduct concern"
                        );
                    }
                    self.sender.send(participant_id, reply).await;
                }
                StepOutcome::Rejected { reply } => {
                    debug!(participant = participant_id, stage = %stage, "Answer rejected");
                    self.sender.send(participant_id, reply).await;
                }
                StepOutcome::Accepted {
                    field,
                    value,
                    next,
                    replies,
                } => {
                    // Persist and advance before any delivery.
                    self.store
                        .set_field(participant_id, field, &value, next)
                        .await?;
                    session.stage = next;
                    info!(
                        participant = participant_id,
                        field = %field,
                        stage = %next,
                        "Registration advanced"
                    );
                    self.sender.send_all(participant_id, &replies).await;
                }
            },
        }

        Ok(())
    }
}
