//! Follow-up chat about a generated report.
//!
//! A session keeps two logs:
//! - `history`: what the model sees. Seeded with the generation prompt and
//!   the report, then extended only by completed exchanges.
//! - `transcript`: what the user sees. Opens with a greeting, and keeps
//!   failed turns together with the apology that replaced them.
//!
//! Both logs are append-only.

use crate::model::StrategicReport;
use futures_util::StreamExt;
use sg_domain::config::ChatConfig;
use sg_domain::error::{Error, Result};
use sg_domain::message::Message;
use sg_domain::stream::StreamEvent;
use sg_domain::trace::TraceEvent;
use sg_providers::{ChatRequest, LlmProvider};
use sg_survey::prompt::build_prompt;
use sg_survey::{Catalog, ResponseMap};
use std::sync::Arc;

pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// First visible message. Never sent to the model.
pub const GREETING: &str = "**Hello!** I've reviewed your strategic report. How can I help you clarify or expand on any of the points?";

/// Appended to the transcript when a turn fails.
pub const APOLOGY: &str = "I'm sorry, I encountered an error. Please try again.";

pub const CHAT_SYSTEM_INSTRUCTION: &str = r#"You are 'Strategos AI', an elite AI strategy consultant from AIWinLab, with a background from McKinsey, BCG, and Bain. You have already provided the client with a comprehensive 'Strategic AI Roadmap' based on their survey responses. Your current task is to answer follow-up questions about that specific report.

Your Guiding Principles:
1.  **Maintain Persona:** You are an experienced, professional, and trusted advisor. Your tone is authoritative, credible, and direct.
2.  **Context is King:** Your knowledge is strictly limited to the initial survey data and the strategic report you generated. Do NOT invent new information or initiatives. All your answers must be grounded in the existing report.
3.  **Clarify and Elaborate:** Your primary goal is to help the user understand the report more deeply. You can elaborate on the justification for an initiative, explain a SWOT point's relevance, or detail the reasoning behind the risk analysis.
4.  **Be Concise:** Provide direct answers to the user's questions. Avoid repeating large sections of the report verbatim unless asked. Use formatting like markdown lists if it improves clarity.
5.  **Refer to the Report:** When appropriate, refer to sections of the report, e.g., "As mentioned in the 'Recommended Initiatives' section..." or "The reasoning for this is tied to the 'Weakness' we identified in the SWOT analysis..."."#;

pub struct ChatSession {
    id: String,
    provider: Arc<dyn LlmProvider>,
    model: Option<String>,
    temperature: f32,
    history: Vec<Message>,
    transcript: Vec<Message>,
}

impl ChatSession {
    /// Open a session grounded in `report`.
    ///
    /// The first two history turns are exactly the prompt sent for
    /// generation and the report as pretty-printed JSON.
    pub fn create(
        provider: Arc<dyn LlmProvider>,
        catalog: &Catalog,
        responses: &ResponseMap,
        report: &StrategicReport,
    ) -> Result<Self> {
        let history = vec![
            Message::user(build_prompt(catalog, responses)),
            Message::model(report.to_pretty_json()?),
        ];
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            provider,
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            history,
            transcript: vec![Message::model(GREETING)],
        })
    }

    pub fn with_config(mut self, cfg: &ChatConfig) -> Self {
        self.model = cfg.model.clone();
        self.temperature = cfg.temperature;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Model-facing history.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// The prompt and report turns the session was seeded with.
    pub fn seed(&self) -> &[Message] {
        &self.history[..2]
    }

    /// User-facing transcript.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Send one user message and stream the reply.
    ///
    /// `on_chunk` sees each text fragment in arrival order. On success the
    /// full reply is returned. On failure the transcript gets whatever
    /// partial reply arrived followed by [`APOLOGY`], the model-facing
    /// history is left untouched, and the error is returned.
    pub async fn send_message<F>(&mut self, text: &str, mut on_chunk: F) -> Result<String>
    where
        F: FnMut(&str),
    {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Validation("message is empty".into()));
        }

        self.transcript.push(Message::user(text));

        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(Message::system(CHAT_SYSTEM_INSTRUCTION));
        messages.extend(self.history.iter().cloned());
        messages.push(Message::user(text));
        let req = ChatRequest {
            messages,
            temperature: Some(self.temperature),
            model: self.model.clone(),
            ..Default::default()
        };

        let mut active = String::new();
        let mut chunks = 0usize;
        let outcome = self
            .stream_reply(&req, &mut active, &mut chunks, &mut on_chunk)
            .await;

        let failed = outcome.is_err();
        TraceEvent::ChatTurn {
            session_id: self.id.clone(),
            chunks,
            chars: active.chars().count(),
            failed,
        }
        .emit();

        match outcome {
            Ok(()) => {
                self.transcript.push(Message::model(active.clone()));
                self.history.push(Message::user(text));
                self.history.push(Message::model(active.clone()));
                Ok(active)
            }
            Err(e) => {
                tracing::warn!(session_id = %self.id, error = %e, "chat turn failed");
                if !active.is_empty() {
                    self.transcript.push(Message::model(active));
                }
                self.transcript.push(Message::model(APOLOGY));
                Err(e)
            }
        }
    }

    async fn stream_reply<F>(
        &self,
        req: &ChatRequest,
        active: &mut String,
        chunks: &mut usize,
        on_chunk: &mut F,
    ) -> Result<()>
    where
        F: FnMut(&str),
    {
        let mut stream = self.provider.chat_stream(req).await?;
        while let Some(event) = stream.next().await {
            match event? {
                StreamEvent::Token { text } => {
                    on_chunk(&text);
                    active.push_str(&text);
                    *chunks += 1;
                }
                StreamEvent::Done { .. } => break,
                StreamEvent::Error { message } => {
                    return Err(Error::Provider {
                        provider: self.provider.provider_id().to_string(),
                        message,
                    })
                }
            }
        }
        Ok(())
    }
}
