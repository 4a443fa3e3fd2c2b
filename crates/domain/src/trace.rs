use serde::Serialize;

/// Structured trace events emitted across all Strategos crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    AccessTransition {
        from: String,
        to: String,
    },
    ResponsesSaved {
        answered: usize,
    },
    ResponsesImported {
        entries: usize,
        dropped: usize,
    },
    VaultCleared,
    PromptBuilt {
        chars: usize,
        answered: usize,
        unanswered: usize,
    },
    LlmRequest {
        provider: String,
        model: String,
        streaming: bool,
        duration_ms: u64,
        prompt_tokens: Option<u32>,
        completion_tokens: Option<u32>,
    },
    ReportGenerated {
        overall_score: u8,
        maturity_level: String,
        dangling_swot_links: usize,
    },
    ChatTurn {
        session_id: String,
        chunks: usize,
        chars: usize,
        failed: bool,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "sg_event");
    }
}
