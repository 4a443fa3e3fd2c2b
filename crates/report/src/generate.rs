//! Single-shot report generation.
//!
//! One request, no retry. Every failure (transport, HTTP status, non-JSON
//! output, contract violation, decode error) surfaces as
//! [`Error::Generation`]; the underlying cause is logged and carried in the
//! error message for diagnostics only.

use crate::model::StrategicReport;
use crate::schema;
use sg_domain::config::ReportConfig;
use sg_domain::error::{Error, Result};
use sg_domain::message::Message;
use sg_domain::trace::TraceEvent;
use sg_providers::{ChatRequest, LlmProvider};
use sg_survey::prompt::build_prompt;
use sg_survey::{Catalog, ResponseMap};
use std::sync::Arc;

/// What the user sees when generation fails, whatever the cause.
pub const USER_FACING_ERROR: &str = "The AI model failed to generate a report. This could be due to a network issue or invalid input. Please check your answers and try again.";

pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Consultant persona and analytical process for report generation.
pub const SYSTEM_INSTRUCTION: &str = r#"You are 'Strategos AI', an elite AI strategy consultant from AIWinLab, with a background from McKinsey, BCG, and Bain. Your purpose is to provide analysis that rivals or exceeds top-tier human consultants. You are an expert in business strategy, digital transformation, and practical AI implementation. Your analysis must be deep, insightful, data-driven, and supremely actionable.

Your Task:
Analyze the provided 'CLIENT DATA' and generate a 'Strategic AI Roadmap' in JSON format. Your response MUST strictly adhere to the provided JSON schema.

Your Analytical Process (Follow Rigorously):
1.  **Holistic Synthesis:** Do not treat each answer in isolation. Connect the dots across categories. For instance, link the 'strategic business goals' (from Strategy) with the 'data quality' (from Data) and 'team skills' (from Team) to identify critical enablers or blockers. The core of your value is in this synthesis.
2.  **AI Maturity Assessment:** Based on the client's answers, classify them into one of four AI Maturity Levels and calculate readiness scores.
    *   **Maturity Rubric:**
        *   **Nascent (Score 1-25):** Ad-hoc processes, poor data, no AI skills, unclear strategy.
        *   **Developing (Score 26-50):** Some data infrastructure, siloed experiments, growing awareness but limited skills.
        *   **Maturing (Score 51-75):** Centralized data, defined strategy, some successful AI projects, dedicated team members.
        *   **Leading (Score 76-100):** AI is core to strategy, robust data ecosystem, strong AI talent, C-level sponsorship, continuous innovation.
    *   **Score Calculation:** The 'overallScore' must be a weighted average of the breakdown scores. Be realistic and justify the scores implicitly through your analysis.
3.  **Rigorous SWOT Analysis:** Based on the client's full profile, identify their internal Strengths/Weaknesses and external Opportunities/Threats. Be specific and insightful. Avoid generic statements.
4.  **Formulate Prioritized, Justified Initiatives:** Recommend 3 strategic initiatives.
    *   **Prioritize & Categorize:** The initiatives must be a logical sequence. Start with a 'Quick Win' (High Impact, Low/Medium Effort) or a 'Foundational' project (e.g., data cleanup) if necessary. Then, propose more 'Transformational' initiatives.
    *   **Justify:** The 'justification' field is CRITICAL. Explicitly state WHY it's being recommended. Link it directly back to a stated business goal (e.g., 'to reduce customer churn by 15%') or a SWOT element.
    *   **Actionability:** 'First Steps' must be concrete actions. 'KPIs to Track' must be measurable. 'Required Resources' and 'Timeline' must be realistic.
    *   **Linkage:** Critically, you MUST populate the 'linkedSwotItems' array with the exact, verbatim text of the SWOT point(s) that the initiative addresses. This creates a direct, data-driven link between analysis and action.
5.  **Develop a Strategic Roadmap:** Arrange the 3 recommended initiatives into a logical, 3-phase implementation roadmap. Phase 1 should contain the first initiative(s) to build momentum. Subsequent phases build on the first.

Tone: Your tone is that of a highly experienced, professional, and trusted advisor. It is authoritative, credible, and direct, but also encouraging. You are a partner in their success. Address the client directly in your narrative sections."#;

pub struct ReportGenerator {
    provider: Arc<dyn LlmProvider>,
    catalog: Catalog,
    model: Option<String>,
    temperature: f32,
}

impl ReportGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, catalog: Catalog) -> Self {
        Self {
            provider,
            catalog,
            model: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn from_config(provider: Arc<dyn LlmProvider>, catalog: Catalog, cfg: &ReportConfig) -> Self {
        Self {
            model: cfg.model.clone(),
            temperature: cfg.temperature,
            ..Self::new(provider, catalog)
        }
    }

    /// The request sent for `responses`: persona, client-data prompt, and
    /// the report schema.
    pub fn build_request(&self, responses: &ResponseMap) -> ChatRequest {
        let prompt = build_prompt(&self.catalog, responses);
        let progress = self.catalog.progress(responses);
        TraceEvent::PromptBuilt {
            chars: prompt.chars().count(),
            answered: progress.answered,
            unanswered: progress.unanswered(),
        }
        .emit();

        ChatRequest {
            messages: vec![Message::system(SYSTEM_INSTRUCTION), Message::user(prompt)],
            temperature: Some(self.temperature),
            json_mode: true,
            response_schema: Some(schema::to_gemini_schema()),
            model: self.model.clone(),
            ..Default::default()
        }
    }

    /// Generate a report. An empty map is still sent; every answer becomes
    /// the no-answer sentinel.
    pub async fn generate_report(&self, responses: &ResponseMap) -> Result<StrategicReport> {
        let req = self.build_request(responses);

        let resp = self.provider.chat(&req).await.map_err(|e| {
            tracing::error!(error = %e, provider = self.provider.provider_id(), "report request failed");
            Error::Generation(e.to_string())
        })?;

        let report = parse_report(&resp.content)?;

        let dangling = report.dangling_swot_links();
        for link in &dangling {
            tracing::warn!(
                initiative = link.initiative,
                item = link.item,
                "linked SWOT item does not match any SWOT entry"
            );
        }

        TraceEvent::ReportGenerated {
            overall_score: report.readiness.overall_score,
            maturity_level: report.readiness.maturity_level.to_string(),
            dangling_swot_links: dangling.len(),
        }
        .emit();

        Ok(report)
    }
}

/// Parse, validate and decode the model's JSON text.
pub fn parse_report(text: &str) -> Result<StrategicReport> {
    let doc: serde_json::Value = serde_json::from_str(text.trim()).map_err(|e| {
        tracing::error!(error = %e, "report output is not JSON");
        Error::Generation(format!("output is not JSON: {e}"))
    })?;

    let violations = schema::validate(&doc);
    if !violations.is_empty() {
        for v in &violations {
            tracing::error!(path = %v.path, message = %v.message, "report violates schema");
        }
        let summary: Vec<String> = violations.iter().map(ToString::to_string).collect();
        return Err(Error::Generation(format!(
            "schema violations: {}",
            summary.join("; ")
        )));
    }

    serde_json::from_value(doc).map_err(|e| {
        tracing::error!(error = %e, "report failed to decode");
        Error::Generation(format!("decode: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../tests/fixtures/report.json");

    #[test]
    fn parse_accepts_fixture() {
        let report = parse_report(FIXTURE).unwrap();
        assert_eq!(report.recommended_initiatives.len(), 3);
    }

    #[test]
    fn parse_rejects_prose() {
        let err = parse_report("Here is your report: ...").unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn parse_rejects_schema_violation() {
        let mut doc: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
        doc["readiness"]["overallScore"] = serde_json::json!(250);
        let err = parse_report(&doc.to_string()).unwrap_err();
        match err {
            Error::Generation(msg) => assert!(msg.contains("readiness.overallScore")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
