use crate::catalog::Catalog;
use crate::responses::ResponseMap;

const PREAMBLE: &str = "Please analyze the following client business profile from a detailed questionnaire and generate a comprehensive AI Strategic Readiness Report. The client has provided granular answers to specific questions within broader categories.\n\n--- CLIENT DATA ---\n";
const TRAILER: &str = "\n--- END CLIENT DATA ---";

/// Written in place of an empty or missing answer.
pub const NO_ANSWER: &str = "No answer provided.";

/// Serialize the catalog and answers into the client-data document sent to
/// the model.
///
/// Walks the catalog in order, so answers under unknown ids are ignored and
/// the output depends only on the inputs.
pub fn build_prompt(catalog: &Catalog, responses: &ResponseMap) -> String {
    let mut prompt = String::from(PREAMBLE);
    for section in catalog.sections() {
        prompt.push_str(&format!("\n## Category: {}\n", section.title));
        for question in section.questions {
            let answer = responses.answer(question.id).unwrap_or(NO_ANSWER);
            prompt.push_str(&format!("### {}\n{}\n", question.text, answer));
        }
    }
    prompt.push_str(TRAILER);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Question, Section};

    static MINI: &[Section] = &[
        Section {
            id: "a",
            title: "Alpha",
            questions: &[
                Question { id: "q1", text: "First?", placeholder: "" },
                Question { id: "q2", text: "Second?", placeholder: "" },
            ],
        },
        Section {
            id: "b",
            title: "Beta",
            questions: &[Question { id: "q3", text: "Third?", placeholder: "" }],
        },
    ];

    #[test]
    fn exact_layout() {
        let mut responses = ResponseMap::new();
        responses.set("q1", "one");
        responses.set("q2", "");
        responses.set("stray", "ignored");

        let prompt = build_prompt(&Catalog::new(MINI), &responses);
        let expected = format!(
            "{PREAMBLE}\n## Category: Alpha\n### First?\none\n### Second?\nNo answer provided.\n\n## Category: Beta\n### Third?\nNo answer provided.\n{TRAILER}"
        );
        assert_eq!(prompt, expected);
    }

    #[test]
    fn whitespace_answer_is_sent_verbatim() {
        let mut responses = ResponseMap::new();
        responses.set("q1", "  ");
        let prompt = build_prompt(&Catalog::new(MINI), &responses);
        assert!(prompt.contains("### First?\n  \n"));
        assert_eq!(prompt.matches(NO_ANSWER).count(), 2);
    }

    #[test]
    fn empty_responses_use_sentinel_everywhere() {
        let catalog = Catalog::standard();
        let prompt = build_prompt(&catalog, &ResponseMap::new());
        assert_eq!(prompt.matches(NO_ANSWER).count(), 15);
        assert!(prompt.starts_with("Please analyze the following client business profile"));
        assert!(prompt.ends_with("--- END CLIENT DATA ---"));
    }

    #[test]
    fn deterministic() {
        let mut responses = ResponseMap::new();
        responses.set("q_trends", "subscriptions");
        responses.set("q_goals", "grow");
        let catalog = Catalog::standard();
        assert_eq!(
            build_prompt(&catalog, &responses),
            build_prompt(&catalog, &responses.clone())
        );
    }
}
