//! The fixed question catalog.
//!
//! Question ids double as persistence keys. Renaming one orphans every
//! answer stored under the old id.

use crate::responses::ResponseMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    /// Example answer shown as a hint while the user types.
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub title: &'static str,
    pub questions: &'static [Question],
}

impl Section {
    /// True when every question in the section has a non-empty answer.
    pub fn is_complete(&self, responses: &ResponseMap) -> bool {
        self.questions.iter().all(|q| responses.is_answered(q.id))
    }

    pub fn answered(&self, responses: &ResponseMap) -> usize {
        self.questions
            .iter()
            .filter(|q| responses.is_answered(q.id))
            .count()
    }
}

/// Answered / total question counts across a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

impl Progress {
    pub fn unanswered(&self) -> usize {
        self.total - self.answered
    }
}

/// Ordered sections of ordered questions. The order is canonical for both
/// the survey walk and the prompt.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    sections: &'static [Section],
}

impl Catalog {
    pub const fn new(sections: &'static [Section]) -> Self {
        Self { sections }
    }

    /// The five-section strategic readiness questionnaire.
    pub fn standard() -> Self {
        Self::new(STANDARD_SECTIONS)
    }

    pub fn sections(&self) -> &'static [Section] {
        self.sections
    }

    pub fn questions(&self) -> impl Iterator<Item = &'static Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    pub fn question_ids(&self) -> impl Iterator<Item = &'static str> {
        self.questions().map(|q| q.id)
    }

    pub fn find_question(&self, id: &str) -> Option<&'static Question> {
        self.questions().find(|q| q.id == id)
    }

    pub fn find_section(&self, id: &str) -> Option<&'static Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn progress(&self, responses: &ResponseMap) -> Progress {
        let total = self.questions().count();
        let answered = self
            .questions()
            .filter(|q| responses.is_answered(q.id))
            .count();
        Progress { answered, total }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Standard questionnaire
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

static STANDARD_SECTIONS: &[Section] = &[
    Section {
        id: "strategy",
        title: "Business Objectives & Strategy",
        questions: &[
            Question {
                id: "q_goals",
                text: "What are your top 3 strategic business goals for the next 1-3 years?",
                placeholder: "e.g., 1. Increase market share in the SMB sector by 20%. 2. Reduce customer churn by 15%. 3. Improve operational efficiency to achieve 10% cost savings in logistics.",
            },
            Question {
                id: "q_kpis",
                text: "How do you currently measure success for these goals? What are the key KPIs?",
                placeholder: "e.g., For Goal 1: Net new customer acquisition rate. For Goal 2: Monthly Recurring Revenue (MRR) churn rate. For Goal 3: Cost per delivery, warehouse processing time.",
            },
            Question {
                id: "q_challenges",
                text: "What are the primary challenges or obstacles preventing you from achieving these goals today?",
                placeholder: "e.g., Intense price competition, inability to personalize customer offers at scale, high manual overhead in our supply chain, legacy IT systems slowing down new product launches.",
            },
        ],
    },
    Section {
        id: "data",
        title: "Data & Technical Infrastructure",
        questions: &[
            Question {
                id: "q_datasources",
                text: "What are your primary data sources and systems of record?",
                placeholder: "List your key systems. e.g., CRM: Salesforce; ERP: SAP; Web Analytics: Google Analytics; Customer Support: Zendesk; Databases: PostgreSQL, MongoDB; Cloud: AWS (S3, Redshift).",
            },
            Question {
                id: "q_dataquality",
                text: "How would you assess the quality, accessibility, and completeness of your data?",
                placeholder: "Be honest. e.g., \"Our CRM data is fairly clean but siloed from our web data.\" or \"Data is highly fragmented across departments in various spreadsheets, quality is inconsistent.\" or \"We have a centralized data warehouse with well-defined data governance.\"",
            },
            Question {
                id: "q_datagovernance",
                text: "Is there a clear data governance policy or data ownership model in place?",
                placeholder: "e.g., \"No formal policy exists.\" or \"Yes, our central BI team manages data definitions and access controls.\" or \"Each department head is responsible for their own data.\"",
            },
        ],
    },
    Section {
        id: "team",
        title: "Team & Organizational Readiness",
        questions: &[
            Question {
                id: "q_teamskills",
                text: "What technical and data-related skills exist within your team today?",
                placeholder: "e.g., \"We have several business analysts proficient in SQL and Tableau. Our engineering team is strong in Python and Java but has no direct ML experience. We have an IT team managing infrastructure.\"",
            },
            Question {
                id: "q_culture",
                text: "Describe your company\u{2019}s culture regarding technology adoption and innovation.",
                placeholder: "e.g., \"Fast-moving and experimental, we encourage trying new tools.\" or \"More conservative and risk-averse, new technology requires a strong business case and goes through lengthy approvals.\" or \"There is excitement at the leadership level but resistance from frontline staff.\"",
            },
            Question {
                id: "q_sponsorship",
                text: "Who is the executive sponsor or key champion for this AI initiative? How involved are they?",
                placeholder: "e.g., \"Our CTO is the primary sponsor and is actively involved in weekly check-ins.\" or \"The Head of Marketing is championing this, but we need to secure buy-in from the CFO.\"",
            },
        ],
    },
    Section {
        id: "processes",
        title: "Current Processes & Workflows",
        questions: &[
            Question {
                id: "q_inefficiencies",
                text: "Identify 2-3 critical business processes that are highly manual, repetitive, or inefficient.",
                placeholder: "Be specific. e.g., \"1. Onboarding a new client requires manually creating accounts in 5 different systems.\" \"2. Our accounts payable team manually matches thousands of invoices to purchase orders each month.\" \"3. Sales reps spend hours researching leads before making contact.\"",
            },
            Question {
                id: "q_decisionmaking",
                text: "How are key operational or strategic decisions made today? What data is used?",
                placeholder: "e.g., \"Mostly based on historical reports from our BI tool and the gut-feel of experienced managers.\" or \"We run A/B tests for marketing campaigns, but strategic decisions are less data-driven.\"",
            },
            Question {
                id: "q_tooling",
                text: "What tools are currently used in these processes? Are they integrated?",
                placeholder: "e.g., \"The sales process relies on Salesforce, Outlook, and LinkedIn Sales Navigator. They are not deeply integrated, requiring a lot of copy-pasting.\"",
            },
        ],
    },
    Section {
        id: "market",
        title: "Market Landscape & Competition",
        questions: &[
            Question {
                id: "q_competitors",
                text: "Who are your top 2-3 competitors, and how are they leveraging technology or AI?",
                placeholder: "e.g., \"Competitor A has a powerful recommendation engine on their website. Competitor B just announced an AI-powered chatbot for customer service. We haven't seen Competitor C do much with AI publicly.\"",
            },
            Question {
                id: "q_trends",
                text: "What major industry trends (technological, economic, or customer behavior) are impacting your business?",
                placeholder: "e.g., \"The shift to subscription models.\" \"Increasing customer demand for 24/7 support.\" \"Supply chain volatility.\" \"The rise of generative AI in content creation.\"",
            },
            Question {
                id: "q_differentiation",
                text: "What is your unique value proposition? Where could AI create a sustainable competitive advantage for you?",
                placeholder: "e.g., \"We pride ourselves on superior customer service. AI could help us be even more proactive. Our unique advantage could be using our proprietary data to offer predictive insights that no competitor can match.\"",
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_catalog_shape() {
        let catalog = Catalog::standard();
        let ids: Vec<_> = catalog.sections().iter().map(|s| s.id).collect();
        assert_eq!(ids, ["strategy", "data", "team", "processes", "market"]);
        assert_eq!(catalog.questions().count(), 15);
    }

    #[test]
    fn question_ids_are_unique() {
        let catalog = Catalog::standard();
        let unique: HashSet<_> = catalog.question_ids().collect();
        assert_eq!(unique.len(), catalog.questions().count());
    }

    #[test]
    fn find_question_by_id() {
        let catalog = Catalog::standard();
        let q = catalog.find_question("q_tooling").unwrap();
        assert!(q.text.starts_with("What tools are currently used"));
        assert!(catalog.find_question("q_missing").is_none());
    }

    #[test]
    fn section_completion_ignores_empty_answers() {
        let catalog = Catalog::standard();
        let strategy = catalog.find_section("strategy").unwrap();
        let mut responses = ResponseMap::new();
        responses.set("q_goals", "grow");
        responses.set("q_kpis", "nps");
        responses.set("q_challenges", "");
        assert!(!strategy.is_complete(&responses));
        assert_eq!(strategy.answered(&responses), 2);

        responses.set("q_challenges", "legacy IT");
        assert!(strategy.is_complete(&responses));
    }

    #[test]
    fn whitespace_answers_do_not_complete_a_section() {
        let catalog = Catalog::standard();
        let strategy = catalog.find_section("strategy").unwrap();
        let mut responses = ResponseMap::new();
        responses.set("q_goals", "grow");
        responses.set("q_kpis", "nps");
        responses.set("q_challenges", "  \n\t ");
        assert!(!strategy.is_complete(&responses));
        assert_eq!(strategy.answered(&responses), 2);
        assert_eq!(catalog.progress(&responses).answered, 2);
    }

    #[test]
    fn progress_skips_unknown_keys() {
        let catalog = Catalog::standard();
        let mut responses = ResponseMap::new();
        responses.set("q_goals", "grow");
        responses.set("not_a_question", "junk");
        let progress = catalog.progress(&responses);
        assert_eq!(progress, Progress { answered: 1, total: 15 });
        assert_eq!(progress.unanswered(), 14);
    }
}
