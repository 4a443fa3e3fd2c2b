//! The structured-output contract for a strategic report.
//!
//! One table of [`Field`]s drives both sides: [`to_gemini_schema`] renders
//! it as the `responseSchema` sent with the request, and [`validate`] checks
//! the returned document against it before it is decoded. Every listed field
//! is required; fields not listed are ignored.

use serde_json::{json, Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    String,
    /// Inclusive bounds.
    Integer { min: i64, max: i64 },
    Enum(&'static [&'static str]),
    StringArray { min_items: usize, max_items: Option<usize> },
    Object(&'static [Field]),
    /// Array of objects with an exact length.
    ObjectArray { items: &'static [Field], len: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    /// Guidance for the model, sent verbatim in the schema.
    pub description: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, description: &'static str, kind: FieldKind) -> Field {
    Field {
        name,
        description,
        kind,
    }
}

const SCORE: FieldKind = FieldKind::Integer { min: 1, max: 100 };
const LEVELS: &[&str] = &["High", "Medium", "Low"];
const SWOT_POINTS: FieldKind = FieldKind::StringArray {
    min_items: 3,
    max_items: Some(5),
};
const NAMES: FieldKind = FieldKind::StringArray {
    min_items: 0,
    max_items: None,
};

/// Number of initiatives a report must recommend.
pub const INITIATIVE_COUNT: usize = 3;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Report contract
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const SCORE_BREAKDOWN: &[Field] = &[
    field("strategy", "Score for clarity of goals and AI alignment.", SCORE),
    field("data", "Score for data quality, infrastructure, and governance.", SCORE),
    field("team", "Score for team skills, culture, and sponsorship.", SCORE),
    field("process", "Score for process maturity and potential for AI optimization.", SCORE),
];

const READINESS: &[Field] = &[
    field(
        "overallScore",
        "The final, weighted AI readiness score from 1 to 100.",
        SCORE,
    ),
    field(
        "scoreBreakdown",
        "A breakdown of readiness scores (1-100) for specific areas.",
        FieldKind::Object(SCORE_BREAKDOWN),
    ),
    field(
        "maturityLevel",
        "The client's AI Maturity Level, classified as one of: 'Nascent', 'Developing', 'Maturing', or 'Leading'.",
        FieldKind::Enum(&["Nascent", "Developing", "Maturing", "Leading"]),
    ),
];

const SWOT: &[Field] = &[
    field(
        "strengths",
        "Internal attributes that give the business an advantage. Provide 3-5 points.",
        SWOT_POINTS,
    ),
    field(
        "weaknesses",
        "Internal attributes that place the business at a disadvantage. Provide 3-5 points.",
        SWOT_POINTS,
    ),
    field(
        "opportunities",
        "External factors that the business could exploit to its advantage. Provide 3-5 points.",
        SWOT_POINTS,
    ),
    field(
        "threats",
        "External factors that could cause trouble for the business. Provide 3-5 points.",
        SWOT_POINTS,
    ),
];

const INITIATIVE: &[Field] = &[
    field("initiativeName", "A catchy, descriptive name for the project.", FieldKind::String),
    field(
        "initiativeType",
        "Categorize as 'Quick Win', 'Foundational', or 'Transformational'.",
        FieldKind::Enum(&["Quick Win", "Foundational", "Transformational"]),
    ),
    field(
        "description",
        "A detailed explanation of the project, what it does, and the value it creates.",
        FieldKind::String,
    ),
    field(
        "potentialImpact",
        "Estimated business impact (High, Medium, or Low).",
        FieldKind::Enum(LEVELS),
    ),
    field(
        "effortLevel",
        "Estimated implementation effort (High, Medium, or Low).",
        FieldKind::Enum(LEVELS),
    ),
    field(
        "firstSteps",
        "The immediate, concrete first steps (1-3) to start this initiative.",
        FieldKind::String,
    ),
    field(
        "justification",
        "A clear rationale explaining WHY this initiative is recommended, linking it to a business goal or SWOT item.",
        FieldKind::String,
    ),
    field(
        "linkedSwotItems",
        "An array of 1-2 specific points from the SWOT analysis (verbatim text) that this initiative directly addresses.",
        NAMES,
    ),
    field(
        "kpisToTrack",
        "List 2-3 specific, measurable KPIs to evaluate the success of this initiative.",
        NAMES,
    ),
    field(
        "requiredResources",
        "List the key people, teams, or technology needed (e.g., '2 Data Scientists, 1 Product Manager, access to AWS SageMaker').",
        FieldKind::String,
    ),
    field(
        "timelineEstimate",
        "A realistic time estimate for seeing initial value (e.g., '3-6 months').",
        FieldKind::String,
    ),
];

const ROADMAP: &[Field] = &[
    field(
        "phase1_title",
        "Title for Phase 1 (e.g., 'Phase 1: Foundation & Quick Wins').",
        FieldKind::String,
    ),
    field(
        "phase1_initiatives",
        "Array of initiative names to be implemented in this phase.",
        NAMES,
    ),
    field("phase1_duration", "Duration for this phase (e.g., 'Months 0-6').", FieldKind::String),
    field(
        "phase2_title",
        "Title for Phase 2 (e.g., 'Phase 2: Scaling & Capability Building').",
        FieldKind::String,
    ),
    field(
        "phase2_initiatives",
        "Array of initiative names to be implemented in this phase.",
        NAMES,
    ),
    field("phase2_duration", "Duration for this phase (e.g., 'Months 6-12').", FieldKind::String),
    field(
        "phase3_title",
        "Title for Phase 3 (e.g., 'Phase 3: Transformation & Market Leadership').",
        FieldKind::String,
    ),
    field(
        "phase3_initiatives",
        "Array of initiative names to be implemented in this phase.",
        NAMES,
    ),
    field("phase3_duration", "Duration for this phase (e.g., 'Months 12+').", FieldKind::String),
];

const RISKS: &[Field] = &[
    field(
        "technicalRisks",
        "Potential technical hurdles (e.g., data integration, model accuracy).",
        FieldKind::String,
    ),
    field(
        "operationalRisks",
        "Risks related to team adoption, process changes, change management.",
        FieldKind::String,
    ),
    field(
        "marketRisks",
        "External or competitive risks to consider (e.g., new regulations, competitor moves).",
        FieldKind::String,
    ),
];

/// Top-level fields of a strategic report.
pub const REPORT_FIELDS: &[Field] = &[
    field(
        "executiveSummary",
        "A high-level overview for a C-suite audience. It must synthesize the client's current situation, the core challenge/opportunity, and the key strategic recommendation. Should be concise, professional, and impactful.",
        FieldKind::String,
    ),
    field(
        "readiness",
        "A detailed AI readiness assessment, including an overall score, a breakdown, and a maturity level classification.",
        FieldKind::Object(READINESS),
    ),
    field(
        "swotAnalysis",
        "A comprehensive SWOT analysis (Strengths, Weaknesses, Opportunities, Threats) based on the client's input.",
        FieldKind::Object(SWOT),
    ),
    field(
        "recommendedInitiatives",
        "A list of 3 prioritized, actionable AI initiatives.",
        FieldKind::ObjectArray {
            items: INITIATIVE,
            len: INITIATIVE_COUNT,
        },
    ),
    field(
        "implementationRoadmap",
        "A phased, strategic roadmap for implementing the recommended initiatives.",
        FieldKind::Object(ROADMAP),
    ),
    field(
        "riskAnalysis",
        "A brief analysis of potential risks associated with the AI strategy.",
        FieldKind::Object(RISKS),
    ),
    field(
        "conclusion",
        "Concluding remarks that summarize the strategic imperative and call to action.",
        FieldKind::String,
    ),
];

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Rendering
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The report contract as a Gemini `responseSchema`.
pub fn to_gemini_schema() -> Value {
    object_schema(REPORT_FIELDS, None)
}

fn object_schema(fields: &[Field], description: Option<&str>) -> Value {
    let mut properties = Map::new();
    for f in fields {
        properties.insert(f.name.to_string(), field_schema(f));
    }
    let required: Vec<&str> = fields.iter().map(|f| f.name).collect();

    let mut schema = json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    });
    if let Some(d) = description {
        schema["description"] = json!(d);
    }
    schema
}

fn field_schema(f: &Field) -> Value {
    match f.kind {
        FieldKind::String => json!({"type": "STRING", "description": f.description}),
        FieldKind::Integer { min, max } => json!({
            "type": "INTEGER",
            "description": f.description,
            "minimum": min,
            "maximum": max,
        }),
        FieldKind::Enum(values) => json!({
            "type": "STRING",
            "format": "enum",
            "enum": values,
            "description": f.description,
        }),
        FieldKind::StringArray {
            min_items,
            max_items,
        } => {
            let mut schema = json!({
                "type": "ARRAY",
                "description": f.description,
                "items": {"type": "STRING"},
            });
            if min_items > 0 {
                schema["minItems"] = json!(min_items);
            }
            if let Some(max) = max_items {
                schema["maxItems"] = json!(max);
            }
            schema
        }
        FieldKind::Object(fields) => object_schema(fields, Some(f.description)),
        FieldKind::ObjectArray { items, len } => json!({
            "type": "ARRAY",
            "description": f.description,
            "minItems": len,
            "maxItems": len,
            "items": object_schema(items, None),
        }),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One way a document breaks the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON path, e.g. `recommendedInitiatives[1].effortLevel`.
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Check `doc` against the report contract. Empty when it conforms.
pub fn validate(doc: &Value) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_object(doc, REPORT_FIELDS, "", &mut violations);
    violations
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn check_object(value: &Value, fields: &[Field], path: &str, out: &mut Vec<Violation>) {
    let Some(obj) = value.as_object() else {
        out.push(Violation {
            path: if path.is_empty() { "$".into() } else { path.into() },
            message: format!("expected object, found {}", kind_of(value)),
        });
        return;
    };
    for f in fields {
        let field_path = join(path, f.name);
        match obj.get(f.name) {
            None | Some(Value::Null) => out.push(Violation {
                path: field_path,
                message: "missing required field".into(),
            }),
            Some(v) => check_field(v, f.kind, &field_path, out),
        }
    }
}

fn check_field(value: &Value, kind: FieldKind, path: &str, out: &mut Vec<Violation>) {
    match kind {
        FieldKind::String => {
            if !value.is_string() {
                push(out, path, format!("expected string, found {}", kind_of(value)));
            }
        }
        FieldKind::Integer { min, max } => match value.as_i64() {
            Some(n) if (min..=max).contains(&n) => {}
            Some(n) => push(out, path, format!("expected integer in {min}..={max}, found {n}")),
            None => push(out, path, format!("expected integer, found {}", kind_of(value))),
        },
        FieldKind::Enum(allowed) => match value.as_str() {
            Some(s) if allowed.contains(&s) => {}
            Some(s) => push(out, path, format!("expected one of {allowed:?}, found {s:?}")),
            None => push(out, path, format!("expected string, found {}", kind_of(value))),
        },
        FieldKind::StringArray {
            min_items,
            max_items,
        } => {
            let Some(items) = value.as_array() else {
                push(out, path, format!("expected array, found {}", kind_of(value)));
                return;
            };
            let too_many = max_items.is_some_and(|max| items.len() > max);
            if items.len() < min_items || too_many {
                let bound = match max_items {
                    Some(max) => format!("{min_items}..={max}"),
                    None => format!("at least {min_items}"),
                };
                push(out, path, format!("expected {bound} items, found {}", items.len()));
            }
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    out.push(Violation {
                        path: format!("{path}[{i}]"),
                        message: format!("expected string, found {}", kind_of(item)),
                    });
                }
            }
        }
        FieldKind::Object(fields) => check_object(value, fields, path, out),
        FieldKind::ObjectArray { items, len } => {
            let Some(elements) = value.as_array() else {
                push(out, path, format!("expected array, found {}", kind_of(value)));
                return;
            };
            if elements.len() != len {
                push(out, path, format!("expected exactly {len} items, found {}", elements.len()));
            }
            for (i, element) in elements.iter().enumerate() {
                check_object(element, items, &format!("{path}[{i}]"), out);
            }
        }
    }
}

fn push(out: &mut Vec<Violation>, path: &str, message: String) {
    out.push(Violation {
        path: path.to_string(),
        message,
    });
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../tests/fixtures/report.json");

    fn fixture() -> Value {
        serde_json::from_str(FIXTURE).unwrap()
    }

    #[test]
    fn fixture_conforms() {
        assert_eq!(validate(&fixture()), Vec::<Violation>::new());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let mut doc = fixture();
        doc["appendix"] = json!("bonus");
        doc["readiness"]["confidence"] = json!(0.9);
        assert!(validate(&doc).is_empty());
    }

    #[test]
    fn wrong_initiative_count() {
        let mut doc = fixture();
        doc["recommendedInitiatives"].as_array_mut().unwrap().pop();
        let v = validate(&doc);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].path, "recommendedInitiatives");
        assert!(v[0].message.contains("exactly 3"));
    }

    #[test]
    fn nested_enum_violation_has_indexed_path() {
        let mut doc = fixture();
        doc["recommendedInitiatives"][1]["effortLevel"] = json!("Huge");
        let v = validate(&doc);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].path, "recommendedInitiatives[1].effortLevel");
    }

    #[test]
    fn score_out_of_range() {
        let mut doc = fixture();
        doc["readiness"]["overallScore"] = json!(0);
        doc["readiness"]["scoreBreakdown"]["data"] = json!(101);
        let paths: Vec<_> = validate(&doc).into_iter().map(|v| v.path).collect();
        assert_eq!(paths, ["readiness.overallScore", "readiness.scoreBreakdown.data"]);
    }

    #[test]
    fn fractional_score_is_rejected() {
        let mut doc = fixture();
        doc["readiness"]["overallScore"] = json!(42.5);
        assert_eq!(validate(&doc)[0].path, "readiness.overallScore");
    }

    #[test]
    fn missing_and_null_fields() {
        let mut doc = fixture();
        doc.as_object_mut().unwrap().remove("conclusion");
        doc["riskAnalysis"]["marketRisks"] = Value::Null;
        let v = validate(&doc);
        assert!(v.iter().any(|x| x.path == "conclusion"));
        assert!(v.iter().any(|x| x.path == "riskAnalysis.marketRisks"));
    }

    #[test]
    fn swot_bounds() {
        let mut doc = fixture();
        doc["swotAnalysis"]["threats"] = json!(["only one"]);
        doc["swotAnalysis"]["strengths"] = json!(["a", "b", "c", 4]);
        let v = validate(&doc);
        assert!(v.iter().any(|x| x.path == "swotAnalysis.threats"));
        assert!(v.iter().any(|x| x.path == "swotAnalysis.strengths[3]"));
    }

    #[test]
    fn non_object_document() {
        let v = validate(&json!([1, 2, 3]));
        assert_eq!(v[0].path, "$");
    }

    #[test]
    fn gemini_schema_mirrors_contract() {
        let schema = to_gemini_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["required"].as_array().unwrap().len(), 7);

        let readiness = &schema["properties"]["readiness"];
        assert_eq!(readiness["properties"]["overallScore"]["type"], "INTEGER");
        assert_eq!(readiness["properties"]["maturityLevel"]["enum"][3], "Leading");

        let initiatives = &schema["properties"]["recommendedInitiatives"];
        assert_eq!(initiatives["minItems"], 3);
        assert_eq!(initiatives["items"]["required"].as_array().unwrap().len(), 11);

        let roadmap = &schema["properties"]["implementationRoadmap"];
        assert!(roadmap["properties"]["phase3_initiatives"].is_object());
    }
}
