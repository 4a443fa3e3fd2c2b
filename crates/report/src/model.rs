//! Typed strategic report.
//!
//! Field names follow the JSON the model returns (camelCase, with the flat
//! `phaseN_*` roadmap keys), so a report re-serializes to the same shape.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicReport {
    pub executive_summary: String,
    pub readiness: ReadinessAssessment,
    pub swot_analysis: SwotAnalysis,
    pub recommended_initiatives: Vec<RecommendedInitiative>,
    pub implementation_roadmap: ImplementationRoadmap,
    pub risk_analysis: RiskAnalysis,
    pub conclusion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessAssessment {
    pub overall_score: u8,
    pub score_breakdown: ScoreBreakdown,
    pub maturity_level: MaturityLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub strategy: u8,
    pub data: u8,
    pub team: u8,
    pub process: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaturityLevel {
    Nascent,
    Developing,
    Maturing,
    Leading,
}

impl MaturityLevel {
    pub const ALL: [MaturityLevel; 4] = [
        MaturityLevel::Nascent,
        MaturityLevel::Developing,
        MaturityLevel::Maturing,
        MaturityLevel::Leading,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MaturityLevel::Nascent => "Nascent",
            MaturityLevel::Developing => "Developing",
            MaturityLevel::Maturing => "Maturing",
            MaturityLevel::Leading => "Leading",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwotAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

impl SwotAnalysis {
    /// Every SWOT entry, in quadrant order.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.strengths
            .iter()
            .chain(&self.weaknesses)
            .chain(&self.opportunities)
            .chain(&self.threats)
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedInitiative {
    pub initiative_name: String,
    pub initiative_type: InitiativeType,
    pub description: String,
    pub potential_impact: Level,
    pub effort_level: Level,
    pub first_steps: String,
    pub justification: String,
    pub linked_swot_items: Vec<String>,
    pub kpis_to_track: Vec<String>,
    pub required_resources: String,
    pub timeline_estimate: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitiativeType {
    #[serde(rename = "Quick Win")]
    QuickWin,
    Foundational,
    Transformational,
}

impl InitiativeType {
    pub const ALL: [InitiativeType; 3] = [
        InitiativeType::QuickWin,
        InitiativeType::Foundational,
        InitiativeType::Transformational,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InitiativeType::QuickWin => "Quick Win",
            InitiativeType::Foundational => "Foundational",
            InitiativeType::Transformational => "Transformational",
        }
    }
}

/// Impact or effort rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::High, Level::Medium, Level::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::High => "High",
            Level::Medium => "Medium",
            Level::Low => "Low",
        }
    }
}

macro_rules! display_via_as_str {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

display_via_as_str!(MaturityLevel, InitiativeType, Level);

/// Three-phase roadmap in its wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementationRoadmap {
    pub phase1_title: String,
    pub phase1_initiatives: Vec<String>,
    pub phase1_duration: String,
    pub phase2_title: String,
    pub phase2_initiatives: Vec<String>,
    pub phase2_duration: String,
    pub phase3_title: String,
    pub phase3_initiatives: Vec<String>,
    pub phase3_duration: String,
}

/// Borrowed view of one roadmap phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadmapPhase<'a> {
    pub number: u8,
    pub title: &'a str,
    pub duration: &'a str,
    pub initiatives: &'a [String],
}

impl ImplementationRoadmap {
    pub fn phases(&self) -> [RoadmapPhase<'_>; 3] {
        [
            RoadmapPhase {
                number: 1,
                title: &self.phase1_title,
                duration: &self.phase1_duration,
                initiatives: &self.phase1_initiatives,
            },
            RoadmapPhase {
                number: 2,
                title: &self.phase2_title,
                duration: &self.phase2_duration,
                initiatives: &self.phase2_initiatives,
            },
            RoadmapPhase {
                number: 3,
                title: &self.phase3_title,
                duration: &self.phase3_duration,
                initiatives: &self.phase3_initiatives,
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysis {
    pub technical_risks: String,
    pub operational_risks: String,
    pub market_risks: String,
}

/// A `linkedSwotItems` entry with no verbatim SWOT match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingLink<'a> {
    pub initiative: &'a str,
    pub item: &'a str,
}

impl StrategicReport {
    /// Linked SWOT items that do not equal any SWOT entry exactly.
    pub fn dangling_swot_links(&self) -> Vec<DanglingLink<'_>> {
        let known: Vec<&str> = self.swot_analysis.items().collect();
        let mut dangling = Vec::new();
        for init in &self.recommended_initiatives {
            for item in &init.linked_swot_items {
                if !known.contains(&item.as_str()) {
                    dangling.push(DanglingLink {
                        initiative: init.initiative_name.as_str(),
                        item: item.as_str(),
                    });
                }
            }
        }
        dangling
    }

    /// The report as the model saw it: pretty-printed JSON.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
