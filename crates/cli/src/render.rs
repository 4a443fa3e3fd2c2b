//! Plain-text rendering for the terminal.

use std::fmt::Write;

use sg_report::StrategicReport;
use sg_survey::prompt::NO_ANSWER;
use sg_survey::{Catalog, ResponseMap};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Every question with its current answer, grouped by section.
pub fn review(catalog: &Catalog, responses: &ResponseMap) -> String {
    let mut out = String::new();
    for section in catalog.sections() {
        let done = section.answered(responses);
        let mark = if section.is_complete(responses) { "✓" } else { " " };
        let _ = writeln!(
            out,
            "[{mark}] {} ({done}/{})",
            section.title,
            section.questions.len()
        );
        for q in section.questions {
            let _ = writeln!(out, "    {} ({})", q.text, q.id);
            let _ = writeln!(out, "      {}", responses.answer(q.id).unwrap_or(NO_ANSWER));
        }
        out.push('\n');
    }
    let progress = catalog.progress(responses);
    let _ = writeln!(out, "{}/{} questions answered.", progress.answered, progress.total);
    out
}

/// The report as readable text.
pub fn report(report: &StrategicReport) -> String {
    let mut out = String::new();
    let r = &report.readiness;
    let b = &r.score_breakdown;

    heading(&mut out, "Strategic AI Roadmap");
    let _ = writeln!(out, "{}\n", report.executive_summary);

    heading(&mut out, "AI Readiness");
    let _ = writeln!(out, "Overall score: {}/100 ({})", r.overall_score, r.maturity_level);
    let _ = writeln!(
        out,
        "  Strategy {:>3}   Data {:>3}   Team {:>3}   Process {:>3}\n",
        b.strategy, b.data, b.team, b.process
    );

    heading(&mut out, "SWOT Analysis");
    let swot = &report.swot_analysis;
    for (title, items) in [
        ("Strengths", &swot.strengths),
        ("Weaknesses", &swot.weaknesses),
        ("Opportunities", &swot.opportunities),
        ("Threats", &swot.threats),
    ] {
        let _ = writeln!(out, "{title}:");
        bullets(&mut out, items);
    }
    out.push('\n');

    heading(&mut out, "Recommended Initiatives");
    for (i, init) in report.recommended_initiatives.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} [{}] impact {}, effort {}",
            i + 1,
            init.initiative_name,
            init.initiative_type,
            init.potential_impact,
            init.effort_level
        );
        let _ = writeln!(out, "   {}", init.description);
        let _ = writeln!(out, "   Why: {}", init.justification);
        let _ = writeln!(out, "   First steps: {}", init.first_steps);
        let _ = writeln!(out, "   Resources: {}", init.required_resources);
        let _ = writeln!(out, "   Timeline: {}", init.timeline_estimate);
        if !init.linked_swot_items.is_empty() {
            let _ = writeln!(out, "   Addresses:");
            bullets(&mut out, &init.linked_swot_items);
        }
        let _ = writeln!(out, "   KPIs:");
        bullets(&mut out, &init.kpis_to_track);
        out.push('\n');
    }

    heading(&mut out, "Implementation Roadmap");
    for phase in report.implementation_roadmap.phases() {
        let _ = writeln!(out, "{} ({})", phase.title, phase.duration);
        bullets(&mut out, phase.initiatives);
    }
    out.push('\n');

    heading(&mut out, "Risk Analysis");
    let risks = &report.risk_analysis;
    let _ = writeln!(out, "Technical: {}", risks.technical_risks);
    let _ = writeln!(out, "Operational: {}", risks.operational_risks);
    let _ = writeln!(out, "Market: {}\n", risks.market_risks);

    heading(&mut out, "Conclusion");
    let _ = writeln!(out, "{}", report.conclusion);
    out
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}\n{RULE}");
}

fn bullets(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "   - {item}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use sg_report::model::{
        ImplementationRoadmap, InitiativeType, Level, MaturityLevel, ReadinessAssessment,
        RecommendedInitiative, RiskAnalysis, ScoreBreakdown, SwotAnalysis,
    };

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn initiative(name: &str, kind: InitiativeType, effort: Level) -> RecommendedInitiative {
        RecommendedInitiative {
            initiative_name: name.into(),
            initiative_type: kind,
            description: format!("{name} description"),
            potential_impact: Level::High,
            effort_level: effort,
            first_steps: "Pick an owner".into(),
            justification: "Ties to the churn goal".into(),
            linked_swot_items: strings(&["Siloed customer data"]),
            kpis_to_track: strings(&["Monthly churn"]),
            required_resources: "One data scientist".into(),
            timeline_estimate: "3 months".into(),
        }
    }

    fn sample_report() -> StrategicReport {
        StrategicReport {
            executive_summary: "You are ready to start small.".into(),
            readiness: ReadinessAssessment {
                overall_score: 42,
                score_breakdown: ScoreBreakdown {
                    strategy: 55,
                    data: 30,
                    team: 40,
                    process: 45,
                },
                maturity_level: MaturityLevel::Developing,
            },
            swot_analysis: SwotAnalysis {
                strengths: strings(&["Clear churn goal"]),
                weaknesses: strings(&["Siloed customer data"]),
                opportunities: strings(&["Personalized offers"]),
                threats: strings(&["Faster competitors"]),
            },
            recommended_initiatives: vec![
                initiative("Churn Early-Warning Model", InitiativeType::QuickWin, Level::Low),
                initiative("Unified Customer Data Platform", InitiativeType::Foundational, Level::Medium),
                initiative("Personalization Engine", InitiativeType::Transformational, Level::High),
            ],
            implementation_roadmap: ImplementationRoadmap {
                phase1_title: "Phase 1: Foundation & Quick Wins".into(),
                phase1_initiatives: strings(&["Churn Early-Warning Model"]),
                phase1_duration: "Months 0-6".into(),
                phase2_title: "Phase 2: Scaling".into(),
                phase2_initiatives: strings(&["Unified Customer Data Platform"]),
                phase2_duration: "Months 6-12".into(),
                phase3_title: "Phase 3: Transformation".into(),
                phase3_initiatives: strings(&["Personalization Engine"]),
                phase3_duration: "Months 12+".into(),
            },
            risk_analysis: RiskAnalysis {
                technical_risks: "Low identity match rates.".into(),
                operational_risks: "Scores ignored without playbooks.".into(),
                market_risks: "Competitors move first.".into(),
            },
            conclusion: "Start with the churn pilot.".into(),
        }
    }

    #[test]
    fn review_marks_sentinel_and_completion() {
        let catalog = Catalog::standard();
        let mut responses = ResponseMap::new();
        responses.set("q_goals", "Reduce churn");
        responses.set("q_kpis", "NPS");
        responses.set("q_challenges", "Legacy stack");
        responses.set("q_unknown", "ignored");

        let text = review(&catalog, &responses);
        assert!(text.contains("[✓] "));
        assert!(text.contains("Reduce churn"));
        assert!(!text.contains("ignored"));
        assert_eq!(text.matches(NO_ANSWER).count(), 12);
        assert!(text.ends_with("3/15 questions answered.\n"));
    }

    #[test]
    fn report_lists_every_section() {
        let text = report(&sample_report());
        assert!(text.contains("Overall score: 42/100 (Developing)"));
        assert!(text.contains("[Quick Win]"));
        assert!(text.contains("Churn Early-Warning Model"));
        assert!(text.contains("Phase 1: Foundation & Quick Wins (Months 0-6)"));
        assert!(text.contains("(Months 12+)"));
        for title in ["SWOT Analysis", "Risk Analysis", "Conclusion"] {
            assert!(text.contains(title), "missing {title}");
        }
    }
}
