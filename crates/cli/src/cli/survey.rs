//! `strategos survey`: walk the questionnaire one question at a time.
//!
//! Each accepted line is saved immediately, so quitting at any point
//! loses nothing.

use sg_survey::{Catalog, Question, Section, Vault};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Input parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Empty line: keep the current answer and move on.
    Keep,
    /// `-`: clear the current answer.
    Clear,
    Answer(String),
    /// `/skip`: jump to the next section.
    Skip,
    /// `/back`: return to the previous question.
    Back,
    /// `/quit`: stop walking.
    Quit,
    Help,
}

pub fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    match trimmed {
        "" => Input::Keep,
        "-" => Input::Clear,
        "/skip" => Input::Skip,
        "/back" => Input::Back,
        "/quit" | "/exit" => Input::Quit,
        s if s.starts_with('/') => Input::Help,
        s => Input::Answer(s.to_string()),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Cursor
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub section: &'static Section,
    pub question: &'static Question,
    /// 1-based position within the section.
    pub number: usize,
}

/// Position in a flattened list of questions.
pub struct Walk {
    steps: Vec<Step>,
    pos: usize,
}

impl Walk {
    /// Walk every section, or only `section` if given. `None` when the
    /// section id is unknown.
    pub fn new(catalog: &Catalog, section: Option<&str>) -> Option<Self> {
        let sections: Vec<&'static Section> = match section {
            Some(id) => vec![catalog.find_section(id)?],
            None => catalog.sections().iter().collect(),
        };
        let steps = sections
            .into_iter()
            .flat_map(|section| {
                section
                    .questions
                    .iter()
                    .enumerate()
                    .map(move |(i, question)| Step {
                        section,
                        question,
                        number: i + 1,
                    })
            })
            .collect();
        Some(Self { steps, pos: 0 })
    }

    pub fn current(&self) -> Option<Step> {
        self.steps.get(self.pos).copied()
    }

    pub fn advance(&mut self) {
        self.pos = (self.pos + 1).min(self.steps.len());
    }

    pub fn back(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// Move to the first question of the next section.
    pub fn skip_section(&mut self) {
        let Some(current) = self.current() else {
            return;
        };
        while let Some(step) = self.current() {
            if step.section.id != current.section.id {
                break;
            }
            self.advance();
        }
    }

    pub fn is_done(&self) -> bool {
        self.pos >= self.steps.len()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Entry point
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const HELP: &str = "Type your answer and press Enter. Empty line keeps the current answer, \
`-` clears it. Commands: /back, /skip (next section), /quit.";

pub fn run(vault: &mut Vault, catalog: &Catalog, section: Option<&str>) -> anyhow::Result<()> {
    let Some(mut walk) = Walk::new(catalog, section) else {
        let known: Vec<&str> = catalog.sections().iter().map(|s| s.id).collect();
        anyhow::bail!(
            "unknown section '{}' (expected one of: {})",
            section.unwrap_or_default(),
            known.join(", ")
        );
    };

    let mut rl = rustyline::DefaultEditor::new()?;
    eprintln!("{HELP}");

    let mut last_section = "";
    while let Some(step) = walk.current() {
        if step.section.id != last_section {
            last_section = step.section.id;
            let done = step.section.answered(vault.responses()?);
            println!();
            println!(
                "━━ {} ({done}/{} answered)",
                step.section.title,
                step.section.questions.len()
            );
        }

        println!();
        println!(
            "[{}/{}] {}",
            step.number,
            step.section.questions.len(),
            step.question.text
        );
        match vault.responses()?.answer(step.question.id) {
            Some(current) => println!("  current: {current}"),
            None => println!("  e.g. {}", step.question.placeholder),
        }

        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        match parse_input(&line) {
            Input::Keep => walk.advance(),
            Input::Clear => {
                vault.clear_answer(step.question.id)?;
                walk.advance();
            }
            Input::Answer(text) => {
                vault.set_answer(step.question.id, &text)?;
                walk.advance();
            }
            Input::Skip => walk.skip_section(),
            Input::Back => {
                walk.back();
                // Re-print the section header when crossing back.
                last_section = "";
            }
            Input::Quit => break,
            Input::Help => eprintln!("{HELP}"),
        }
    }

    let progress = catalog.progress(vault.responses()?);
    println!();
    if walk.is_done() && progress.unanswered() == 0 {
        println!("All {} questions answered. Run `strategos report` next.", progress.total);
    } else {
        println!(
            "Progress saved: {}/{} answered.",
            progress.answered, progress.total
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_answers() {
        assert_eq!(parse_input("   "), Input::Keep);
        assert_eq!(parse_input("-"), Input::Clear);
        assert_eq!(parse_input("/back"), Input::Back);
        assert_eq!(parse_input("/skip"), Input::Skip);
        assert_eq!(parse_input("/quit"), Input::Quit);
        assert_eq!(parse_input("/what"), Input::Help);
        assert_eq!(
            parse_input("  Reduce churn  "),
            Input::Answer("Reduce churn".into())
        );
        // A leading dash inside text is still an answer.
        assert_eq!(parse_input("- none yet"), Input::Answer("- none yet".into()));
    }

    #[test]
    fn walk_covers_every_question_in_order() {
        let catalog = Catalog::standard();
        let mut walk = Walk::new(&catalog, None).unwrap();
        let mut ids = Vec::new();
        while let Some(step) = walk.current() {
            ids.push(step.question.id);
            walk.advance();
        }
        let expected: Vec<&str> = catalog.question_ids().collect();
        assert_eq!(ids, expected);
        assert!(walk.is_done());
    }

    #[test]
    fn walk_single_section() {
        let catalog = Catalog::standard();
        let walk = Walk::new(&catalog, Some("data")).unwrap();
        let step = walk.current().unwrap();
        assert_eq!(step.section.id, "data");
        assert_eq!(step.number, 1);
        assert!(Walk::new(&catalog, Some("nope")).is_none());
    }

    #[test]
    fn skip_and_back() {
        let catalog = Catalog::standard();
        let mut walk = Walk::new(&catalog, None).unwrap();
        walk.advance();
        walk.skip_section();
        let step = walk.current().unwrap();
        assert_eq!(step.section.id, "data");
        assert_eq!(step.number, 1);

        walk.back();
        assert_eq!(walk.current().unwrap().question.id, "q_challenges");

        // Back at the start stays put.
        let mut start = Walk::new(&catalog, None).unwrap();
        start.back();
        assert_eq!(start.current().unwrap().question.id, "q_goals");
    }

    #[test]
    fn skip_on_last_section_finishes() {
        let catalog = Catalog::standard();
        let mut walk = Walk::new(&catalog, Some("market")).unwrap();
        walk.skip_section();
        assert!(walk.is_done());
        walk.skip_section();
        assert!(walk.is_done());
    }
}
