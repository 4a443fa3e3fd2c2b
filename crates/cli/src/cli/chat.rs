//! `strategos report`: generate the report, then open a follow-up chat.
//!
//! The chat is a readline loop that streams each reply to stdout as it
//! arrives. Slash-commands print help, re-show the report, or exit.

use std::io::Write;

use sg_report::chat::APOLOGY;
use sg_report::generate::USER_FACING_ERROR;
use sg_report::{ChatSession, ReportGenerator, StrategicReport};
use sg_survey::Catalog;

use crate::bootstrap::{self, Runtime};
use crate::render;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Public entry point
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Generate and print the report. Returns `Ok(false)` when generation
/// failed; the user only sees the generic message.
pub async fn report(rt: &mut Runtime, catalog: &Catalog, json: bool, no_chat: bool) -> anyhow::Result<bool> {
    bootstrap::unlock(&mut rt.vault)?;
    let responses = rt.vault.responses()?.clone();

    let progress = catalog.progress(&responses);
    if progress.unanswered() > 0 {
        eprintln!(
            "Note: {} of {} questions are unanswered.",
            progress.unanswered(),
            progress.total
        );
    }

    let generator =
        ReportGenerator::from_config(rt.provider.clone(), *catalog, &rt.config.llm.report);
    eprintln!("Generating your strategic report...");
    let report = match generator.generate_report(&responses).await {
        Ok(report) => report,
        Err(e) => {
            tracing::debug!(error = %e, "report generation failed");
            eprintln!("\x1B[31m{USER_FACING_ERROR}\x1B[0m");
            eprintln!("Run `strategos survey` to review your answers.");
            return Ok(false);
        }
    };

    print_report(&report, json)?;

    if !no_chat {
        let session = ChatSession::create(rt.provider.clone(), catalog, &responses, &report)?
            .with_config(&rt.config.llm.chat);
        chat(session, &report).await?;
    }
    Ok(true)
}

fn print_report(report: &StrategicReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", report.to_pretty_json()?);
    } else {
        print!("{}", render::report(report));
    }
    Ok(())
}

async fn chat(mut session: ChatSession, report: &StrategicReport) -> anyhow::Result<()> {
    let mut rl = rustyline::DefaultEditor::new()?;

    eprintln!();
    eprintln!("Ask a follow-up question  |  Type /help for commands, Ctrl+D to exit");
    for message in session.transcript() {
        println!("\n{}\n", message.content);
    }

    loop {
        let readline = rl.readline("you> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(&line).ok();

                // ── Slash commands ────────────────────────────────
                if trimmed.starts_with('/') {
                    match handle_slash_command(trimmed) {
                        Slash::Exit => break,
                        Slash::Report => print_report(report, false)?,
                        Slash::Help => print_help(),
                    }
                    continue;
                }

                // ── User message → streamed reply ─────────────────
                let mut stdout = std::io::stdout();
                let outcome = session
                    .send_message(trimmed, |chunk| {
                        print!("{chunk}");
                        stdout.flush().ok();
                    })
                    .await;
                println!();
                if let Err(e) = outcome {
                    tracing::debug!(session_id = session.id(), error = %e, "chat turn failed");
                    println!("{APOLOGY}");
                }
                println!();
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                eprintln!("(Use Ctrl+D or /exit to quit)");
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                break;
            }
            Err(e) => {
                eprintln!("\x1B[31mreadline error: {e}\x1B[0m");
                break;
            }
        }
    }

    eprintln!("Goodbye!");
    Ok(())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Slash command handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, PartialEq, Eq)]
enum Slash {
    Exit,
    Report,
    Help,
}

fn handle_slash_command(input: &str) -> Slash {
    let cmd = input.split_whitespace().next().unwrap_or(input);
    match cmd {
        "/exit" | "/quit" => Slash::Exit,
        "/report" => Slash::Report,
        _ => Slash::Help,
    }
}

fn print_help() {
    eprintln!("Commands:");
    eprintln!("  /report   Show the report again");
    eprintln!("  /exit     Leave the chat (also /quit, Ctrl+D)");
    eprintln!("  /help     Show this help");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_commands() {
        assert_eq!(handle_slash_command("/exit"), Slash::Exit);
        assert_eq!(handle_slash_command("/quit now"), Slash::Exit);
        assert_eq!(handle_slash_command("/report"), Slash::Report);
        assert_eq!(handle_slash_command("/help"), Slash::Help);
        assert_eq!(handle_slash_command("/model x"), Slash::Help);
    }
}
