//! Terminal prompts shared by the interactive commands.

use std::io::{BufRead, Write};

/// Read a password without echo.
pub fn password(prompt: &str) -> anyhow::Result<String> {
    Ok(rpassword::prompt_password_stderr(prompt)?)
}

/// Ask a yes/no question on stderr. Anything but `y`/`yes` is a no.
pub fn confirm(question: &str) -> anyhow::Result<bool> {
    eprint!("{question} [y/N] ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(is_yes(&line))
}

pub(crate) fn is_yes(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
