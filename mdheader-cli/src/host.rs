//! The host the command runs inside: where confirmations come from and
//! where messages go.

use std::io::{self, BufRead, Write};

/// User-facing side of the command.
pub trait EditorHost {
    /// Offer to rename `current` to `suggested`; `true` means go ahead.
    ///
    /// # Errors
    /// Returns an error if the user cannot be asked.
    fn confirm_rename(&mut self, current: &str, suggested: &str) -> io::Result<bool>;

    /// Report progress or success.
    fn info(&mut self, message: &str);

    /// Report a failure.
    fn error(&mut self, message: &str);
}

/// Button labels offered for the rename prompt.
pub const CONFIRM_RENAME: &str = "Confirm Rename";
/// Declines the rename.
pub const IGNORE: &str = "Ignore";

/// Line-oriented host on a reader and a writer.
pub struct TerminalHost<R, W> {
    input: R,
    output: W,
}

impl TerminalHost<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stdin, report on stderr (stdout stays free for `--dry-run` output).
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalHost<R, W> {
    /// Wrap an input and an output stream.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output stream.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> EditorHost for TerminalHost<R, W> {
    fn confirm_rename(&mut self, current: &str, suggested: &str) -> io::Result<bool> {
        writeln!(
            self.output,
            "\"{current}\" does not follow the yyyy-MM-dd-title.md convention."
        )?;
        write!(
            self.output,
            "It is recommended to rename the file to \"{suggested}\" format for proper blog display. \
             [{CONFIRM_RENAME} (y) / {IGNORE} (N)]: "
        )?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(false);
        }
        Ok(is_confirmation(&answer))
    }

    fn info(&mut self, message: &str) {
        // Reporting never fails the command.
        let _ = writeln!(self.output, "{message}");
    }

    fn error(&mut self, message: &str) {
        let _ = writeln!(self.output, "error: {message}");
    }
}

fn is_confirmation(answer: &str) -> bool {
    let answer = answer.trim();
    ["y", "yes", "confirm", "confirm rename"]
        .iter()
        .any(|accepted| answer.eq_ignore_ascii_case(accepted))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(input: &str) -> TerminalHost<&[u8], Vec<u8>> {
        TerminalHost::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn yes_confirms() {
        for answer in ["y\n", "YES\n", "Confirm Rename\n", "  confirm \n"] {
            let mut h = host(answer);
            assert!(h.confirm_rename("a.md", "2024-01-01-a.md").expect("io"), "{answer:?}");
        }
    }

    #[test]
    fn anything_else_declines() {
        for answer in ["\n", "n\n", "Ignore\n", "maybe\n", ""] {
            let mut h = host(answer);
            assert!(!h.confirm_rename("a.md", "2024-01-01-a.md").expect("io"), "{answer:?}");
        }
    }

    #[test]
    fn prompt_names_the_suggestion() {
        let mut h = host("n\n");
        h.confirm_rename("a.md", "2024-01-01-a.md").expect("io");
        let out = String::from_utf8(h.into_output()).expect("utf8");
        assert!(out.contains("\"a.md\""));
        assert!(out.contains("rename the file to \"2024-01-01-a.md\""));
        assert!(out.contains(CONFIRM_RENAME));
    }

    #[test]
    fn messages_are_written() {
        let mut h = host("");
        h.info("File renamed successfully!");
        h.error("boom");
        let out = String::from_utf8(h.into_output()).expect("utf8");
        assert_eq!(out, "File renamed successfully!\nerror: boom\n");
    }
}
