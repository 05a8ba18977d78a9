//! Interactive double-confirmation gate
//!
//! Cleanup is irreversible, so it sits behind two sequential yes/no prompts.
//! There is intentionally no flag to answer them automatically. The gate is
//! generic over its input and output streams so tests can script it.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

/// Two-round confirmation prompt guarding the cleanup step.
pub struct ConfirmationGate<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConfirmationGate<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run both confirmation rounds.
    ///
    /// Returns `Ok(true)` only if the user answers `y` twice. An answer
    /// other than `y` or `n` re-asks the same round. `n` at either round
    /// returns `Ok(false)` before any filesystem mutation has happened.
    pub fn confirm_cleanup(&mut self) -> Result<bool> {
        if !self.ask("PROCEED WITH CLEAN UP OF THESE CASES? (y/n): ")? {
            return Ok(false);
        }

        writeln!(self.output, "\nNOTE: This process is not reversible! Make sure this is what you want to do!")?;

        self.ask("\nCONFIRM AGAIN, PROCEED WITH CLEAN UP OF THESE CASES? (y/n): ")
    }

    fn ask(&mut self, prompt: &str) -> Result<bool> {
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read confirmation input")?;
            if read == 0 {
                // EOF counts as declining
                return Ok(false);
            }

            match line.trim().to_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => writeln!(self.output, "Please enter either y or n!")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn gate(input: &str) -> (bool, String) {
        let mut output = Vec::new();
        let confirmed = ConfirmationGate::new(Cursor::new(input.to_string()), &mut output)
            .confirm_cleanup()
            .unwrap();
        (confirmed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_double_yes_confirms() {
        let (confirmed, _) = gate("y\ny\n");
        assert!(confirmed);
    }

    #[test]
    fn test_no_at_round_one_declines() {
        let (confirmed, output) = gate("n\n");
        assert!(!confirmed);
        // round 2 was never reached
        assert!(!output.contains("CONFIRM AGAIN"));
    }

    #[test]
    fn test_no_at_round_two_declines() {
        let (confirmed, output) = gate("y\nn\n");
        assert!(!confirmed);
        assert!(output.contains("CONFIRM AGAIN"));
    }

    #[test]
    fn test_invalid_answer_reasks_same_round() {
        let (confirmed, output) = gate("maybe\ny\ny\n");
        assert!(confirmed);
        assert!(output.contains("Please enter either y or n!"));
    }

    #[test]
    fn test_case_insensitive_answers() {
        let (confirmed, _) = gate("Y\nY\n");
        assert!(confirmed);
    }

    #[test]
    fn test_eof_declines() {
        let (confirmed, _) = gate("");
        assert!(!confirmed);
    }
}
