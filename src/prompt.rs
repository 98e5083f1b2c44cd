//! Interactive confirmation.

use std::io::{self, BufRead, IsTerminal, Write};

/// True when both stdin and stderr are attached to a terminal.
#[must_use]
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

/// Ask a yes/no question on stderr, reading the answer from stdin.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read or written.
pub fn confirm(message: &str) -> io::Result<bool> {
    confirm_with(message, &mut io::stdin().lock(), &mut io::stderr())
}

/// Like [`confirm`] with explicit streams. Only `y` or `yes` (any case)
/// counts as agreement.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn confirm_with<R: BufRead, W: Write>(
    message: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ask(answer: &str) -> (bool, String) {
        let mut input = answer.as_bytes();
        let mut output = Vec::new();
        let agreed = confirm_with("Really? (y/N) ", &mut input, &mut output).unwrap();
        (agreed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_yes_answers() {
        assert!(ask("y\n").0);
        assert!(ask("YES\n").0);
        assert!(ask("  y  \n").0);
    }

    #[test]
    fn test_everything_else_is_no() {
        assert!(!ask("\n").0);
        assert!(!ask("n\n").0);
        assert!(!ask("yep\n").0);
        assert!(!ask("").0);
    }

    #[test]
    fn test_prompt_is_written() {
        assert_eq!(ask("n\n").1, "Really? (y/N) ");
    }

    proptest! {
        #[test]
        fn prop_only_y_or_yes_agrees(answer in "[a-zA-Z ]{0,6}") {
            let expected = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");
            prop_assert_eq!(ask(&format!("{answer}\n")).0, expected);
        }
    }
}
