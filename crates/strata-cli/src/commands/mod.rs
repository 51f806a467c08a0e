//! Command handlers grouped by concern.

pub(crate) mod session;
pub(crate) mod strength;

use std::io::{self, BufRead, IsTerminal};

use anyhow::anyhow;

use crate::client::{CliError, CliResult};

/// Obtain a secret from, in order: an explicit value, the first line of
/// stdin, or an interactive prompt.
pub(crate) fn read_secret(explicit: Option<String>, from_stdin: bool, prompt: &str) -> CliResult<String> {
    let secret = if let Some(value) = explicit {
        value
    } else if from_stdin {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|err| CliError::failure(anyhow!("failed to read stdin: {err}")))?;
        strip_line_ending(&line).to_string()
    } else if io::stdin().is_terminal() {
        rpassword::prompt_password(prompt)
            .map_err(|err| CliError::failure(anyhow!("failed to read password: {err}")))?
    } else {
        return Err(CliError::validation(
            "password required; pass --password-stdin or set STRATA_PASSWORD when running non-interactively",
        ));
    };

    if secret.is_empty() {
        return Err(CliError::validation("password cannot be empty"));
    }
    Ok(secret)
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map_or(line, |rest| rest.strip_suffix('\r').unwrap_or(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_secret_is_kept_verbatim() -> CliResult<()> {
        assert_eq!(read_secret(Some(" pad ded ".to_string()), true, "")?, " pad ded ");
        Ok(())
    }

    #[test]
    fn empty_secret_is_rejected() {
        let err = read_secret(Some(String::new()), false, "").expect_err("empty");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn line_endings_are_stripped_once() {
        assert_eq!(strip_line_ending("secret\r\n"), "secret");
        assert_eq!(strip_line_ending("secret\n"), "secret");
        assert_eq!(strip_line_ending("secret \n\n"), "secret \n");
        assert_eq!(strip_line_ending("secret"), "secret");
    }
}
