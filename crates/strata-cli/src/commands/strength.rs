use strata_auth::score;
use tracing::debug;

use crate::cli::{OutputFormat, StrengthArgs};
use crate::client::CliResult;
use crate::commands::read_secret;
use crate::output::format_strength;

pub(crate) fn handle_strength(args: StrengthArgs, format: OutputFormat) -> CliResult<()> {
    let password = read_secret(args.password, args.password_stdin, "Password to score: ")?;
    let result = score(&password);
    debug!(tier = result.tier, "scored candidate password");
    println!("{}", format_strength(&result, format)?);
    Ok(())
}
