use std::rc::Rc;

use strata_auth::{
    AuthSessionController, BootstrapOutcome, Credentials, ModalRegistry, SessionStore,
};
use tracing::{info, warn};

use crate::cli::{LoginArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult, HttpAuthApi};
use crate::commands::read_secret;
use crate::navigator::CliNavigator;
use crate::output::{SessionReport, format_session, format_whoami};

type Controller = AuthSessionController<HttpAuthApi, CliNavigator>;

fn controller(ctx: &AppContext) -> Controller {
    let session = Rc::new(SessionStore::new(ctx.state.clone()));
    AuthSessionController::new(
        HttpAuthApi::new(ctx),
        CliNavigator::new(ctx.base_url.clone()),
        session,
        Rc::new(ModalRegistry::new()),
    )
}

fn redirect_location(controller: &Controller) -> Option<String> {
    controller
        .navigator()
        .redirect_target()
        .map(String::from)
}

pub(crate) async fn handle_status(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let controller = controller(ctx);
    let outcome = controller.bootstrap().await?;
    let report = SessionReport::from_outcome(&outcome, redirect_location(&controller));
    println!("{}", format_session(&report, format)?);
    Ok(())
}

pub(crate) async fn handle_login(
    ctx: &AppContext,
    args: LoginArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let controller = controller(ctx);
    match controller.bootstrap().await? {
        BootstrapOutcome::ShowLoginForm => {}
        BootstrapOutcome::Authenticated(identity) => {
            if args
                .username
                .as_deref()
                .is_some_and(|requested| requested != identity.username)
            {
                return Err(CliError::validation(format!(
                    "already signed in as {}; run `strata logout` first",
                    identity.username
                )));
            }
            println!(
                "{}",
                format_session(&SessionReport::authenticated(&identity), format)?
            );
            return Ok(());
        }
        BootstrapOutcome::ExternalRedirect(url) => {
            let location = redirect_location(&controller).unwrap_or(url);
            return Err(CliError::validation(format!(
                "this cluster signs in through an external identity provider; continue at {location}"
            )));
        }
        BootstrapOutcome::AlreadyAuthenticated => {
            return Err(CliError::validation("already signed in"));
        }
    }

    let username = args
        .username
        .or_else(|| controller.session().last_known_username())
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| {
            CliError::validation("username is required (pass --username or set STRATA_USERNAME)")
        })?;
    let password = read_secret(
        args.password,
        args.password_stdin,
        &format!("Password for {username}: "),
    )?;

    let credentials = Credentials::new(username, password).stay_signed_in(args.stay_signed_in);
    let identity = controller.login(&credentials).await?;
    ctx.persist_cookies()?;
    info!(username = %identity.username, "signed in");

    println!(
        "{}",
        format_session(&SessionReport::authenticated(&identity), format)?
    );
    Ok(())
}

pub(crate) async fn handle_logout(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let controller = controller(ctx);
    let redirect_url = controller.logout_with(|| {
        if let Err(err) = ctx.forget_cookies() {
            warn!(error = %err.display_message(), "failed to drop saved session cookie");
        }
    })
    .await?;
    let location = redirect_location(&controller)
        .or_else(|| ctx.resolve(&redirect_url).ok().map(String::from));
    println!(
        "{}",
        format_session(&SessionReport::signed_out(location), format)?
    );
    Ok(())
}

pub(crate) fn handle_whoami(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let session = SessionStore::new(ctx.state.clone());
    let username = session.last_known_username();
    println!("{}", format_whoami(username.as_deref(), format)?);
    Ok(())
}
