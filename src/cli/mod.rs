//! The `scholaris` command: a terminal front end over the client core.

mod output;

pub use output::print_toasts;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use dialoguer::{Input, Password};
use scholaris_core::ListParams;
use scholaris_models::{AcademyId, MembershipId, Role};

use crate::AppState;
use crate::guard::{RouteGuard, required_role_for};
use crate::hooks::{Classes, CollectionHook, ResourceHook};
use crate::membership::MembershipWorkflow;
use crate::session::SessionState;

#[derive(Parser)]
#[command(name = "scholaris")]
#[command(about = "Scholaris - dashboard client for academies, classes and resources", long_about = None)]
pub struct Cli {
    /// Scope academy-bound commands to this approved academy
    #[arg(long, global = true)]
    pub academy: Option<AcademyId>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and remember the session
    Login {
        /// Email address (prompted if not provided)
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Page to continue to after signing in
        #[arg(long)]
        return_to: Option<String>,
    },
    /// Sign out and forget the stored credential
    Logout,
    /// Show the signed-in user and their memberships
    Whoami,
    /// Decide what happens when navigating to a path
    Route {
        path: String,

        /// Role the page requires (inferred from the path when omitted)
        #[arg(long)]
        require: Option<Role>,
    },
    /// Search the academy directory
    Directory(PageArgs),
    /// List your academy memberships
    Memberships,
    /// Ask to join an academy
    Join { academy: AcademyId },
    /// Cancel a pending request or leave an academy
    Withdraw { membership: MembershipId },
    /// List classes in scope
    Classes(PageArgs),
    /// List resources you can see
    Resources(PageArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Free-text search
    #[arg(short = 's', long)]
    pub search: Option<String>,

    #[arg(long, default_value = "1")]
    pub page: u32,

    #[arg(long, default_value = "10")]
    pub limit: u32,
}

impl From<PageArgs> for ListParams {
    fn from(args: PageArgs) -> Self {
        let params = ListParams::new().page(args.page).limit(args.limit);
        match args.search {
            Some(search) => params.search(search),
            None => params,
        }
    }
}

pub async fn run(cli: Cli, state: &AppState) -> Result<()> {
    match cli.command {
        Commands::Login {
            email,
            password,
            return_to,
        } => login(state, email, password, return_to).await,
        command => {
            state.boot().await;
            if let Some(academy) = cli.academy {
                state
                    .active_academy
                    .select(academy, &state.session.snapshot().memberships)
                    .context("cannot switch academy")?;
            }
            execute(command, state).await
        }
    }
}

async fn execute(command: Commands, state: &AppState) -> Result<()> {
    match command {
        Commands::Login { .. } => bail!("already handled"),
        Commands::Logout => {
            state.session.sign_out();
            println!("Signed out");
        }
        Commands::Whoami => output::print_session(&state.session.snapshot(), state.active_academy.get()),
        Commands::Route { path, require } => {
            let required = require.or_else(|| required_role_for(&path));
            let decision = RouteGuard::navigate(&state.session.snapshot(), required, &path);
            output::print_decision(&path, &decision);
        }
        Commands::Directory(args) => {
            let result = state.memberships.fetch_directory(args.into()).await;
            output::print_directory(&result);
        }
        Commands::Memberships => {
            require_signed_in(state)?;
            let memberships = state.memberships.list_memberships().await?;
            output::print_memberships(&memberships, state.memberships.active_academy());
        }
        Commands::Join { academy } => {
            require_signed_in(state)?;
            state
                .memberships
                .request_membership(academy)
                .await
                .into_result()?;
        }
        Commands::Withdraw { membership } => {
            require_signed_in(state)?;
            state
                .memberships
                .withdraw_membership(membership)
                .await
                .into_result()?;
        }
        Commands::Classes(args) => {
            require_signed_in(state)?;
            let hook = CollectionHook::<Classes>::with_filters(state.hook_context(), args.into());
            hook.load().await;
            output::print_classes(&hook.state());
        }
        Commands::Resources(args) => {
            require_signed_in(state)?;
            let hook = ResourceHook::with_filters(state.hook_context(), args.into());
            hook.load().await;
            output::print_resources(&hook.state());
        }
    }

    Ok(())
}

async fn login(
    state: &AppState,
    email: Option<String>,
    password: Option<String>,
    return_to: Option<String>,
) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let session_state = state.session.sign_in(&email, &password).await?;
    let session = state.session.snapshot();
    state.active_academy.revalidate(&session.memberships);

    match session_state {
        SessionState::PendingApproval => {
            println!("Signed in. Your account is awaiting approval.");
        }
        _ => {
            let target = RouteGuard::post_login_target(return_to.as_deref(), session.role);
            println!("Signed in as {}. Continue at {target}", output::user_line(&session));
        }
    }
    Ok(())
}

fn require_signed_in(state: &AppState) -> Result<()> {
    match state.session.state() {
        SessionState::Unauthenticated | SessionState::Loading => {
            bail!("not signed in; run `scholaris login` first")
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_route_with_role() {
        let cli = Cli::try_parse_from(["scholaris", "route", "/academy/classes", "--require", "teacher"])
            .unwrap();
        match cli.command {
            Commands::Route { path, require } => {
                assert_eq!(path, "/academy/classes");
                assert_eq!(require, Some(Role::Teacher));
            }
            _ => panic!("expected route command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_academy_id() {
        assert!(Cli::try_parse_from(["scholaris", "join", "not-a-uuid"]).is_err());
    }

    #[test]
    fn test_page_args_into_params() {
        let cli = Cli::try_parse_from(["scholaris", "directory", "--search", "north", "--limit", "5"])
            .unwrap();
        let Commands::Directory(args) = cli.command else {
            panic!("expected directory command");
        };
        let params: ListParams = args.into();
        assert_eq!(params.search.as_deref(), Some("north"));
        assert_eq!(params.effective_limit(), 5);
        assert_eq!(params.effective_page(), 1);
    }
}
