//! CLI module for playshare.
//!
//! A thin shell over the library for poking at a backend from a terminal:
//!
//! ```ignore
//! use playshare::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! run_cli_command(command, &api).await?;
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use version::{handle_version_command, VERSION};

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::api::ApiClient;
use crate::models::Post;
use crate::pagination::PaginatedList;
use crate::session::SessionState;
use crate::traits::{HttpClient, SecureStore};

const USAGE: &str = "\
usage: playshare <command>

commands:
  whoami           show the signed-in user
  feed [category]  list recent posts
  saved            list saved posts
  search <query>   search users and posts
  signout          forget the stored session

environment:
  PLAYSHARE_API_URL, PLAYSHARE_TIMEOUT_SECS, PLAYSHARE_PAGE_SIZE,
  PLAYSHARE_STORE_PATH, PLAYSHARE_LOG";

/// Run one command against the backend.
pub async fn run_cli_command<H, S>(command: CliCommand, api: &ApiClient<H, S>) -> Result<()>
where
    H: HttpClient,
    S: SecureStore,
{
    match command {
        CliCommand::Version => {
            handle_version_command();
            Ok(())
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::SignOut => {
            api.sign_out().await;
            println!("Signed out.");
            Ok(())
        }
        CliCommand::WhoAmI => {
            let state = restore(api).await?;
            let profile = api.session().store().profile().await?;
            if let Some(session) = state.session() {
                println!("{} (id {})", session.username, session.user_id);
            }
            if let Some(name) = profile.name {
                println!("  name:      {}", name);
            }
            println!(
                "  followers: {}  following: {}",
                profile.follower_count, profile.following_count
            );
            if matches!(state, SessionState::AwaitingMusicConnection(_)) {
                println!("  no music account linked yet");
            }
            Ok(())
        }
        CliCommand::Feed { filter } => {
            restore(api).await?;
            let source = api.posts_source(filter.as_deref());
            let mut list = PaginatedList::new(api.config().page_size, |p: &Post| p.post_id);
            list.refresh(&source).await?;
            print_posts(list.items(), list.has_more());
            Ok(())
        }
        CliCommand::Saved => {
            let state = restore(api).await?;
            let user_id = state.session().map(|s| s.user_id).unwrap_or_default();
            let source = api.saved_source(user_id);
            let mut list = PaginatedList::new(api.config().page_size, |p: &Post| p.post_id);
            list.refresh(&source).await?;
            print_posts(list.items(), list.has_more());
            Ok(())
        }
        CliCommand::Search { query } => {
            restore(api).await?;
            let results = api.search(&query).await?;
            for user in &results.users {
                println!("@{}", user.username);
            }
            print_posts(&results.posts, false);
            Ok(())
        }
    }
}

async fn restore<H: HttpClient, S: SecureStore>(api: &ApiClient<H, S>) -> Result<SessionState> {
    match api.restore().await {
        SessionState::Unauthenticated | SessionState::Authenticating => {
            Err(eyre!("Not signed in. Sign in from the app first."))
        }
        state => Ok(state),
    }
}

fn print_posts(posts: &[Post], has_more: bool) {
    if posts.is_empty() {
        println!("(nothing here)");
        return;
    }
    for post in posts {
        let marker = if post.is_owned_by_current_user { "*" } else { " " };
        println!(
            "{}{:>6}  {:+4}  {}  by @{}",
            marker, post.post_id, post.net_votes, post.playlist_name, post.username
        );
    }
    if has_more {
        println!("...");
    }
}
