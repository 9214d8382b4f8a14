//! Command-line argument parsing for the playshare CLI.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Restore the stored session and print who it belongs to
    WhoAmI,
    /// Print the first page of posts, optionally filtered by category
    Feed { filter: Option<String> },
    /// Print the first page of saved posts
    Saved,
    /// Search users and posts
    Search { query: String },
    /// Delete the stored session
    SignOut,
}

/// Parse command-line arguments (including the program name).
///
/// # Examples
///
/// ```
/// use playshare::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["playshare".to_string(), "feed".to_string(), "jazz".to_string()];
/// assert_eq!(
///     parse_args(args.into_iter()),
///     CliCommand::Feed { filter: Some("jazz".to_string()) }
/// );
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let args: Vec<String> = args.skip(1).collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        return CliCommand::Version;
    }

    let rest = || args.iter().skip(1).cloned().collect::<Vec<_>>().join(" ");
    match args.first().map(String::as_str) {
        Some("whoami") => CliCommand::WhoAmI,
        Some("feed") => {
            let filter = rest();
            CliCommand::Feed {
                filter: (!filter.is_empty()).then_some(filter),
            }
        }
        Some("saved") => CliCommand::Saved,
        Some("search") if args.len() > 1 => CliCommand::Search { query: rest() },
        Some("signout") => CliCommand::SignOut,
        _ => CliCommand::Help,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let mut all = vec!["playshare".to_string()];
        all.extend(args.iter().map(|s| s.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["feed", "-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_feed() {
        assert_eq!(parse(&["feed"]), CliCommand::Feed { filter: None });
        assert_eq!(
            parse(&["feed", "hip", "hop"]),
            CliCommand::Feed {
                filter: Some("hip hop".to_string())
            }
        );
    }

    #[test]
    fn test_parse_search_requires_query() {
        assert_eq!(parse(&["search"]), CliCommand::Help);
        assert_eq!(
            parse(&["search", "lofi"]),
            CliCommand::Search {
                query: "lofi".to_string()
            }
        );
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), CliCommand::Help);
        assert_eq!(parse(&["--unknown"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse(&["whoami"]), CliCommand::WhoAmI);
        assert_eq!(parse(&["saved"]), CliCommand::Saved);
        assert_eq!(parse(&["signout"]), CliCommand::SignOut);
    }
}
