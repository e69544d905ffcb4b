//! Command-line argument parsing for shipdesk.
//!
//! Hand-rolled: the command surface is a handful of subcommands with at most
//! one positional argument and one flag.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Sign in with an email address; the password is read separately
    Login { email: String },
    /// End the session and clear stored credentials
    Logout,
    /// Exchange the stored refresh token for new credentials
    Refresh,
    /// Authenticated GET of an API path; the body is printed
    Get { path: String },
    /// Look up a shipment, optionally following it until it settles
    Track { awb: String, watch: bool },
    /// Arguments that do not form a command
    Invalid(String),
}

pub const USAGE: &str = "\
Usage: shipdesk <command>

Commands:
  login <email>          Sign in (password from SHIPDESK_PASSWORD or prompt)
  logout                 Sign out and clear stored credentials
  refresh                Refresh the session tokens
  get <path>             GET an API path and print the response body
  track <awb> [--watch]  Show shipment status; --watch polls until it settles

Options:
  -h, --help             Show this message
  -V, --version          Show version";

/// Parse command-line arguments and return the command to run.
///
/// # Examples
///
/// ```
/// use shipdesk::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["shipdesk".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let args: Vec<String> = args.skip(1).collect();

    if args.iter().any(|a| a == "--version" || a == "-V") {
        return CliCommand::Version;
    }
    if args.iter().any(|a| a == "--help" || a == "-h") {
        return CliCommand::Help;
    }

    let Some((command, rest)) = args.split_first() else {
        return CliCommand::Help;
    };

    match command.as_str() {
        "login" => match rest {
            [email] => CliCommand::Login {
                email: email.clone(),
            },
            _ => CliCommand::Invalid("login takes exactly one <email>".to_string()),
        },
        "logout" if rest.is_empty() => CliCommand::Logout,
        "refresh" if rest.is_empty() => CliCommand::Refresh,
        "get" => match rest {
            [path] => CliCommand::Get { path: path.clone() },
            _ => CliCommand::Invalid("get takes exactly one <path>".to_string()),
        },
        "track" => {
            let watch = rest.iter().any(|a| a == "--watch" || a == "-w");
            let positional: Vec<&String> = rest.iter().filter(|a| !a.starts_with('-')).collect();
            match positional.as_slice() {
                [awb] if rest.len() == positional.len() + usize::from(watch) => {
                    CliCommand::Track {
                        awb: (*awb).clone(),
                        watch,
                    }
                }
                _ => CliCommand::Invalid("usage: track <awb> [--watch]".to_string()),
            }
        }
        "logout" | "refresh" => CliCommand::Invalid(format!("{} takes no arguments", command)),
        other => CliCommand::Invalid(format!("unknown command '{}'", other)),
    }
}
