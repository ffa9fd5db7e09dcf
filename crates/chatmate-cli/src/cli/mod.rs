//! CLI definition for the `chatmate` binary.
//!
//! Uses clap derive macros for argument parsing. Running with no arguments
//! starts the English practice chat with the configured defaults.

pub mod chat;

use clap::Parser;

/// Practice English in a conversation with an AI chat partner.
#[derive(Debug, Parser)]
#[command(name = "chatmate", version, about, long_about = None)]
pub struct Cli {
    /// Suppress all log output except errors.
    #[arg(long)]
    pub quiet: bool,

    /// Detailed logs on stderr (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Model to use for this run instead of the configured one.
    #[arg(long)]
    pub model: Option<String>,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long)]
    pub otel: bool,

    /// Start in TO BE grammar practice mode ('chat' and 'practice' switch modes).
    #[arg(long)]
    pub practice: bool,

    /// Your name, so the chat partner can address you.
    #[arg(long)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["chatmate"]).unwrap();
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
        assert!(cli.model.is_none());
        assert!(!cli.otel);
        assert!(!cli.practice);
        assert!(cli.name.is_none());
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::try_parse_from(["chatmate", "-vv", "--model", "gpt-4o", "--otel"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
        assert!(cli.otel);
    }

    #[test]
    fn test_practice_and_name() {
        let cli = Cli::try_parse_from(["chatmate", "--practice", "--name", "Ana"]).unwrap();
        assert!(cli.practice);
        assert_eq!(cli.name.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_positional_arguments_rejected() {
        assert!(Cli::try_parse_from(["chatmate", "hello"]).is_err());
    }
}
