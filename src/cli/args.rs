//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::svg::PathBounds;

/// Trim and animate kolam SVG drawings
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: kolam.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, default_value = "kolam.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base URL for relative sources (overrides KOLAM_API_URL and config)
    #[arg(short = 'B', long, global = true, value_hint = clap::ValueHint::Url)]
    pub base_url: Option<String>,

    /// How path data contributes to the bounding box
    #[arg(long, global = true, value_enum)]
    pub path_bounds: Option<PathBounds>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fetch a kolam and print its trimmed, animated markup
    #[command(visible_alias = "r")]
    Render {
        /// Absolute URL, or a path relative to the base URL
        src: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Trim and animate a local SVG file (no network)
    #[command(visible_alias = "n")]
    Normalize {
        /// SVG file; `-` or omitted reads stdin
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print primitive counts, bounds, viewBox and schedule as JSON
    #[command(visible_alias = "i")]
    Inspect {
        /// SVG file; `-` or omitted reads stdin
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Start the local preview server
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Where and how to write produced markup.
#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Wrap the markup in a standalone HTML page
    #[arg(long)]
    pub html: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "kolam",
            "render",
            "k.svg",
            "--html",
            "-v",
            "--path-bounds",
            "commands",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.path_bounds, Some(PathBounds::Commands));
        let Commands::Render { src, output } = cli.command else {
            panic!("expected render");
        };
        assert_eq!(src, "k.svg");
        assert!(output.html);
        assert!(output.output.is_none());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["kolam", "inspect"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("kolam.toml"));
        assert!(!cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Inspect {
                input: None,
                pretty: false
            }
        ));
    }
}
