mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "framepipe", version, about = "Framed message streams over raw byte conduits")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_subcommand() {
        let cli = Cli::try_parse_from([
            "framepipe",
            "serve",
            "127.0.0.1:8081",
            "--count",
            "3",
            "--interval",
            "250ms",
        ])
        .expect("serve args should parse");

        assert!(matches!(cli.command, Command::Serve(_)));
    }

    #[test]
    fn parses_ping_subcommand() {
        let cli = Cli::try_parse_from(["framepipe", "ping", "127.0.0.1:8081", "--reply", "PONG"])
            .expect("ping args should parse");
        assert!(matches!(cli.command, Command::Ping(_)));
    }

    #[test]
    fn rejects_conflicting_payload_args() {
        let err = Cli::try_parse_from([
            "framepipe",
            "send",
            "127.0.0.1:8081",
            "--data",
            "hello",
            "--file",
            "/tmp/payload.bin",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn serve_defaults_match_keepalive() {
        let cli = Cli::try_parse_from(["framepipe", "serve", "127.0.0.1:0"])
            .expect("serve args should parse");
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.count, 10);
                assert_eq!(args.interval, "1s");
                assert_eq!(args.data, "PING");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
