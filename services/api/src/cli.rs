use crate::report::{run_assessment, AssessArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use gst_assess::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "GST Business Assessment",
    about = "Assess GST filings for scheme eligibility and loan readiness",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Assess filings on disk and print the report
    Assess(AssessArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assessment(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gst_assess::workflows::business::BusinessType;

    #[test]
    fn assess_subcommand_accepts_repeated_files() {
        let cli = Cli::try_parse_from([
            "gst-assess-api",
            "assess",
            "--gstin",
            "27AAPFU0939F1ZV",
            "--name",
            "Konkan Spice Co",
            "--business-type",
            "exporter",
            "--category",
            "goods",
            "--incorporated",
            "2019-05-10",
            "--state",
            "Maharashtra",
            "--file",
            "Apr_b2b.csv",
            "--file",
            "May_b2b.csv",
            "--today",
            "2024-06-30",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Assess(args)) => {
                assert_eq!(args.business_type, BusinessType::Exporter);
                assert_eq!(args.files.len(), 2);
                assert!(args.today.is_some());
                assert!(!args.json);
            }
            other => panic!("expected assess command, got {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["gst-assess-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
