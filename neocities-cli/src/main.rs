mod commands;
mod site_args;

use anyhow::Result;
use clap::Parser;
use commands::{
    CompletionsCommand, DeleteCommand, InfoCommand, ListCommand, PushCommand, UploadCommand,
};
use dotenvy::dotenv;
use site_args::SiteArgs;
use tracing_subscriber::EnvFilter;

pub trait ExecutableCommand: Parser {
    /// Consume `self` and run the command.
    fn run(self, site_args: &SiteArgs) -> Result<()>;
}

#[derive(Parser)]
enum Command {
    Upload(UploadCommand),
    Push(PushCommand),
    Delete(DeleteCommand),
    Info(InfoCommand),
    List(ListCommand),
    Completions(CompletionsCommand),
}

#[derive(Parser)]
#[command(name = "neocities", author, version, about, long_about)]
struct RootCommand {
    #[clap(flatten)]
    site_args: SiteArgs,

    /// Log every request made to the API.
    #[clap(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

impl RootCommand {
    fn run(self) -> Result<()> {
        let site_args = &self.site_args;
        match self.command {
            Command::Upload(cmd) => cmd.run(site_args),
            Command::Push(cmd) => cmd.run(site_args),
            Command::Delete(cmd) => cmd.run(site_args),
            Command::Info(cmd) => cmd.run(site_args),
            Command::List(cmd) => cmd.run(site_args),
            Command::Completions(cmd) => cmd.run(site_args),
        }
    }
}

fn main() -> Result<()> {
    dotenv().ok();
    let root = RootCommand::parse();
    let default_filter = if root.verbose { "neocities=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
    root.run()
}
