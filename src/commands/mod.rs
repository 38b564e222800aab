pub mod ask;
pub mod generate;
pub mod init;
pub mod signin;
pub mod signout;
pub mod signup;
pub mod task;
pub mod whoami;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure AI and schedule settings")]
    Init(init::InitArgs),
    #[command(about = "Create an account and sign in")]
    Signup(signup::SignupArgs),
    #[command(about = "Sign in to an existing account")]
    Signin(signin::SigninArgs),
    #[command(about = "Sign out")]
    Signout,
    #[command(about = "Show the signed-in account")]
    Whoami,
    #[command(about = "Add, list, edit and delete tasks", arg_required_else_help = true)]
    Task(task::TaskArgs),
    #[command(about = "Draft tasks for a day with AI")]
    Generate(generate::GenerateArgs),
    #[command(about = "Ask AI about your past tasks")]
    Ask(ask::AskArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Signup(args) => signup::cmd(args),
            Commands::Signin(args) => signin::cmd(args),
            Commands::Signout => signout::cmd(),
            Commands::Whoami => whoami::cmd(),
            Commands::Task(args) => task::cmd(args).await,
            Commands::Generate(args) => generate::cmd(args).await,
            Commands::Ask(args) => ask::cmd(args).await,
        }
    }
}
