use dotenv::dotenv;
use todoai::commands::Cli;
use todoai::libs::error::TaskError;
use todoai::libs::messages::{macros::is_debug_mode, Message};
use todoai::msg_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenv();

    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("todoai=debug")))
            .with_target(false)
            .init();
    }

    if let Err(e) = Cli::menu().await {
        match e.downcast_ref::<TaskError>() {
            Some(err) => msg_error!(Message::TaskRejected(err.code(), err.to_string())),
            None => msg_error!(e),
        }
        std::process::exit(1);
    }
}
