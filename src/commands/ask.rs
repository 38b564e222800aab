use crate::{
    api::openai::OpenAi,
    db::{db::Db, tasks::Tasks},
    libs::{config::Config, messages::Message, session::Session, task::TaskFilter},
    msg_bail_anyhow, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct AskArgs {
    /// Question about your past tasks
    #[arg(required = true)]
    question: Vec<String>,
}

pub async fn cmd(args: AskArgs) -> Result<()> {
    let user_id = Session::new()?.require_user_id()?;
    let config = Config::read()?;
    let Some(ai_config) = config.ai.as_ref() else {
        msg_bail_anyhow!(Message::AiNotConfigured);
    };

    let history = Tasks::from_db(Db::new()?).fetch(user_id, TaskFilter::All)?;
    let answer = OpenAi::new(ai_config)?.ask(&args.question.join(" "), &history).await?;

    msg_print!(Message::AiAnswerHeader, true);
    msg_print!(answer);
    Ok(())
}
