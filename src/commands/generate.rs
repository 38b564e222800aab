use super::task::{handle_add, today};
use crate::{
    api::openai::OpenAi,
    db::{db::Db, tasks::Tasks},
    libs::{config::Config, messages::Message, session::Session, task::TaskDraft, time},
    msg_bail_anyhow, msg_info,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, MultiSelect};

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// What the tasks should be about
    #[arg(required = true)]
    prompt: Vec<String>,
    /// Day to plan (YYYY-MM-DD), today by default
    #[arg(short, long)]
    date: Option<String>,
    /// Add every suggested task without asking
    #[arg(short, long)]
    yes: bool,
}

pub async fn cmd(args: GenerateArgs) -> Result<()> {
    let user_id = Session::new()?.require_user_id()?;
    let date = args.date.as_deref().map(time::parse_date).transpose()?.unwrap_or_else(today);
    let config = Config::read()?;
    let Some(ai_config) = config.ai.as_ref() else {
        msg_bail_anyhow!(Message::AiNotConfigured);
    };

    msg_info!(Message::GeneratingTasks);
    let drafts = OpenAi::new(ai_config)?.generate_tasks(&args.prompt.join(" ")).await?;
    if drafts.is_empty() {
        msg_info!(Message::NoTasksGenerated);
        return Ok(());
    }

    let selected = if args.yes { drafts } else { select_drafts(drafts)? };
    if selected.is_empty() {
        msg_info!(Message::NoTasksSelected);
        return Ok(());
    }

    let mut tasks = Tasks::from_db(Db::new()?).strict_add(config.schedule_or_default().strict_add);
    handle_add(&mut tasks, user_id, selected, date)
}

fn select_drafts(drafts: Vec<TaskDraft>) -> Result<Vec<TaskDraft>> {
    let items: Vec<String> = drafts.iter().map(describe).collect();
    let defaults = vec![true; items.len()];

    let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectGeneratedTasks.to_string())
        .items(&items)
        .defaults(&defaults)
        .interact()?;

    Ok(drafts
        .into_iter()
        .enumerate()
        .filter(|(index, _)| chosen.contains(index))
        .map(|(_, draft)| draft)
        .collect())
}

fn describe(draft: &TaskDraft) -> String {
    format!(
        "{} ({}, {} min)",
        draft.text,
        draft.start_time.as_deref().unwrap_or("--:--"),
        draft.duration.map(|d| d.to_string()).unwrap_or_else(|| "?".to_string())
    )
}
