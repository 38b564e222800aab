use crate::{
    db::{db::Db, users::Users},
    libs::{messages::Message, session::Session},
    msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Password};

#[derive(Debug, Args)]
pub struct SigninArgs {
    /// Email of the account
    email: Option<String>,
}

pub fn cmd(args: SigninArgs) -> Result<()> {
    let theme = ColorfulTheme::default();

    let email = match args.email {
        Some(email) => email,
        None => Input::with_theme(&theme).with_prompt(Message::PromptEmail.to_string()).interact_text()?,
    };
    let password = Password::with_theme(&theme).with_prompt(Message::PromptPassword.to_string()).interact()?;

    let user = Users::from_db(Db::new()?).authenticate(&email, &password)?;
    Session::new()?.save(user.id)?;

    msg_success!(Message::SignedIn(user.name));
    Ok(())
}
