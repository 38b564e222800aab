use crate::{
    db::{db::Db, users::Users},
    libs::{messages::Message, session::Session},
    msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Password};

#[derive(Debug, Args)]
pub struct SignupArgs {
    /// Display name
    #[arg(short, long)]
    name: Option<String>,
    /// Email used to sign in
    #[arg(short, long)]
    email: Option<String>,
}

pub fn cmd(args: SignupArgs) -> Result<()> {
    let theme = ColorfulTheme::default();

    let name = match args.name {
        Some(name) => name,
        None => Input::with_theme(&theme).with_prompt(Message::PromptName.to_string()).interact_text()?,
    };
    let email = match args.email {
        Some(email) => email,
        None => Input::with_theme(&theme).with_prompt(Message::PromptEmail.to_string()).interact_text()?,
    };
    let password = Password::with_theme(&theme)
        .with_prompt(Message::PromptPassword.to_string())
        .with_confirmation(Message::PromptPasswordConfirm.to_string(), Message::PasswordMismatch.to_string())
        .interact()?;

    let user = Users::from_db(Db::new()?).create(&name, &email, &password)?;
    Session::new()?.save(user.id)?;

    msg_success!(Message::SignedUp(user.name));
    Ok(())
}
