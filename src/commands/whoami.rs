use crate::{
    db::{db::Db, users::Users},
    libs::{error::TaskError, messages::Message, session::Session},
    msg_print,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let user_id = Session::new()?.require_user_id()?;
    let user = Users::from_db(Db::new()?)
        .get_by_id(user_id)?
        .ok_or(TaskError::NotSignedIn)?;

    msg_print!(Message::CurrentUser(user.name, user.email));
    Ok(())
}
