use super::data_storage::DataStorage;
use super::error::TaskError;
use anyhow::Result;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

const SESSION_FILE: &str = ".session";

/// Remembers which user is signed in on this machine.
pub struct Session {
    path: PathBuf,
}

impl Session {
    pub fn new() -> Result<Self> {
        Self::in_storage(&DataStorage::new())
    }

    pub fn in_storage(storage: &DataStorage) -> Result<Self> {
        Ok(Self {
            path: storage.get_path(SESSION_FILE)?,
        })
    }

    pub fn save(&self, user_id: i32) -> Result<()> {
        let mut file = fs::OpenOptions::new().write(true).create(true).truncate(true).open(&self.path)?;
        file.write_all(user_id.to_string().as_bytes())?;
        Ok(())
    }

    /// The signed-in user id; an unreadable session counts as signed out.
    pub fn user_id(&self) -> Option<i32> {
        fs::read_to_string(&self.path).ok()?.trim().parse().ok()
    }

    pub fn require_user_id(&self) -> Result<i32> {
        self.user_id().ok_or_else(|| TaskError::NotSignedIn.into())
    }

    /// Returns `false` when nobody was signed in.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let session = Session::in_storage(&DataStorage::at(temp_dir.path())).unwrap();

        assert_eq!(session.user_id(), None);
        assert!(session.require_user_id().is_err());

        session.save(7).unwrap();
        assert_eq!(session.user_id(), Some(7));
        assert_eq!(session.require_user_id().unwrap(), 7);

        assert!(session.clear().unwrap());
        assert!(!session.clear().unwrap());
        assert_eq!(session.user_id(), None);
    }
}
