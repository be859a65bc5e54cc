//! Where users and session requests come from.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{TutorCalError, TutorCalResult};
use crate::session::{Role, SessionRequest, User};

/// Read access to users and session requests.
pub trait SessionStore {
    fn users(&self) -> TutorCalResult<Vec<User>>;

    fn sessions(&self) -> TutorCalResult<Vec<SessionRequest>>;

    fn user(&self, username: &str) -> TutorCalResult<User> {
        self.users()?
            .into_iter()
            .find(|u| u.username == username)
            .ok_or_else(|| TutorCalError::NotFound(format!("user '{username}'")))
    }

    fn session(&self, id: &str) -> TutorCalResult<SessionRequest> {
        self.sessions()?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| TutorCalError::NotFound(format!("session '{id}'")))
    }

    /// Approved sessions `viewer` may see.
    ///
    /// Students see their own requests, tutors the requests matched to them,
    /// admins every approved request. `selected` narrows the result to
    /// sessions where that user is the student or the tutor.
    fn visible_sessions(
        &self,
        viewer: &User,
        selected: Option<&User>,
    ) -> TutorCalResult<Vec<SessionRequest>> {
        let sessions = self
            .sessions()?
            .into_iter()
            .filter(SessionRequest::is_approved)
            .filter(|s| match viewer.role {
                Role::Student => s.student == viewer.username,
                Role::Tutor => s.tutor.as_deref() == Some(viewer.username.as_str()),
                Role::Admin => true,
            })
            .filter(|s| {
                selected.is_none_or(|user| {
                    s.student == user.username || s.tutor.as_deref() == Some(user.username.as_str())
                })
            })
            .collect();

        Ok(sessions)
    }
}

/// Contents of a sessions file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    sessions: Vec<SessionRequest>,
}

/// Session store backed by a TOML file with `[[users]]` and `[[sessions]]`
/// tables.
#[derive(Debug)]
pub struct TomlStore {
    path: Option<PathBuf>,
    data: StoreFile,
}

impl TomlStore {
    /// Load a sessions file. A missing file is an empty store.
    pub fn load(path: &Path) -> TutorCalResult<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "sessions file not found, starting empty");
            return Ok(TomlStore {
                path: Some(path.to_path_buf()),
                data: StoreFile::default(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let mut store = Self::from_toml_str(&content)?;
        store.path = Some(path.to_path_buf());

        info!(
            path = %path.display(),
            users = store.data.users.len(),
            sessions = store.data.sessions.len(),
            "loaded sessions file"
        );

        Ok(store)
    }

    pub fn from_toml_str(content: &str) -> TutorCalResult<Self> {
        let mut data: StoreFile =
            toml::from_str(content).map_err(|e| TutorCalError::Store(e.to_string()))?;
        validate(&data)?;

        for session in &mut data.sessions {
            if session.backfill_weekdays() {
                info!(session = %session.id, "approved without weekdays, booked every weekday");
            }
        }

        Ok(TomlStore { path: None, data })
    }

    /// Path the store was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl SessionStore for TomlStore {
    fn users(&self) -> TutorCalResult<Vec<User>> {
        Ok(self.data.users.clone())
    }

    fn sessions(&self) -> TutorCalResult<Vec<SessionRequest>> {
        Ok(self.data.sessions.clone())
    }
}

fn validate(data: &StoreFile) -> TutorCalResult<()> {
    let mut usernames = HashSet::new();
    for user in &data.users {
        if !usernames.insert(user.username.as_str()) {
            return Err(TutorCalError::Store(format!(
                "duplicate user '{}'",
                user.username
            )));
        }
    }

    let mut ids = HashSet::new();
    for session in &data.sessions {
        if !ids.insert(session.id.as_str()) {
            return Err(TutorCalError::Store(format!("duplicate session id '{}'", session.id)));
        }

        session
            .validate()
            .map_err(|e| TutorCalError::Store(format!("session '{}': {e}", session.id)))?;

        if !usernames.contains(session.student.as_str()) {
            warn!(session = %session.id, student = %session.student, "session refers to unknown student");
        }
    }

    Ok(())
}
