use thiserror::Error;

/// Why a refresh did not produce a new snapshot. Only [`UpdateFailed::Timeout`]
/// is a distinct class; every other variant is a transport or parse failure.
#[derive(Debug, Error)]
pub enum UpdateFailed {
    #[error("update failed: timeout")]
    Timeout,

    #[error("update failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("update failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("update failed: client record #{index} has no `mac` field")]
    MissingIdentifier { index: usize },
}

impl UpdateFailed {
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpdateFailed::Timeout)
    }
}

impl From<reqwest::Error> for UpdateFailed {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpdateFailed::Timeout
        } else {
            UpdateFailed::Transport(err)
        }
    }
}
