use studyconnect_core::errors::StudyResult;
use tracing::{debug, warn};

/// Lifecycle of one screen fetch.
///
/// `Loaded` with an empty value is a valid "no data" outcome and is distinct
/// from `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    /// Enters `Loading`, discarding any previous result.
    pub fn begin(&mut self) {
        *self = FetchState::Loading;
    }

    /// Completes a fetch started with [`FetchState::begin`].
    ///
    /// Returns `false` and leaves the state untouched when no fetch is in
    /// flight, so a late result cannot overwrite a reset screen.
    pub fn finish(&mut self, result: StudyResult<T>) -> bool {
        if !self.is_loading() {
            debug!("Ignoring fetch result outside of Loading");
            return false;
        }

        *self = match result {
            Ok(value) => FetchState::Loaded(value),
            Err(e) => {
                warn!("Fetch failed: {}", e);
                FetchState::Failed(e.to_string())
            }
        };
        true
    }

    pub fn reset(&mut self) {
        *self = FetchState::Idle;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
