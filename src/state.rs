use crate::tracker::CalorieTracker;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// The single open form plus an alert waiting to be shown on the next page render.
#[derive(Debug)]
pub struct Session {
    pub tracker: CalorieTracker,
    pub alert: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, tracker: CalorieTracker) -> Self {
        Self {
            data_path,
            session: Arc::new(Mutex::new(Session {
                tracker,
                alert: None,
            })),
        }
    }
}
