use serde::Deserialize;

use crate::store::{Session, Store};

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub store: Store,
    pub session: Session,
}

impl AppState {
    pub fn new() -> Self {
        let mut store = Store::new();
        let mut session = Session::new();
        // The UI expects at least one section on first open.
        if let Some(c) = store.create_class("Section 001") {
            session.active_class_id = Some(c.id.clone());
        }
        AppState { store, session }
    }

    /// Re-seed the draft from the active roster. Runs after anything that
    /// changes the active class, the sheet date, or roster membership.
    pub fn reseed_draft(&mut self) {
        let Some(class_id) = self.session.active_class_id.clone() else {
            self.session.draft.clear();
            return;
        };
        let roster = self.store.roster(&class_id);
        self.session.reseed(&roster);
    }
}
