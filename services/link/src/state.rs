use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use craftlink_auth_types::session::SessionSecret;

use crate::infra::db::{DbAccountRepository, DbCodeStore};
use crate::infra::events::BroadcastEventSink;
use crate::infra::memory::MemoryCodeStore;
use crate::usecase::lifecycle::CodeLifecycle;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub session_secret: SessionSecret,
    /// The one process-wide mirror instance; clones share the same map.
    pub mirror: MemoryCodeStore,
    pub events: BroadcastEventSink,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn code_lifecycle(&self) -> CodeLifecycle<DbCodeStore, MemoryCodeStore> {
        CodeLifecycle {
            primary: DbCodeStore {
                db: self.db.clone(),
            },
            mirror: self.mirror.clone(),
        }
    }

    pub fn event_sink(&self) -> BroadcastEventSink {
        self.events.clone()
    }
}

impl FromRef<AppState> for SessionSecret {
    fn from_ref(state: &AppState) -> Self {
        state.session_secret.clone()
    }
}
