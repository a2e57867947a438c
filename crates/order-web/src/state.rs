//! Application state shared across handlers.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use assistant::Assistant;
use database::Database;
use intake::IntakeSession;
use order_core::IntakeProfile;

use crate::store::SqliteStore;

/// The session type driven by the web layer.
pub type WebSession = IntakeSession<SqliteStore, Arc<Assistant>>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Shared assistant client.
    pub assistant: Arc<Assistant>,
    /// Live intake sessions keyed by id.
    pub sessions: Arc<Mutex<HashMap<Uuid, WebSession>>>,
    /// Active intake profile.
    pub profile: &'static IntakeProfile,
    /// WhatsApp recipient for hand-off links.
    pub whatsapp_number: String,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        db: Database,
        assistant: Assistant,
        profile: &'static IntakeProfile,
        whatsapp_number: impl Into<String>,
    ) -> Self {
        Self {
            db,
            assistant: Arc::new(assistant),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            profile,
            whatsapp_number: whatsapp_number.into(),
        }
    }

    /// Create a fresh intake session and register it, returning its id.
    pub async fn open_session(&self, product_param: Option<&str>) -> Uuid {
        let session = IntakeSession::new(
            SqliteStore::new(self.db.clone()),
            self.assistant.clone(),
            self.profile,
            self.whatsapp_number.clone(),
        )
        .with_product_param(product_param);

        let id = Uuid::new_v4();
        self.sessions.lock().await.insert(id, session);
        id
    }
}
