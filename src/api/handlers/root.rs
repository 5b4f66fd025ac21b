//! The plain-text banner served at `/`.

use axum::extract::State;

use crate::state::AppState;

/// `GET /`: always 200 with a static confirmation line
pub async fn banner(State(state): State<AppState>) -> String {
    banner_text(state.mod_id)
}

pub fn banner_text(mod_id: u64) -> String {
    format!("Nexus Mod Monitor for Mod ID {} is running!", mod_id)
}
