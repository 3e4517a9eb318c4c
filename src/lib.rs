//! Unusual Games core crate.
//!
//! WASM side of the Unusual Games site. The landing page builds its gallery
//! from the shared game registry, and each game page hands control to
//! `start_game()` with its registry id. The only playable runtime so far is
//! the cube-rendered Tetris; the workspace entry reuses the same scene
//! helpers as a scratch area for trying out rendering changes.

use wasm_bindgen::prelude::*;

mod gallery;
pub mod games;
mod scene;
pub mod tetris;
mod workspace;

pub use games::{GAMES, GameInfo, game_info_by_id};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Page entrypoints
// -----------------------------------------------------------------------------

/// Mounts the landing-page gallery (enabled entries only) plus the site footer.
#[wasm_bindgen]
pub fn start_gallery() -> Result<(), JsValue> {
    gallery::mount_gallery()
}

/// Launches the runtime registered for `id`. Unknown and disabled entries are
/// rejected so a stale link cannot start a half-wired game.
#[wasm_bindgen]
pub fn start_game(id: u32) -> Result<(), JsValue> {
    let info = games::game_info_by_id(id).ok_or_else(|| JsValue::from_str("unknown game id"))?;
    if !info.enabled {
        return Err(JsValue::from_str("game is disabled"));
    }
    match info.id {
        games::WORKSPACE_GAME_ID => workspace::mount_workspace(),
        games::TETRIS_GAME_ID => tetris::start_tetris_mode(),
        _ => Err(JsValue::from_str("game has no wasm runtime yet")),
    }
}

/// Registry snapshot as JSON, for host-page tooling that wants the same data
/// the gallery renders.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn games_manifest_json() -> String {
    serde_json::to_string(games::GAMES).unwrap_or_default()
}

// Shared timing helper; the Tetris session seeds its shape RNG from this.
pub(crate) fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
