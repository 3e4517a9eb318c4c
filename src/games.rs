//! Shared game registry.
//!
//! One static table drives everything the site knows about a game: the
//! gallery card, the page link, and which wasm runtime `start_game()` should
//! dispatch to. Entries keep their original asset paths verbatim (including
//! the long-standing "tumbnail" spelling, which the deployed images directory
//! still uses).

/// One registry entry. Disabled entries stay in the table so their ids remain
/// reserved, but the gallery never shows them and `start_game()` rejects them.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameInfo {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub last_updated: &'static str,
    pub display_image_url: &'static str,
    pub animation_page_url: &'static str,
    pub enabled: bool,
}

pub const WORKSPACE_GAME_ID: u32 = 0;
pub const TETRIS_GAME_ID: u32 = 1;

pub const GAMES: &[GameInfo] = &[
    GameInfo {
        id: WORKSPACE_GAME_ID,
        name: "Workspace",
        description: "Game window to run and test the code.",
        last_updated: "20 April, 2025",
        display_image_url: "/images/@default.animation.tumbnail.image.png",
        animation_page_url: "/games/@workspace",
        enabled: true,
    },
    GameInfo {
        id: TETRIS_GAME_ID,
        name: "Tetris",
        description: "Tetris with weird shapes",
        last_updated: "23 April, 2025",
        display_image_url: "/images/@default.animation.tumbnail.image.png",
        animation_page_url: "/games/tetris",
        enabled: true,
    },
    // Draft entry; flips to enabled once the runtime exists.
    GameInfo {
        id: 2,
        name: "Snake",
        description: "Snake on the cube grid",
        last_updated: "2 May, 2025",
        display_image_url: "/images/@default.animation.tumbnail.image.png",
        animation_page_url: "/games/snake",
        enabled: false,
    },
];

/// Lookup used by game pages and `start_game()`; `None` for unknown ids.
pub fn game_info_by_id(id: u32) -> Option<&'static GameInfo> {
    GAMES.iter().find(|g| g.id == id)
}

/// Gallery view of the registry: enabled entries, registry order.
pub fn enabled_games() -> impl Iterator<Item = &'static GameInfo> {
    GAMES.iter().filter(|g| g.enabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let mut seen = HashSet::new();
        for game in GAMES {
            assert!(seen.insert(game.id), "duplicate game id {}", game.id);
        }
    }

    #[test]
    fn lookup_finds_every_entry() {
        for game in GAMES {
            let found = game_info_by_id(game.id);
            assert_eq!(found, Some(game), "lookup failed for id {}", game.id);
        }
    }

    #[test]
    fn lookup_unknown_id_is_none() {
        assert_eq!(game_info_by_id(9999), None);
    }

    #[test]
    fn workspace_and_tetris_are_registered_and_enabled() {
        for id in [WORKSPACE_GAME_ID, TETRIS_GAME_ID] {
            let game = game_info_by_id(id).unwrap_or_else(|| panic!("id {id} missing"));
            assert!(game.enabled, "{} should be enabled", game.name);
        }
    }

    #[test]
    fn entries_carry_display_fields() {
        for game in GAMES {
            assert!(!game.name.is_empty(), "empty name for id {}", game.id);
            assert!(!game.description.is_empty(), "empty description for {}", game.name);
            assert!(!game.last_updated.is_empty(), "empty date for {}", game.name);
            assert!(
                game.display_image_url.starts_with('/'),
                "thumbnail for {} is not an absolute path",
                game.name
            );
            assert!(
                game.animation_page_url.starts_with("/games/"),
                "page url for {} is outside /games/",
                game.name
            );
        }
    }

    #[test]
    fn enabled_games_skips_disabled_entries() {
        let shown: Vec<_> = enabled_games().collect();
        assert!(shown.iter().all(|g| g.enabled));
        assert!(shown.len() < GAMES.len(), "expected at least one disabled draft entry");
    }
}
