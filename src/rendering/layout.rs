//! Fixed pixel geometry for every panel
//!
//! All sizes and paste offsets are hand-specified; the compositor and the
//! panel renderers never compute layout. Changing a constant here changes
//! the card for every caller, which is the point: the output is a fixed
//! 720x140 layout.

/// Final card size, also the background panel size.
pub const CARD_SIZE: (u32, u32) = (720, 140);

// Background panel
pub const SPLASH_OFFSET: (i64, i64) = (60, -148);
pub const SPLASH_SIZE: (u32, u32) = (900, 450);
/// Brightness factor applied to the splash art behind the card.
pub const SPLASH_BRIGHTNESS: f32 = 0.3;
pub const AVATAR_OFFSET: (i64, i64) = (70, 0);
pub const AVATAR_SIZE: (u32, u32) = (140, 140);

// Level / constellation panel
pub const LEVEL_PANEL_SIZE: (u32, u32) = (86, 42);
pub const LEVEL_TEXT_POS: (i32, i32) = (48, 12);
pub const LEVEL_FONT_SIZE: f32 = 12.0;
pub const SIDE_ICON_SIZE: (u32, u32) = (42, 42);

// Full-status panel
pub const STATUS_PANEL_SIZE: (u32, u32) = (183, 85);
pub const STATUS_ROW_SIZE: (u32, u32) = (80, 16);
pub const STATUS_ICON_SIZE: (u32, u32) = (16, 16);
pub const STATUS_VALUE_POS: (i32, i32) = (24, 2);
pub const STATUS_FONT_SIZE: f32 = 10.0;
/// Vertical stride between stat rows.
pub const STATUS_ROW_STRIDE: i64 = 23;
/// Rows past the first four move into a second column at this x offset.
pub const STATUS_SECOND_COLUMN_X: i64 = 95;
pub const STATUS_ROWS_PER_COLUMN: usize = 4;

// Skill panel
pub const SKILL_PANEL_SIZE: (u32, u32) = (68, 30);
pub const SKILL_HEADER_POS: (i32, i32) = (0, 0);
pub const SKILL_HEADER_FONT_SIZE: f32 = 10.0;
pub const SKILL_LEVELS_POS: (i32, i32) = (0, 15);
pub const SKILL_LEVELS_FONT_SIZE: f32 = 13.0;

// Artifact list panel
pub const ARTIFACT_LIST_SIZE: (u32, u32) = (160, 32);
pub const ARTIFACT_TILE_SIZE: (u32, u32) = (32, 32);
pub const ARTIFACT_TILE_STRIDE: i64 = 32;
pub const ARTIFACT_MAIN_ICON_SIZE: (u32, u32) = (16, 16);
pub const ARTIFACT_MAIN_ICON_OFFSET: (i64, i64) = (16, 16);

// Total-score panel
pub const SCORE_PANEL_SIZE: (u32, u32) = (100, 32);
pub const SCORE_HEADER_POS: (i32, i32) = (0, 0);
pub const SCORE_HEADER_FONT_SIZE: f32 = 10.0;
pub const SCORE_VALUE_POS: (i32, i32) = (16, 16);
pub const SCORE_VALUE_FONT_SIZE: f32 = 13.0;

// Weapon panel
pub const WEAPON_PANEL_SIZE: (u32, u32) = (600, 300);
pub const WEAPON_ICON_SIZE: (u32, u32) = (30, 30);
pub const WEAPON_SUB_ICON_SIZE: (u32, u32) = (16, 16);
pub const WEAPON_SUB_ICON_OFFSET: (i64, i64) = (22, 14);
pub const WEAPON_TEXT_POS: (i32, i32) = (46, 0);
pub const WEAPON_FONT_SIZE: f32 = 12.0;

// Header / rank panel (same canvas size as the card)
pub const ELEMENT_BAR_SIZE: (u32, u32) = (270, 14);
pub const ELEMENT_BAR_OFFSET: (i64, i64) = (230, 28);
pub const RANK_TEXT_CENTER: (i32, i32) = (36, 70);
pub const RANK_FONT_SIZE: f32 = 24.0;
pub const NICKNAME_POS: (i32, i32) = (236, 13);
pub const NICKNAME_FONT_SIZE: f32 = 24.0;
pub const WORLD_RANK_LABEL_POS: (i32, i32) = (417, 25);
pub const WORLD_RANK_LABEL_FONT_SIZE: f32 = 10.0;
pub const WORLD_RANK_VALUE_POS: (i32, i32) = (473, 20);
pub const WORLD_RANK_VALUE_FONT_SIZE: f32 = 15.0;

// Compositor paste offsets, in paste order after the background.
pub const PASTE_STATUS: (i64, i64) = (527, 38);
pub const PASTE_LEVEL: (i64, i64) = (220, 42);
pub const PASTE_SKILL: (i64, i64) = (421, 54);
pub const PASTE_ARTIFACTS: (i64, i64) = (230, 95);
pub const PASTE_SCORE: (i64, i64) = (421, 95);
pub const PASTE_WEAPON: (i64, i64) = (306, 54);
pub const PASTE_HEADER: (i64, i64) = (0, 0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_list_fits_five_tiles() {
        assert_eq!(
            ARTIFACT_LIST_SIZE.0 as i64,
            ARTIFACT_TILE_STRIDE * 5,
        );
        assert_eq!(ARTIFACT_LIST_SIZE.1, ARTIFACT_TILE_SIZE.1);
    }

    #[test]
    fn status_panel_holds_two_columns() {
        // Second column starts past the first column's row width.
        assert!(STATUS_SECOND_COLUMN_X >= STATUS_ROW_SIZE.0 as i64);
        assert!(STATUS_SECOND_COLUMN_X + STATUS_ROW_SIZE.0 as i64 <= STATUS_PANEL_SIZE.0 as i64);
        // Four rows of stride fit vertically.
        assert!(STATUS_ROW_STRIDE * 3 + STATUS_ROW_SIZE.1 as i64 <= STATUS_PANEL_SIZE.1 as i64);
    }
}
