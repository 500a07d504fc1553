//! macroquad drawing layer
//!
//! Consumes read-only state snapshots; holds no state of its own. All visuals
//! are shape primitives, so there are no asset files to ship.

use macroquad::prelude::*;

use crate::consts::*;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, ItemKind};

const HUD_PANEL: Color = Color::new(0.0, 0.0, 0.0, 0.47);
const MENU_BG: Color = Color::new(0.27, 0.51, 0.71, 1.0);
const NIGHT_SKY: Color = Color::new(0.08, 0.07, 0.16, 1.0);
const GROUND: Color = Color::new(0.13, 0.23, 0.14, 1.0);

/// Draw one frame of the current state
pub fn draw(state: &GameState, scores: &HighScores, settings: &Settings) {
    match state.phase {
        GamePhase::Menu => draw_menu(),
        GamePhase::Playing | GamePhase::GameOver => {
            draw_playfield(state);
            draw_hud(state, settings);
            if state.phase == GamePhase::GameOver {
                draw_game_over(state, scores);
            }
        }
    }
}

fn draw_menu() {
    clear_background(MENU_BG);

    draw_text("THE FALLING", 80.0, 110.0, 80.0, GOLD);
    draw_text("ALCHEMIST", 100.0, 190.0, 80.0, GOLD);

    let legend_y = 290.0;
    draw_text("THE ALCHEMIST'S GUIDE:", 100.0, legend_y, 30.0, WHITE);

    draw_item(ItemKind::FrogEye, 120.0, legend_y + 20.0);
    draw_item(ItemKind::Mushroom, 170.0, legend_y + 20.0);
    draw_text("= GOOD (builds combo)", 230.0, legend_y + 48.0, 24.0, LIME);

    draw_item(ItemKind::Rock, 120.0, legend_y + 70.0);
    draw_item(ItemKind::Slime, 170.0, legend_y + 70.0);
    draw_text("= BAD (breaks combo & vitality)", 230.0, legend_y + 98.0, 24.0, PINK);

    draw_item(ItemKind::Potion, 120.0, legend_y + 120.0);
    draw_text("= BONUS (massive points)", 230.0, legend_y + 148.0, 24.0, SKYBLUE);

    draw_text("ARROWS to move  |  SHIFT to dash", 200.0, 510.0, 26.0, WHITE);
    let prompt = ">> PRESS SPACE TO BEGIN <<";
    let width = measure_text(prompt, None, 34, 1.0).width;
    draw_text(prompt, (PLAYFIELD_WIDTH - width) / 2.0, 555.0, 34.0, BLACK);
}

fn draw_playfield(state: &GameState) {
    clear_background(NIGHT_SKY);
    draw_rectangle(
        0.0,
        PLAYFIELD_HEIGHT - 40.0,
        PLAYFIELD_WIDTH,
        40.0,
        GROUND,
    );

    draw_cauldron(state.cauldron.pos.x, state.cauldron.pos.y);
    for item in &state.items {
        draw_item(item.kind, item.pos.x, item.pos.y);
    }
}

fn draw_hud(state: &GameState, settings: &Settings) {
    draw_rectangle(5.0, 5.0, 230.0, 200.0, HUD_PANEL);

    draw_text(&format!("SCORE: {}", state.score), 15.0, 32.0, 26.0, GOLD);
    draw_text(&format!("BEST:  {}", state.high_score), 15.0, 58.0, 22.0, WHITE);

    draw_text("VITALITY:", 15.0, 88.0, 22.0, WHITE);
    for i in 0..state.vitality {
        draw_heart(25.0 + i as f32 * 45.0, 110.0);
    }

    if state.combo > 1 {
        draw_text(
            &format!("COMBO x{}", state.combo),
            15.0,
            160.0,
            28.0,
            GREEN,
        );
    }

    // Dash cooldown bar
    let bar_width = 120.0;
    if state.dash_cooldown > 0 {
        let progress = 1.0 - state.dash_cooldown as f32 / DASH_COOLDOWN_TICKS as f32;
        draw_text("DASH:", 15.0, 190.0, 20.0, GRAY);
        draw_rectangle(70.0, 178.0, bar_width, 10.0, DARKGRAY);
        draw_rectangle(70.0, 178.0, bar_width * progress, 10.0, ORANGE);
    } else {
        draw_text("DASH READY!", 15.0, 190.0, 20.0, SKYBLUE);
        draw_rectangle(120.0, 178.0, 70.0, 10.0, SKYBLUE);
    }

    if settings.show_fps {
        draw_text(
            &format!("{} FPS", get_fps()),
            PLAYFIELD_WIDTH - 90.0,
            25.0,
            20.0,
            GRAY,
        );
    }
}

fn draw_game_over(state: &GameState, scores: &HighScores) {
    draw_rectangle(0.0, 0.0, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT, HUD_PANEL);

    let title = "GAME OVER";
    let width = measure_text(title, None, 90, 1.0).width;
    draw_text(title, (PLAYFIELD_WIDTH - width) / 2.0, 220.0, 90.0, RED);

    let score_line = format!("Final score: {}", state.score);
    let width = measure_text(&score_line, None, 36, 1.0).width;
    draw_text(
        &score_line,
        (PLAYFIELD_WIDTH - width) / 2.0,
        290.0,
        36.0,
        WHITE,
    );

    if !scores.is_empty() {
        draw_text("BEST RUNS", 320.0, 340.0, 26.0, GOLD);
        for (i, entry) in scores.entries.iter().take(5).enumerate() {
            draw_text(
                &format!("{}. {} (combo x{})", i + 1, entry.score, entry.best_combo),
                320.0,
                368.0 + i as f32 * 26.0,
                22.0,
                LIGHTGRAY,
            );
        }
    }

    let hint = "Press 'R' to restart";
    let width = measure_text(hint, None, 28, 1.0).width;
    draw_text(hint, (PLAYFIELD_WIDTH - width) / 2.0, 540.0, 28.0, LIGHTGRAY);
}

/// Draw one ingredient glyph with its top-left at (x, y)
fn draw_item(kind: ItemKind, x: f32, y: f32) {
    let s = ITEM_SIZE;
    let cx = x + s / 2.0;
    match kind {
        ItemKind::FrogEye => {
            draw_circle(cx, y + s * 0.5, s * 0.45, DARKGREEN);
            draw_circle(cx, y + s * 0.5, s * 0.3, WHITE);
            draw_circle(cx, y + s * 0.5, s * 0.14, BLACK);
            draw_circle(cx - s * 0.06, y + s * 0.42, s * 0.05, WHITE);
        }
        ItemKind::Mushroom => {
            draw_rectangle(cx - s * 0.14, y + s * 0.45, s * 0.28, s * 0.5, BEIGE);
            draw_circle(cx, y + s * 0.38, s * 0.42, RED);
            draw_rectangle(x + s * 0.04, y + s * 0.42, s * 0.92, s * 0.12, RED);
            draw_circle(cx - s * 0.18, y + s * 0.3, s * 0.08, WHITE);
            draw_circle(cx + s * 0.15, y + s * 0.22, s * 0.07, WHITE);
        }
        ItemKind::Rock => {
            draw_poly(cx, y + s * 0.52, 7, s * 0.42, 12.0, GRAY);
            draw_poly(cx - s * 0.08, y + s * 0.45, 7, s * 0.22, 30.0, DARKGRAY);
        }
        ItemKind::Slime => {
            draw_circle(cx, y + s * 0.55, s * 0.38, LIME);
            draw_rectangle(x + s * 0.08, y + s * 0.55, s * 0.84, s * 0.38, LIME);
            draw_circle(cx - s * 0.14, y + s * 0.5, s * 0.07, BLACK);
            draw_circle(cx + s * 0.14, y + s * 0.5, s * 0.07, BLACK);
        }
        ItemKind::Potion => {
            draw_circle(cx, y + s * 0.62, s * 0.34, SKYBLUE);
            draw_rectangle(cx - s * 0.11, y + s * 0.12, s * 0.22, s * 0.3, SKYBLUE);
            draw_rectangle(cx - s * 0.13, y + s * 0.04, s * 0.26, s * 0.1, BROWN);
            draw_circle(cx + s * 0.1, y + s * 0.56, s * 0.09, WHITE);
        }
    }
}

/// Draw the cauldron with its top-left at (x, y)
fn draw_cauldron(x: f32, y: f32) {
    let w = CAULDRON_WIDTH;
    let h = CAULDRON_HEIGHT;
    let cx = x + w / 2.0;

    // Bubbling brew peeking over the rim
    draw_circle(cx - w * 0.2, y + h * 0.08, w * 0.08, LIME);
    draw_circle(cx + w * 0.12, y + h * 0.04, w * 0.06, GREEN);

    // Pot body and rim
    draw_circle(cx, y + h * 0.5, w * 0.42, Color::new(0.15, 0.15, 0.18, 1.0));
    draw_rectangle(x, y + h * 0.12, w, h * 0.18, Color::new(0.22, 0.22, 0.26, 1.0));

    // Legs
    draw_rectangle(x + w * 0.16, y + h * 0.82, w * 0.1, h * 0.18, BLACK);
    draw_rectangle(x + w * 0.74, y + h * 0.82, w * 0.1, h * 0.18, BLACK);
}

/// Small vector heart for the vitality row
fn draw_heart(x: f32, y: f32) {
    let r = 9.0;
    draw_circle(x + r, y + r, r, RED);
    draw_circle(x + 3.0 * r, y + r, r, RED);
    draw_triangle(
        vec2(x, y + r + 2.0),
        vec2(x + 4.0 * r, y + r + 2.0),
        vec2(x + 2.0 * r, y + 3.6 * r),
        RED,
    );
}
