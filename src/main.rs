//! The Falling Alchemist entry point
//!
//! Owns the frame loop: sample input, advance the fixed-timestep simulation,
//! drain events into audio cues, draw. The sim never touches the platform.

use macroquad::prelude::*;

use falling_alchemist::audio::AudioManager;
use falling_alchemist::consts::*;
use falling_alchemist::highscores::HighScores;
use falling_alchemist::render;
use falling_alchemist::settings::Settings;
use falling_alchemist::sim::{GameEvent, GameState, TickInput, tick};

fn window_conf() -> Conf {
    Conf {
        window_title: String::from("The Falling Alchemist"),
        window_width: PLAYFIELD_WIDTH as i32,
        window_height: PLAYFIELD_HEIGHT as i32,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let settings = Settings::load_or_create();
    let audio = AudioManager::new(&settings).await;

    let seed = (macroquad::miniquad::date::now() * 1000.0) as u64;
    log::info!("Starting with seed {seed}");

    let mut state = GameState::new(seed);
    let mut scores = HighScores::new();
    audio.start_music();

    let mut accumulator = 0.0f32;
    let mut input = TickInput::default();

    loop {
        input.left = is_key_down(KeyCode::Left);
        input.right = is_key_down(KeyCode::Right);
        input.dash = is_key_down(KeyCode::LeftShift);
        if is_key_pressed(KeyCode::Space) {
            input.start = true;
        }
        if is_key_pressed(KeyCode::R) {
            input.restart = true;
        }

        accumulator += get_frame_time().min(0.1);
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut state, &input);
            accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs once a tick has consumed them
            input.start = false;
            input.restart = false;
        }

        for event in state.take_events() {
            if event == GameEvent::GameOver {
                if let Some(rank) = scores.add_score(state.score, state.best_combo) {
                    log::info!("Run ended at rank {rank} with score {}", state.score);
                }
            }
            audio.handle_event(event);
        }

        render::draw(&state, &scores, &settings);
        next_frame().await;
    }
}
