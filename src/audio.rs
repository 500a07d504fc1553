//! Audio system
//!
//! Procedurally generated sound effects - no asset files needed! Every cue
//! and the background loop are synthesized into small WAV buffers at startup
//! and handed to macroquad for playback.

use macroquad::audio::{PlaySoundParams, Sound, load_sound_from_bytes, play_sound, stop_sound};

use crate::settings::Settings;
use crate::sim::GameEvent;

const SAMPLE_RATE: u32 = 44_100;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Good ingredient caught
    Success,
    /// Bad ingredient caught
    Damage,
    /// Bonus potion caught
    Bonus,
    /// Dash accepted
    Dash,
    /// Run ended
    Lose,
}

/// Audio manager for the game
///
/// Any sound that fails to decode is dropped with a warning; the game keeps
/// running silently for that cue.
pub struct AudioManager {
    success: Option<Sound>,
    damage: Option<Sound>,
    bonus: Option<Sound>,
    dash: Option<Sound>,
    lose: Option<Sound>,
    music: Option<Sound>,
    sfx_volume: f32,
    music_volume: f32,
}

impl AudioManager {
    /// Synthesize and load every sound
    pub async fn new(settings: &Settings) -> Self {
        let manager = Self {
            success: load(synth_success()).await,
            damage: load(synth_damage()).await,
            bonus: load(synth_bonus()).await,
            dash: load(synth_dash()).await,
            lose: load(synth_lose()).await,
            music: load(synth_music()).await,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
        };
        if manager.music.is_none() {
            log::warn!("Music failed to load - continuing without it");
        }
        manager
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        let sound = match effect {
            SoundEffect::Success => &self.success,
            SoundEffect::Damage => &self.damage,
            SoundEffect::Bonus => &self.bonus,
            SoundEffect::Dash => &self.dash,
            SoundEffect::Lose => &self.lose,
        };
        if let Some(sound) = sound {
            play_sound(
                sound,
                PlaySoundParams {
                    looped: false,
                    volume: self.sfx_volume,
                },
            );
        }
    }

    /// Start the background loop
    pub fn start_music(&self) {
        if self.music_volume <= 0.0 {
            return;
        }
        if let Some(music) = &self.music {
            play_sound(
                music,
                PlaySoundParams {
                    looped: true,
                    volume: self.music_volume,
                },
            );
        }
    }

    /// Stop the background loop
    pub fn stop_music(&self) {
        if let Some(music) = &self.music {
            stop_sound(music);
        }
    }

    /// Map a simulation event to its cue
    pub fn handle_event(&self, event: GameEvent) {
        match event {
            GameEvent::Caught(kind) => {
                if kind.is_good() {
                    self.play(SoundEffect::Success);
                } else if kind.is_bad() {
                    self.play(SoundEffect::Damage);
                } else {
                    self.play(SoundEffect::Bonus);
                }
            }
            GameEvent::DashUsed => self.play(SoundEffect::Dash),
            GameEvent::GameOver => {
                self.play(SoundEffect::Lose);
                self.stop_music();
            }
            GameEvent::RunRestarted => self.start_music(),
        }
    }
}

async fn load(bytes: Vec<u8>) -> Option<Sound> {
    match load_sound_from_bytes(&bytes).await {
        Ok(sound) => Some(sound),
        Err(err) => {
            log::warn!("Failed to load synthesized sound: {err:?}");
            None
        }
    }
}

// === Synthesis ===

#[derive(Debug, Clone, Copy)]
enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

fn oscillate(wave: Waveform, phase: f32) -> f32 {
    let t = phase.fract();
    match wave {
        Waveform::Sine => (t * std::f32::consts::TAU).sin(),
        Waveform::Square => {
            if t < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Triangle => 1.0 - 4.0 * (t - 0.5).abs(),
        Waveform::Sawtooth => 2.0 * t - 1.0,
    }
}

/// Mix one tone into the buffer: exponential frequency glide from `f0` to
/// `f1` over `dur` seconds, with a decaying envelope, starting at `start`.
fn add_tone(buf: &mut Vec<f32>, wave: Waveform, start: f32, dur: f32, f0: f32, f1: f32, gain: f32) {
    let begin = (start * SAMPLE_RATE as f32) as usize;
    let count = (dur * SAMPLE_RATE as f32) as usize;
    if buf.len() < begin + count {
        buf.resize(begin + count, 0.0);
    }

    let mut phase = 0.0f32;
    for (i, slot) in buf[begin..begin + count].iter_mut().enumerate() {
        let t = i as f32 / count as f32;
        let freq = f0 * (f1 / f0).powf(t);
        phase += freq / SAMPLE_RATE as f32;
        let envelope = gain * (1.0 - t) * (1.0 - t);
        *slot += oscillate(wave, phase) * envelope;
    }
}

/// Encode mono f32 samples as a 16-bit PCM WAV buffer
fn wav_bytes(samples: &[f32]) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut out = Vec::with_capacity(44 + data_len as usize);

    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    out.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // byte rate
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());

    for sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        out.extend_from_slice(&value.to_le_bytes());
    }
    out
}

/// Success - bubbly ascending blip
fn synth_success() -> Vec<u8> {
    let mut buf = Vec::new();
    add_tone(&mut buf, Waveform::Sine, 0.0, 0.12, 500.0, 950.0, 0.5);
    add_tone(&mut buf, Waveform::Sine, 0.0, 0.12, 1000.0, 1900.0, 0.12);
    wav_bytes(&buf)
}

/// Damage - harsh descending crunch
fn synth_damage() -> Vec<u8> {
    let mut buf = Vec::new();
    add_tone(&mut buf, Waveform::Sawtooth, 0.0, 0.25, 180.0, 55.0, 0.55);
    add_tone(&mut buf, Waveform::Square, 0.0, 0.1, 900.0, 300.0, 0.2);
    wav_bytes(&buf)
}

/// Bonus - three-note happy arpeggio
fn synth_bonus() -> Vec<u8> {
    let mut buf = Vec::new();
    for (i, freq) in [600.0, 800.0, 1000.0].iter().enumerate() {
        let start = i as f32 * 0.08;
        add_tone(&mut buf, Waveform::Sine, start, 0.18, *freq, *freq, 0.4);
    }
    wav_bytes(&buf)
}

/// Dash - quick whoosh up
fn synth_dash() -> Vec<u8> {
    let mut buf = Vec::new();
    add_tone(&mut buf, Waveform::Triangle, 0.0, 0.2, 200.0, 650.0, 0.45);
    wav_bytes(&buf)
}

/// Lose - sad descending line
fn synth_lose() -> Vec<u8> {
    let mut buf = Vec::new();
    for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
        let start = i as f32 * 0.2;
        add_tone(&mut buf, Waveform::Sine, start, 0.35, *freq, *freq, 0.45);
    }
    wav_bytes(&buf)
}

/// Background loop - gentle minor arpeggio over a square-wave bass
fn synth_music() -> Vec<u8> {
    const STEP: f32 = 0.25;
    // A minor / F major / C major / G major, one bar each
    let melody = [
        440.0, 523.25, 659.25, 523.25, //
        349.23, 440.0, 523.25, 440.0, //
        523.25, 659.25, 783.99, 659.25, //
        392.0, 493.88, 587.33, 493.88,
    ];
    let bass = [110.0, 87.31, 130.81, 98.0];

    let mut buf = Vec::new();
    for (i, freq) in melody.iter().enumerate() {
        let start = i as f32 * STEP;
        add_tone(&mut buf, Waveform::Triangle, start, 0.22, *freq, *freq, 0.22);
    }
    for (i, freq) in bass.iter().enumerate() {
        let start = i as f32 * STEP * 4.0;
        add_tone(&mut buf, Waveform::Square, start, 0.9, *freq, *freq, 0.08);
    }
    // Pad to an exact loop length so looping stays on the beat
    let total = (STEP * 16.0 * SAMPLE_RATE as f32) as usize;
    if buf.len() < total {
        buf.resize(total, 0.0);
    }
    wav_bytes(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_header() {
        let bytes = wav_bytes(&[0.0, 0.5, -0.5]);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(bytes.len(), 44 + 3 * 2);
    }

    #[test]
    fn test_tone_is_not_silence() {
        let mut buf = Vec::new();
        add_tone(&mut buf, Waveform::Sine, 0.0, 0.1, 440.0, 440.0, 0.5);
        assert!(!buf.is_empty());
        assert!(buf.iter().any(|s| s.abs() > 0.1));
        assert!(buf.iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn test_all_effects_synthesize() {
        for bytes in [
            synth_success(),
            synth_damage(),
            synth_bonus(),
            synth_dash(),
            synth_lose(),
            synth_music(),
        ] {
            assert!(bytes.len() > 44);
        }
    }
}
