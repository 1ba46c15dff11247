//! Audio system
//!
//! Procedurally generated chime via the Web Audio API on wasm - no external
//! files needed. Native builds keep the bookkeeping but stay silent.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::{Landing, LandingHook};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball settles in a bucket
    Landing,
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    playback_rate: f32,
    played: u32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self::from_settings(&Settings::default())
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx: Self::create_context(),
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            playback_rate: settings.landing_playback_rate.max(0.1),
            played: 0,
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn create_context() -> Option<AudioContext> {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        ctx
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Apply volume and mute preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
        self.playback_rate = settings.landing_playback_rate.max(0.1);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Number of effects started (muted effects are not counted)
    pub fn played(&self) -> u32 {
        self.played
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.played += 1;

        #[cfg(target_arch = "wasm32")]
        {
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Landing => self.play_landing(ctx, vol),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        log::trace!(
            "Sound effect {:?} at volume {:.2} (rate {:.1})",
            effect,
            vol,
            self.playback_rate
        );
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    #[cfg(target_arch = "wasm32")]
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Landing - bright two-partial bell "bing", sped up by the playback rate
    #[cfg(target_arch = "wasm32")]
    fn play_landing(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        let rate = self.playback_rate;
        let decay = f64::from(0.5 / rate);

        // Fundamental
        if let Some((osc, gain)) = self.create_osc(ctx, 880.0 * rate, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + decay)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + decay + 0.02).ok();
        }

        // Inharmonic partial for the bell shimmer
        if let Some((osc, gain)) = self.create_osc(ctx, 2350.0 * rate, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + decay * 0.5)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + decay * 0.5 + 0.02).ok();
        }
    }
}

impl LandingHook for AudioManager {
    fn on_landing(&mut self, _landing: &Landing) {
        self.play(SoundEffect::Landing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::{GameEngine, ScriptedSource};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_muted_manager_does_not_play() {
        let mut audio = AudioManager::new();
        audio.set_muted(true);
        audio.play(SoundEffect::Landing);
        assert_eq!(audio.played(), 0);

        audio.set_muted(false);
        audio.play(SoundEffect::Landing);
        assert_eq!(audio.played(), 1);
    }

    #[test]
    fn test_zero_volume_from_settings_is_silent() {
        let settings = Settings {
            master_volume: 0.0,
            ..Default::default()
        };
        let mut audio = AudioManager::from_settings(&settings);
        audio.play(SoundEffect::Landing);
        assert_eq!(audio.played(), 0);
    }

    #[test]
    fn test_audio_hook_does_not_touch_wallet() {
        let mut engine =
            GameEngine::with_rng(MemoryStore::new(), ScriptedSource::new(vec![0.1, 0.9]));
        engine.set_landing_hook(AudioManager::new());
        let id = engine.try_drop_ball().unwrap();
        let landing = engine.resolve_ball(id).unwrap();
        assert!((engine.balance() - (99.0 + landing.winnings)).abs() < 1e-9);
    }

    #[test]
    fn test_shared_manager_applies_settings_after_install() {
        let audio = Rc::new(RefCell::new(AudioManager::new()));
        let mut engine =
            GameEngine::with_rng(MemoryStore::new(), ScriptedSource::new(vec![0.1, 0.9]));
        engine.set_landing_hook(audio.clone());

        let id = engine.try_drop_ball().unwrap();
        engine.resolve_ball(id);
        assert_eq!(audio.borrow().played(), 1);

        let muted = Settings {
            muted: true,
            ..Default::default()
        };
        audio.borrow_mut().apply_settings(&muted);
        audio.borrow().resume();
        let id = engine.try_drop_ball().unwrap();
        engine.resolve_ball(id);
        assert_eq!(audio.borrow().played(), 1);

        audio.borrow_mut().apply_settings(&Settings::default());
        let id = engine.try_drop_ball().unwrap();
        engine.resolve_ball(id);
        assert_eq!(audio.borrow().played(), 2);
    }
}
