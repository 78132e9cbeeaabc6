//! Block-rate voice configuration.
//!
//! [`ControlState`] is the configuration the renderer reads every block:
//! oscillator waveforms, semitone offsets, and the sync/ring switches.
//! It only changes between blocks, through a [`ControlUpdate`].
//!
//! A [`ControlUpdate`] is a sparse record. Each field is `Some` only if the
//! sender supplied a valid value for it, so applying an update touches
//! exactly the fields that were present and leaves everything else alone.
//!
//! ```rust
//! use pulse2_synth::{ControlState, ControlUpdate, Waveform};
//!
//! let mut state = ControlState::default();
//! state.apply(&ControlUpdate {
//!     osc2_kind: Some(Waveform::Square),
//!     sync: Some(true),
//!     ..ControlUpdate::default()
//! });
//!
//! assert_eq!(state.osc1_kind, Waveform::Saw);
//! assert_eq!(state.osc2_kind, Waveform::Square);
//! assert_eq!(state.osc2_semitones, 7);
//! assert!(state.sync);
//! ```

use crate::mixer::MixMode;
use crate::oscillator::Waveform;

/// Default osc2 offset: a perfect fifth above osc1.
pub const DEFAULT_OSC2_SEMITONES: i32 = 7;

/// Voice configuration sampled at block boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlState {
    /// Waveform of main oscillator 1
    pub osc1_kind: Waveform,
    /// Waveform of main oscillator 2
    pub osc2_kind: Waveform,
    /// Osc1 offset from the base frequency in semitones (unbounded)
    pub osc1_semitones: i32,
    /// Osc2 offset from the base frequency in semitones (unbounded)
    pub osc2_semitones: i32,
    /// Hard sync: osc2 restarts whenever osc1 wraps
    pub sync: bool,
    /// Ring modulation instead of the additive mix
    pub ring_mod: bool,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            osc1_kind: Waveform::Saw,
            osc2_kind: Waveform::Saw,
            osc1_semitones: 0,
            osc2_semitones: DEFAULT_OSC2_SEMITONES,
            sync: false,
            ring_mod: false,
        }
    }
}

impl ControlState {
    /// Overwrite every field present in `update`.
    pub fn apply(&mut self, update: &ControlUpdate) {
        if let Some(kind) = update.osc1_kind {
            self.osc1_kind = kind;
        }
        if let Some(kind) = update.osc2_kind {
            self.osc2_kind = kind;
        }
        if let Some(semis) = update.osc1_semitones {
            self.osc1_semitones = semis;
        }
        if let Some(semis) = update.osc2_semitones {
            self.osc2_semitones = semis;
        }
        if let Some(sync) = update.sync {
            self.sync = sync;
        }
        if let Some(ring) = update.ring_mod {
            self.ring_mod = ring;
        }
    }

    /// Mixer mode selected by the ring switch.
    pub const fn mix_mode(&self) -> MixMode {
        if self.ring_mod {
            MixMode::Ring
        } else {
            MixMode::Additive
        }
    }
}

/// Partial configuration update. `None` fields are left untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlUpdate {
    /// New osc1 waveform
    pub osc1_kind: Option<Waveform>,
    /// New osc2 waveform
    pub osc2_kind: Option<Waveform>,
    /// New osc1 semitone offset
    pub osc1_semitones: Option<i32>,
    /// New osc2 semitone offset
    pub osc2_semitones: Option<i32>,
    /// New hard sync switch
    pub sync: Option<bool>,
    /// New ring modulation switch
    pub ring_mod: Option<bool>,
}

impl ControlUpdate {
    /// `true` if no field is present.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        [
            self.osc1_kind.is_some(),
            self.osc2_kind.is_some(),
            self.osc1_semitones.is_some(),
            self.osc2_semitones.is_some(),
            self.sync.is_some(),
            self.ring_mod.is_some(),
        ]
        .into_iter()
        .filter(|&present| present)
        .count()
    }

    /// Fold a newer update into this one. Fields present in `newer` win.
    ///
    /// Applying the merged record has the same effect as applying `self`
    /// and then `newer`.
    pub fn merge(&mut self, newer: &ControlUpdate) {
        self.osc1_kind = newer.osc1_kind.or(self.osc1_kind);
        self.osc2_kind = newer.osc2_kind.or(self.osc2_kind);
        self.osc1_semitones = newer.osc1_semitones.or(self.osc1_semitones);
        self.osc2_semitones = newer.osc2_semitones.or(self.osc2_semitones);
        self.sync = newer.sync.or(self.sync);
        self.ring_mod = newer.ring_mod.or(self.ring_mod);
    }

    /// Update that sets every field to the values in `state`.
    pub fn from_state(state: &ControlState) -> Self {
        Self {
            osc1_kind: Some(state.osc1_kind),
            osc2_kind: Some(state.osc2_kind),
            osc1_semitones: Some(state.osc1_semitones),
            osc2_semitones: Some(state.osc2_semitones),
            sync: Some(state.sync),
            ring_mod: Some(state.ring_mod),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_factory_voice() {
        let state = ControlState::default();
        assert_eq!(state.osc1_kind, Waveform::Saw);
        assert_eq!(state.osc2_kind, Waveform::Saw);
        assert_eq!(state.osc1_semitones, 0);
        assert_eq!(state.osc2_semitones, 7);
        assert!(!state.sync);
        assert!(!state.ring_mod);
        assert_eq!(state.mix_mode(), MixMode::Additive);
    }

    #[test]
    fn empty_update_changes_nothing() {
        let mut state = ControlState::default();
        let update = ControlUpdate::default();
        assert!(update.is_empty());
        assert_eq!(update.len(), 0);
        state.apply(&update);
        assert_eq!(state, ControlState::default());
    }

    #[test]
    fn apply_touches_only_present_fields() {
        let mut state = ControlState::default();
        state.apply(&ControlUpdate {
            osc1_semitones: Some(-12),
            ring_mod: Some(true),
            ..ControlUpdate::default()
        });
        assert_eq!(state.osc1_semitones, -12);
        assert_eq!(state.osc2_semitones, 7);
        assert!(state.ring_mod);
        assert_eq!(state.mix_mode(), MixMode::Ring);
        assert!(!state.sync);
    }

    #[test]
    fn merge_keeps_older_fields_newer_wins() {
        let mut pending = ControlUpdate {
            osc1_kind: Some(Waveform::Triangle),
            sync: Some(true),
            ..ControlUpdate::default()
        };
        pending.merge(&ControlUpdate {
            osc1_kind: Some(Waveform::Square),
            osc2_semitones: Some(-5),
            ..ControlUpdate::default()
        });

        assert_eq!(pending.osc1_kind, Some(Waveform::Square));
        assert_eq!(pending.sync, Some(true));
        assert_eq!(pending.osc2_semitones, Some(-5));
        assert_eq!(pending.len(), 3);
    }

    #[test]
    fn merged_apply_equals_sequential_apply() {
        let first = ControlUpdate {
            osc1_kind: Some(Waveform::Triangle),
            osc1_semitones: Some(3),
            ..ControlUpdate::default()
        };
        let second = ControlUpdate {
            osc1_semitones: Some(12),
            ring_mod: Some(true),
            ..ControlUpdate::default()
        };

        let mut sequential = ControlState::default();
        sequential.apply(&first);
        sequential.apply(&second);

        let mut merged = first;
        merged.merge(&second);
        let mut once = ControlState::default();
        once.apply(&merged);

        assert_eq!(sequential, once);
    }

    #[test]
    fn from_state_roundtrips() {
        let state = ControlState {
            osc1_kind: Waveform::Square,
            osc2_kind: Waveform::Triangle,
            osc1_semitones: -24,
            osc2_semitones: 19,
            sync: true,
            ring_mod: true,
        };
        let mut target = ControlState::default();
        target.apply(&ControlUpdate::from_state(&state));
        assert_eq!(target, state);
    }
}
