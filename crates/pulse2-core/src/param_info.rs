//! Parameter descriptors for control-rate inputs.
//!
//! Every control-rate input the voice accepts is described by a
//! [`ParamDescriptor`]: its display names, unit, range, default, and a stable
//! [`ParamId`]. The descriptor is the single source of truth for
//!
//! - **Range clamping**: hosts deliver values inside `[min, max]`
//! - **Fallbacks**: missing or non-finite values resolve to `default`
//! - **Discovery**: CLIs and GUIs enumerate descriptors to build controls
//!
//! # Example
//!
//! ```rust
//! use pulse2_core::{ParamDescriptor, ParamId};
//!
//! let detune = ParamDescriptor::cents("Osc2 Detune", "Detune", -100.0, 100.0, 0.0)
//!     .with_id(ParamId(202), "osc2_detune");
//!
//! assert_eq!(detune.clamp(250.0), 100.0);
//! assert_eq!(detune.sanitize(f32::NAN), 0.0);
//! ```
//!
//! # no_std Support
//!
//! This module is fully `no_std` compatible with no heap allocations required.

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Describes a single parameter's metadata for display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Base Frequency").
    pub name: &'static str,

    /// Short name for narrow displays, max 8 characters (e.g., "Freq").
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value for this parameter.
    pub min: f32,

    /// Maximum allowed value for this parameter.
    pub max: f32,

    /// Value used when the host supplies nothing usable.
    pub default: f32,

    /// Stable numeric ID. Default: `ParamId(0)` (unassigned).
    pub id: ParamId,

    /// Human-readable stable ID, e.g. `"osc1_gain"`. Default: `""`.
    pub string_id: &'static str,
}

impl ParamDescriptor {
    /// Frequency parameter in Hz.
    pub const fn frequency_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Hertz,
            min,
            max,
            default,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Pitch offset parameter in cents (100 cents = 1 semitone).
    pub const fn cents(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Cents,
            min,
            max,
            default,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Linear gain parameter in `[0, 1]`.
    pub const fn level(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: 1.0,
            default,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Dimensionless fraction with a custom range (duty cycle, blend).
    pub const fn fraction(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Sets the stable parameter ID and string ID.
    ///
    /// Builder pattern; call after a factory method.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pulse2_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::level("Gain", "Gain", 0.7);
    /// assert_eq!(desc.clamp(0.5), 0.5);
    /// assert_eq!(desc.clamp(-1.0), 0.0);
    /// assert_eq!(desc.clamp(3.0), 1.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Clamps a value into range, replacing NaN and infinities with the default.
    ///
    /// This is the boundary check applied to every control-rate value before
    /// it reaches the voice, so the voice never sees a non-finite input.
    #[inline]
    pub fn sanitize(&self, value: f32) -> f32 {
        if value.is_finite() {
            self.clamp(value)
        } else {
            self.default
        }
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Hertz (Hz) - for oscillator frequencies.
    Hertz,

    /// Cents - pitch offsets, 1200 per octave.
    Cents,

    /// No unit - gains, duty cycles, and other dimensionless values.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use pulse2_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::Cents.suffix(), " ct");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Hertz => " Hz",
            ParamUnit::Cents => " ct",
            ParamUnit::None => "",
        }
    }
}
