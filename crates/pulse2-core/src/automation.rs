//! Control-rate parameter inputs.
//!
//! A host hands the voice one slice per parameter for every block. The slice
//! is either a single constant (length 1) or a dense automation lane with one
//! value per sample. [`ParamInput`] resolves either shape to the value for a
//! given sample index without interpolation: each index is authoritative for
//! its own sample.
//!
//! ```rust
//! use pulse2_core::{ParamDescriptor, ParamInput};
//!
//! let gain = ParamDescriptor::level("Gain", "Gain", 0.7);
//!
//! let constant = ParamInput::new(&[0.25]);
//! assert_eq!(constant.value_at(0, &gain), 0.25);
//! assert_eq!(constant.value_at(511, &gain), 0.25);
//!
//! let lane = [0.0, 0.5, 1.0];
//! let dense = ParamInput::new(&lane);
//! assert_eq!(dense.value_at(1, &gain), 0.5);
//! ```

use crate::ParamDescriptor;

/// One block's worth of a single control-rate parameter.
///
/// Borrowed for the duration of one render call, so the host cannot mutate
/// it mid-block. The default is an empty input, which resolves to the
/// descriptor's default.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParamInput<'a> {
    values: &'a [f32],
}

impl<'a> ParamInput<'a> {
    /// Wrap a constant (length 1) or a per-sample lane.
    pub const fn new(values: &'a [f32]) -> Self {
        Self { values }
    }

    /// The raw values as supplied by the host.
    pub const fn values(&self) -> &'a [f32] {
        self.values
    }

    /// `true` if this input carries a single value for the whole block.
    pub const fn is_constant(&self) -> bool {
        self.values.len() <= 1
    }

    /// Raw value for sample `index` before range checks.
    ///
    /// - length 1: always that value
    /// - otherwise: `values[index]`, holding the last value past the end
    /// - empty: `None`
    #[inline]
    pub fn raw_at(&self, index: usize) -> Option<f32> {
        match self.values {
            [] => None,
            [single] => Some(*single),
            lane => Some(lane[index.min(lane.len() - 1)]),
        }
    }

    /// Value for sample `index`, clamped into the descriptor's range.
    ///
    /// Missing or non-finite values resolve to the descriptor's default.
    #[inline]
    pub fn value_at(&self, index: usize, desc: &ParamDescriptor) -> f32 {
        match self.raw_at(index) {
            Some(v) => desc.sanitize(v),
            None => desc.default,
        }
    }
}

impl<'a> From<&'a [f32]> for ParamInput<'a> {
    fn from(values: &'a [f32]) -> Self {
        Self::new(values)
    }
}

impl<'a, const N: usize> From<&'a [f32; N]> for ParamInput<'a> {
    fn from(values: &'a [f32; N]) -> Self {
        Self::new(values)
    }
}
