// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe definitions and the interpolation engine.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};
use crate::value::Value;

/// Spring physics parameters for [`InterpolationKind::Spring`].
///
/// Construct through [`SpringParams::new`], which rejects non-positive
/// stiffness or mass; the oscillator math is undefined there and would
/// otherwise surface as NaN mid-playback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SpringParamsDoc")]
pub struct SpringParams {
    stiffness: f64,
    damping: f64,
    mass: f64,
}

/// Raw spring fields as they appear on the wire, validated on conversion.
#[derive(Debug, Clone, Copy, Deserialize)]
struct SpringParamsDoc {
    stiffness: f64,
    damping: f64,
    #[serde(default = "default_mass")]
    mass: f64,
}

fn default_mass() -> f64 {
    1.0
}

impl TryFrom<SpringParamsDoc> for SpringParams {
    type Error = TimelineError;

    fn try_from(doc: SpringParamsDoc) -> Result<Self> {
        Self::new(doc.stiffness, doc.damping, doc.mass)
    }
}

impl SpringParams {
    /// Create validated spring parameters.
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> Result<Self> {
        if !stiffness.is_finite() || stiffness <= 0.0 {
            return Err(TimelineError::SpringConfig(format!(
                "stiffness must be a positive finite number, got {stiffness}"
            )));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(TimelineError::SpringConfig(format!(
                "mass must be a positive finite number, got {mass}"
            )));
        }
        Ok(Self {
            stiffness,
            damping,
            mass,
        })
    }

    /// Spring stiffness constant.
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Damping coefficient.
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Oscillating mass.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Closed-form damped-harmonic-oscillator displacement at normalized
    /// time `t`, rising from 0 toward 1.
    fn shape(&self, t: f64) -> f64 {
        let omega = (self.stiffness / self.mass).sqrt();
        let zeta = self.damping / (2.0 * (self.stiffness * self.mass).sqrt());
        if zeta < 1.0 {
            // Underdamped: oscillates around the target before settling.
            let wd = omega * (1.0 - zeta * zeta).sqrt();
            1.0 - (-zeta * omega * t).exp() * ((wd * t).cos() + (zeta * omega / wd) * (wd * t).sin())
        } else {
            // Critically damped or overdamped: monotonic approach.
            1.0 - (-omega * t).exp() * (1.0 + omega * t)
        }
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
        }
    }
}

/// Interpolation rule applied from a keyframe toward the next one.
///
/// Each variant carries only the payload relevant to that kind.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum InterpolationKind {
    /// Straight-line blend
    #[default]
    Linear,
    /// Quadratic acceleration from rest
    EaseIn,
    /// Quadratic deceleration into the target
    EaseOut,
    /// Cubic smoothstep
    EaseInOut,
    /// Hold the earlier value for the whole interval; no blend occurs
    Step,
    /// Cubic bezier shaped by two y-control values.
    ///
    /// The normalized time is used directly as the curve parameter; there is
    /// no x-axis inverse solve.
    CubicBezier {
        /// First y-control value
        y1: f64,
        /// Second y-control value
        y2: f64,
    },
    /// Damped spring physics
    Spring(SpringParams),
}

impl InterpolationKind {
    /// Validated spring interpolation constructor.
    pub fn spring(stiffness: f64, damping: f64, mass: f64) -> Result<Self> {
        Ok(Self::Spring(SpringParams::new(stiffness, damping, mass)?))
    }

    /// Wire name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease_in",
            Self::EaseOut => "ease_out",
            Self::EaseInOut => "ease_in_out",
            Self::Step => "step",
            Self::CubicBezier { .. } => "cubic_bezier",
            Self::Spring(_) => "spring",
        }
    }

    /// Map normalized time in `[0, 1]` to the blend factor for this kind.
    ///
    /// `Step` is handled before blending ever happens; its shape here is 0
    /// so a direct call still holds the earlier value.
    pub fn shape(&self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => t * t * (3.0 - 2.0 * t),
            Self::Step => 0.0,
            Self::CubicBezier { y1, y2 } => {
                let u = 1.0 - t;
                3.0 * u * u * t * y1 + 3.0 * u * t * t * y2 + t * t * t
            }
            Self::Spring(params) => params.shape(t),
        }
    }
}

/// A value anchored at a time, plus the rule for blending toward the next
/// anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time in seconds
    pub time: f64,
    /// Value at this keyframe
    pub value: Value,
    /// Interpolation rule toward the next keyframe
    pub interpolation: InterpolationKind,
}

impl Keyframe {
    /// Create a linear keyframe.
    pub fn new(time: f64, value: impl Into<Value>) -> Self {
        Self {
            time,
            value: value.into(),
            interpolation: InterpolationKind::Linear,
        }
    }

    /// Set the interpolation rule.
    pub fn with_interpolation(mut self, interpolation: InterpolationKind) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Blend this keyframe's value toward `next` at absolute time `t`.
    ///
    /// Zero-duration segments and `Step` hold this keyframe's value for the
    /// whole interval. Otherwise the normalized time is clamped to `[0, 1]`,
    /// shaped by the interpolation kind, and used to blend the two values
    /// elementwise.
    pub fn interpolate_to(&self, next: &Keyframe, t: f64) -> Value {
        let duration = next.time - self.time;
        if duration == 0.0 || matches!(self.interpolation, InterpolationKind::Step) {
            return self.value.clone();
        }
        let normalized = ((t - self.time) / duration).clamp(0.0, 1.0);
        let shaped = self.interpolation.shape(normalized);
        self.value.blend(&next.value, shaped)
    }
}
