//! Easing curves
//!
//! Each curve maps normalized time `t` in `[0, 1]` to eased progress. Curves
//! pin `0 -> 0` and `1 -> 1`; overshooting curves (`BackOut`, `ElasticOut`)
//! may leave `[0, 1]` in between.
//!
//! Names parse from the tween-library notation used in section configs:
//! `"power2.out"`, `"back.out(1.7)"`, `"elastic.out(1, 0.5)"`.

use crate::error::AnimationError;
use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic ease-in (`power1.in`)
    EaseIn,
    /// Quadratic ease-out (`power1.out`)
    EaseOut,
    /// Quadratic ease-in-out (`power1.inOut`)
    EaseInOut,
    /// Cubic ease-in (`power2.in`)
    CubicIn,
    /// Cubic ease-out (`power2.out`)
    CubicOut,
    /// Cubic ease-in-out (`power2.inOut`)
    CubicInOut,
    /// Overshoot then settle; the parameter is the overshoot strength
    BackOut(f32),
    /// Decaying oscillation around the end value
    ElasticOut { amplitude: f32, period: f32 },
}

impl Easing {
    /// `back.out(1.7)`
    pub const BACK_OUT: Easing = Easing::BackOut(1.70158);

    /// `elastic.out(1, 0.3)`
    pub const ELASTIC_OUT: Easing = Easing::ElasticOut {
        amplitude: 1.0,
        period: 0.3,
    };

    /// Eased progress for normalized time `t`
    pub fn apply(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::BackOut(overshoot) => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u * u * u + overshoot * u * u
            }
            Easing::ElasticOut { amplitude, period } => {
                let amplitude = amplitude.max(1.0);
                let period = period.max(f32::EPSILON);
                let shift = period / (2.0 * PI) * (1.0 / amplitude).asin();
                amplitude * 2f32.powf(-10.0 * t) * ((t - shift) * 2.0 * PI / period).sin() + 1.0
            }
        }
    }

    /// Whether the curve can leave `[0, 1]`
    pub fn overshoots(&self) -> bool {
        matches!(self, Easing::BackOut(_) | Easing::ElasticOut { .. })
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => write!(f, "none"),
            Easing::EaseIn => write!(f, "power1.in"),
            Easing::EaseOut => write!(f, "power1.out"),
            Easing::EaseInOut => write!(f, "power1.inOut"),
            Easing::CubicIn => write!(f, "power2.in"),
            Easing::CubicOut => write!(f, "power2.out"),
            Easing::CubicInOut => write!(f, "power2.inOut"),
            Easing::BackOut(s) => write!(f, "back.out({})", s),
            Easing::ElasticOut { amplitude, period } => {
                write!(f, "elastic.out({}, {})", amplitude, period)
            }
        }
    }
}

/// Parse the comma separated arguments of `name(a, b)`
fn parse_args(args: &str, expected_max: usize) -> Option<Vec<f32>> {
    let values: Option<Vec<f32>> = args
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<f32>().ok())
        .collect();
    values.filter(|v| v.len() <= expected_max)
}

impl FromStr for Easing {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let (base, args) = match name.find('(') {
            Some(open) if name.ends_with(')') => (&name[..open], Some(&name[open + 1..name.len() - 1])),
            Some(_) => return Err(AnimationError::UnknownEasing(s.to_string())),
            None => (name, None),
        };

        let easing = match (base, args) {
            ("none" | "linear", None) => Easing::Linear,
            ("power1.in" | "ease-in", None) => Easing::EaseIn,
            ("power1.out" | "ease-out", None) => Easing::EaseOut,
            ("power1.inOut" | "ease-in-out", None) => Easing::EaseInOut,
            ("power2.in", None) => Easing::CubicIn,
            ("power2.out", None) => Easing::CubicOut,
            ("power2.inOut", None) => Easing::CubicInOut,
            ("back.out", args) => {
                let values = match args {
                    Some(args) => parse_args(args, 1)
                        .ok_or_else(|| AnimationError::UnknownEasing(s.to_string()))?,
                    None => Vec::new(),
                };
                Easing::BackOut(values.first().copied().unwrap_or(1.70158))
            }
            ("elastic.out", args) => {
                let values = match args {
                    Some(args) => parse_args(args, 2)
                        .ok_or_else(|| AnimationError::UnknownEasing(s.to_string()))?,
                    None => Vec::new(),
                };
                Easing::ElasticOut {
                    amplitude: values.first().copied().unwrap_or(1.0),
                    period: values.get(1).copied().unwrap_or(0.3),
                }
            }
            _ => return Err(AnimationError::UnknownEasing(s.to_string())),
        };
        Ok(easing)
    }
}
