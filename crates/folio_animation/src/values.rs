//! Animatable value types

use folio_core::document::ElementStyle;

/// Values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Blend from `self` to `other` by `t` (unclamped; overshoot easings pass `t > 1`)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Approximate equality for settling checks
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

impl Interpolate for ElementStyle {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        ElementStyle {
            // Opacity never overshoots
            opacity: self.opacity.lerp(&other.opacity, t).clamp(0.0, 1.0),
            translate_x: self.translate_x.lerp(&other.translate_x, t),
            translate_y: self.translate_y.lerp(&other.translate_y, t),
            scale: self.scale.lerp(&other.scale, t),
            rotate_x: self.rotate_x.lerp(&other.rotate_x, t),
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.opacity.approx_eq(&other.opacity, epsilon)
            && self.translate_x.approx_eq(&other.translate_x, epsilon)
            && self.translate_y.approx_eq(&other.translate_y, epsilon)
            && self.scale.approx_eq(&other.scale, epsilon)
            && self.rotate_x.approx_eq(&other.rotate_x, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_lerp_midpoint() {
        let from = ElementStyle::IDENTITY
            .with_opacity(0.0)
            .with_translate(0.0, 60.0);
        let mid = from.lerp(&ElementStyle::IDENTITY, 0.5);
        assert_eq!(mid.opacity, 0.5);
        assert_eq!(mid.translate_y, 30.0);
        assert_eq!(mid.scale, 1.0);
    }

    #[test]
    fn test_overshoot_keeps_opacity_in_range() {
        let from = ElementStyle::IDENTITY.with_opacity(0.0).with_scale(0.8);
        let over = from.lerp(&ElementStyle::IDENTITY, 1.1);
        assert_eq!(over.opacity, 1.0);
        assert!(over.scale > 1.0);
        assert!(over.approx_eq(&ElementStyle::IDENTITY.with_scale(1.02), 0.001));
    }
}
