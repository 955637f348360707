//! Spring physics
//!
//! RK4-integrated springs drive the navigation indicator so it glides to the
//! active link and picks up velocity when the target changes mid-flight.

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Soft spring with a little overshoot
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Bouncy spring for playful accents
    pub fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Stiff spring, barely oscillates
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Nav indicator motion: settles in roughly a third of a second
    pub fn indicator() -> Self {
        Self::new(380.0, 30.0, 1.0)
    }

    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::indicator()
    }
}

/// Single-axis spring
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Distance (px) below which the spring counts as arrived
    pub const REST_DISTANCE: f32 = 0.5;
    /// Speed (px/s) below which the spring counts as still
    pub const REST_VELOCITY: f32 = 5.0;

    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retarget without resetting velocity
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump straight to `value` and rest there
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < Self::REST_DISTANCE
            && self.velocity.abs() < Self::REST_VELOCITY
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.snap_to(self.target);
            return;
        }

        let (x, v) = (self.value, self.velocity);
        let half = dt * 0.5;

        let a1 = self.acceleration(x, v);
        let a2 = self.acceleration(x + v * half, v + a1 * half);
        let v2 = v + a1 * half;
        let a3 = self.acceleration(x + v2 * half, v + a2 * half);
        let v3 = v + a2 * half;
        let a4 = self.acceleration(x + v3 * dt, v + a3 * dt);
        let v4 = v + a3 * dt;

        self.velocity += (a1 + 2.0 * a2 + 2.0 * a3 + a4) * dt / 6.0;
        self.value += (v + 2.0 * v2 + 2.0 * v3 + v4) * dt / 6.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let pull = -self.config.stiffness * (x - self.target);
        let drag = -self.config.damping * v;
        (pull + drag) / self.config.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settles_on_target() {
        let mut spring = Spring::new(SpringConfig::indicator(), 0.0);
        spring.set_target(240.0);

        for _ in 0..120 {
            spring.step(1.0 / 60.0);
        }

        assert!(spring.is_settled());
        assert_eq!(spring.value(), 240.0);
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let mut spring = Spring::new(SpringConfig::wobbly(), 0.0);
        spring.set_target(100.0);
        for _ in 0..10 {
            spring.step(1.0 / 60.0);
        }

        let velocity = spring.velocity();
        assert!(velocity > 0.0);
        spring.set_target(20.0);
        assert_eq!(spring.velocity(), velocity);
    }

    #[test]
    fn test_large_steps_stay_bounded() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(1000.0);
        for _ in 0..100 {
            spring.step(0.1);
            assert!(spring.value() < 2000.0 && spring.value() > -500.0);
        }
    }

    #[test]
    fn test_snap_to_rests_immediately() {
        let mut spring = Spring::new(SpringConfig::gentle(), 0.0);
        spring.set_target(50.0);
        spring.step(1.0 / 60.0);
        spring.snap_to(80.0);
        assert!(spring.is_settled());
        assert_eq!(spring.value(), 80.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn test_presets_underdamped() {
        assert!(SpringConfig::gentle().is_underdamped());
        assert!(SpringConfig::wobbly().is_underdamped());
        assert!(SpringConfig::indicator().is_underdamped());
    }
}
