//! Smoke particle simulation
//!
//! The system owns its particles and its random source. Each frame the
//! caller runs `spawn` then `update`, and the renderer reads `particles()`.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::smoke;

/// One visible smoke puff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmokeParticle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Radius, grows every update
    pub radius: f32,
    pub alpha: f32,
    /// Linear countdown from 1.0, independent of alpha
    pub life: f32,
    pub rotation: f32,
    /// Per-particle "puffiness" scaling growth, life decay and spin
    pub weight: f32,
}

impl SmokeParticle {
    /// Whether any removal criterion holds for a canvas of `width` pixels
    pub fn is_expired(&self, width: f32) -> bool {
        let out_of_bounds = self.y + self.radius < -smoke::MARGIN_TOP
            || self.x + self.radius < -smoke::MARGIN_X
            || self.x - self.radius > width + smoke::MARGIN_X;
        self.life <= 0.0 || self.alpha <= smoke::MIN_ALPHA || out_of_bounds
    }
}

/// Spawn and integration tuning for one scene variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmokeProfile {
    /// Initial radius: `min + U * span`
    pub radius: (f32, f32),
    /// Total angular spread around straight up, radians
    pub spread: f32,
    pub speed: (f32, f32),
    /// Additional upward kick on spawn
    pub lift: (f32, f32),
    pub alpha: (f32, f32),
    /// Constant horizontal drift acceleration, independent of wind
    pub drift: f32,
    /// Vertical acceleration (negative rises)
    pub buoyancy: f32,
    /// Growth per second: `base + scale * weight`
    pub growth: (f32, f32),
    pub alpha_decay: f32,
    /// Life decay per second: `base + scale * weight`
    pub life_decay: (f32, f32),
}

impl SmokeProfile {
    /// Exhaled smoke from the stick figure's mouth
    pub const FIGURE: Self = Self {
        radius: (3.0, 5.0),
        spread: 0.5,
        speed: (28.0, 35.0),
        lift: (10.0, 10.0),
        alpha: (0.16, 0.14),
        drift: 0.0,
        buoyancy: -8.0,
        growth: (10.0, 14.0),
        alpha_decay: 0.65,
        life_decay: (0.55, 0.2),
    };

    /// Side-stream smoke curling off a resting cigarette
    pub const CIGARETTE: Self = Self {
        radius: (4.0, 6.0),
        spread: 0.6,
        speed: (16.0, 26.0),
        lift: (6.0, 6.0),
        alpha: (0.14, 0.14),
        drift: 3.0,
        buoyancy: -10.0,
        growth: (10.0, 18.0),
        alpha_decay: 0.7,
        life_decay: (0.6, 0.2),
    };
}

impl Default for SmokeProfile {
    fn default() -> Self {
        Self::FIGURE
    }
}

/// Per-frame environment for `update`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmokeEnvironment {
    /// Signed wind strength, positive blows right
    pub wind: f32,
    pub width: f32,
}

pub struct SmokeSystem {
    particles: Vec<SmokeParticle>,
    profile: SmokeProfile,
    rng: StdRng,
}

impl SmokeSystem {
    pub fn new(profile: SmokeProfile) -> Self {
        Self::with_rng(profile, StdRng::from_entropy())
    }

    /// Reproducible system for tests and benchmarks
    pub fn seeded(profile: SmokeProfile, seed: u64) -> Self {
        Self::with_rng(profile, StdRng::seed_from_u64(seed))
    }

    fn with_rng(profile: SmokeProfile, rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            profile,
            rng,
        }
    }

    /// Switch tuning; live particles keep their state
    pub fn set_profile(&mut self, profile: SmokeProfile) {
        self.profile = profile;
    }

    pub fn particles(&self) -> &[SmokeParticle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Insert a fully specified particle
    pub fn push(&mut self, particle: SmokeParticle) {
        self.particles.push(particle);
        self.enforce_cap();
    }

    /// Emit `rate * dt` particles on average around `origin`.
    ///
    /// The whole part is emitted every call and the fractional remainder
    /// becomes one extra particle with matching probability, so fractional
    /// rates average out over many frames. Returns the number emitted.
    pub fn spawn(&mut self, rate: f32, dt: f32, origin: Vec2, wind: f32) -> usize {
        let count = emission_count(&mut self.rng, rate, dt);
        let p = self.profile;

        for _ in 0..count {
            let rng = &mut self.rng;
            let radius = p.radius.0 + unit(rng) * p.radius.1;
            let angle = -std::f32::consts::FRAC_PI_2 + (unit(rng) - 0.5) * p.spread;
            let speed = p.speed.0 + unit(rng) * p.speed.1;

            let particle = SmokeParticle {
                x: origin.x + (unit(rng) - 0.5) * smoke::SPAWN_JITTER,
                y: origin.y + (unit(rng) - 0.5) * smoke::SPAWN_JITTER,
                vx: angle.cos() * speed + wind * smoke::SPAWN_WIND,
                vy: angle.sin() * speed - (p.lift.0 + unit(rng) * p.lift.1),
                radius,
                alpha: p.alpha.0 + unit(rng) * p.alpha.1,
                life: 1.0,
                rotation: unit(rng) * std::f32::consts::TAU,
                weight: 0.6 + unit(rng) * 0.8,
            };
            self.particles.push(particle);
        }

        self.enforce_cap();
        count
    }

    /// Integrate every particle by `dt` seconds and drop the expired ones.
    pub fn update(&mut self, dt: f32, env: SmokeEnvironment) {
        let p = self.profile;

        self.particles.retain_mut(|s| {
            s.vx += (env.wind * smoke::WIND_ACCEL + p.drift) * dt;
            s.vy += p.buoyancy * dt;

            s.x += s.vx * dt;
            s.y += s.vy * dt;

            s.radius += (p.growth.0 + p.growth.1 * s.weight) * dt;
            s.alpha *= 1.0 - p.alpha_decay * dt;
            s.life -= (p.life_decay.0 + p.life_decay.1 * s.weight) * dt;

            s.rotation += (0.6 - s.weight) * dt;

            !s.is_expired(env.width)
        });
    }

    fn enforce_cap(&mut self) {
        if self.particles.len() > smoke::MAX_PARTICLES {
            let to_remove = self.particles.len() - smoke::MAX_PARTICLES;
            log::trace!("smoke cap reached, dropping {to_remove} oldest particles");
            self.particles.drain(0..to_remove);
        }
    }
}

impl Default for SmokeSystem {
    fn default() -> Self {
        Self::new(SmokeProfile::default())
    }
}

#[inline]
fn unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(0.0..1.0)
}

/// Unbiased stochastic rounding of `rate * dt`.
pub fn emission_count<R: Rng + ?Sized>(rng: &mut R, rate: f32, dt: f32) -> usize {
    let expected = (rate * dt).max(0.0);
    if !expected.is_finite() {
        return 0;
    }
    let whole = expected.floor();
    let remainder = expected - whole;
    let extra = unit(rng) < remainder;
    whole as usize + usize::from(extra)
}
