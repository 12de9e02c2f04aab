//! Configuration types for the cloth simulation.

use crate::collision::Sphere;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::integrator::Integrator;
use alloc::vec::Vec as AllocVec;

/// Which particles are held in place every step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PinMode {
    /// Free-floating cloth.
    None,
    /// The four grid corners.
    #[default]
    Corners,
    /// The whole first row.
    Side,
}

/// Initial arrangement of the particle grid.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum ClothLayout<F: Float> {
    /// A horizontal sheet at the configured height.
    #[default]
    Flat,
    /// Rows past the middle are folded back over the first half, `lift` higher.
    Folded { lift: F },
}

/// Configuration for a [`ClothSimulation`](crate::cloth::ClothSimulation).
///
/// Read once at construction. Defaults describe a 61x61 sheet pinned at the
/// corners and integrated with symplectic Euler at 60 Hz.
///
/// # Builder Pattern
/// ```
/// use drape::config::{ClothConfig, PinMode};
/// use drape::Integrator;
///
/// let config: ClothConfig<f32> = ClothConfig::new()
///     .with_half_width(10)
///     .with_stiffness(60.0)
///     .with_pin(PinMode::Side)
///     .with_integrator(Integrator::Verlet)
///     .with_wind(true);
/// assert_eq!(config.dimension(), 21);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ClothConfig<F: Float> {
    /// Grid half width; the grid is `2 * half_width + 1` particles square.
    pub half_width: usize,
    /// Height of the sheet's center above the floor. Default: 10.
    pub height: F,
    /// Distance between neighbouring particles. Default: 7.5 / half_width.
    pub spacing: F,
    pub layout: ClothLayout<F>,
    /// Time step in seconds. Default: 1/60.
    pub dt: F,
    /// Velocity damping factor applied by every integrator. Default: 0.98.
    pub damping: F,
    /// Gravitational acceleration magnitude (pointing down -y). Default: 9.8.
    pub gravity: F,
    /// Floor friction coefficient. Default: 0.5.
    pub friction: F,
    /// Cloth spring stiffness `ks`. Default: 100.
    pub stiffness: F,
    /// Cloth spring damping `kd`. Default: derived from `ks`.
    pub damping_coefficient: F,
    /// Base stiffness of the sphere push-back springs. Default: 40.
    pub sphere_stiffness: F,
    pub spheres: AllocVec<Sphere<F>>,
    pub wind: bool,
    pub tearing: bool,
    pub pin: PinMode,
    /// Also zero the velocity of pinned particles. Default: true.
    pub freeze_pinned: bool,
    pub integrator: Integrator,
    /// Steps simulated ahead by [`Integrator::Backward`]. Default: 1.
    pub lookahead_steps: usize,
    /// Scan positions after each step and report non-finite values.
    pub check_finite: bool,
    /// Seed for a random lift of up to 0.4 per particle. `None` keeps the
    /// sheet level.
    pub height_jitter: Option<u64>,
}

/// Damping coefficient used for a given stiffness: high enough to settle,
/// lowered by a factor of three per 500 units of `ks`.
///
/// A non-finite `stiffness` is passed through for [`ClothConfig::validate`]
/// to reject.
pub fn derived_damping_coefficient<F: Float>(stiffness: F) -> F {
    if !stiffness.is_finite() {
        return stiffness;
    }
    let steps = (stiffness / F::from_f64(500.0)).floor();
    if steps <= F::zero() {
        return stiffness / F::from_f64(100.0);
    }
    stiffness / F::from_f64(100.0) / F::from_f64(3.0).pow(steps)
}

impl<F: Float> ClothConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        let half_width = 30;
        let stiffness = F::from_f64(100.0);
        ClothConfig {
            half_width,
            height: F::from_f64(10.0),
            spacing: F::from_f64(7.5) / F::from_usize(half_width),
            layout: ClothLayout::Flat,
            dt: F::one() / F::from_f64(60.0),
            damping: F::from_f64(0.98),
            gravity: F::from_f64(9.8),
            friction: F::from_f64(0.5),
            stiffness,
            damping_coefficient: derived_damping_coefficient(stiffness),
            sphere_stiffness: F::from_f64(40.0),
            spheres: AllocVec::new(),
            wind: false,
            tearing: false,
            pin: PinMode::Corners,
            freeze_pinned: true,
            integrator: Integrator::Symplectic,
            lookahead_steps: 1,
            check_finite: false,
            height_jitter: None,
        }
    }

    /// Number of particles along each side of the grid.
    pub fn dimension(&self) -> usize {
        2 * self.half_width + 1
    }

    /// Set the grid half width. Keeps the sheet's overall extent by
    /// rescaling the spacing.
    pub fn with_half_width(mut self, half_width: usize) -> Self {
        let extent = self.spacing * F::from_usize(self.half_width);
        self.half_width = half_width;
        if half_width > 0 {
            self.spacing = extent / F::from_usize(half_width);
        }
        self
    }

    pub fn with_spacing(mut self, spacing: F) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_height(mut self, height: F) -> Self {
        self.height = height;
        self
    }

    pub fn with_layout(mut self, layout: ClothLayout<F>) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_dt(mut self, dt: F) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_friction(mut self, friction: F) -> Self {
        self.friction = friction;
        self
    }

    /// Set `ks` and re-derive `kd` from it.
    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self.damping_coefficient = derived_damping_coefficient(stiffness);
        self
    }

    /// Override the derived `kd`. Call after [`ClothConfig::with_stiffness`].
    pub fn with_damping_coefficient(mut self, damping_coefficient: F) -> Self {
        self.damping_coefficient = damping_coefficient;
        self
    }

    pub fn with_sphere_stiffness(mut self, sphere_stiffness: F) -> Self {
        self.sphere_stiffness = sphere_stiffness;
        self
    }

    pub fn with_sphere(mut self, sphere: Sphere<F>) -> Self {
        self.spheres.push(sphere);
        self
    }

    pub fn with_wind(mut self, wind: bool) -> Self {
        self.wind = wind;
        self
    }

    pub fn with_tearing(mut self, tearing: bool) -> Self {
        self.tearing = tearing;
        self
    }

    pub fn with_pin(mut self, pin: PinMode) -> Self {
        self.pin = pin;
        self
    }

    pub fn with_freeze_pinned(mut self, freeze_pinned: bool) -> Self {
        self.freeze_pinned = freeze_pinned;
        self
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_lookahead_steps(mut self, lookahead_steps: usize) -> Self {
        self.lookahead_steps = lookahead_steps;
        self
    }

    pub fn with_check_finite(mut self, check_finite: bool) -> Self {
        self.check_finite = check_finite;
        self
    }

    /// Lift each particle by a random amount drawn from an rng seeded with `seed`.
    pub fn with_height_jitter(mut self, seed: u64) -> Self {
        self.height_jitter = Some(seed);
        self
    }

    /// Reject configurations the engine cannot build a grid from.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        let particle_count = self
            .half_width
            .checked_mul(2)
            .and_then(|w| w.checked_add(1))
            .and_then(|n| n.checked_mul(n));
        if self.half_width == 0 || particle_count.is_none() {
            return Err(PhysicsError::InvalidGridDimensions);
        }
        if !(self.dt > F::zero() && self.dt.is_finite()) {
            return Err(PhysicsError::InvalidTimeStep);
        }
        if !(self.damping > F::zero() && self.damping <= F::one()) {
            return Err(PhysicsError::InvalidDamping);
        }
        let coefficients = [self.stiffness, self.damping_coefficient, self.sphere_stiffness];
        if coefficients.iter().any(|&k| !(k >= F::zero() && k.is_finite())) {
            return Err(PhysicsError::InvalidStiffness);
        }
        if !(self.spacing > F::zero() && self.spacing.is_finite()) {
            return Err(PhysicsError::InvalidSpacing);
        }
        for (index, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius > F::zero() && sphere.radius.is_finite() && sphere.center.is_finite()) {
                return Err(PhysicsError::InvalidSphere { index });
            }
        }
        if self.integrator == Integrator::Backward && self.lookahead_steps == 0 {
            return Err(PhysicsError::InvalidLookahead);
        }
        Ok(())
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
