//! Per-particle forces: gravity, wind, sphere push-back and floor friction.

use crate::collision::{floor_friction, on_floor, sphere_push_back, sphere_stiffness, Sphere};
use crate::config::ClothConfig;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;

/// Peak wind strength before the gust envelope is applied.
const WIND_STRENGTH: f64 = 7.0;

pub fn gravity<F: Float>(magnitude: F) -> Vec3<F> {
    Vec3::new(F::zero(), -magnitude, F::zero())
}

/// Gusting wind along +x at `position` and simulated time `time`.
///
/// The gust envelope `cos(10t) + 1` pulses the whole field; the spatial term
/// ripples along z and y so the cloth flutters instead of translating.
pub fn wind<F: Float>(position: Vec3<F>, time: F) -> Vec3<F> {
    let five_t = F::from_f64(5.0) * time;
    let gust = (F::from_f64(10.0) * time).cos() + F::one();
    let ripple = ((position.z + five_t).sin() + (position.y + five_t).cos() / F::from_f64(3.0)).abs();
    Vec3::new(F::from_f64(WIND_STRENGTH) * gust * ripple, F::zero(), F::zero())
}

/// Everything a particle needs to accumulate its non-spring forces.
///
/// Depends on no other particle, so backends may apply it in any order.
#[derive(Clone, Debug)]
pub struct ForceField<'a, F: Float> {
    pub gravity: F,
    pub wind: bool,
    pub time: F,
    pub friction: F,
    pub spheres: &'a [Sphere<F>],
    pub sphere_stiffness: F,
    pub half_width: usize,
}

impl<'a, F: Float> ForceField<'a, F> {
    pub fn from_config(config: &'a ClothConfig<F>, time: F) -> Self {
        ForceField {
            gravity: config.gravity,
            wind: config.wind,
            time,
            friction: config.friction,
            spheres: &config.spheres,
            sphere_stiffness: sphere_stiffness(config.sphere_stiffness, config.stiffness),
            half_width: config.half_width,
        }
    }

    /// Clear the accumulator, then add gravity, wind, push-back and friction.
    pub fn apply(&self, particle: &mut Particle<F>) {
        particle.clear_force();
        particle.add_force(gravity(self.gravity));
        if self.wind {
            particle.add_force(wind(particle.position, self.time));
        }
        for sphere in self.spheres {
            if let Some(push) = sphere_push_back(particle, sphere, self.sphere_stiffness, self.half_width) {
                particle.add_force(push);
            }
        }
        if on_floor(particle) {
            particle.add_force(floor_friction(particle, self.friction));
        }
    }
}
