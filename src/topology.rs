//! One-shot construction of the cloth grid: particle layout and springs.

use crate::config::{ClothConfig, ClothLayout};
use crate::float::Float;
use crate::particle::Particle;
use crate::spring::{GridCoord, SpringForce, SpringKind};
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Stretch ratio at which structural springs rupture.
pub const STRUCTURAL_TEAR_RATIO: f64 = 2.0;
/// Stretch ratio at which shear springs rupture.
pub const SHEAR_TEAR_RATIO: f64 = 2.0;
/// Stretch ratio at which bend springs rupture.
pub const BEND_TEAR_RATIO: f64 = 4.0;

/// Largest random lift applied by [`ClothConfig::height_jitter`].
pub const MAX_HEIGHT_JITTER: f64 = 0.4;

/// Place `N x N` particles, row-major, centered at `(0, height, 0)`.
///
/// Rows run along x, columns along z. Row 0 is at `x = -half_width * spacing`.
pub fn build_particles<F: Float>(config: &ClothConfig<F>) -> AllocVec<Particle<F>> {
    let n = config.dimension();
    let r = config.half_width;
    let mut jitter = config.height_jitter.map(SmallRng::seed_from_u64);
    let mut particles = AllocVec::with_capacity(n * n);

    let offset = |i: usize| config.spacing * (F::from_usize(i) - F::from_usize(r));
    for row in 0..n {
        for col in 0..n {
            let x = offset(row);
            let z = offset(col);
            let y = match jitter.as_mut() {
                Some(rng) => config.height + F::from_f64(rng.gen::<f64>() * MAX_HEIGHT_JITTER),
                None => config.height,
            };
            let position = match config.layout {
                ClothLayout::Folded { lift } if row > r => Vec3::new(-x, y + lift, z),
                _ => Vec3::new(x, y, z),
            };
            particles.push(Particle::new(position));
        }
    }

    particles
}

/// Generate every structural, bend and shear spring of an `N x N` grid.
///
/// Loops stop at the grid edges, so every index is in range.
/// Counts: structural `2N(N-1)`, bend `2N(N-2)`, shear `2(N-1)^2`.
pub fn build_springs<F: Float>(config: &ClothConfig<F>) -> AllocVec<SpringForce<F>> {
    let n = config.dimension();
    let spacing = config.spacing;
    let ks = config.stiffness;
    let kd = config.damping_coefficient;
    let tear = |ratio: f64| F::from_f64(ratio);
    let edge = n.saturating_sub(1);
    let mut springs = AllocVec::with_capacity(2 * n * edge + 2 * n * n.saturating_sub(2) + 2 * edge * edge);

    let diag_length = (spacing * spacing + spacing * spacing).sqrt();
    let bend_length = spacing * F::two();

    for row in 0..n {
        for col in 0..n {
            let here = GridCoord::new(row, col);

            // Structural: next row, next column
            if row + 1 < n {
                springs.push(SpringForce::new(
                    SpringKind::Structural,
                    [here, GridCoord::new(row + 1, col)],
                    n, spacing, ks, kd, tear(STRUCTURAL_TEAR_RATIO),
                ));
            }
            if col + 1 < n {
                springs.push(SpringForce::new(
                    SpringKind::Structural,
                    [here, GridCoord::new(row, col + 1)],
                    n, spacing, ks, kd, tear(STRUCTURAL_TEAR_RATIO),
                ));
            }

            // Bend: skip-one row, skip-one column. Softer spring, heavier damping.
            if row + 2 < n {
                springs.push(SpringForce::new(
                    SpringKind::Bend,
                    [here, GridCoord::new(row + 2, col)],
                    n, bend_length, ks / F::two(), kd * F::two(), tear(BEND_TEAR_RATIO),
                ));
            }
            if col + 2 < n {
                springs.push(SpringForce::new(
                    SpringKind::Bend,
                    [here, GridCoord::new(row, col + 2)],
                    n, bend_length, ks / F::two(), kd * F::two(), tear(BEND_TEAR_RATIO),
                ));
            }

            // Shear: both diagonals of the quad whose top-left corner is here
            if row + 1 < n && col + 1 < n {
                springs.push(SpringForce::new(
                    SpringKind::Shear,
                    [here, GridCoord::new(row + 1, col + 1)],
                    n, diag_length, ks, kd, tear(SHEAR_TEAR_RATIO),
                ));
                springs.push(SpringForce::new(
                    SpringKind::Shear,
                    [GridCoord::new(row, col + 1), GridCoord::new(row + 1, col)],
                    n, diag_length, ks, kd, tear(SHEAR_TEAR_RATIO),
                ));
            }
        }
    }

    springs
}

/// Indices of the four grid corners.
pub fn corner_indices(n: usize) -> [usize; 4] {
    [0, n - 1, n * (n - 1), n * n - 1]
}
