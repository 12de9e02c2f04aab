//! Mass-spring cloth simulation.
//!
//! `drape` simulates a square sheet of unit-mass particles joined by
//! structural, shear and bend springs. Each step accumulates gravity, wind,
//! sphere push-back, floor friction and spring forces, optionally tears
//! overstretched springs, pins corners or an edge, and integrates with one of
//! four schemes before clamping the cloth above the floor.
//!
//! # Features
//!
//! - **Index-based topology**: springs hold particle indices, never pointers
//! - **Integrators**: symplectic Euler, Verlet, look-ahead backward, explicit Euler
//! - **Tearing**: springs rupture past a per-kind stretch ratio
//! - **Obstacles**: sphere push-back springs and a frictional floor
//! - **Backends**: sequential `CpuBackend`, rayon `ParallelBackend` (`parallel` feature)
//! - **Observable**: Monitor steps via the `StepObserver` trait and the `log` facade
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! ```
//! use drape::{ClothConfig, ClothSimulation, PinMode};
//!
//! let config: ClothConfig<f32> = ClothConfig::new()
//!     .with_half_width(8)
//!     .with_pin(PinMode::Corners);
//! let mut cloth = ClothSimulation::new(config).expect("valid config");
//! for _ in 0..30 {
//!     cloth.step();
//! }
//! assert!(cloth.is_finite());
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod spring;
pub mod collision;
pub mod field;
pub mod topology;
pub mod integrator;
pub mod backend;
pub mod cloth;
pub mod mesh;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use particle::Particle;
pub use spring::{SpringForce, SpringKind, GridCoord};
pub use collision::{Sphere, FLOOR_EPSILON};
pub use integrator::{Integrator, ForceSnapshot};
pub use backend::{SimulationBackend, CpuBackend};
#[cfg(feature = "parallel")]
pub use backend::ParallelBackend;
pub use cloth::ClothSimulation;
pub use mesh::Triangle;
pub use config::{ClothConfig, ClothLayout, PinMode};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::PhysicsError;
