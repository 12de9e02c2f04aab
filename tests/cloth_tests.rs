use drape::{
    ClothConfig, ClothSimulation, Integrator, Particle, PinMode, Sphere, StepObserver, Vec3,
    FLOOR_EPSILON,
};

fn small(half_width: usize) -> ClothConfig<f32> {
    ClothConfig::new().with_half_width(half_width)
}

/// Records, for every step, whether the watched particles had zero force
/// at the end of the force pass.
struct PinWatch {
    watched: Vec<usize>,
    held: Vec<bool>,
}

impl StepObserver<f32> for PinWatch {
    fn on_forces_accumulated(&mut self, particles: &[Particle<f32>]) {
        let all_zero = self.watched.iter().all(|&i| particles[i].force == Vec3::zero());
        self.held.push(all_zero);
    }
}

#[test]
fn corner_pin_zeroes_force_every_step() {
    let config = small(5)
        .with_pin(PinMode::Corners)
        .with_wind(true)
        .with_sphere(Sphere::new(Vec3::new(0.0, 8.0, 0.0), 1.5));
    let mut cloth = ClothSimulation::new(config).expect("valid config");
    let n = cloth.dimension();
    let mut watch = PinWatch { watched: vec![0, n - 1, n * (n - 1), n * n - 1], held: Vec::new() };

    for _ in 0..100 {
        cloth.step_with(&mut watch);
    }

    assert_eq!(watch.held.len(), 100);
    assert!(watch.held.iter().all(|&h| h), "a corner carried force into integration");
}

#[test]
fn corner_pin_holds_corners_in_place() {
    let mut cloth = ClothSimulation::new(small(5).with_pin(PinMode::Corners)).expect("valid config");
    let before: Vec<_> = cloth.pinned().iter().map(|&i| cloth.particles()[i].position).collect();

    for _ in 0..120 {
        cloth.step();
    }

    for (&i, start) in cloth.pinned().iter().zip(&before) {
        assert_eq!(cloth.particles()[i].position, *start, "corner {} moved", i);
    }
    let n = cloth.dimension();
    let center = cloth.particle(n / 2, n / 2).position.y;
    assert!(center < cloth.config().height, "center should sag under gravity, y = {}", center);
}

#[test]
fn side_pin_holds_first_row() {
    let mut cloth = ClothSimulation::new(small(4).with_pin(PinMode::Side)).expect("valid config");
    let n = cloth.dimension();
    let top: Vec<_> = (0..n).map(|c| cloth.particle(0, c).position).collect();
    let bottom_start = cloth.particle(n - 1, 0).position.y;

    for _ in 0..120 {
        cloth.step();
    }

    for col in 0..n {
        assert_eq!(cloth.particle(0, col).position, top[col], "row 0 col {} moved", col);
    }
    assert!(cloth.particle(n - 1, 0).position.y < bottom_start, "far edge should drop");
}

#[test]
fn force_only_pin_keeps_prior_velocity() {
    let config = small(3).with_pin(PinMode::Corners).with_freeze_pinned(false);
    let mut cloth = ClothSimulation::new(config).expect("valid config");
    cloth.particle_mut(0, 0).velocity = Vec3::new(1.0, 0.0, 0.0);
    let start = cloth.particle(0, 0).position;

    cloth.step();

    let corner = cloth.particle(0, 0);
    assert!(corner.position.x > start.x, "unfrozen pin should drift with its old velocity");
    assert_eq!(corner.force, Vec3::zero());
}

#[test]
fn free_cloth_falls_to_floor_and_stays_above_it() {
    let config = small(3).with_pin(PinMode::None).with_height(0.5);
    let mut cloth = ClothSimulation::new(config).expect("valid config");

    for _ in 0..240 {
        cloth.step();
        for p in cloth.particles() {
            assert!(p.position.y >= FLOOR_EPSILON, "particle below floor: {:?}", p.position);
        }
    }

    assert!(cloth.particles().iter().any(|p| p.position.y == FLOOR_EPSILON));
}

#[test]
fn floor_clamp_is_exact_and_keeps_horizontal_position() {
    let config = small(2).with_pin(PinMode::None).with_integrator(Integrator::Forward);
    let mut cloth = ClothSimulation::new(config).expect("valid config");
    cloth.accumulate_forces();
    {
        let p = cloth.particle_mut(1, 1);
        p.position.y = -1.0;
        p.velocity = Vec3::zero();
    }
    let before = cloth.particle(1, 1).position;

    cloth.integrate();

    let after = cloth.particle(1, 1).position;
    assert_eq!(after.y, FLOOR_EPSILON);
    assert_eq!(after.x, before.x);
    assert_eq!(after.z, before.z);
}

#[test]
fn particle_inside_sphere_is_pushed_outward() {
    let radius = 2.0;
    let config = small(4)
        .with_pin(PinMode::None)
        .with_gravity(0.0)
        .with_height(0.5)
        .with_sphere(Sphere::new(Vec3::zero(), radius));
    let mut cloth = ClothSimulation::new(config).expect("valid config");

    cloth.accumulate_forces();

    let mut inside = 0;
    for p in cloth.particles() {
        if p.position.length() < radius {
            inside += 1;
            let radial = p.force.dot(p.position.normalize());
            assert!(radial > 0.0, "force {:?} at {:?} points inward", p.force, p.position);
        }
    }
    assert!(inside > 0, "scene should put particles inside the sphere");
}

#[test]
fn cloth_drapes_over_sphere() {
    let sphere = Sphere::new(Vec3::new(0.0, 1.5, 0.0), 1.5);
    let config = small(12)
        .with_spacing(0.25)
        .with_pin(PinMode::None)
        .with_height(5.0)
        .with_sphere(sphere);
    let mut cloth = ClothSimulation::new(config).expect("valid config");
    for _ in 0..240 {
        cloth.step();
    }
    let n = cloth.dimension();
    let center = cloth.particle(n / 2, n / 2).position;
    let corner = cloth.particle(0, 0).position.y;
    let resting = cloth.particles().iter().filter(|p| p.position.distance(sphere.center) < 2.0 * sphere.radius).count();
    assert!(cloth.is_finite());
    assert!(center.y > sphere.center.y + 1.0, "center should rest on top of the sphere, y = {}", center.y);
    assert!(center.y > corner, "center ({}) should rest above the corners ({})", center.y, corner);
    assert!(resting > 9, "only {} particles rest on the sphere", resting);
}

#[test]
fn wind_pushes_along_x() {
    let config = small(3).with_pin(PinMode::None).with_gravity(0.0).with_wind(true);
    let mut cloth = ClothSimulation::new(config).expect("valid config");
    let start: f32 = cloth.particles().iter().map(|p| p.position.x).sum();
    for _ in 0..20 {
        cloth.step();
    }
    let end: f32 = cloth.particles().iter().map(|p| p.position.x).sum();
    assert!(end > start, "mean x should increase: {} -> {}", start, end);
}

#[test]
fn reset_restores_rest_state_and_is_idempotent() {
    let config = small(3).with_wind(true);
    let mut cloth = ClothSimulation::new(config).expect("valid config");
    let rest = cloth.particles().to_vec();
    for _ in 0..50 {
        cloth.step();
    }
    assert_ne!(cloth.particles(), &rest[..]);

    cloth.reset();
    for p in cloth.particles() {
        assert_eq!(p.position, p.rest_position);
        assert_eq!(p.velocity, Vec3::zero());
        assert_eq!(p.force, Vec3::zero());
    }
    assert_eq!(cloth.particles(), &rest[..]);
    assert_eq!(cloth.time(), 0.0);

    let once = cloth.particles().to_vec();
    cloth.reset();
    assert_eq!(cloth.particles(), &once[..]);
}

#[test]
fn reset_replays_identically() {
    let mut cloth = ClothSimulation::new(small(3).with_wind(true)).expect("valid config");
    for _ in 0..40 {
        cloth.step();
    }
    let first = cloth.positions();
    cloth.reset();
    for _ in 0..40 {
        cloth.step();
    }
    assert_eq!(cloth.positions(), first);
}

#[test]
fn renderer_views_cover_the_grid() {
    let cloth = ClothSimulation::new(small(3)).expect("valid config");
    let n = cloth.dimension();
    assert_eq!(cloth.triangles().count(), 2 * (n - 1) * (n - 1));
    assert_eq!(cloth.spring_segments().count(), cloth.spring_count());
    for tri in cloth.triangles() {
        assert!(tri.shade >= 1.0 / 3.0 - 1e-6 && tri.shade <= 1.0 + 1e-6);
    }
}

#[test]
fn non_finite_state_is_reported() {
    struct Alarm(Option<usize>);
    impl StepObserver<f32> for Alarm {
        fn on_non_finite(&mut self, index: usize) {
            self.0.get_or_insert(index);
        }
    }

    let config = small(2).with_pin(PinMode::None).with_check_finite(true);
    let mut cloth = ClothSimulation::new(config).expect("valid config");
    cloth.particle_mut(2, 2).velocity = Vec3::new(f32::NAN, 0.0, 0.0);
    let mut alarm = Alarm(None);
    cloth.step_with(&mut alarm);

    assert!(alarm.0.is_some());
    assert!(!cloth.is_finite());
}
