use drape::spring::force_between;
use drape::{GridCoord, Particle, SpringForce, SpringKind, Vec3};

fn spring(rest: f64, ks: f64, kd: f64) -> SpringForce<f64> {
    SpringForce::new(
        SpringKind::Structural,
        [GridCoord::new(0, 0), GridCoord::new(0, 1)],
        2,
        rest,
        ks,
        kd,
        2.0,
    )
}

#[test]
fn apply_is_skew_symmetric() {
    let cases = [
        (Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.5, 0.2, -0.3), Vec3::new(0.1, 0.0, 0.0), Vec3::zero()),
        (Vec3::new(2.0, 1.0, 3.0), Vec3::new(2.1, 1.0, 3.0), Vec3::zero(), Vec3::new(-1.0, 4.0, 2.0)),
        (Vec3::new(-5.0, 9.0, 0.5), Vec3::new(4.0, -3.0, 7.0), Vec3::new(3.0, 3.0, 3.0), Vec3::new(-2.0, 0.5, 1.0)),
    ];
    for (pa, pb, va, vb) in cases {
        let mut particles = vec![Particle::new(pa), Particle::new(pb)];
        particles[0].velocity = va;
        particles[1].velocity = vb;
        spring(1.0, 100.0, 1.0).apply(&mut particles);
        assert_eq!(particles[0].force, -particles[1].force, "case {:?} -> {:?}", pa, pb);
        assert!(particles[0].force.length() > 0.0);
    }
}

#[test]
fn force_acts_along_spring_axis() {
    let a: Vec3<f64> = Vec3::new(0.0, 0.0, 0.0);
    let b: Vec3<f64> = Vec3::new(3.0, 4.0, 0.0);
    let f = force_between(a, Vec3::zero(), b, Vec3::zero(), 1.0, 10.0, 0.0);
    // Stretched by 4 along (b - a) / 5: the pull on `a` is 40 towards `b`.
    assert!((f.x - 24.0).abs() < 1e-9, "f.x = {}", f.x);
    assert!((f.y - 32.0).abs() < 1e-9, "f.y = {}", f.y);
    assert_eq!(f.z, 0.0);
}

#[test]
fn degenerate_length_is_zero_force() {
    let p = Vec3::new(1.0, 2.0, 3.0);
    let f = force_between(p, Vec3::new(5.0, 0.0, 0.0), p, Vec3::zero(), 1.0, 100.0, 10.0);
    assert_eq!(f, Vec3::zero());
}

#[test]
fn transverse_velocity_is_not_damped() {
    let f = force_between(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 3.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::zero(),
        1.0,
        100.0,
        5.0,
    );
    assert!(f.length() < 1e-12, "sideways motion at rest length should feel no force, got {:?}", f);
}

#[test]
fn stretch_ratio_and_tearing_agree() {
    let s = spring(1.0, 10.0, 0.0);
    let near = vec![Particle::new(Vec3::zero()), Particle::new(Vec3::new(1.9, 0.0, 0.0))];
    let far = vec![Particle::new(Vec3::zero()), Particle::new(Vec3::new(2.1, 0.0, 0.0))];
    assert!((s.stretch_ratio(&near) - 1.9).abs() < 1e-12);
    assert!(!s.will_tear(&near));
    assert!(s.will_tear(&far));
}

#[test]
fn unbreakable_spring_never_tears() {
    let mut s = spring(1.0, 10.0, 0.0);
    s.tear_ratio = f64::INFINITY;
    let particles = vec![Particle::new(Vec3::zero()), Particle::new(Vec3::new(1.0e12, 0.0, 0.0))];
    assert!(!s.is_breakable());
    assert!(!s.will_tear(&particles));
}
