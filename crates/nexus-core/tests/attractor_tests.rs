// Integration tests for attractor lifetime and force falloff.

use glam::Vec2;
use nexus_core::{Attractor, Particle};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn attractor() -> Attractor {
    Attractor::new(Vec2::new(400.0, 300.0), 2.0, 100.0)
}

#[test]
fn force_is_zero_at_and_beyond_radius() {
    let a = attractor();
    assert_eq!(a.strength_at(100.0), 0.0);
    assert_eq!(a.strength_at(250.0), 0.0);
    assert_eq!(a.force_at(Vec2::new(400.0 + 100.0, 300.0)), Vec2::ZERO);
    assert_eq!(a.force_at(Vec2::new(900.0, 900.0)), Vec2::ZERO);
}

#[test]
fn force_strictly_decreases_with_distance() {
    let a = attractor();
    let mut prev = a.strength_at(0.0);
    assert!(prev > 0.0);
    for step in 1..10 {
        let current = a.strength_at(step as f32 * 10.0);
        assert!(
            current < prev,
            "falloff not strictly decreasing at distance {}",
            step * 10
        );
        prev = current;
    }
}

#[test]
fn pull_points_toward_centre() {
    let a = attractor();
    // A point to the right of the centre is pushed left and not vertically.
    let force = a.force_at(Vec2::new(450.0, 300.0));
    assert!(force.x < 0.0);
    assert_eq!(force.y, 0.0);

    let mut rng = StdRng::seed_from_u64(3);
    let mut p = Particle::spawn(450.0, 300.0, &mut rng);
    p.vel = Vec2::ZERO;
    a.apply(&mut p);
    assert!(p.vel.x < 0.0, "attractor should pull the particle inward");
}

#[test]
fn retires_when_age_reaches_max() {
    let mut a = attractor();
    let mut ticks = 0;
    while a.tick() {
        ticks += 1;
        assert!(ticks < 1000, "attractor never retired");
    }
    assert_eq!(a.age, a.max_age);
    assert_eq!(a.alpha(), 0.0);
}

#[test]
fn alpha_fades_linearly_with_age() {
    let mut a = attractor();
    assert_eq!(a.alpha(), 1.0);
    for _ in 0..25 {
        a.tick();
    }
    assert!((a.alpha() - 0.75).abs() < 1e-5);
    for _ in 0..50 {
        a.tick();
    }
    assert!((a.alpha() - 0.25).abs() < 1e-5);
}
