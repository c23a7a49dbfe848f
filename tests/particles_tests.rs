// Host-side tests for the ambient particles and the warp starfield.

use folio_core::constants::*;
use folio_core::*;

#[test]
fn ambient_particles_stay_in_their_slab() {
    let points = ambient_particles(AMBIENT_PARTICLE_COUNT, 7);
    assert_eq!(points.len(), AMBIENT_PARTICLE_COUNT);
    let [span_x, span_y] = AMBIENT_PARTICLE_SPAN;
    let [near, far] = AMBIENT_PARTICLE_DEPTH;
    for p in &points {
        assert!(p.x.abs() <= span_x * 0.5);
        assert!(p.y.abs() <= span_y * 0.5);
        assert!(p.z <= near && p.z >= far, "{:?}", p);
    }
}

#[test]
fn same_seed_same_particles() {
    assert_eq!(ambient_particles(32, 11), ambient_particles(32, 11));
    assert_ne!(ambient_particles(32, 11), ambient_particles(32, 12));
}

fn distinct_depths(field: &Starfield) -> usize {
    let mut depths: Vec<u32> = field.stars().iter().map(|s| s.z.to_bits()).collect();
    depths.sort_unstable();
    depths.dedup();
    depths.len()
}

#[test]
fn stars_move_toward_the_viewer() {
    let mut field = Starfield::new(64, 3);
    let before: Vec<f32> = field.stars().iter().map(|s| s.z).collect();
    field.step(0.1);
    for (star, z) in field.stars().iter().zip(before) {
        // Wrapped stars jump back to the far end.
        if star.z < z {
            assert!((star.z - (z - STAR_SPEED * 0.1)).abs() < 1e-3);
            assert_eq!(star.prev_z, z);
        }
    }
}

#[test]
fn stars_wrap_to_the_far_end_keeping_their_overshoot() {
    let mut field = Starfield::new(200, 3).with_speed(3_000.0);
    for _ in 0..10 {
        field.step(MAX_FRAME_DT);
        for star in field.stars() {
            assert!(star.z > 0.0 && star.z <= STAR_FIELD_DEPTH, "{:?}", star);
            assert!(star.x.abs() <= STAR_FIELD_HALF_WIDTH);
            assert!(star.y.abs() <= STAR_FIELD_HALF_HEIGHT);
        }
    }
    assert!(distinct_depths(&field) > 190);
}

#[test]
fn a_long_frame_gap_does_not_collapse_the_field() {
    let mut field = Starfield::new(STAR_COUNT, 42);
    let before: Vec<f32> = field.stars().iter().map(|s| s.z).collect();
    field.step(40.0);
    // The step is clamped like the scene clock.
    let moved = STAR_SPEED * MAX_FRAME_DT;
    for (star, z) in field.stars().iter().zip(&before) {
        if star.z < *z {
            assert!((z - star.z - moved).abs() < 1e-3);
        }
    }
    assert!(distinct_depths(&field) > 790);

    for _ in 0..100 {
        field.step(1.0 / 60.0);
    }
    assert!(distinct_depths(&field) > 790);
}

#[test]
fn non_finite_deltas_are_ignored() {
    let mut field = Starfield::new(16, 5);
    let before: Vec<f32> = field.stars().iter().map(|s| s.z).collect();
    field.step(f32::NAN);
    field.step(-1.0);
    let after: Vec<f32> = field.stars().iter().map(|s| s.z).collect();
    assert_eq!(before, after);
}

#[test]
fn projection_grows_stars_as_they_approach() {
    let far = Star {
        x: 100.0,
        y: -50.0,
        z: STAR_FIELD_DEPTH,
        prev_z: STAR_FIELD_DEPTH,
    };
    let near = Star {
        z: 100.0,
        prev_z: 130.0,
        ..far
    };
    let (w, h) = (1600.0, 900.0);
    let a = Starfield::project(&far, w, h);
    let b = Starfield::project(&near, w, h);
    assert_eq!(a.radius, 0.0);
    assert!(b.radius > a.radius && b.radius <= STAR_MAX_RADIUS);
    assert!(b.x > a.x);
    assert!(b.x > b.prev_x);
    assert!(b.y < b.prev_y);
}
