//! End-to-end scene assembly tests.
//!
//! Builds small voxel scenes from generated bricks, merges them into a
//! single drawable buffer, and checks the result against per-source
//! expectations.

use nanobricks_core::controls::FlyControls;
use nanobricks_core::input::{InputEvent, KeyCode};
use nanobricks_core::math::{mat4_from_translation, transform_point, Mat4, Vec3};
use nanobricks_core::mesh::generators::generate_brick;
use nanobricks_core::mesh::{merge, MeshSource, POSITION_ATTRIBUTE};

fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

fn grid_scene(side: usize) -> (Vec<MeshSource>, Vec<Mat4>) {
    let mut sources = Vec::new();
    let mut transforms = Vec::new();
    for x in 0..side {
        for z in 0..side {
            sources.push(generate_brick([0.5, 0.5, 0.5]));
            transforms.push(mat4_from_translation(Vec3::new(
                x as f32, 0.0, z as f32,
            )));
        }
    }
    (sources, transforms)
}

#[test]
fn brick_grid_merges_into_single_buffer() {
    init_logging();

    let (sources, transforms) = grid_scene(4);
    let merged = merge(&sources, &transforms).unwrap();

    assert_eq!(merged.vertex_count(), 16 * 36);
    let names: Vec<&str> = merged.names().collect();
    assert_eq!(names, vec!["position", "normal", "uv"]);

    // Every brick's range holds the brick's vertices moved by its transform.
    let positions = merged
        .get(POSITION_ATTRIBUTE)
        .unwrap()
        .data()
        .as_f32()
        .unwrap();
    let brick = generate_brick([0.5, 0.5, 0.5]);
    let local = brick
        .get(POSITION_ATTRIBUTE)
        .unwrap()
        .data()
        .as_f32()
        .unwrap();

    for (i, matrix) in transforms.iter().enumerate() {
        let range = &positions[i * local.len()..(i + 1) * local.len()];
        for (out, src) in range.chunks_exact(3).zip(local.chunks_exact(3)) {
            let expected = transform_point(matrix, Vec3::new(src[0], src[1], src[2]));
            for (got, want) in out.iter().zip(expected.iter()) {
                assert!((got - want).abs() < 1e-5);
            }
        }
    }
}

#[test]
fn normals_survive_translation_unchanged() {
    init_logging();

    let (sources, transforms) = grid_scene(2);
    let merged = merge(&sources, &transforms).unwrap();

    let normals = merged.get("normal").unwrap().data().as_f32().unwrap();
    let brick = generate_brick([0.5, 0.5, 0.5]);
    let local = brick.get("normal").unwrap().data().as_f32().unwrap();

    for chunk in normals.chunks_exact(local.len()) {
        assert_eq!(chunk, local);
    }
}

#[test]
fn camera_flies_over_merged_scene() {
    init_logging();

    let (sources, transforms) = grid_scene(2);
    let merged = merge(&sources, &transforms).unwrap();
    assert!(merged.vertex_count() > 0);

    let mut camera = FlyControls::new();
    camera.movement_speed = 2.0;
    camera.set_position(Vec3::new(0.0, 5.0, 0.0));

    // Fly forward for half a second of simulated frames.
    camera.handle_event(&InputEvent::KeyDown(KeyCode::W));
    for _ in 0..30 {
        camera.update(1.0 / 60.0);
    }
    camera.handle_event(&InputEvent::KeyUp(KeyCode::W));

    let p = camera.position();
    assert!((p.z - (-1.0)).abs() < 1e-4);
    assert_eq!(p.y, 5.0);
}
