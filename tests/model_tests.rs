// Host-side tests for the glTF importer.

use folio_core::*;
use glam::Vec3;

const TRIANGLE: &[u8] = include_bytes!("fixtures/triangle.gltf");

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn imports_and_recentres_the_fixture() {
    let model = ModelData::from_slice(TRIANGLE).expect("fixture parses");
    assert_eq!(model.primitives.len(), 1);
    assert_eq!(model.triangle_count(), 1);

    assert!(close(model.source_bounds.min, Vec3::new(10.0, 0.0, 0.0)));
    assert!(close(model.source_bounds.max, Vec3::new(12.0, 2.0, 0.0)));
    assert!(close(model.bounds.min, Vec3::new(-1.0, -1.0, 0.0)));
    assert!(close(model.bounds.max, Vec3::new(1.0, 1.0, 0.0)));
    assert!(close(model.bounds.center(), Vec3::ZERO));
}

#[test]
fn missing_normals_are_computed_from_the_faces() {
    let model = ModelData::from_slice(TRIANGLE).unwrap();
    for v in &model.primitives[0].vertices {
        assert!(close(Vec3::from_array(v.normal), Vec3::Z), "{:?}", v.normal);
    }
}

#[test]
fn materials_keep_their_factors_and_a_fallback() {
    let model = ModelData::from_slice(TRIANGLE).unwrap();
    assert_eq!(model.materials.len(), 2);
    assert_eq!(model.materials[0].base_color, [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(model.materials[0].emissive, [0.0, 0.0, 0.5]);
    assert_eq!(model.materials[1], SurfaceMaterial::default());
    assert_eq!(model.primitives[0].material, 0);
}

#[test]
fn garbage_is_a_parse_error() {
    let err = ModelData::from_slice(b"definitely not a model").unwrap_err();
    assert!(matches!(err, AssetError::Parse(_)), "{:?}", err);
}

#[test]
fn no_primitives_means_no_geometry() {
    let err = ModelData::from_primitives(Vec::new(), vec![SurfaceMaterial::default()]).unwrap_err();
    assert_eq!(err, AssetError::NoGeometry);
}

#[test]
fn from_primitives_recentres_on_the_bounds() {
    let vertex = |x: f32, y: f32, z: f32| ModelVertex {
        position: [x, y, z],
        normal: [0.0, 1.0, 0.0],
    };
    let primitive = ModelPrimitive {
        vertices: vec![vertex(2.0, 2.0, 2.0), vertex(4.0, 6.0, 2.0), vertex(2.0, 2.0, 10.0)],
        indices: vec![0, 1, 2],
        material: 0,
    };
    let model = ModelData::from_primitives(vec![primitive], vec![SurfaceMaterial::default()]).unwrap();
    assert!(close(model.source_bounds.center(), Vec3::new(3.0, 4.0, 6.0)));
    assert!(close(model.bounds.center(), Vec3::ZERO));
    assert!(close(Vec3::from_array(model.primitives[0].vertices[0].position), Vec3::new(-1.0, -2.0, -4.0)));
    assert_eq!(model.bounds.max_extent(), 8.0);
}
