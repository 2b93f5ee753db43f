use cgmath::Vector3;
use criterion::{criterion_group, criterion_main, Criterion};

use learngl::camera::{Camera, CameraMovement};
use learngl::scene::{sort_back_to_front, WINDOW_POSITIONS};

pub fn camera_update(c: &mut Criterion) {
    let mut camera = Camera::at(Vector3::new(0.0, 0.0, 3.0));

    c.bench_function("camera_update", |b| {
        b.iter(|| {
            camera.update_orientation(1.5, -0.5, true);
            camera.move_in(CameraMovement::Forward, 0.016);
            camera.view_matrix()
        })
    });
}

pub fn window_sort(c: &mut Criterion) {
    let eye = Vector3::new(0.3, 0.0, 3.0);
    let windows = WINDOW_POSITIONS.map(Vector3::from);

    c.bench_function("window_sort", |b| {
        b.iter(|| sort_back_to_front(eye, &windows))
    });
}

criterion_group!(benches, camera_update, window_sort);
criterion_main!(benches);
