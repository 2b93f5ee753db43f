use cgmath::{InnerSpace, Vector3, Vector4};

/// Each channel oscillates in [0, 1] with its own period.
pub fn cycle_color(time: f32) -> Vector4<f32> {
    let wave = |period: f32| ((time / period).sin() + 1.0) / 2.0;

    Vector4::new(wave(0.8), wave(2.3), wave(3.6), 1.0)
}

/// Farthest first, so blended surfaces composite correctly.
pub fn sort_back_to_front(eye: Vector3<f32>, positions: &[Vector3<f32>]) -> Vec<Vector3<f32>> {
    let mut sorted = positions.to_vec();

    sorted.sort_by(|a, b| {
        let da = (eye - *a).magnitude2();
        let db = (eye - *b).magnitude2();
        db.total_cmp(&da)
    });

    sorted
}

pub const CUBE_POSITIONS: [[f32; 3]; 10] = [
    [0.0, 0.0, 0.0],
    [2.0, 5.0, -15.0],
    [-1.5, -2.2, -2.5],
    [-3.8, -2.0, -12.3],
    [2.4, -0.4, -3.5],
    [-1.7, 3.0, -7.5],
    [1.3, -2.0, -2.5],
    [1.5, 2.0, -2.5],
    [1.5, 0.2, -1.5],
    [-1.3, 1.0, -1.5],
];

pub const POINT_LIGHT_POSITIONS: [[f32; 3]; 4] = [
    [0.7, 0.2, 2.0],
    [2.3, -3.3, -4.0],
    [-4.0, 2.0, -12.0],
    [0.0, 0.0, -3.0],
];

pub const WINDOW_POSITIONS: [[f32; 3]; 5] = [
    [-1.5, 0.0, -0.48],
    [1.5, 0.0, 0.51],
    [0.0, 0.0, 0.7],
    [-0.3, 0.0, -2.3],
    [0.5, 0.0, -0.6],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_stays_in_range() {
        for i in 0..1000 {
            let c = cycle_color(i as f32 * 0.05);
            for channel in [c.x, c.y, c.z] {
                assert!((0.0..=1.0).contains(&channel));
            }
            assert_eq!(c.w, 1.0);
        }

        assert_eq!(cycle_color(0.0), Vector4::new(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn windows_sort_farthest_first() {
        let eye = Vector3::new(0.0, 0.0, 3.0);
        let sorted = sort_back_to_front(eye, &WINDOW_POSITIONS.map(Vector3::from));

        assert_eq!(sorted.len(), WINDOW_POSITIONS.len());
        assert_eq!(sorted[0], Vector3::new(-0.3, 0.0, -2.3));
        assert_eq!(sorted[4], Vector3::new(0.0, 0.0, 0.7));

        let distances: Vec<f32> = sorted.iter().map(|p| (eye - *p).magnitude()).collect();
        assert!(distances.windows(2).all(|w| w[0] >= w[1]));
    }
}
