use cgmath::{perspective, Deg, EuclideanSpace, InnerSpace, Matrix4, Point3, Vector3, Zero};

pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const DEFAULT_SPEED: f32 = 2.5;
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
pub const DEFAULT_ZOOM: f32 = 45.0;

const PITCH_LIMIT: f32 = 89.0;
const MIN_ZOOM: f32 = 1.0;
const MAX_ZOOM: f32 = 45.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Fly camera driven by yaw and pitch in degrees.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vector3<f32>,
    front: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,
    world_up: Vector3<f32>,
    yaw: f32,
    pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Vector3::zero(),
            Vector3::unit_y(),
            DEFAULT_YAW,
            DEFAULT_PITCH,
        )
    }
}

impl Camera {
    pub fn new(position: Vector3<f32>, world_up: Vector3<f32>, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: -Vector3::unit_z(),
            up: world_up,
            right: Vector3::unit_x(),
            world_up,
            yaw,
            pitch,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
        };

        camera.update_vectors();
        camera
    }

    pub fn at(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        Matrix4::look_at_rh(eye, eye + self.front, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
        perspective(Deg(self.zoom), aspect, near, far)
    }

    pub fn move_in(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;

        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    pub fn update_orientation(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    pub fn update_zoom(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());

        self.front = Vector3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cgmath::Transform;

    #[test]
    fn default_looks_down_negative_z() {
        let cam = Camera::default();

        assert_abs_diff_eq!(cam.front(), Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        assert_abs_diff_eq!(cam.right(), Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_abs_diff_eq!(cam.up(), Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_eq!(cam.zoom(), 45.0);
    }

    #[test]
    fn movement_scales_with_frame_time() {
        let mut cam = Camera::default();

        cam.move_in(CameraMovement::Forward, 2.0);
        assert_abs_diff_eq!(cam.position, Vector3::new(0.0, 0.0, -5.0), epsilon = 1e-5);

        cam.move_in(CameraMovement::Right, 0.4);
        assert_abs_diff_eq!(cam.position, Vector3::new(1.0, 0.0, -5.0), epsilon = 1e-5);

        cam.move_in(CameraMovement::Left, 0.4);
        cam.move_in(CameraMovement::Backward, 2.0);
        assert_abs_diff_eq!(cam.position, Vector3::zero(), epsilon = 1e-5);
    }

    #[test]
    fn pitch_is_constrained() {
        let mut cam = Camera::default();

        cam.update_orientation(0.0, 10_000.0, true);
        assert_eq!(cam.pitch(), 89.0);

        cam.update_orientation(0.0, -20_000.0, true);
        assert_eq!(cam.pitch(), -89.0);

        cam.update_orientation(0.0, -100.0, false);
        assert_abs_diff_eq!(cam.pitch(), -99.0, epsilon = 1e-4);
    }

    #[test]
    fn yaw_turns_the_front_vector() {
        let mut cam = Camera::default();

        // sensitivity 0.1, so 900 units is a quarter turn
        cam.update_orientation(900.0, 0.0, true);

        assert_abs_diff_eq!(cam.yaw(), 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(cam.front(), Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
        assert_abs_diff_eq!(cam.right(), Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = Camera::default();

        cam.update_zoom(-5.0);
        assert_eq!(cam.zoom(), 45.0);

        cam.update_zoom(30.0);
        assert_eq!(cam.zoom(), 15.0);

        cam.update_zoom(100.0);
        assert_eq!(cam.zoom(), 1.0);
    }

    #[test]
    fn view_matrix_moves_world_opposite_to_camera() {
        let cam = Camera::at(Vector3::new(0.0, 0.0, 3.0));
        let origin = cam.view_matrix().transform_point(Point3::new(0.0, 0.0, 0.0));

        assert_abs_diff_eq!(origin, Point3::new(0.0, 0.0, -3.0), epsilon = 1e-5);
    }
}
