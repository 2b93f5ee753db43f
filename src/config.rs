use std::path::{Path, PathBuf};

use cgmath::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::{self, Camera};
use crate::frame_pacer::frame_duration;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {0}: {1}")]
    Input(PathBuf, #[source] std::io::Error),
    #[error("invalid config: {0}")]
    Format(#[from] json5::Error),
    #[error("invalid value for '{0}'")]
    Value(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "learnOpenGL".into(),
            vsync: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraSettings {
    pub position: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 3.0],
            yaw: camera::DEFAULT_YAW,
            pitch: camera::DEFAULT_PITCH,
            speed: camera::DEFAULT_SPEED,
            sensitivity: camera::DEFAULT_SENSITIVITY,
        }
    }
}

impl CameraSettings {
    pub fn build(&self) -> Camera {
        let mut camera = Camera::new(
            Vector3::from(self.position),
            Vector3::unit_y(),
            self.yaw,
            self.pitch,
        );
        camera.movement_speed = self.speed;
        camera.mouse_sensitivity = self.sensitivity;
        camera
    }
}

/// Everything a demo run can be configured with. All keys are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub window: WindowSettings,
    pub fps: f64,
    pub assets: PathBuf,
    pub model: Option<PathBuf>,
    pub camera: CameraSettings,
    pub clear_color: [f32; 3],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            fps: 60.0,
            assets: PathBuf::from("assets"),
            model: None,
            camera: CameraSettings::default(),
            clear_color: [0.1, 0.1, 0.1],
        }
    }
}

impl Settings {
    pub fn from_json5(src: &str) -> Result<Self, ConfigError> {
        let settings: Settings = json5::from_str(src)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Input(path.to_owned(), e))?;

        Self::from_json5(&src)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 {
            return Err(ConfigError::Value("window.width"));
        }
        if self.window.height == 0 {
            return Err(ConfigError::Value("window.height"));
        }
        if frame_duration(self.fps).is_err() {
            return Err(ConfigError::Value("fps"));
        }

        Ok(())
    }

    /// Texture path under the asset directory.
    pub fn asset<P: AsRef<Path>>(&self, name: P) -> PathBuf {
        self.assets.join(name)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.window.width as f32 / self.window.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(Settings::from_json5("{}").unwrap(), Settings::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = Settings::from_json5(
            r#"{
                // json5 allows comments and trailing commas
                window: { width: 1280, height: 720, },
                fps: 144,
                camera: { position: [1, 2, 3] },
                model: "objects/backpack/backpack.obj",
            }"#,
        )
        .unwrap();

        assert_eq!(settings.window.width, 1280);
        assert_eq!(settings.window.title, "learnOpenGL");
        assert_eq!(settings.fps, 144.0);
        assert_eq!(settings.camera.position, [1.0, 2.0, 3.0]);
        assert_eq!(settings.camera.yaw, -90.0);
        assert_eq!(
            settings.model,
            Some(PathBuf::from("objects/backpack/backpack.obj"))
        );
        assert_eq!(settings.aspect_ratio(), 1280.0 / 720.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Settings::from_json5("{ windw: {} }"),
            Err(ConfigError::Format(_))
        ));
    }

    #[test]
    fn values_are_validated() {
        assert!(matches!(
            Settings::from_json5("{ fps: 0 }"),
            Err(ConfigError::Value("fps"))
        ));
        assert!(matches!(
            Settings::from_json5("{ fps: 1e-30 }"),
            Err(ConfigError::Value("fps"))
        ));
        assert!(matches!(
            Settings::from_json5("{ window: { height: 0 } }"),
            Err(ConfigError::Value("window.height"))
        ));
    }

    #[test]
    fn camera_settings_build_a_camera() {
        let settings = CameraSettings {
            speed: 5.0,
            ..Default::default()
        };
        let camera = settings.build();

        assert_eq!(camera.position, Vector3::new(0.0, 0.0, 3.0));
        assert_eq!(camera.movement_speed, 5.0);
        assert_eq!(camera.mouse_sensitivity, 0.1);
    }

    #[test]
    fn assets_resolve_under_the_asset_dir() {
        let settings = Settings::default();

        assert_eq!(
            settings.asset("textures/container.jpg"),
            PathBuf::from("assets/textures/container.jpg")
        );
    }
}
