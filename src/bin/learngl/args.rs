use std::path::PathBuf;

use clap::Parser;

use learngl::config::{ConfigError, Settings};

use crate::demos::{DemoKind, PostEffect};

#[derive(Debug, Parser)]
pub struct Args {
    /// Demo to run
    #[arg(value_enum)]
    pub demo: DemoKind,
    /// Path to a json5 settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Width of the window
    #[arg(long)]
    pub width: Option<u32>,
    /// Height of the window
    #[arg(long)]
    pub height: Option<u32>,
    /// Frame rate cap
    #[arg(long)]
    pub fps: Option<f64>,
    /// Directory textures and models are loaded from
    #[arg(short, long)]
    pub assets: Option<PathBuf>,
    /// Model file for the model demo
    #[arg(short, long)]
    pub model: Option<PathBuf>,
    /// Post-processing for the framebuffers demo
    #[arg(short, long, value_enum, default_value_t = PostEffect::None)]
    pub effect: PostEffect,
    /// Log filter, e.g. `debug` or `learngl=trace`
    #[arg(long)]
    pub log: Option<String>,
}

impl Args {
    /// Settings from the config file (or defaults), with command line
    /// values taking precedence.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(width) = self.width {
            settings.window.width = width;
        }
        if let Some(height) = self.height {
            settings.window.height = height;
        }
        if let Some(fps) = self.fps {
            settings.fps = fps;
        }
        if let Some(assets) = &self.assets {
            settings.assets = assets.clone();
        }
        if let Some(model) = &self.model {
            settings.model = Some(model.clone());
        }

        settings.validate()?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        <Args as Parser>::try_parse_from(std::iter::once("learngl").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn demo_names_are_kebab_case() {
        assert_eq!(parse(&["lighting-maps"]).demo, DemoKind::LightingMaps);
        assert_eq!(parse(&["framebuffers", "-e", "edge"]).effect, PostEffect::Edge);
        assert!(<Args as Parser>::try_parse_from(["learngl", "teapot"]).is_err());
    }

    #[test]
    fn command_line_overrides_defaults() {
        let settings = parse(&["model", "--width", "1024", "--fps", "30", "-m", "cube.obj"])
            .settings()
            .unwrap();

        assert_eq!(settings.window.width, 1024);
        assert_eq!(settings.window.height, 600);
        assert_eq!(settings.fps, 30.0);
        assert_eq!(settings.model, Some(PathBuf::from("cube.obj")));
    }

    #[test]
    fn command_line_overrides_the_config_file() {
        let dir = std::env::temp_dir().join(format!("learngl_args_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json5");
        std::fs::write(&path, "{ fps: 144, window: { width: 1920, height: 1080 } }").unwrap();

        let path_arg = path.to_str().unwrap();
        let settings = parse(&["skybox", "-c", path_arg, "--height", "900"])
            .settings()
            .unwrap();

        assert_eq!(settings.fps, 144.0);
        assert_eq!(settings.window.width, 1920);
        assert_eq!(settings.window.height, 900);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn overrides_are_validated() {
        let res = parse(&["triangle", "--fps", "0"]).settings();

        assert!(matches!(res, Err(ConfigError::Value("fps"))));
    }
}
