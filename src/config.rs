//! Runtime configuration.
//!
//! [`Config`] is read from a JSON file (by default `<config dir>/learnopengl/config.json`) and
//! then overridden by the command line through [`CliArgs`]. Every field has a default, so an
//! empty object or a missing file yields the stock 800x600 "LearnOpenGL" window.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use glam::Vec4;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::render::scene::Scene;

/// Window creation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "LearnOpenGL".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// What to do when the shader program cannot be built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaderFailurePolicy {
    /// Abort startup with exit code -1.
    #[default]
    Fatal,
    /// Log the error and keep running with nothing to draw.
    Continue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub clear_color: [f32; 4],
    pub scene: Scene,
    pub wireframe: bool,
    pub shader_failure: ShaderFailurePolicy,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            clear_color: [0.2, 0.3, 0.3, 1.0],
            scene: Scene::default(),
            wireframe: false,
            shader_failure: ShaderFailurePolicy::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Location of the user's config file, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("learnopengl").join("config.json"))
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the config at `path`, which must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&s)
    }

    /// Reads the config at `path`, falling back to defaults if there is no such file.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(s) => Self::from_json(&s),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::Config(format!("{}: {e}", path.display()))),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(Error::Config(format!(
                "Window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| Error::Config(format!("Unknown log level \"{}\"", self.log_level)))?;
        Ok(())
    }

    pub fn clear_color(&self) -> Vec4 {
        Vec4::from_array(self.clear_color)
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Applies command line overrides.
    pub fn apply(&mut self, args: &CliArgs) {
        if let Some(scene) = args.scene {
            self.scene = scene;
        }
        if args.wireframe {
            self.wireframe = true;
        }
    }
}

/// Parsed command line: `[SCENE] [--wireframe] [--config PATH]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CliArgs {
    pub scene: Option<Scene>,
    pub wireframe: bool,
    pub config: Option<PathBuf>,
}

impl CliArgs {
    pub const USAGE: &'static str = "usage: learnopengl [blank|triangle|rectangle] [--wireframe] [--config PATH]";

    /// Parses the arguments after the program name.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "--wireframe" => parsed.wireframe = true,
                "--config" => {
                    let path = args
                        .next()
                        .ok_or_else(|| Error::Config("--config needs a path".to_string()))?;
                    parsed.config = Some(PathBuf::from(path.as_ref()));
                }
                flag if flag.starts_with('-') => {
                    return Err(Error::Config(format!("Unknown option \"{flag}\"")));
                }
                scene => {
                    if parsed.scene.is_some() {
                        return Err(Error::Config(format!("Unexpected argument \"{scene}\"")));
                    }
                    parsed.scene = Some(scene.parse()?);
                }
            }
        }

        Ok(parsed)
    }
}
