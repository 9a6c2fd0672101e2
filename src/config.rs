use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "An SDL2 window".to_owned(),
            width: 480,
            height: 480,
            vsync: true,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    /// Re-read on every frame.
    pub vertex_file: PathBuf,
    pub clear_color: [f32; 4],
    pub shutdown_delay_ms: u32,
    /// `env_logger` filter syntax; falls back to `RUST_LOG`.
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            vertex_file: PathBuf::from("vertexes.txt"),
            clear_color: [0.15, 0.0, 0.0, 0.0],
            shutdown_delay_ms: 2000,
            log_filter: None,
        }
    }
}

impl Config {
    /// A missing file means defaults; anything else that goes wrong is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(ref err) if err.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(err) => {
                return Err(err).with_context(|| format!("could not open config {}", path.display()))
            }
        };

        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("invalid config {}", path.display()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("eng-config-does-not-exist.json");
        assert_eq!(Config::default(), Config::load(&path).unwrap());
    }

    #[test]
    fn partial_overrides() {
        let config: Config = serde_json::from_str(
            r#"{"window": {"width": 640}, "vertex_file": "tri.txt", "log_filter": "eng=trace"}"#,
        )
        .unwrap();

        assert_eq!(640, config.window.width);
        assert_eq!(480, config.window.height);
        assert_eq!("An SDL2 window", config.window.title);
        assert_eq!(PathBuf::from("tri.txt"), config.vertex_file);
        assert_eq!(2000, config.shutdown_delay_ms);
        assert_eq!(Some("eng=trace".to_owned()), config.log_filter);
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("eng-config-load-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{"window": {"title": "tri", "vsync": false}, "clear_color": [0.0, 0.0, 1.0, 1.0], "shutdown_delay_ms": 0}"#,
        )
        .unwrap();
        let config = Config::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!("tri", config.window.title);
        assert!(!config.window.vsync);
        assert_eq!(480, config.window.width);
        assert_eq!([0.0, 0.0, 1.0, 1.0], config.clear_color);
        assert_eq!(0, config.shutdown_delay_ms);
        assert_eq!(PathBuf::from("vertexes.txt"), config.vertex_file);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("eng-config-invalid-{}.json", std::process::id()));
        fs::write(&path, "{ \"window\": 3 }").unwrap();
        let result = Config::load(&path);
        fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }
}
