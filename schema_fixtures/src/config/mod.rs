use std::collections::HashMap;
use std::path::PathBuf;

use row_schema::InferenceConfig;
use serde::{Deserialize, Deserializer};

pub mod setup;

#[derive(Debug, Deserialize)]
pub struct FixturesConfig {
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct LogConfig {
    pub default: Option<log::LevelFilter>,
    #[serde(flatten)]
    pub modules: HashMap<String, log::LevelFilter>,
}

#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub minimize: bool,
    /// Env values made only of digits arrive as integers, so those are
    /// accepted as directory names too.
    #[serde(default, deserialize_with = "deserialize_dir")]
    pub dir: Option<PathBuf>,
}

fn deserialize_dir<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Dir {
        Path(PathBuf),
        Number(i64),
    }

    let dir = Option::<Dir>::deserialize(deserializer)?;
    Ok(dir.map(|dir| match dir {
        Dir::Path(path) => path,
        Dir::Number(number) => PathBuf::from(number.to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::setup::{Builder, TomlText};
    use super::*;

    #[test]
    fn default_config() {
        let config: FixturesConfig = Builder::new()
            .add_layer(TomlText::new(crate::DEFAULT_CONFIG))
            .build()
            .expect("default config must be valid");

        assert_eq!(config.inference, InferenceConfig::default(), "default inference");
        assert_eq!(config.log.default, Some(log::LevelFilter::Info), "default level");
        assert!(!config.output.minimize, "pretty by default");
    }

    #[test]
    fn overrides() {
        let config: FixturesConfig = Builder::new()
            .add_layer(TomlText::new(crate::DEFAULT_CONFIG))
            .add_layer(TomlText::new(
                "[inference]\nmax_depth = 4\n[log]\nrow_schema = \"trace\"\n[output]\nminimize = true",
            ))
            .build()
            .expect("overrides must be valid");

        assert_eq!(config.inference.max_depth, 4, "depth override");
        assert_eq!(
            config.log.modules.get("row_schema"),
            Some(&log::LevelFilter::Trace),
            "module level"
        );
        assert!(config.output.minimize, "minimize override");
        assert_eq!(config.output.dir, None, "no dir by default");
    }

    #[test]
    fn numeric_dir() {
        let config: FixturesConfig = Builder::new()
            .add_layer(TomlText::new("[output]\ndir = 2024"))
            .build()
            .expect("numeric dir must be accepted");

        assert_eq!(config.output.dir, Some(PathBuf::from("2024")), "numeric dir");

        let config: FixturesConfig = Builder::new()
            .add_layer(TomlText::new("[output]\ndir = \"out/schemas\""))
            .build()
            .expect("path dir must be accepted");

        assert_eq!(config.output.dir, Some(PathBuf::from("out/schemas")), "path dir");
    }
}
