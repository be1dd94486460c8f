use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use anyhow::{Context as _, Result};
use serde::de::DeserializeOwned;
use toml::map::Entry;
use toml::{Table, Value};

/// Provides a layered builder for deserializing configuration files.
#[must_use]
pub struct Builder {
    table: Result<Table>,
}

impl Builder {
    /// Creates a new empty builder.
    pub fn new() -> Self {
        Self {
            table: Ok(Table::new()),
        }
    }

    /// Adds a layer of configuration.
    ///
    /// Layers added later take precedence over earlier ones.
    pub fn add_layer<L: Layer>(mut self, source: L) -> Self {
        self.table = self.table.and_then(|mut t| {
            source.extend_table(&mut t)?;
            Ok(t)
        });
        self
    }

    /// Deserializes the configuration from the provided layers.
    pub fn build<T>(self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.table.and_then(deserialize_table)
    }
}

/// A configuration layer.
pub trait Layer {
    /// Extends a TOML table by this layer.
    fn extend_table(&self, table: &mut Table) -> Result<()>;
}

/// A TOML file configuration layer.
#[must_use]
pub struct File {
    path: PathBuf,
    required: bool,
}

impl File {
    /// Creates a new layer, loading TOML from the file at the given path.
    ///
    /// The file is required by default.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required: true,
        }
    }

    /// Sets whether the file is required.
    ///
    /// If it is not required and does not exist, this layer is treated as
    /// empty. If it is required and does not exist, an error is raised.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// A TOML text configuration layer.
#[must_use]
pub struct TomlText<'a> {
    text: &'a str,
}

impl<'a> TomlText<'a> {
    /// Creates a new layer, parsing the text as TOML.
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

/// An environment variable configuration layer.
///
/// This loads every environment variable starting with the prefix, with the
/// prefix removed and the rest lowercased. Nested values can be specified by
/// using `__` (two underscores) as a separator, (i.e. with the prefix
/// `APP__`, `APP__LOG__DEFAULT` will refer to `log.default`).
///
/// Values that parse as integers or booleans are treated as such, everything
/// else is a string. Values that are not fully valid UTF-8 may be converted to
/// UTF-8 with a lossy conversion.
#[must_use]
pub struct Env {
    prefix: &'static str,
}

impl Env {
    /// Creates a new layer for variables with the given prefix.
    pub fn prefixed(prefix: &'static str) -> Self {
        Self { prefix }
    }

    fn extend_from_vars<I>(&self, table: &mut Table, vars: I)
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        for (key, value) in vars {
            // non-utf8 keys cannot possibly refer to anything that serde or toml allows as
            // keys so they can just be excluded
            let Ok(key) = key.into_string() else {
                continue;
            };

            let Some(key) = key.strip_prefix(self.prefix) else {
                continue;
            };

            let key = key.to_ascii_lowercase();
            let value = value
                .into_string()
                .unwrap_or_else(|o| o.to_string_lossy().into_owned());

            let segments: Vec<&str> = key.split("__").collect();
            insert_at(table, &segments, env_value(value));
        }
    }
}

impl Layer for File {
    fn extend_table(&self, table: &mut Table) -> Result<()> {
        let file = match fs::read_to_string(&self.path) {
            Ok(content) => deserialize_str_to_table(&content)
                .with_context(|| format!("failed to load config {:?}", self.path))?,
            Err(why) => {
                // on error, we definitely return and don't merge tables
                if !self.required && why.kind() == io::ErrorKind::NotFound {
                    return Ok(());
                }

                return Err(why).context(format!("cannot read required config {:?}", self.path));
            },
        };

        merge_tables(table, file);
        Ok(())
    }
}

impl Layer for TomlText<'_> {
    fn extend_table(&self, table: &mut Table) -> Result<()> {
        let toml = deserialize_str_to_table(self.text).context("toml str literal invalid")?;
        merge_tables(table, toml);
        Ok(())
    }
}

impl Layer for Env {
    fn extend_table(&self, table: &mut Table) -> Result<()> {
        self.extend_from_vars(table, env::vars_os());
        Ok(())
    }
}

fn env_value(value: String) -> Value {
    if let Ok(int) = value.parse() {
        Value::Integer(int)
    } else if let Ok(flag) = value.parse() {
        Value::Boolean(flag)
    } else {
        Value::String(value)
    }
}

fn deserialize_str_to_table(text: &str) -> Result<Table> {
    toml::from_str(text).context("config toml is invalid")
}

fn deserialize_table<T>(table: Table) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(table).context("cannot deserialize config")
}

fn merge_tables(target: &mut Table, consume: Table) {
    for (key, value) in consume {
        match target.entry(key) {
            Entry::Vacant(entry) => _ = entry.insert(value),
            Entry::Occupied(mut entry) => match (entry.get_mut(), value) {
                (Value::Table(a), Value::Table(b)) => merge_tables(a, b),
                (a, b) => *a = b,
            },
        }
    }
}

fn insert_at(table: &mut Table, path: &[&str], value: Value) {
    let [first, path @ ..] = path else {
        return;
    };

    match table.entry((*first).to_owned()) {
        Entry::Vacant(entry) => _ = entry.insert(nested_value(path, value)),
        Entry::Occupied(mut entry) => match entry.get_mut() {
            Value::Table(table) if !path.is_empty() => insert_at(table, path, value),
            entry => *entry = nested_value(path, value),
        },
    }
}

fn nested_value(path: &[&str], value: Value) -> Value {
    path.iter().rev().fold(value, |value, &segment| {
        let mut table = Table::new();
        table.insert(segment.to_owned(), value);
        Value::Table(table)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_layers_win() {
        let table: Table = Builder::new()
            .add_layer(TomlText::new("[a]\nx = 1\ny = 2"))
            .add_layer(TomlText::new("[a]\ny = 3\n[b]\nz = true"))
            .build()
            .expect("layers must merge");

        let expected: Table = toml::from_str("[a]\nx = 1\ny = 3\n[b]\nz = true")
            .expect("expected table must parse");
        assert_eq!(table, expected, "tables must be merged deeply");
    }

    #[test]
    fn missing_optional_file() {
        let table: Table = Builder::new()
            .add_layer(File::new("this/file/does/not/exist.toml").required(false))
            .build()
            .expect("optional file may be missing");

        assert!(table.is_empty(), "nothing must be loaded");
    }

    #[test]
    fn missing_required_file() {
        Builder::new()
            .add_layer(File::new("this/file/does/not/exist.toml"))
            .build::<Table>()
            .expect_err("required file must exist");
    }

    #[test]
    fn env_vars_with_prefix() {
        let vars = [
            ("TEST__INFERENCE__MAX_DEPTH", "8"),
            ("TEST__LOG__DEFAULT", "debug"),
            ("TEST__OUTPUT__MINIMIZE", "true"),
            ("UNRELATED__VALUE", "1"),
        ]
        .map(|(k, v)| (OsString::from(k), OsString::from(v)));

        let mut table = Table::new();
        Env::prefixed("TEST__").extend_from_vars(&mut table, vars);

        let expected: Table = toml::from_str(
            "[inference]\nmax_depth = 8\n[log]\ndefault = \"debug\"\n[output]\nminimize = true",
        )
        .expect("expected table must parse");
        assert_eq!(table, expected, "env vars must be nested");
    }
}
