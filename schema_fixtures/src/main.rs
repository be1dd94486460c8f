use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use indexmap::IndexMap;
use row_schema::{Schema, TypeInference};
use serde::Serialize;

use crate::config::{FixturesConfig, LogConfig};

mod catalog;
mod config;

const DEFAULT_CONFIG: &str = include_str!("../assets/default_config.toml");

/// Emits the canonical schemas of the cross-language reference types as JSON.
#[derive(Debug, Parser)]
struct Cli {
    /// Only emit the reference types with these names.
    ///
    /// May be given multiple times. If not specified, all types are emitted.
    #[arg(short, long = "type")]
    types: Vec<String>,

    /// The output directory.
    ///
    /// Each schema is written to `<name>.json` in this directory, which is
    /// created if it's missing. If not specified, all schemas are written to
    /// stdout as a single JSON object keyed by name.
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Minimize the output JSON.
    #[arg(short, long)]
    minimize: bool,

    /// List the names of the reference types and exit.
    #[arg(short, long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config()?;
    init_logging(&config.log)?;

    // run the program and clean up
    let res = run(cli, config);
    if let Err(why) = &res {
        log::error!("Exiting due to error: {why:?}");
    }

    log::logger().flush();
    res
}

fn run(cli: Cli, config: FixturesConfig) -> anyhow::Result<()> {
    let fixtures = catalog::fixtures();

    if cli.list {
        let mut stdout = io::stdout().lock();
        for fixture in &fixtures {
            writeln!(stdout, "{}", fixture.name)?;
        }

        return Ok(());
    }

    let selected = catalog::select(&fixtures, &cli.types)
        .map_err(|name| anyhow::anyhow!("unknown reference type `{name}`, see `--list`"))?;

    let inference = TypeInference::new(config.inference);
    let mut schemas = IndexMap::with_capacity(selected.len());
    for fixture in selected {
        let schema = inference
            .infer_schema_of(fixture.ty, fixture.as_struct)
            .with_context(|| format!("cannot infer schema of `{}`", fixture.name))?;

        log::info!("Inferred `{}`: {schema}", fixture.name);
        schemas.insert(fixture.name, schema);
    }

    let minimize = cli.minimize || config.output.minimize;
    match cli.out.or(config.output.dir) {
        Some(out_dir) => write_files(&out_dir, &schemas, minimize),
        None => {
            let mut stdout = io::stdout().lock();
            write_json(&mut stdout, &schemas, minimize)?;
            writeln!(stdout)?;
            Ok(())
        },
    }
}

fn write_files(
    out_dir: &Path,
    schemas: &IndexMap<&'static str, Schema>,
    minimize: bool,
) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("cannot create output directory {out_dir:?}"))?;

    for (name, schema) in schemas {
        let path = out_dir.join(format!("{name}.json"));
        let file = fs::File::create(&path).with_context(|| format!("cannot create {path:?}"))?;
        let mut file = io::BufWriter::new(file);

        write_json(&mut file, schema, minimize)?;
        file.flush()?;
        log::info!("Wrote {path:?}");
    }

    Ok(())
}

fn write_json<W, T>(writer: W, value: &T, minimize: bool) -> anyhow::Result<()>
where
    W: io::Write,
    T: Serialize + ?Sized,
{
    if minimize {
        serde_json::to_writer(writer, value)?;
    } else {
        serde_json::to_writer_pretty(writer, value)?;
    }

    Ok(())
}

fn build_config() -> anyhow::Result<FixturesConfig> {
    use crate::config::setup::{Builder, Env, File, TomlText};

    Builder::new()
        .add_layer(TomlText::new(DEFAULT_CONFIG))
        .add_layer(File::new("schema_fixtures.toml").required(false))
        .add_layer(Env::prefixed("SCHEMA_FIXTURES__"))
        .build()
}

fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    use log::LevelFilter;
    use log4rs::append::console::{ConsoleAppender, Target};
    use log4rs::config::{Appender, Logger, Root};
    use log4rs::encode::pattern::PatternEncoder;

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("[{h({l:<5})} {t}] {m}{n}")))
        .build();

    let loggers = config
        .modules
        .iter()
        .map(|(name, &level)| Logger::builder().build(name.as_str(), level));

    let root = Root::builder()
        .appender("stderr")
        .build(config.default.unwrap_or(LevelFilter::Info));

    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .loggers(loggers)
        .build(root)?;

    log4rs::init_config(config)?;
    Ok(())
}
