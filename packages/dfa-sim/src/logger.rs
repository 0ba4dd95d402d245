use std::{
    fs::{self, File},
    sync::Mutex,
};

use anyhow::Context;
use chrono::Local;
use dfa_sim_lib::config::LoggerConfig;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Installs the global `tracing` subscriber described by `config`. Events go
/// to stderr, or to `./logs/dfa_sim_<timestamp>.txt` when `log_file` is set.
pub fn init(config: &LoggerConfig) -> anyhow::Result<()> {
    if !*config.get_enabled() {
        return Ok(());
    }

    let level: tracing::Level = (*config.get_log_level()).into();

    let (writer, ansi) = if *config.get_log_file() {
        fs::create_dir_all("./logs").context("failed to create ./logs")?;
        let path = format!(
            "./logs/dfa_sim_{}.txt",
            Local::now().format("%Y-%m-%d_%H-%M-%S")
        );
        let file = File::create(&path).with_context(|| format!("failed to create: {path}"))?;
        (BoxMakeWriter::new(Mutex::new(file)), false)
    } else {
        (BoxMakeWriter::new(std::io::stderr), true)
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(ansi)
        .with_writer(writer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}
