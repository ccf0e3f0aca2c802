use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use blockfall_agent::Weights;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A trained weight set with its provenance, stored as JSON.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeightsModel {
    pub trained_at: DateTime<Utc>,
    pub fitness: f32,
    pub weights: Weights,
}

impl WeightsModel {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open model file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let model = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse model file: {}", path.display()))?;

        Ok(model)
    }

    /// Writes the model as pretty JSON to `path`, or to stdout when no path
    /// is given.
    pub fn save(&self, path: Option<&PathBuf>) -> anyhow::Result<()> {
        match path {
            Some(path) => {
                let file = File::create(path).with_context(|| {
                    format!("Failed to create output file: {}", path.display())
                })?;
                let mut writer = BufWriter::new(file);
                serde_json::to_writer_pretty(&mut writer, self)
                    .with_context(|| format!("Failed to write model to {}", path.display()))?;
                writeln!(writer)?;
                writer.flush()?;
            }
            None => {
                let mut stdout = io::stdout().lock();
                serde_json::to_writer_pretty(&mut stdout, self)
                    .context("Failed to write model to stdout")?;
                writeln!(stdout)?;
            }
        }
        Ok(())
    }
}
