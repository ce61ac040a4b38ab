//! Call logging
//!
//! Every call hands a [`CallParameters`] snapshot to the logger once it is
//! built. The JSON-lines logger is a durable store keyed by call name.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::{EngineError, Result};
use crate::params::CallParameters;

/// Receiver of call parameter snapshots
pub trait CallLogger: Send + Sync {
    /// Record one call
    fn log_call(&self, parameters: &CallParameters);
}

/// Logger that records nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCallLogger;

impl CallLogger for NullCallLogger {
    fn log_call(&self, parameters: &CallParameters) {
        debug!("Call {} not recorded", parameters.name);
    }
}

/// Appends one JSON object per call to `<dir>/<stack>-calls.jsonl`
#[derive(Debug)]
pub struct JsonLinesCallLogger {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl JsonLinesCallLogger {
    /// Open or create the store of `stack_name` in `dir`
    pub fn open(dir: impl AsRef<Path>, stack_name: &str) -> Result<Self> {
        if stack_name.is_empty() {
            return Err(EngineError::InvalidConfig("stack name must not be empty".into()));
        }
        std::fs::create_dir_all(dir.as_ref())?;
        let path = dir.as_ref().join(format!("{}-calls.jsonl", stack_name));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        info!("Logging calls to {}", path.display());
        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Path of the store
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, parameters: &CallParameters) -> Result<()> {
        let line = serde_json::to_string(parameters)?;
        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

impl CallLogger for JsonLinesCallLogger {
    fn log_call(&self, parameters: &CallParameters) {
        if let Err(e) = self.append(parameters) {
            warn!("Failed to record call {}: {}", parameters.name, e);
        }
    }
}
