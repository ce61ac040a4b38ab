//! Append-only capture file in the classic pcap format
//!
//! ```text
//! global header (24 bytes, little endian)
//!   magic 0xa1b2c3d4 | version 2.4 | thiszone 0 | sigfigs 0 | snaplen 65535 | linktype 1
//! per frame
//!   ts_sec | ts_usec | incl_len | orig_len | frame bytes
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use parking_lot::Mutex;
use tracing::{info, warn};

use super::PacketSink;
use crate::error::{EngineError, Result};
use crate::storage::BlobStorage;

/// Capture file magic number
pub const PCAP_MAGIC: u32 = 0xa1b2_c3d4;
/// Capture snapshot length
pub const PCAP_SNAPLEN: u32 = 65535;
/// Ethernet link type
pub const PCAP_LINKTYPE_ETHERNET: u32 = 1;

const PCAP_VERSION_MAJOR: u16 = 2;
const PCAP_VERSION_MINOR: u16 = 4;

/// Capture file name for a run started at `time`
pub fn capture_file_name(time: DateTime<Local>) -> String {
    time.format("%Y %m %d %H %M %S.pcap").to_string()
}

/// Writes every frame to a capture file
///
/// The finished file is handed to the blob storage once, on [`close`] or
/// when the sink is dropped.
///
/// [`close`]: PacketSink::close
pub struct PcapSink {
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
    storage: Arc<dyn BlobStorage>,
}

impl PcapSink {
    /// Create a capture file named after the current local time in `dir`
    pub fn create(dir: impl AsRef<Path>, storage: Arc<dyn BlobStorage>) -> Result<Self> {
        let path = dir.as_ref().join(capture_file_name(Local::now()));
        Self::create_at(path, storage)
    }

    /// Create a capture file at `path`, appending to an existing file
    ///
    /// The global header is written only when the file is empty, so
    /// reopening a capture continues its record stream.
    pub fn create_at(path: impl Into<PathBuf>, storage: Arc<dyn BlobStorage>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let existing = file.metadata()?.len();
        let mut writer = BufWriter::new(file);
        if existing == 0 {
            write_global_header(&mut writer)?;
            writer.flush()?;
            info!("Writing capture to {}", path.display());
        } else {
            info!("Appending to capture {} ({} bytes)", path.display(), existing);
        }

        Ok(Self {
            path,
            writer: Mutex::new(Some(writer)),
            storage,
        })
    }

    /// Path of the capture file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_record(writer: &mut impl Write, frame: &[u8], now: DateTime<Utc>) -> std::io::Result<()> {
        let len = frame.len() as u32;
        writer.write_all(&(now.timestamp() as u32).to_le_bytes())?;
        writer.write_all(&now.timestamp_subsec_micros().min(999_999).to_le_bytes())?;
        writer.write_all(&len.to_le_bytes())?;
        writer.write_all(&len.to_le_bytes())?;
        writer.write_all(frame)
    }
}

fn write_global_header(writer: &mut impl Write) -> std::io::Result<()> {
    writer.write_all(&PCAP_MAGIC.to_le_bytes())?;
    writer.write_all(&PCAP_VERSION_MAJOR.to_le_bytes())?;
    writer.write_all(&PCAP_VERSION_MINOR.to_le_bytes())?;
    writer.write_all(&0i32.to_le_bytes())?;
    writer.write_all(&0u32.to_le_bytes())?;
    writer.write_all(&PCAP_SNAPLEN.to_le_bytes())?;
    writer.write_all(&PCAP_LINKTYPE_ETHERNET.to_le_bytes())
}

impl PacketSink for PcapSink {
    fn consume(&self, frame: &[u8]) -> Result<()> {
        let mut guard = self.writer.lock();
        let writer = guard
            .as_mut()
            .ok_or_else(|| EngineError::sink_write(format!("{} is closed", self.path.display())))?;
        Self::write_record(writer, frame, Utc::now())
            .map_err(|e| EngineError::sink_write(format!("{}: {}", self.path.display(), e)))
    }

    fn close(&self) -> Result<()> {
        let Some(mut writer) = self.writer.lock().take() else {
            return Ok(());
        };
        writer.flush()?;
        drop(writer);

        info!("Closed capture {}", self.path.display());
        self.storage.store(&self.path)
    }
}

impl Drop for PcapSink {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to finish capture {}: {}", self.path.display(), e);
        }
    }
}

impl std::fmt::Debug for PcapSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PcapSink").field("path", &self.path).finish()
    }
}
