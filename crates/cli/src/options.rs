//! Command-line options

use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use ddgen_audio_core::GeneratorKind;
use ddgen_call_engine::{SimulationConfig, TrafficMode};
use ddgen_codec_core::CodecType;

/// Where generated frames go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Capture file in the capture directory
    Pcap,
    /// Raw sockets to the listed peers
    Socket(Vec<SocketAddrV4>),
}

#[derive(Parser, Debug, Clone)]
#[command(name = "ddgen", author, version, about = "Synthetic RTP call traffic generator", long_about = None)]
pub struct CliOptions {
    /// Number of concurrent calls
    #[arg(long = "nc", value_name = "N", default_value_t = 10)]
    pub number_of_calls: usize,

    /// Mean call duration in seconds (actual durations vary by 25%)
    #[arg(long = "dc", value_name = "SECS", default_value_t = 60)]
    pub call_duration_secs: u32,

    /// Simulation duration in seconds
    #[arg(long = "ds", value_name = "SECS", default_value_t = 600)]
    pub simulation_duration_secs: u64,

    /// Paired calls between synthetic addresses (default traffic)
    #[arg(long, conflicts_with = "drlink")]
    pub mirror: bool,

    /// Fan-out calls to two fixed peers; sends to them over raw sockets
    #[arg(long, num_args = 4, value_names = ["IP1", "PORT1", "IP2", "PORT2"])]
    pub drlink: Option<Vec<String>>,

    /// Write frames to a capture file (default output)
    #[arg(long)]
    pub pcap: bool,

    /// Send frames to IP PORT over a raw socket (repeatable)
    #[arg(long, num_args = 2, value_names = ["IP", "PORT"], action = ArgAction::Append)]
    pub socket: Vec<String>,

    /// First synthetic endpoint address
    #[arg(long, value_name = "IP", default_value = "172.24.101.54")]
    pub start: Ipv4Addr,

    /// Audio codec: pcma, pcmu or g722
    #[arg(long, default_value = "pcma")]
    pub codec: CodecType,

    /// Waveform: silence, tone or sinusoidal
    #[arg(long, default_value = "tone")]
    pub generator: GeneratorKind,

    /// Directory of capture files
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub capture_dir: PathBuf,

    /// Record every call in the call store
    #[arg(long)]
    pub use_db: bool,

    /// Directory of the call store (implies --use-db)
    #[arg(long, value_name = "DIR")]
    pub db_path: Option<PathBuf>,

    /// Keep finished capture files in blob storage
    #[arg(long)]
    pub use_storage: bool,

    /// Root directory of blob storage
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub storage_dir: PathBuf,

    /// Stack name, prefix of store and bucket names
    #[arg(long = "sn", value_name = "NAME", default_value = "ddgen")]
    pub stack_name: String,

    /// Port of the health endpoint
    #[arg(long, default_value_t = 8080)]
    pub health_port: u16,

    /// Do not serve the health endpoint
    #[arg(long)]
    pub no_health: bool,

    /// Seed for call durations, RTP identifiers and tones
    #[arg(long)]
    pub seed: Option<u64>,

    /// Include source file and line in log lines
    #[arg(long)]
    pub log_file_info: bool,
}

impl CliOptions {
    /// Simulation settings for the engine
    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            target_calls: self.number_of_calls,
            mean_call_duration_ms: self.call_duration_secs.saturating_mul(1000),
            run_length_ms: self.simulation_duration_secs.saturating_mul(1000),
            codec: self.codec,
            generator: self.generator,
            ..Default::default()
        }
    }

    /// Peers given with --drlink
    pub fn drlink_peers(&self) -> Result<Vec<SocketAddrV4>> {
        self.drlink.as_deref().map(parse_peers).unwrap_or_else(|| Ok(Vec::new()))
    }

    /// Traffic shape of the run
    pub fn traffic_mode(&self) -> Result<TrafficMode> {
        let peers = self.drlink_peers()?;
        if peers.is_empty() {
            Ok(TrafficMode::Mirror)
        } else {
            Ok(TrafficMode::DrLink(peers))
        }
    }

    /// Output of the run
    ///
    /// --pcap wins; otherwise DRLink peers and --socket peers select raw
    /// socket output.
    pub fn output_mode(&self) -> Result<OutputMode> {
        let mut peers = self.drlink_peers()?;
        peers.extend(parse_peers(&self.socket)?);

        if self.pcap || peers.is_empty() {
            Ok(OutputMode::Pcap)
        } else {
            Ok(OutputMode::Socket(peers))
        }
    }

    /// Whether calls are recorded in the durable store
    ///
    /// `--db-path` implies `--use-db`.
    pub fn use_db(&self) -> bool {
        self.use_db || self.db_path.is_some()
    }

    /// Directory of the call store
    pub fn db_dir(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Parse `IP PORT` pairs
fn parse_peers(values: &[String]) -> Result<Vec<SocketAddrV4>> {
    if values.len() % 2 != 0 {
        bail!("expected IP PORT pairs, got {} values", values.len());
    }
    values
        .chunks(2)
        .map(|pair| {
            let ip: Ipv4Addr = pair[0]
                .parse()
                .with_context(|| format!("invalid IPv4 address '{}'", pair[0]))?;
            let port: u16 = pair[1]
                .parse()
                .with_context(|| format!("invalid port '{}'", pair[1]))?;
            Ok(SocketAddrV4::new(ip, port))
        })
        .collect()
}
