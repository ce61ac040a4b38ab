//! Call parameter snapshots handed to the call logger

use ddgen_audio_core::ToneParameters;
use serde::{Deserialize, Serialize};

/// Identifying parameters of one leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamParameters {
    pub source_ip: String,
    pub source_port: u16,
    pub destination_ip: String,
    pub destination_port: u16,
    /// RTP payload type
    pub payload: u8,
    pub timestamp: u32,
    pub ssrc: u32,
    pub sequence_number: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tones: Vec<ToneParameters>,
}

/// Identifying parameters of a whole call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallParameters {
    pub name: String,
    #[serde(rename = "DurationInMs")]
    pub duration_ms: u32,
    pub streams: Vec<StreamParameters>,
}
