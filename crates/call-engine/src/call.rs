//! Calls: legs sharing one lifetime
//!
//! Two shapes are built here:
//!
//! - **Mirror**: two legs between two synthetic addresses, one per direction
//! - **DRLink**: one leg per fixed peer, all from one synthetic address
//!
//! Legs use source ports from 32514 upwards in steps of 2 and IPv4
//! identifications spread evenly over the 16-bit space.

use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ddgen_audio_core::GeneratorKind;
use ddgen_codec_core::{CodecFactory, CodecType};
use rand::RngCore;
use tracing::{debug, info, warn};

use crate::error::{EngineError, Result};
use crate::leg::{CallLeg, LegIdentifiers};
use crate::logger::CallLogger;
use crate::params::CallParameters;
use crate::sink::PacketSink;

/// First RTP port of every call
pub const BASE_RTP_PORT: u16 = 32514;

/// Per-call settings supplied by the simulation
#[derive(Clone)]
pub struct CallOptions {
    pub duration_ms: u32,
    pub codec: CodecType,
    pub generator: GeneratorKind,
    pub sink: Arc<dyn PacketSink>,
    pub logger: Arc<dyn CallLogger>,
}

/// A set of legs with a shared countdown
pub struct Call {
    name: String,
    legs: Vec<CallLeg>,
    duration_ms: u32,
    remaining_ms: u32,
}

impl Call {
    /// Wrap prepared legs and record the call with the logger
    pub fn new(legs: Vec<CallLeg>, options: &CallOptions) -> Result<Self> {
        let (Some(first), Some(last)) = (legs.first(), legs.last()) else {
            return Err(EngineError::InvalidConfig("a call needs at least one leg".into()));
        };
        let name = call_name(first.source(), last.source(), Utc::now());

        let call = Self {
            name,
            legs,
            duration_ms: options.duration_ms,
            remaining_ms: options.duration_ms,
        };
        debug!("Call {} built with {} legs", call.name, call.legs.len());
        options.logger.log_call(&call.parameters());
        Ok(call)
    }

    /// Bidirectional call between `a` and `b`
    pub fn mirror(a: Ipv4Addr, b: Ipv4Addr, options: &CallOptions, rng: &mut dyn RngCore) -> Result<Self> {
        let ids = identification_offsets(2);
        let a = SocketAddrV4::new(a, BASE_RTP_PORT);
        let b = SocketAddrV4::new(b, BASE_RTP_PORT);

        let legs = vec![
            build_leg(a, b, ids[0], options, rng)?,
            build_leg(b, a, ids[1], options, rng)?,
        ];
        Self::new(legs, options)
    }

    /// Fan-out call from `source` to every peer
    pub fn drlink(
        source: Ipv4Addr,
        peers: &[SocketAddrV4],
        options: &CallOptions,
        rng: &mut dyn RngCore,
    ) -> Result<Self> {
        if peers.is_empty() {
            return Err(EngineError::InvalidConfig("DRLink traffic needs at least one peer".into()));
        }

        let ids = identification_offsets(peers.len());
        let mut legs = Vec::with_capacity(peers.len());
        for (i, (&peer, &id)) in peers.iter().zip(ids.iter()).enumerate() {
            let port = u16::try_from(i)
                .ok()
                .and_then(|i| i.checked_mul(2))
                .and_then(|offset| BASE_RTP_PORT.checked_add(offset))
                .ok_or_else(|| EngineError::InvalidConfig(format!("too many peers: {}", peers.len())))?;
            legs.push(build_leg(SocketAddrV4::new(source, port), peer, id, options, rng)?);
        }
        Self::new(legs, options)
    }

    /// Step every leg by `delta_ms`, clamped to the remaining duration
    ///
    /// Returns whether the call still has time left.
    pub fn step(&mut self, delta_ms: u32) -> bool {
        let delta = delta_ms.min(self.remaining_ms);
        for leg in &mut self.legs {
            if let Err(e) = leg.step(delta) {
                warn!(
                    "Call {}: leg {} -> {} failed: {}",
                    self.name,
                    leg.source(),
                    leg.destination(),
                    e
                );
            }
        }
        self.remaining_ms -= delta;

        if delta > 0 && self.remaining_ms == 0 {
            info!("Call {} finished", self.name);
        }
        self.remaining_ms > 0
    }

    /// Snapshot of the call for the call log
    pub fn parameters(&self) -> CallParameters {
        CallParameters {
            name: self.name.clone(),
            duration_ms: self.duration_ms,
            streams: self.legs.iter().map(CallLeg::parameters).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn legs(&self) -> &[CallLeg] {
        &self.legs
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_ms == 0
    }
}

impl std::fmt::Debug for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Call")
            .field("name", &self.name)
            .field("legs", &self.legs)
            .field("remaining_ms", &self.remaining_ms)
            .finish()
    }
}

fn build_leg(
    source: SocketAddrV4,
    destination: SocketAddrV4,
    ip_identification: u16,
    options: &CallOptions,
    rng: &mut dyn RngCore,
) -> Result<CallLeg> {
    let ids = LegIdentifiers::random(ip_identification, rng);
    CallLeg::new(
        source,
        destination,
        ids,
        CodecFactory::create(options.codec),
        options.generator.create(rng),
        options.sink.clone(),
    )
}

/// IPv4 identifications of `legs` legs: 1, then steps of `65535 / legs`
pub fn identification_offsets(legs: usize) -> Vec<u16> {
    let step = (u16::MAX as usize / legs.max(1)) as u16;
    let mut id: u16 = 1;
    (0..legs)
        .map(|_| {
            let current = id;
            id = id.wrapping_add(step);
            current
        })
        .collect()
}

/// `<ip>:<port>_to_<ip>:<port>_at_<YYYYMMDD>_<HHMMSS>_<micros>` in UTC
pub fn call_name(first: SocketAddrV4, last: SocketAddrV4, at: DateTime<Utc>) -> String {
    format!("{}_to_{}_at_{}", first, last, at.format("%Y%m%d_%H%M%S_%6f"))
}
