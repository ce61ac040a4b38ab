//! # Call-Engine: synthetic call traffic
//!
//! Turns codecs, waveform generators and header templates into live-looking
//! RTP traffic for a configurable number of concurrent calls.
//!
//! ## Building blocks
//!
//! - [`CallLeg`]: one directional stream, one frame per codec interval
//! - [`Call`]: legs sharing a countdown, built as mirror or DRLink calls
//! - [`CallFactory`]: hands out calls with fresh synthetic addresses
//! - [`SimulationLoop`]: admission control and 20 ms tick pacing
//! - [`PacketSink`]: where frames go (raw sockets, capture file, memory)
//! - [`CallLogger`] and [`BlobStorage`]: optional records of the run
//!
//! ## Usage
//!
//! ```rust
//! use std::net::Ipv4Addr;
//! use std::sync::Arc;
//! use ddgen_call_engine::{
//!     ManualClock, MemorySink, MirrorCallFactory, SimulationConfig, SimulationLoop,
//! };
//!
//! let config = SimulationConfig {
//!     target_calls: 2,
//!     mean_call_duration_ms: 1000,
//!     run_length_ms: 100,
//!     ..Default::default()
//! };
//! let sink = Arc::new(MemorySink::new());
//! let factory = Box::new(MirrorCallFactory::new(Ipv4Addr::new(172, 24, 101, 54)));
//!
//! let report = SimulationLoop::new(config, factory, sink.clone(), ManualClock::new())?
//!     .with_seed(7)
//!     .run();
//!
//! assert_eq!(report.calls_created, 2);
//! assert!(sink.len() > 0);
//! # Ok::<(), ddgen_call_engine::EngineError>(())
//! ```

pub mod call;
pub mod control;
pub mod error;
pub mod factory;
pub mod leg;
pub mod logger;
pub mod params;
pub mod simulation;
pub mod sink;
pub mod storage;

pub use call::{Call, CallOptions, BASE_RTP_PORT};
pub use control::ControlFlags;
pub use error::{EngineError, Result};
pub use factory::{CallFactory, DrLinkCallFactory, MirrorCallFactory, TrafficMode};
pub use leg::{CallLeg, LegIdentifiers};
pub use logger::{CallLogger, JsonLinesCallLogger, NullCallLogger};
pub use params::{CallParameters, StreamParameters};
pub use simulation::{
    Clock, ManualClock, SimulationConfig, SimulationLoop, SimulationReport, SystemClock,
};
pub use sink::{MemorySink, PacketSink, PcapSink, RawSocketSink};
pub use storage::{BlobStorage, DirectoryStorage, NullStorage};
