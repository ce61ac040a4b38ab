//! ddgen: synthetic RTP call traffic generator
//!
//! Keeps a number of simulated calls alive and writes their RTP frames to a
//! capture file or sends them over raw sockets. Signal handling and the
//! health endpoint run on a background tokio runtime; the simulation itself
//! runs on the main thread.

mod health;
mod logging;
mod options;
mod signals;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use ddgen_call_engine::{
    BlobStorage, CallLogger, ControlFlags, DirectoryStorage, JsonLinesCallLogger, NullCallLogger,
    NullStorage, PacketSink, PcapSink, RawSocketSink, SimulationLoop, SystemClock,
};
use tokio::runtime;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

use crate::options::{CliOptions, OutputMode};

fn main() -> Result<()> {
    let options = CliOptions::parse();
    logging::init(options.log_file_info);

    info!("ddgen v{} starting", env!("CARGO_PKG_VERSION"));
    info!("options: {:?}", options);

    let config = options.simulation_config();
    config.validate()?;

    let control = ControlFlags::new();
    let background = runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("ddgen-background")
        .enable_all()
        .build()?;

    {
        let control = control.clone();
        background.spawn(async move {
            if let Err(e) = signals::listen(control).await {
                error!("signal listener failed: {}", e);
            }
        });
    }

    let (health_ender_tx, health_ender_rx) = oneshot::channel();
    if options.no_health {
        info!("health endpoint disabled");
    } else {
        let port = options.health_port;
        background.spawn(async move {
            if let Err(e) = health::serve(port, health_ender_rx).await {
                error!("health endpoint failed: {}", e);
            }
        });
    }

    let logger: Arc<dyn CallLogger> = if options.use_db() {
        Arc::new(JsonLinesCallLogger::open(options.db_dir(), &options.stack_name)?)
    } else {
        Arc::new(NullCallLogger)
    };

    let storage: Arc<dyn BlobStorage> = if options.use_storage {
        Arc::new(DirectoryStorage::new(&options.storage_dir, &options.stack_name)?)
    } else {
        Arc::new(NullStorage)
    };

    let sink: Arc<dyn PacketSink> = match options.output_mode()? {
        OutputMode::Pcap => Arc::new(PcapSink::create(&options.capture_dir, storage)?),
        OutputMode::Socket(peers) => Arc::new(
            RawSocketSink::new(&peers).context("raw socket output requires root privileges")?,
        ),
    };

    let factory = options.traffic_mode()?.factory(options.start)?;

    let mut simulation = SimulationLoop::new(config, factory, sink, SystemClock::new())?
        .with_logger(logger)
        .with_control(control);
    if let Some(seed) = options.seed {
        simulation = simulation.with_seed(seed);
    }

    let report = simulation.run();
    info!(
        "{} ticks, {} calls created, {} completed, {} lag warnings",
        report.ticks, report.calls_created, report.calls_completed, report.lag_warnings
    );

    if health_ender_tx.send(()).is_err() {
        warn!("health endpoint already stopped");
    }
    background.shutdown_timeout(Duration::from_secs(1));
    Ok(())
}
