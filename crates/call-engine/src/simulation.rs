//! Real-time simulation loop
//!
//! The loop keeps a target number of calls alive and steps them on a fixed
//! tick. Each tick:
//!
//! 1. admits one call while fewer than the target are live, with a duration
//!    drawn uniformly from 75% to 125% of the mean
//! 2. measures the time since the last step; more than the lag threshold
//!    is reported, at least one tick steps every call, anything less sleeps
//!    for the rest of the tick
//! 3. stops once the run length has passed or a stop was requested
//!
//! Time comes from a [`Clock`] so the loop can be driven without sleeping.

use std::sync::Arc;
use std::time::{Duration, Instant};

use ddgen_audio_core::GeneratorKind;
use ddgen_codec_core::CodecType;
use parking_lot::Mutex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::call::{Call, CallOptions};
use crate::control::ControlFlags;
use crate::error::{EngineError, Result};
use crate::factory::CallFactory;
use crate::logger::{CallLogger, NullCallLogger};
use crate::sink::PacketSink;

/// Default tick length
pub const DEFAULT_TICK_MS: u32 = 20;
/// Default lag warning threshold
pub const DEFAULT_LAG_THRESHOLD_MS: u32 = 40;

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of calls kept alive
    pub target_calls: usize,
    /// Mean call duration
    pub mean_call_duration_ms: u32,
    /// Length of the whole run
    pub run_length_ms: u64,
    pub tick_ms: u32,
    pub lag_threshold_ms: u32,
    pub codec: CodecType,
    pub generator: GeneratorKind,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            target_calls: 10,
            mean_call_duration_ms: 60_000,
            run_length_ms: 600_000,
            tick_ms: DEFAULT_TICK_MS,
            lag_threshold_ms: DEFAULT_LAG_THRESHOLD_MS,
            codec: CodecType::default(),
            generator: GeneratorKind::default(),
        }
    }
}

impl SimulationConfig {
    /// Check the settings
    pub fn validate(&self) -> Result<()> {
        if self.target_calls == 0 {
            return Err(EngineError::InvalidConfig("target call count must be positive".into()));
        }
        if self.mean_call_duration_ms == 0 {
            return Err(EngineError::InvalidConfig("mean call duration must be positive".into()));
        }
        if self.run_length_ms == 0 {
            return Err(EngineError::InvalidConfig("run length must be positive".into()));
        }
        if self.tick_ms == 0 {
            return Err(EngineError::InvalidConfig("tick must be positive".into()));
        }
        Ok(())
    }

    /// Inclusive bounds of admitted call durations
    pub fn call_duration_range(&self) -> (u32, u32) {
        let mean = u64::from(self.mean_call_duration_ms);
        let low = mean * 3 / 4;
        let high = (mean * 5 / 4).min(u64::from(u32::MAX));
        (low as u32, high as u32)
    }
}

/// Monotonic time source
pub trait Clock {
    /// Time since an arbitrary fixed origin
    fn now(&self) -> Duration;

    /// Block for `duration`
    fn sleep(&self, duration: Duration);
}

/// Wall clock
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        // std::thread::sleep resumes after EINTR until the full duration passed
        std::thread::sleep(duration);
    }
}

/// Clock that only moves when told to
///
/// Sleeping advances it by the requested duration. Clones share the time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward
    pub fn advance(&self, duration: Duration) {
        *self.now.lock() += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

/// Counters of a finished or running simulation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    pub ticks: u64,
    /// Ticks that stepped the calls
    pub steps: u64,
    pub calls_created: u64,
    pub calls_completed: u64,
    /// Calls the factory failed to build
    pub call_failures: u64,
    pub lag_warnings: u64,
    pub reload_requests: u64,
    /// Calls still live when the loop ended
    pub live_calls: usize,
    pub stopped_by_request: bool,
}

/// Admission control and tick pacing over a set of live calls
pub struct SimulationLoop<C: Clock = SystemClock> {
    config: SimulationConfig,
    factory: Box<dyn CallFactory>,
    sink: Arc<dyn PacketSink>,
    logger: Arc<dyn CallLogger>,
    control: ControlFlags,
    clock: C,
    rng: SmallRng,
    calls: Vec<Call>,
    start: Duration,
    last_step: Duration,
    report: SimulationReport,
}

impl<C: Clock> SimulationLoop<C> {
    /// Create a loop with no call logger, fresh control flags and a
    /// wall-clock seed
    pub fn new(
        config: SimulationConfig,
        factory: Box<dyn CallFactory>,
        sink: Arc<dyn PacketSink>,
        clock: C,
    ) -> Result<Self> {
        config.validate()?;
        let start = clock.now();
        Ok(Self {
            config,
            factory,
            sink,
            logger: Arc::new(NullCallLogger),
            control: ControlFlags::new(),
            clock,
            rng: SmallRng::seed_from_u64(wall_clock_seed()),
            calls: Vec::new(),
            start,
            last_step: start,
            report: SimulationReport::default(),
        })
    }

    /// Record every admitted call with `logger`
    pub fn with_logger(mut self, logger: Arc<dyn CallLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Poll `control` for stop and reload requests
    pub fn with_control(mut self, control: ControlFlags) -> Self {
        self.control = control;
        self
    }

    /// Seed the generator behind durations, identifiers and tones
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Run one tick
    ///
    /// Returns false once the loop should end.
    pub fn tick(&mut self) -> bool {
        if self.control.take_reload() {
            self.report.reload_requests += 1;
            info!("Reload requested; running options stay in effect");
        }
        if self.control.stop_requested() {
            info!("Stop requested after {} ticks", self.report.ticks);
            self.report.stopped_by_request = true;
            return false;
        }

        self.admit();

        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.last_step);
        let tick = Duration::from_millis(u64::from(self.config.tick_ms));

        if elapsed > Duration::from_millis(u64::from(self.config.lag_threshold_ms)) {
            self.report.lag_warnings += 1;
            warn!(elapsed_ms = elapsed.as_millis() as u64, "Simulation is lagging");
        }

        if elapsed >= tick {
            self.step_calls(self.config.tick_ms);
            self.last_step = now;
        } else {
            self.clock.sleep(tick - elapsed);
        }
        self.report.ticks += 1;

        let total = now.saturating_sub(self.start);
        if total > Duration::from_millis(self.config.run_length_ms) {
            info!("Simulation time of {} ms is over", self.config.run_length_ms);
            return false;
        }
        true
    }

    /// Admit one call if fewer than the target are live
    ///
    /// Returns whether a call was added.
    pub fn admit(&mut self) -> bool {
        if self.calls.len() >= self.config.target_calls {
            return false;
        }

        let (low, high) = self.config.call_duration_range();
        let duration_ms = self.rng.gen_range(low..=high);
        let options = CallOptions {
            duration_ms,
            codec: self.config.codec,
            generator: self.config.generator,
            sink: self.sink.clone(),
            logger: self.logger.clone(),
        };

        match self.factory.create_call(&options, &mut self.rng) {
            Ok(call) => {
                info!("Call {} admitted with duration {} ms", call.name(), duration_ms);
                self.calls.push(call);
                self.report.calls_created += 1;
                true
            }
            Err(e) => {
                self.report.call_failures += 1;
                warn!("Failed to create call: {}", e);
                false
            }
        }
    }

    /// Step every live call by `delta_ms` and drop the finished ones
    pub fn step_calls(&mut self, delta_ms: u32) {
        let report = &mut self.report;
        self.calls.retain_mut(|call| {
            let running = call.step(delta_ms);
            if !running {
                report.calls_completed += 1;
            }
            running
        });
        report.steps += 1;
        debug!("Stepped {} live calls by {} ms", self.calls.len(), delta_ms);
    }

    /// Run until the run length passes or a stop is requested
    ///
    /// Remaining calls are dropped and the sink is closed afterwards.
    pub fn run(mut self) -> SimulationReport {
        info!(
            "Simulation starts: {} calls of ~{} ms for {} ms",
            self.config.target_calls, self.config.mean_call_duration_ms, self.config.run_length_ms
        );
        while self.tick() {}

        self.report.live_calls = self.calls.len();
        self.calls.clear();
        if let Err(e) = self.sink.close() {
            warn!("Failed to close packet sink: {}", e);
        }

        info!("Simulation finished: {:?}", self.report);
        self.report
    }

    pub fn live_calls(&self) -> usize {
        self.calls.len()
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Counters so far
    pub fn report(&self) -> &SimulationReport {
        &self.report
    }
}

fn wall_clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
