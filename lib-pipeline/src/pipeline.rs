use crate::*;

/// The full sample-to-event pipeline: validation, per-axis filtering,
/// orientation fusion, magnitude tracking and step detection behind one
/// `&mut self` entry point.
///
/// Single-writer contract: every call mutates shared state, so a host that
/// delivers gyroscope and accelerometer callbacks concurrently must
/// serialize `process_sample` and `reset` through one lock covering the
/// whole call. The pipeline itself never blocks, suspends or does I/O;
/// each sample is processed to completion before the call returns.
///
pub struct StepPipeline
{
    config: PipelineConfig,
    caps: SensorCaps,

    gyro_filters: FilterBank,
    orientation: OrientationEstimator,
    magnitude: MagnitudeTracker,
    detector: StepDetector,
}

impl StepPipeline
{
    pub fn new(config: PipelineConfig, caps: SensorCaps) -> Self {
        StepPipeline {
            config,
            caps,
            gyro_filters: FilterBank::new(),
            orientation: OrientationEstimator::new(),
            magnitude: MagnitudeTracker::new(),
            detector: StepDetector::new(),
        }
    }

    /// Reports the capability set probed at construction. A missing sensor
    /// is degraded operation, not an error; the pipeline keeps consuming
    /// whichever stream still arrives.
    ///
    pub fn initialize<S: EventSink>(&self, sink: &mut S) {
        if !self.caps.gyro {
            log::warn!("Gyroscope unavailable, running on accelerometer only");
        }
        if !self.caps.accel {
            log::warn!("Accelerometer unavailable, running on gyroscope only");
        }
        sink.on_initialized(self.caps.gyro, self.caps.accel);
    }

    /// Runs one raw sample through the pipeline. Non-finite samples fail
    /// without touching any state; everything else updates the filters and
    /// may emit a step through the sink.
    ///
    pub fn process_sample<S: EventSink>(
        &mut self,
        sample: &SensorSample,
        sink: &mut S,
    ) -> Result<(), PipelineError> {
        if !sample.is_finite() {
            log::warn!("Rejected non-finite {:?} sample at {} ms", sample.kind, sample.timestamp_ms);
            return Err(PipelineError::NonFiniteSample(sample.kind));
        }

        match sample.kind {
            SensorKind::Gyroscope => self.process_gyro(sample, sink),
            SensorKind::Accelerometer => self.process_accel(sample, sink),
        }
        Ok(())
    }

    fn process_gyro<S: EventSink>(&mut self, sample: &SensorSample, sink: &mut S) {
        let (fx, fy, fz) = self.gyro_filters.update(
            sample.x,
            sample.y,
            sample.z,
            self.config.gyro_low_pass_alpha,
        );

        self.orientation.update(
            fz,
            self.magnitude.low_pass_estimate,
            sample.timestamp_ms,
            self.config.complementary_alpha,
        );

        if self.detector.check_gyro(fx, fy, fz, sample.timestamp_ms, &self.config) {
            self.emit_step(StepSource::Gyro, sample.timestamp_ms, sink);
        }
    }

    fn process_accel<S: EventSink>(&mut self, sample: &SensorSample, sink: &mut S) {
        self.magnitude.update(
            sample.x,
            sample.y,
            sample.z,
            self.config.accel_low_pass_alpha,
            self.config.adaptive_gain,
        );

        let delta = self.magnitude.adaptive_delta();
        if self.detector.check_accel(delta, sample.timestamp_ms, &self.config) {
            self.emit_step(StepSource::Accel, sample.timestamp_ms, sink);
        }
    }

    fn emit_step<S: EventSink>(&mut self, source: StepSource, timestamp_ms: i64, sink: &mut S) {
        log::debug!(
            "Step {} detected via {:?} at {} ms",
            self.detector.step_count,
            source,
            timestamp_ms
        );
        sink.on_step_detected(self.detector.step_count, timestamp_ms, source);
        sink.request_haptic_pulse(self.config.haptic_pulse_ms);
    }

    /// Zeroes the step count, the refractory clock and the fused angle as
    /// one operation. Idempotent; the filter accumulators keep their warmup.
    ///
    pub fn reset(&mut self) {
        self.detector.reset();
        self.orientation.reset_angle();
        log::debug!("Step count and orientation reset");
    }

    /// Total debounced steps recorded since construction or the last reset.
    ///
    pub fn step_count(&self) -> u32 {
        self.detector.step_count
    }

    /// The current fused orientation angle in degrees.
    ///
    pub fn estimated_angle_deg(&self) -> f32 {
        self.orientation.estimated_angle_deg
    }

    pub fn caps(&self) -> SensorCaps {
        self.caps
    }
}
