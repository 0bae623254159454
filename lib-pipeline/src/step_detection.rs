use crate::PipelineConfig;

/// Debounced dual-trigger step counter.
///
/// Both the gyroscope and the accelerometer path check their own trigger
/// condition against one shared refractory clock: whichever fires first
/// silences both paths until the refractory period has passed. A
/// `last_step_timestamp_ms` of zero means no step has been recorded yet and
/// the first trigger passes unconditionally.
///
pub struct StepDetector
{
    pub step_count: u32,
    pub last_step_timestamp_ms: i64,
}

impl StepDetector
{
    pub const fn new() -> Self {
        StepDetector {
            step_count: 0,
            last_step_timestamp_ms: 0,
        }
    }

    /// The shared refractory clock; true when a new step may be counted.
    ///
    fn clock_allows(&self, now_ms: i64, config: &PipelineConfig) -> bool {
        self.last_step_timestamp_ms == 0
            || now_ms - self.last_step_timestamp_ms > config.refractory_period_ms
    }

    /// Gyroscope trigger: a strong rotation around z with both cross axes
    /// quiet. Records the step and returns true when it fires.
    ///
    pub fn check_gyro(
        &mut self,
        filtered_x: f32,
        filtered_y: f32,
        filtered_z: f32,
        now_ms: i64,
        config: &PipelineConfig,
    ) -> bool {
        if filtered_z > config.gyro_step_threshold
            && libm::fabsf(filtered_x) < config.cross_axis_threshold
            && libm::fabsf(filtered_y) < config.cross_axis_threshold
            && self.clock_allows(now_ms, config)
        {
            self.record_step(now_ms);
            return true;
        }
        false
    }

    /// Accelerometer trigger: the adaptive magnitude estimate jumped by more
    /// than the delta threshold since the previous sample. Records the step
    /// and returns true when it fires.
    ///
    pub fn check_accel(&mut self, adaptive_delta: f32, now_ms: i64, config: &PipelineConfig) -> bool {
        if adaptive_delta > config.accel_step_delta_threshold && self.clock_allows(now_ms, config) {
            self.record_step(now_ms);
            return true;
        }
        false
    }

    fn record_step(&mut self, now_ms: i64) {
        self.step_count += 1;
        self.last_step_timestamp_ms = now_ms;
    }

    /// Back to the no-steps-yet state, unconditionally.
    ///
    pub fn reset(&mut self) {
        self.step_count = 0;
        self.last_step_timestamp_ms = 0;
    }
}

impl Default for StepDetector {
    fn default() -> Self {
        Self::new()
    }
}
