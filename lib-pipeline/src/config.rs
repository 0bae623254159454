/// Size of the moving average window applied to each gyroscope axis. This is
/// a const rather than a config field because it sizes the backing windows at
/// compile time.
///
pub const MOVING_AVERAGE_WINDOW: usize = 5;

/// Tunable coefficients and thresholds for the whole pipeline.
///
/// The defaults are the values the pipeline was tuned with; hosts that want
/// different trigger sensitivity or debounce behavior construct their own.
///
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig
{
    /// Low-pass filter coefficient for the gyroscope axes. Weights the
    /// previous filtered value, so higher means smoother and slower.
    pub gyro_low_pass_alpha: f32,

    /// Low-pass filter coefficient for the acceleration magnitude.
    pub accel_low_pass_alpha: f32,

    /// Complementary filter weight given to the integrated gyroscope angle;
    /// the remainder goes to the accelerometer tilt angle.
    pub complementary_alpha: f32,

    /// Fixed gain of the adaptive acceleration smoother.
    pub adaptive_gain: f32,

    /// A step is triggered when the filtered z rotation rate rises above
    /// this value (same unit as the incoming gyroscope samples).
    pub gyro_step_threshold: f32,

    /// Rotation around x or y above this value rejects the gyro trigger,
    /// the device is probably tumbling rather than stepping.
    pub cross_axis_threshold: f32,

    /// A step is triggered when the adaptive acceleration estimate jumps by
    /// more than this between two consecutive samples.
    pub accel_step_delta_threshold: f32,

    /// Minimum time between two counted steps. Shared by both trigger paths,
    /// a step on either sensor silences both for this long.
    pub refractory_period_ms: i64,

    /// Duration of the haptic pulse requested for every detected step.
    pub haptic_pulse_ms: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            gyro_low_pass_alpha: 0.8,
            accel_low_pass_alpha: 0.8,
            complementary_alpha: 0.98,
            adaptive_gain: 0.5,
            gyro_step_threshold: 2.0,
            cross_axis_threshold: 2.0,
            accel_step_delta_threshold: 2.5,
            refractory_period_ms: 500,
            haptic_pulse_ms: 100,
        }
    }
}
