use crate::low_pass;

/// Tracks the overall acceleration magnitude through two parallel smoothers:
/// a low-pass estimate feeding the orientation tilt angle, and a fixed-gain
/// adaptive estimate whose sample-to-sample jumps drive the accelerometer
/// step trigger.
///
/// The adaptive stage is a plain exponential smoother with a constant gain.
/// It is not a Kalman filter, there is no covariance to derive the gain
/// from, and the detection thresholds are tuned against exactly this
/// behavior.
///
pub struct MagnitudeTracker
{
    /// Low-pass filtered acceleration magnitude.
    pub low_pass_estimate: f32,

    /// Adaptive (fixed-gain) estimate after the most recent sample.
    pub adaptive_estimate: f32,

    /// Adaptive estimate after the previous sample.
    pub last_adaptive: f32,
}

impl MagnitudeTracker
{
    pub const fn new() -> Self {
        MagnitudeTracker {
            low_pass_estimate: 0.0,
            adaptive_estimate: 0.0,
            last_adaptive: 0.0,
        }
    }

    /// Folds one raw accelerometer reading into both estimates and returns
    /// the raw magnitude.
    ///
    pub fn update(&mut self, x: f32, y: f32, z: f32, low_pass_alpha: f32, adaptive_gain: f32) -> f32 {
        let magnitude = libm::sqrtf(x * x + y * y + z * z);

        self.low_pass_estimate = low_pass(magnitude, self.low_pass_estimate, low_pass_alpha);

        self.last_adaptive = self.adaptive_estimate;
        self.adaptive_estimate += adaptive_gain * (magnitude - self.adaptive_estimate);

        magnitude
    }

    /// How far the adaptive estimate moved on the most recent sample.
    ///
    pub fn adaptive_delta(&self) -> f32 {
        libm::fabsf(self.adaptive_estimate - self.last_adaptive)
    }
}

impl Default for MagnitudeTracker {
    fn default() -> Self {
        Self::new()
    }
}
