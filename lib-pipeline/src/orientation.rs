use cfg_if::cfg_if;

use crate::{RAD_TO_DEG, REFERENCE_GRAVITY};

/// Complementary filter fusing the integrated gyroscope rotation with the
/// tilt angle derived from the filtered acceleration.
///
/// The gyroscope integral is smooth but drifts; the accelerometer tilt is
/// absolute but noisy. Blending the two with a heavy gyro weight keeps the
/// estimate both stable and anchored.
///
/// The angle is not wrapped, integrating a sustained rotation will carry it
/// past ±180°.
///
pub struct OrientationEstimator
{
    /// In degrees; the fused rotation estimate around the device z axis.
    pub estimated_angle_deg: f32,

    /// Timestamp of the previously integrated gyroscope sample, `None` until
    /// the first sample arrives.
    prev_gyro_ms: Option<i64>,

    /// Angle according only to integrating the gyroscope, ignoring the
    /// accelerometer.
    #[cfg(feature = "debug")]
    pub gyro_angle: f32,

    /// Angle according only to the accelerometer tilt, ignoring the
    /// gyroscope.
    #[cfg(feature = "debug")]
    pub accel_angle: f32,
}

impl OrientationEstimator
{
    pub const fn new() -> Self {
        OrientationEstimator {
            estimated_angle_deg: 0.0,
            prev_gyro_ms: None,

            #[cfg(feature = "debug")]
            gyro_angle: 0.0,

            #[cfg(feature = "debug")]
            accel_angle: 0.0,
        }
    }

    /// Folds one filtered gyroscope sample into the estimate and returns the
    /// new fused angle.
    ///
    /// `filtered_acceleration` is the current low-pass acceleration
    /// magnitude estimate, used to compute the absolute tilt reference.
    ///
    pub fn update(
        &mut self,
        filtered_gyro_z: f32,
        filtered_acceleration: f32,
        timestamp_ms: i64,
        complementary_alpha: f32,
    ) -> f32 {
        // The very first sample has nothing to integrate against; a zero
        // delta avoids one huge spurious angle jump.
        let delta_t = match self.prev_gyro_ms {
            Some(prev) => (timestamp_ms - prev) as f32 / 1000.0,
            None => 0.0,
        };
        self.prev_gyro_ms = Some(timestamp_ms);

        let gyro_angle = self.estimated_angle_deg + filtered_gyro_z * delta_t;
        let accel_angle = libm::atan2f(filtered_acceleration, REFERENCE_GRAVITY) * RAD_TO_DEG;

        cfg_if! { if #[cfg(feature = "debug")] {
            self.gyro_angle = gyro_angle;
            self.accel_angle = accel_angle;
        }}

        self.estimated_angle_deg =
            complementary_alpha * gyro_angle + (1.0 - complementary_alpha) * accel_angle;
        self.estimated_angle_deg
    }

    /// Zeroes the fused angle. The integration clock keeps running so the
    /// next sample still gets a sane delta.
    ///
    pub fn reset_angle(&mut self) {
        self.estimated_angle_deg = 0.0;
    }
}

impl Default for OrientationEstimator {
    fn default() -> Self {
        Self::new()
    }
}
