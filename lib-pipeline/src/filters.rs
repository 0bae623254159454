use window::Window;

use crate::MOVING_AVERAGE_WINDOW;

/// One step of exponential smoothing. Weights the previous filtered value by
/// `alpha` and the new raw value by `1 - alpha`.
///
#[inline]
pub fn low_pass(raw: f32, previous: f32, alpha: f32) -> f32 {
    alpha * previous + (1.0 - alpha) * raw
}

/// Two-stage smoothing for a single axis: a moving average over the last
/// few raw values followed by a low-pass accumulator.
///
pub struct AxisFilter
{
    window: Window<f32, MOVING_AVERAGE_WINDOW>,

    /// Output of the low-pass stage after the most recent update.
    pub filtered: f32,
}

impl AxisFilter
{
    pub const fn new() -> Self {
        AxisFilter {
            window: Window::new(),
            filtered: 0.0,
        }
    }

    /// Pushes a raw value into the window (evicting the oldest once full)
    /// and returns the arithmetic mean of what the window now holds.
    ///
    pub fn moving_average(&mut self, raw: f32) -> f32 {
        self.window.push(raw);
        self.window.iter().sum::<f32>() / self.window.len() as f32
    }

    /// Runs both filter stages for one raw value and returns the new
    /// filtered output.
    ///
    pub fn update(&mut self, raw: f32, alpha: f32) -> f32 {
        let smoothed = self.moving_average(raw);
        self.filtered = low_pass(smoothed, self.filtered, alpha);
        self.filtered
    }
}

impl Default for AxisFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// The per-axis filter cascade for the gyroscope stream.
///
pub struct FilterBank
{
    pub x: AxisFilter,
    pub y: AxisFilter,
    pub z: AxisFilter,
}

impl FilterBank
{
    pub const fn new() -> Self {
        FilterBank {
            x: AxisFilter::new(),
            y: AxisFilter::new(),
            z: AxisFilter::new(),
        }
    }

    /// Filters one raw triaxial reading, returning the filtered rates as
    /// `(x, y, z)`.
    ///
    pub fn update(&mut self, x: f32, y: f32, z: f32, alpha: f32) -> (f32, f32, f32) {
        (
            self.x.update(x, alpha),
            self.y.update(y, alpha),
            self.z.update(z, alpha),
        )
    }
}

impl Default for FilterBank {
    fn default() -> Self {
        Self::new()
    }
}
