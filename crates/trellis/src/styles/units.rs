//! Length conversions.

use trellis_core::source::{Length, MeasurementUnit};

/// Converts a length to device pixels at `dpi`.
///
/// # Examples
///
/// ```
/// # use trellis::styles::units::to_device_pixels;
/// # use trellis_core::source::{Length, MeasurementUnit};
/// assert_eq!(to_device_pixels(Length::new(1.0, MeasurementUnit::Inch), 96.0), 96.0);
/// assert_eq!(to_device_pixels(Length::pixels(3.0), 120.0), 3.0);
/// ```
pub fn to_device_pixels(length: Length, dpi: f64) -> f64 {
    length.value() * length.unit().pixels_per_unit(dpi)
}

/// Converts a length to typographic points at `dpi`.
pub fn to_points(length: Length, dpi: f64) -> f64 {
    to_device_pixels(length, dpi) / MeasurementUnit::Point.pixels_per_unit(dpi)
}
