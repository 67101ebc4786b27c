//! Red to green colour gradient for "goodness" values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An RGB colour; renders as `rgb(r, g, b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

/// Position of `value` in `[min, max]` as 0.0..=1.0.
///
/// An empty range (`min == max`) counts as fully good (1.0). NaN maps to 0.0.
fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    if max == min {
        return 1.0;
    }
    let (low, high) = if min < max { (min, max) } else { (max, min) };
    let clamped = value.clamp(low, high);
    (clamped - min) / (max - min)
}

fn gradient(normalized: f64) -> Rgb {
    Rgb {
        red: (255.0 * (1.0 - normalized)).round() as u8,
        green: (255.0 * normalized).round() as u8,
        blue: 0,
    }
}

/// `min` is red, `max` is green; values outside the range clamp.
pub fn scale_color(value: f64, min: f64, max: f64) -> Rgb {
    gradient(normalize(value, min, max))
}

/// Same gradient for lower-is-better metrics: `min` is green, `max` is red.
pub fn scale_color_inverted(value: f64, min: f64, max: f64) -> Rgb {
    gradient(1.0 - normalize(value, min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extremes() {
        assert_eq!(scale_color(0.0, 0.0, 100.0).to_string(), "rgb(255, 0, 0)");
        assert_eq!(scale_color(100.0, 0.0, 100.0).to_string(), "rgb(0, 255, 0)");
    }

    #[test]
    fn test_clamps_out_of_range() {
        assert_eq!(scale_color(-50.0, 0.0, 100.0), scale_color(0.0, 0.0, 100.0));
        assert_eq!(scale_color(250.0, 0.0, 100.0), scale_color(100.0, 0.0, 100.0));
    }

    #[test]
    fn test_midpoint() {
        // 127.5 rounds away from zero on both channels
        assert_eq!(scale_color(50.0, 0.0, 100.0).to_string(), "rgb(128, 128, 0)");
        assert_eq!(
            scale_color(45.0, 40.0, 60.0),
            Rgb {
                red: 191,
                green: 64,
                blue: 0
            }
        );
    }

    #[test]
    fn test_empty_range() {
        assert_eq!(scale_color(3.0, 3.0, 3.0).to_string(), "rgb(0, 255, 0)");
        assert_eq!(scale_color(9.0, 3.0, 3.0).to_string(), "rgb(0, 255, 0)");
    }

    #[test]
    fn test_nan_is_red() {
        assert_eq!(scale_color(f64::NAN, 0.0, 1.0).to_string(), "rgb(255, 0, 0)");
    }

    #[test]
    fn test_inverted() {
        assert_eq!(scale_color_inverted(0.0, 0.0, 10.0).to_string(), "rgb(0, 255, 0)");
        assert_eq!(scale_color_inverted(10.0, 0.0, 10.0).to_string(), "rgb(255, 0, 0)");
    }
}
