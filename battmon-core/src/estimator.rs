// Li-ion charge estimate from pin voltage
//
// The sensing pin sits behind a resistor divider; multiply back out by
// the divider ratio for the cell voltage. Charge is a straight line
// between the empty and full voltages, clamped at both ends and truncated
// toward zero. Real cells discharge along a knee-shaped curve, so a
// lookup table would track them better; the line is kept for parity
// with existing readouts.

use core::fmt;

/// Voltages (volts) that map to 0% and 100%. Always `min < max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryRange {
    min: f32,
    max: f32,
}

impl BatteryRange {
    /// Single Li-ion cell: 3.0 V empty, 4.2 V full.
    pub const LI_ION_1S: Self = Self { min: 3.0, max: 4.2 };

    /// `None` unless both bounds are finite and `min < max`.
    pub fn new(min: f32, max: f32) -> Option<Self> {
        if min.is_finite() && max.is_finite() && min < max {
            Some(Self { min, max })
        } else {
            None
        }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }
}

impl Default for BatteryRange {
    fn default() -> Self {
        Self::LI_ION_1S
    }
}

/// Cell voltage and charge estimate for one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryReading {
    pub voltage: f32,
    /// 0..=100
    pub percentage: u8,
}

impl fmt::Display for BatteryReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} V ({}%)", self.voltage, self.percentage)
    }
}

/// Cell voltage in volts from the pin voltage and divider ratio.
pub fn compensate(pin_mv: u32, divider_ratio: f32) -> f32 {
    (pin_mv as f32 / 1000.0) * divider_ratio
}

/// Clamped linear charge percentage. NaN reads as empty.
pub fn to_percentage(voltage: f32, range: BatteryRange) -> u8 {
    if voltage >= range.max {
        100
    } else if voltage <= range.min || voltage.is_nan() {
        0
    } else {
        // positive here, so the cast truncates like floor
        ((voltage - range.min) / (range.max - range.min) * 100.0) as u8
    }
}

/// [`compensate`] then [`to_percentage`].
pub fn estimate(pin_mv: u32, divider_ratio: f32, range: BatteryRange) -> BatteryReading {
    let voltage = compensate(pin_mv, divider_ratio);
    BatteryReading {
        voltage,
        percentage: to_percentage(voltage, range),
    }
}
