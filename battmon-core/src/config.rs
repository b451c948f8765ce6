//! Monitor configuration.
//!
//! Defaults describe the reference board: a 1:1 resistor pair on ADC1
//! channel 0 at 11 dB, sampled once a second, single Li-ion cell.

use crate::adc::{AdcSettings, AdcUnit, Attenuation, BitWidth};
use crate::error::Error;
use crate::estimator::BatteryRange;

pub const DEFAULT_CHANNEL: u8 = 0;
pub const DEFAULT_DIVIDER_RATIO: f32 = 2.0;
pub const DEFAULT_REFERENCE_MV: u32 = 1100;
pub const DEFAULT_BATTERY_MAX_V: f32 = 4.2;
pub const DEFAULT_BATTERY_MIN_V: f32 = 3.0;
pub const DEFAULT_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorConfig {
    pub channel: u8,
    pub attenuation: Attenuation,
    pub unit: AdcUnit,
    pub bit_width: BitWidth,
    pub divider_ratio: f32,
    pub reference_mv: u32,
    pub battery_max_v: f32,
    pub battery_min_v: f32,
    pub interval_ms: u64,
    /// Upper bound on a single conversion.
    pub read_timeout_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL,
            attenuation: Attenuation::Db11,
            unit: AdcUnit::Adc1,
            bit_width: BitWidth::Bits12,
            divider_ratio: DEFAULT_DIVIDER_RATIO,
            reference_mv: DEFAULT_REFERENCE_MV,
            battery_max_v: DEFAULT_BATTERY_MAX_V,
            battery_min_v: DEFAULT_BATTERY_MIN_V,
            interval_ms: DEFAULT_INTERVAL_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl MonitorConfig {
    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_attenuation(mut self, attenuation: Attenuation) -> Self {
        self.attenuation = attenuation;
        self
    }

    pub fn with_unit(mut self, unit: AdcUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_bit_width(mut self, bit_width: BitWidth) -> Self {
        self.bit_width = bit_width;
        self
    }

    pub fn with_divider_ratio(mut self, ratio: f32) -> Self {
        self.divider_ratio = ratio;
        self
    }

    pub fn with_reference_mv(mut self, mv: u32) -> Self {
        self.reference_mv = mv;
        self
    }

    pub fn with_battery_range(mut self, min_v: f32, max_v: f32) -> Self {
        self.battery_min_v = min_v;
        self.battery_max_v = max_v;
        self
    }

    pub fn with_interval_ms(mut self, ms: u64) -> Self {
        self.interval_ms = ms;
        self
    }

    pub fn with_read_timeout_ms(mut self, ms: u64) -> Self {
        self.read_timeout_ms = ms;
        self
    }

    /// Settings handed to the calibration engine.
    pub fn adc_settings(&self) -> AdcSettings {
        AdcSettings {
            channel: self.channel,
            attenuation: self.attenuation,
            bit_width: self.bit_width,
            unit: self.unit,
            reference_mv: self.reference_mv,
        }
    }

    pub fn battery_range<E>(&self) -> Result<BatteryRange, Error<E>> {
        BatteryRange::new(self.battery_min_v, self.battery_max_v).ok_or(Error::InvalidRange)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate<E>(&self) -> Result<(), Error<E>> {
        self.battery_range::<E>()?;
        if !self.divider_ratio.is_finite() || self.divider_ratio <= 0.0 {
            return Err(Error::InvalidDivider);
        }
        if self.interval_ms == 0 {
            return Err(Error::InvalidInterval);
        }
        Ok(())
    }
}
