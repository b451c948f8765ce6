// battmon-core: hardware-independent battery measurement pipeline.
// adc:         ADC settings, factory calibration data, SampleSource trait
// calibration: raw code -> pin millivolts (two-point, eFuse vref, fallback)
// estimator:   divider compensation, clamped linear charge percentage
// config:      runtime monitor configuration with board defaults
// monitor:     one sampling cycle + reporting sinks
// error:       error type shared by the above

#![cfg_attr(not(test), no_std)]

pub mod adc;
pub mod calibration;
pub mod config;
pub mod error;
pub mod estimator;
pub mod monitor;

pub use adc::{AdcSettings, AdcUnit, Attenuation, BitWidth, FactoryCalibration, SampleSource};
pub use calibration::{CalibrationCurve, CalibrationKind};
pub use config::MonitorConfig;
pub use error::{Error, Result};
pub use estimator::{BatteryRange, BatteryReading};
pub use monitor::{LogSink, ReportSink, Sample, sample_once};
