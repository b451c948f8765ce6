//! One sampling cycle and where its result goes.
//!
//! [`sample_once`] is the whole per-cycle pipeline: read, clamp,
//! calibrate, compensate, estimate. Cadence, retries, and termination
//! belong to the caller.

use core::fmt;

use log::{info, warn};

use crate::adc::SampleSource;
use crate::calibration::CalibrationCurve;
use crate::error::{Error, Result};
use crate::estimator::{self, BatteryRange, BatteryReading};

/// Everything one cycle produced, intermediates included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub raw: u16,
    pub pin_mv: u32,
    pub reading: BatteryReading,
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Raw ADC Value: {}", self.raw)?;
        writeln!(f, "Voltage at ADC Pin: {} mV", self.pin_mv)?;
        writeln!(f, "Battery Voltage: {:.2} V", self.reading.voltage)?;
        write!(f, "Battery Level: {}%", self.reading.percentage)
    }
}

/// Read and convert a single sample.
///
/// A code outside the curve's width is clamped to full scale and logged.
pub fn sample_once<S: SampleSource>(
    curve: &CalibrationCurve,
    source: &mut S,
    range: BatteryRange,
    divider_ratio: f32,
) -> Result<Sample, S::Error> {
    let mut raw = source.read_raw().map_err(Error::Read)?;

    let max = curve.max_raw();
    if raw > max {
        warn!("adc: raw {} exceeds {} bit range, clamped to {}", raw, curve.bit_width().bits(), max);
        raw = max;
    }

    let pin_mv = curve.raw_to_voltage(raw);
    let reading = estimator::estimate(pin_mv, divider_ratio, range);

    Ok(Sample { raw, pin_mv, reading })
}

/// Consumer of per-cycle results (console, display, telemetry).
pub trait ReportSink {
    fn report(&mut self, sample: &Sample);
}

/// Writes each sample through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn report(&mut self, sample: &Sample) {
        info!("Raw ADC Value: {}", sample.raw);
        info!("Voltage at ADC Pin: {} mV", sample.pin_mv);
        info!("Battery Voltage: {:.2} V", sample.reading.voltage);
        info!("Battery Level: {}%", sample.reading.percentage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adc::{AdcSettings, AdcUnit, Attenuation, BitWidth, FactoryCalibration};
    use crate::calibration::CalibrationKind;
    use crate::config::MonitorConfig;
    use assert_float_eq::*;
    use std::collections::VecDeque;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum FakeError {
        Rejected,
        Empty,
    }

    /// Scripted source: hands out queued codes, records configuration.
    #[derive(Default)]
    struct FakeSource {
        codes: VecDeque<u16>,
        factory: FactoryCalibration,
        reject_config: bool,
        configured: Option<(u8, BitWidth, Attenuation)>,
        reads: usize,
    }

    impl FakeSource {
        fn with_codes(codes: &[u16]) -> Self {
            Self {
                codes: codes.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl SampleSource for FakeSource {
        type Error = FakeError;

        fn configure(&mut self, channel: u8, width: BitWidth, attenuation: Attenuation) -> core::result::Result<(), FakeError> {
            if self.reject_config {
                return Err(FakeError::Rejected);
            }
            self.configured = Some((channel, width, attenuation));
            Ok(())
        }

        fn read_raw(&mut self) -> core::result::Result<u16, FakeError> {
            self.reads += 1;
            self.codes.pop_front().ok_or(FakeError::Empty)
        }

        fn factory_calibration(&self, _unit: AdcUnit, _attenuation: Attenuation) -> FactoryCalibration {
            self.factory
        }
    }

    fn settings() -> AdcSettings {
        MonitorConfig::default().adc_settings()
    }

    #[test]
    fn initialize_configures_the_source() {
        let mut src = FakeSource::default();
        let curve = CalibrationCurve::initialize(&mut src, &settings()).unwrap();
        assert_eq!(src.configured, Some((0, BitWidth::Bits12, Attenuation::Db11)));
        assert_eq!(curve.kind(), CalibrationKind::DefaultVref);
        assert_eq!(src.reads, 0);
    }

    #[test]
    fn initialize_surfaces_configuration_failure() {
        let mut src = FakeSource {
            reject_config: true,
            ..FakeSource::default()
        };
        assert_eq!(
            CalibrationCurve::initialize(&mut src, &settings()),
            Err(Error::Configure(FakeError::Rejected))
        );
    }

    #[test]
    fn initialize_uses_factory_data_when_present() {
        let mut src = FakeSource {
            factory: FactoryCalibration {
                two_point: None,
                vref_mv: Some(1100),
            },
            ..FakeSource::default()
        };
        let curve = CalibrationCurve::initialize(&mut src, &settings()).unwrap();
        assert_eq!(curve.kind(), CalibrationKind::EfuseVref);
    }

    #[test]
    fn half_scale_sample_on_fallback_curve_is_empty() {
        let mut src = FakeSource::with_codes(&[2048]);
        let curve = CalibrationCurve::initialize(&mut src, &settings()).unwrap();
        let s = sample_once(&curve, &mut src, BatteryRange::LI_ION_1S, 2.0).unwrap();
        assert_eq!(s.raw, 2048);
        assert_eq!(s.pin_mv, 550);
        assert_f32_near!(s.reading.voltage, 1.1);
        assert_eq!(s.reading.percentage, 0);
    }

    #[test]
    fn full_scale_sequence() {
        let mut src = FakeSource::with_codes(&[0, 4095, 4095]);
        let curve = CalibrationCurve::initialize(&mut src, &settings()).unwrap();
        let range = BatteryRange::LI_ION_1S;

        let empty = sample_once(&curve, &mut src, range, 2.0).unwrap();
        assert_eq!(empty.reading.percentage, 0);

        // 1100 mV * 2 = 2.2 V, still below the empty threshold
        let full_scale = sample_once(&curve, &mut src, range, 2.0).unwrap();
        assert_eq!(full_scale.pin_mv, 1100);
        assert_eq!(full_scale.reading.percentage, 0);

        // a 4:1 divider pushes the same code to 4.4 V
        let wide = sample_once(&curve, &mut src, range, 4.0).unwrap();
        assert_eq!(wide.reading.percentage, 100);
        assert_eq!(src.reads, 3);
    }

    #[test]
    fn out_of_range_code_is_clamped() {
        let mut src = FakeSource::with_codes(&[9000]);
        let curve = CalibrationCurve::initialize(&mut src, &settings()).unwrap();
        let s = sample_once(&curve, &mut src, BatteryRange::LI_ION_1S, 2.0).unwrap();
        assert_eq!(s.raw, 4095);
        assert_eq!(s.pin_mv, 1100);
    }

    #[test]
    fn read_failure_is_reported() {
        let mut src = FakeSource::default();
        let curve = CalibrationCurve::initialize(&mut src, &settings()).unwrap();
        assert_eq!(
            sample_once(&curve, &mut src, BatteryRange::LI_ION_1S, 2.0),
            Err(Error::Read(FakeError::Empty))
        );
    }

    #[test]
    fn sample_renders_console_lines() {
        let s = Sample {
            raw: 3351,
            pin_mv: 1800,
            reading: estimator::estimate(1800, 2.0, BatteryRange::LI_ION_1S),
        };
        assert_eq!(
            format!("{}", s),
            "Raw ADC Value: 3351\nVoltage at ADC Pin: 1800 mV\nBattery Voltage: 3.60 V\nBattery Level: 50%"
        );
    }

    #[test]
    fn sinks_receive_every_sample() {
        struct Collect(Vec<u8>);
        impl ReportSink for Collect {
            fn report(&mut self, sample: &Sample) {
                self.0.push(sample.reading.percentage);
            }
        }

        let mut src = FakeSource::with_codes(&[100, 200]);
        let curve = CalibrationCurve::characterize(&settings(), FactoryCalibration::NONE);
        let mut sink = Collect(Vec::new());
        let mut log = LogSink;
        while let Ok(s) = sample_once(&curve, &mut src, BatteryRange::LI_ION_1S, 20.0) {
            log.report(&s);
            sink.report(&s);
        }
        // 100 -> 27 mV -> 0.54 V; 200 -> 54 mV -> 1.08 V
        assert_eq!(sink.0, vec![0, 0]);
    }
}
