//! Board Support Package
//!
//! Maps the battery sense wiring to a named subsystem so the rest of
//! battmon never needs GPIO numbers. The divider output lands on GPIO0,
//! which is ADC1 channel 0 on the ESP32-C3.

pub mod pins;

use esp_hal::{
    Blocking,
    analog::adc::{self, Adc, AdcConfig, AdcPin},
    peripherals::{ADC1, GPIO0},
};

use battmon_core::{AdcUnit, Attenuation, BitWidth, FactoryCalibration};

/// The C3 SAR ADC converts at a fixed 12-bit width.
pub const NATIVE_WIDTH: BitWidth = BitWidth::Bits12;

/// Only ADC1 is wired to the battery divider.
pub const BATTERY_ADC_UNIT: AdcUnit = AdcUnit::Adc1;

/// Per-board factory calibration, if it was read out of eFuse at the
/// bench. Empty means the curve uses the configured reference voltage.
pub const FACTORY_CALIBRATION: FactoryCalibration = FactoryCalibration::NONE;

/// Battery sense hardware: ADC1 plus the enabled divider pin.
pub struct BatteryHw {
    pub adc: Adc<'static, ADC1<'static>, Blocking>,
    pub pin: AdcPin<GPIO0<'static>, ADC1<'static>>,
    /// Attenuation the pin was enabled with; fixed from here on.
    pub attenuation: Attenuation,
}

impl BatteryHw {
    /// Enable GPIO0 on ADC1 with `attenuation`, uncalibrated so reads
    /// return raw codes.
    pub fn init(adc1: ADC1<'static>, gpio0: GPIO0<'static>, attenuation: Attenuation) -> Self {
        let mut adc_cfg = AdcConfig::new();
        let pin = adc_cfg.enable_pin(gpio0, hal_attenuation(attenuation));
        let adc = Adc::new(adc1, adc_cfg);

        BatteryHw {
            adc,
            pin,
            attenuation,
        }
    }
}

fn hal_attenuation(atten: Attenuation) -> adc::Attenuation {
    match atten {
        Attenuation::Db0 => adc::Attenuation::_0dB,
        Attenuation::Db2_5 => adc::Attenuation::_2p5dB,
        Attenuation::Db6 => adc::Attenuation::_6dB,
        Attenuation::Db11 => adc::Attenuation::_11dB,
    }
}
