// esp-hal oneshot ADC as a battmon-core SampleSource
//
// Width and attenuation are fixed when the pin is enabled in board/, so
// configure() only checks that the requested setup matches the wiring.
// Reads poll the non-blocking oneshot conversion until it completes or
// the timeout passes.

use core::fmt;

use esp_hal::time::{Duration, Instant};
use log::info;

use battmon_core::{AdcUnit, Attenuation, BitWidth, FactoryCalibration, SampleSource};

use crate::board::pins::BATTERY_ADC_CHANNEL;
use crate::board::{BATTERY_ADC_UNIT, BatteryHw, NATIVE_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcError {
    /// Channel is not the one wired to the divider.
    UnsupportedChannel(u8),
    /// Width the C3 cannot convert at.
    UnsupportedWidth(u32),
    /// Attenuation differs from what the pin was enabled with.
    AttenuationMismatch { enabled: Attenuation, requested: Attenuation },
    /// Conversion did not finish within the read timeout.
    Timeout,
    /// The driver reported a conversion error.
    Conversion,
}

impl fmt::Display for AdcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdcError::UnsupportedChannel(ch) => write!(f, "channel {} is not wired", ch),
            AdcError::UnsupportedWidth(bits) => write!(f, "{} bit width not supported", bits),
            AdcError::AttenuationMismatch { enabled, requested } => {
                write!(f, "pin enabled at {:?}, requested {:?}", enabled, requested)
            }
            AdcError::Timeout => write!(f, "conversion timed out"),
            AdcError::Conversion => write!(f, "conversion failed"),
        }
    }
}

pub struct EspAdcSource {
    hw: BatteryHw,
    timeout: Duration,
    factory: FactoryCalibration,
}

impl EspAdcSource {
    pub fn new(hw: BatteryHw, timeout_ms: u64) -> Self {
        Self {
            hw,
            timeout: Duration::from_millis(timeout_ms),
            factory: FactoryCalibration::NONE,
        }
    }

    pub fn with_factory_calibration(mut self, factory: FactoryCalibration) -> Self {
        self.factory = factory;
        self
    }
}

impl SampleSource for EspAdcSource {
    type Error = AdcError;

    fn configure(&mut self, channel: u8, width: BitWidth, attenuation: Attenuation) -> Result<(), AdcError> {
        if channel != BATTERY_ADC_CHANNEL {
            return Err(AdcError::UnsupportedChannel(channel));
        }
        if width != NATIVE_WIDTH {
            return Err(AdcError::UnsupportedWidth(width.bits()));
        }
        if attenuation != self.hw.attenuation {
            return Err(AdcError::AttenuationMismatch {
                enabled: self.hw.attenuation,
                requested: attenuation,
            });
        }
        info!("adc: ch{} {} bit {:?}", channel, width.bits(), attenuation);
        Ok(())
    }

    fn read_raw(&mut self) -> Result<u16, AdcError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match self.hw.adc.read_oneshot(&mut self.hw.pin) {
                Ok(raw) => return Ok(raw),
                Err(nb::Error::WouldBlock) => {}
                Err(nb::Error::Other(_)) => return Err(AdcError::Conversion),
            }
            if Instant::now() >= deadline {
                return Err(AdcError::Timeout);
            }
        }
    }

    fn factory_calibration(&self, unit: AdcUnit, _attenuation: Attenuation) -> FactoryCalibration {
        if unit == BATTERY_ADC_UNIT {
            self.factory
        } else {
            FactoryCalibration::NONE
        }
    }
}
