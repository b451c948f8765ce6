//! ADC vocabulary and the [`SampleSource`] capability.
//!
//! Everything here is plain data; the hardware binding lives in the
//! firmware crate, which implements [`SampleSource`] over esp-hal.

/// ADC peripheral instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcUnit {
    Adc1,
    Adc2,
}

/// Input attenuation. Higher attenuation widens the measurable range at
/// the cost of resolution; 11 dB covers roughly 0..2500 mV on the C3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attenuation {
    Db0,
    Db2_5,
    Db6,
    Db11,
}

impl Attenuation {
    /// Index into per-attenuation coefficient tables.
    pub const fn index(self) -> usize {
        match self {
            Attenuation::Db0 => 0,
            Attenuation::Db2_5 => 1,
            Attenuation::Db6 => 2,
            Attenuation::Db11 => 3,
        }
    }
}

/// Sample resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitWidth {
    Bits9,
    Bits10,
    Bits11,
    Bits12,
}

impl BitWidth {
    pub const fn bits(self) -> u32 {
        match self {
            BitWidth::Bits9 => 9,
            BitWidth::Bits10 => 10,
            BitWidth::Bits11 => 11,
            BitWidth::Bits12 => 12,
        }
    }

    /// Largest code a conversion can return at this width.
    pub const fn max_raw(self) -> u16 {
        ((1u32 << self.bits()) - 1) as u16
    }
}

/// A single eFuse calibration point: the code read for a known input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalPoint {
    /// 12-bit code.
    pub raw: u16,
    pub mv: u32,
}

/// eFuse two-point calibration (low and high reference inputs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoPoint {
    pub low: CalPoint,
    pub high: CalPoint,
}

/// Factory data a sample source may expose. Either field can be absent;
/// both absent means the curve falls back to the configured reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FactoryCalibration {
    pub two_point: Option<TwoPoint>,
    pub vref_mv: Option<u32>,
}

impl FactoryCalibration {
    pub const NONE: Self = Self {
        two_point: None,
        vref_mv: None,
    };
}

/// Settings the calibration engine is initialized with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcSettings {
    pub channel: u8,
    pub attenuation: Attenuation,
    pub bit_width: BitWidth,
    pub unit: AdcUnit,
    /// Fallback reference used when no factory calibration exists.
    pub reference_mv: u32,
}

/// A single-channel ADC the pipeline can configure and sample.
///
/// Implemented by the esp-hal adapter on the device and by scripted
/// fakes in tests.
pub trait SampleSource {
    type Error: core::fmt::Debug;

    /// Apply width and attenuation for `channel`. Called once, before any
    /// [`read_raw`](Self::read_raw).
    fn configure(
        &mut self,
        channel: u8,
        width: BitWidth,
        attenuation: Attenuation,
    ) -> Result<(), Self::Error>;

    /// One conversion. Should return a code in `0..=width.max_raw()`.
    fn read_raw(&mut self) -> Result<u16, Self::Error>;

    /// Factory calibration burned into the chip for this unit/attenuation.
    fn factory_calibration(&self, _unit: AdcUnit, _attenuation: Attenuation) -> FactoryCalibration {
        FactoryCalibration::NONE
    }
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    type Error = S::Error;

    fn configure(
        &mut self,
        channel: u8,
        width: BitWidth,
        attenuation: Attenuation,
    ) -> Result<(), Self::Error> {
        (**self).configure(channel, width, attenuation)
    }

    fn read_raw(&mut self) -> Result<u16, Self::Error> {
        (**self).read_raw()
    }

    fn factory_calibration(&self, unit: AdcUnit, attenuation: Attenuation) -> FactoryCalibration {
        (**self).factory_calibration(unit, attenuation)
    }
}
