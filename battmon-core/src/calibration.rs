//! Raw ADC code to pin millivolts.
//!
//! The curve is characterized once at boot and then used as a pure
//! lookup. Precedence follows the Espressif characterizer:
//!
//! 1. eFuse two-point data: line through the two burned points.
//! 2. eFuse reference voltage: per-attenuation scaled line.
//! 3. Neither: proportional scaling against the configured reference.
//!
//! Linear coefficients are 16.16 fixed point; codes are scaled to 12 bits
//! before the linear laws are applied since both eFuse formats are
//! characterized at 12 bits.

use log::{debug, warn};

use crate::adc::{AdcSettings, AdcUnit, Attenuation, BitWidth, FactoryCalibration, SampleSource, TwoPoint};
use crate::error::{Error, Result};

const COEFF_A_SCALE: i64 = 65536;
const COEFF_A_ROUND: i64 = COEFF_A_SCALE / 2;

const ADC_12_BIT_MAX: i64 = 4095;

// vref line, both scaled by 65536, indexed by Attenuation::index()
const ADC1_VREF_ATTEN_SCALE: [i64; 4] = [57431, 76236, 105481, 196602];
const ADC2_VREF_ATTEN_SCALE: [i64; 4] = [57236, 76175, 105678, 197170];
const ADC1_VREF_ATTEN_OFFSET: [i64; 4] = [75, 78, 88, 142];
const ADC2_VREF_ATTEN_OFFSET: [i64; 4] = [63, 66, 89, 144];

/// Which characterization a curve was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationKind {
    TwoPoint,
    EfuseVref,
    DefaultVref,
}

impl CalibrationKind {
    pub fn name(self) -> &'static str {
        match self {
            CalibrationKind::TwoPoint => "eFuse two-point",
            CalibrationKind::EfuseVref => "eFuse vref",
            CalibrationKind::DefaultVref => "default vref",
        }
    }
}

impl core::fmt::Display for CalibrationKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Characterized conversion from raw codes to pin millivolts.
///
/// Immutable once built. Construct with [`CalibrationCurve::initialize`]
/// (configures the hardware too) or [`CalibrationCurve::characterize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationCurve {
    unit: AdcUnit,
    attenuation: Attenuation,
    bit_width: BitWidth,
    reference_mv: u32,
    kind: CalibrationKind,
    // y = (a * x + round) / scale + b, unused for DefaultVref
    coeff_a: i64,
    coeff_b: i64,
}

impl CalibrationCurve {
    /// Configure `source` for `settings` and characterize it.
    ///
    /// Must run exactly once before sampling. A configuration failure is
    /// returned as [`Error::Configure`]; there is no usable ADC without it.
    pub fn initialize<S: SampleSource>(source: &mut S, settings: &AdcSettings) -> Result<Self, S::Error> {
        source
            .configure(settings.channel, settings.bit_width, settings.attenuation)
            .map_err(Error::Configure)?;

        let factory = source.factory_calibration(settings.unit, settings.attenuation);
        Ok(Self::characterize(settings, factory))
    }

    /// Build a curve from settings and whatever factory data is available.
    pub fn characterize(settings: &AdcSettings, factory: FactoryCalibration) -> Self {
        let mut curve = Self {
            unit: settings.unit,
            attenuation: settings.attenuation,
            bit_width: settings.bit_width,
            reference_mv: settings.reference_mv,
            kind: CalibrationKind::DefaultVref,
            coeff_a: 0,
            coeff_b: 0,
        };

        if let Some(tp) = factory.two_point {
            match two_point_coefficients(&tp) {
                Some((a, b)) => {
                    curve.kind = CalibrationKind::TwoPoint;
                    curve.coeff_a = a;
                    curve.coeff_b = b;
                }
                None => warn!("calibration: ignoring degenerate two-point data {:?}", tp),
            }
        }

        if curve.kind == CalibrationKind::DefaultVref
            && let Some(vref) = factory.vref_mv
        {
            let (scales, offsets) = match settings.unit {
                AdcUnit::Adc1 => (&ADC1_VREF_ATTEN_SCALE, &ADC1_VREF_ATTEN_OFFSET),
                AdcUnit::Adc2 => (&ADC2_VREF_ATTEN_SCALE, &ADC2_VREF_ATTEN_OFFSET),
            };
            let i = settings.attenuation.index();
            curve.kind = CalibrationKind::EfuseVref;
            curve.coeff_a = vref as i64 * scales[i] / ADC_12_BIT_MAX;
            curve.coeff_b = offsets[i];
        }

        debug!(
            "calibration: {} ({:?} {:?} {} bit), a={} b={} ref={}mV",
            curve.kind,
            curve.unit,
            curve.attenuation,
            curve.bit_width.bits(),
            curve.coeff_a,
            curve.coeff_b,
            curve.reference_mv
        );

        curve
    }

    pub fn kind(&self) -> CalibrationKind {
        self.kind
    }

    pub fn unit(&self) -> AdcUnit {
        self.unit
    }

    pub fn attenuation(&self) -> Attenuation {
        self.attenuation
    }

    pub fn bit_width(&self) -> BitWidth {
        self.bit_width
    }

    pub fn reference_mv(&self) -> u32 {
        self.reference_mv
    }

    /// Largest code this curve accepts.
    pub fn max_raw(&self) -> u16 {
        self.bit_width.max_raw()
    }

    /// Convert one raw code to millivolts at the ADC pin.
    ///
    /// Codes above [`max_raw`](Self::max_raw) are treated as full scale.
    pub fn raw_to_voltage(&self, raw: u16) -> u32 {
        let max = self.max_raw() as i64;
        let raw = (raw as i64).min(max);

        let mv = match self.kind {
            CalibrationKind::DefaultVref => {
                // round(raw / max * ref), exact in integers
                (raw * self.reference_mv as i64 + max / 2) / max
            }
            CalibrationKind::TwoPoint | CalibrationKind::EfuseVref => {
                let raw12 = raw << (12 - self.bit_width.bits());
                (self.coeff_a * raw12 + COEFF_A_ROUND) / COEFF_A_SCALE + self.coeff_b
            }
        };

        mv.max(0) as u32
    }
}

fn two_point_coefficients(tp: &TwoPoint) -> Option<(i64, i64)> {
    let (low, high) = (tp.low, tp.high);
    if high.raw <= low.raw || high.mv <= low.mv {
        return None;
    }
    let a = (high.mv - low.mv) as i64 * COEFF_A_SCALE / (high.raw - low.raw) as i64;
    let b = low.mv as i64 - (a * low.raw as i64 + COEFF_A_ROUND) / COEFF_A_SCALE;
    Some((a, b))
}
