use core::fmt;

/// Errors raised by the measurement pipeline.
///
/// Generic over the error type of the [`SampleSource`](crate::SampleSource)
/// so hardware failures pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The ADC rejected its width/attenuation/channel configuration.
    Configure(E),
    /// A raw sample could not be read.
    Read(E),
    /// Battery range with `min >= max` (or non-finite bounds).
    InvalidRange,
    /// Divider ratio that is not a finite positive number.
    InvalidDivider,
    /// Zero sampling interval.
    InvalidInterval,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configure(e) => write!(f, "adc configuration failed: {:?}", e),
            Error::Read(e) => write!(f, "adc read failed: {:?}", e),
            Error::InvalidRange => write!(f, "battery range min must be below max"),
            Error::InvalidDivider => write!(f, "divider ratio must be finite and positive"),
            Error::InvalidInterval => write!(f, "sampling interval must be non-zero"),
        }
    }
}

pub type Result<T, E> = core::result::Result<T, Error<E>>;
