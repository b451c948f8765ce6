//! GPIO |     Function    |      Notes
//! -----+-----------------+----------------------------------
//!  0   | ADC1 CH0 - VBAT | Voltage divider (2x1K), reads 1/2 actual voltage

// ----- Battery -----
pub const BATTERY_GPIO: u8 = 0;
pub const BATTERY_ADC_CHANNEL: u8 = 0; // ADC1_CH0 is GPIO0 on the C3
