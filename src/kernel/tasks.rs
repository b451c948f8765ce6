// Embassy spawned tasks: battery sampling
//
//   • `sampler_task` — owns the ADC source and the calibration curve,
//                      runs one `sample_once` per interval and publishes
//                      the result through LATEST_SAMPLE. Never exits.
//
// Failed reads are logged and skipped; the next tick samples again.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use log::warn;

use battmon_core::{BatteryRange, CalibrationCurve, Sample, sample_once};

use crate::drivers::adc::EspAdcSource;

/// Most recent sample. `Signal` overwrites stale values; consumers only
/// ever need the latest one.
pub static LATEST_SAMPLE: Signal<CriticalSectionRawMutex, Sample> = Signal::new();

/// Per-task sampling parameters, already validated.
#[derive(Debug, Clone, Copy)]
pub struct SamplerParams {
    pub range: BatteryRange,
    pub divider_ratio: f32,
    pub interval_ms: u64,
}

#[embassy_executor::task]
pub async fn sampler_task(mut source: EspAdcSource, curve: CalibrationCurve, params: SamplerParams) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(params.interval_ms));

    loop {
        match sample_once(&curve, &mut source, params.range, params.divider_ratio) {
            Ok(sample) => LATEST_SAMPLE.signal(sample),
            Err(e) => warn!("battery: {}", e),
        }

        ticker.next().await;
    }
}
