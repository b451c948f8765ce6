// battmon entry point
//
// Boot: logger -> esp-rtos scheduler -> ADC bring-up -> calibration
// Then the sampler task measures once per interval and the main loop
// reports every published sample.
//
// Calibration failure is fatal: without a configured ADC there is
// nothing to sample.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::interrupt::software::SoftwareInterruptControl;
use esp_hal::timer::timg::TimerGroup;
use log::info;

use battmon::board::{self, BatteryHw};
use battmon::drivers::adc::EspAdcSource;
use battmon::kernel::{LATEST_SAMPLE, SamplerParams, sampler_task};
use battmon_core::{CalibrationCurve, LogSink, MonitorConfig, ReportSink};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    info!("booting...");

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_int = SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_int.software_interrupt0);
    info!("scheduler started.");

    let cfg = MonitorConfig::default();
    if let Err(e) = cfg.validate::<()>() {
        panic!("config: {}", e);
    }
    let range = match cfg.battery_range::<()>() {
        Ok(r) => r,
        Err(e) => panic!("config: {}", e),
    };

    let hw = BatteryHw::init(peripherals.ADC1, peripherals.GPIO0, cfg.attenuation);
    let mut source =
        EspAdcSource::new(hw, cfg.read_timeout_ms).with_factory_calibration(board::FACTORY_CALIBRATION);

    let curve = match CalibrationCurve::initialize(&mut source, &cfg.adc_settings()) {
        Ok(c) => c,
        Err(e) => panic!("adc init: {}", e),
    };
    info!("calibration: {} (ref {} mV)", curve.kind(), curve.reference_mv());

    let params = SamplerParams {
        range,
        divider_ratio: cfg.divider_ratio,
        interval_ms: cfg.interval_ms,
    };
    spawner.spawn(sampler_task(source, curve, params)).unwrap();
    info!("sampler ready ({} ms interval).", cfg.interval_ms);

    let mut sink = LogSink;
    loop {
        let sample = LATEST_SAMPLE.wait().await;
        sink.report(&sample);
    }
}
