// Embassy tasks and the signals they publish.
// Single sampling task; the main loop consumes its readings.

pub mod tasks;

pub use tasks::{LATEST_SAMPLE, SamplerParams, sampler_task};
