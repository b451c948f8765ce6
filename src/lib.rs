// battmon: battery voltage monitor for ESP32-C3 boards
//
// board:   pin map and ADC bring-up
// drivers: esp-hal ADC adapter for the battmon-core pipeline
// kernel:  embassy sampling task and its published readings

#![no_std]

pub mod board;
pub mod drivers;
pub mod kernel;
