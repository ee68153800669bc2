//! Button press monitor for the ATmega2560
//!
//! Three periodic tasks on a non-preemptive earliest-deadline-first
//! scheduler: debounce and measure presses, keep window statistics with an
//! activity blink, and print a report every window.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

pub mod logger;

pub mod application;
pub mod config;
pub mod diagnostics;
pub mod drivers;
pub mod os;
pub mod rtos;

#[cfg(target_arch = "avr")]
pub mod hal;

#[cfg(not(target_arch = "avr"))]
pub mod sim;

pub use application::{Board, Monitor, Peripherals};
pub use os::{Clock, Millis};
