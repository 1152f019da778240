//! Output drivers.

pub mod status_led;
pub mod switch;
