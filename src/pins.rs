//! GPIO assignments for the RoomNode board (ESP32 DevKit).
//!
//! Single source of truth — `main` builds every pin driver from these
//! numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// DS18B20 one-wire data line (external 4.7 kΩ pull-up).
pub const PROBE_ONE_WIRE_GPIO: i32 = 4;

/// HC-SR501 PIR output.  HIGH = motion detected.
pub const PIR_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// Actuators (relay / MOSFET drivers, active HIGH)
// ---------------------------------------------------------------------------

pub const LIGHT_GPIO: i32 = 22;
pub const FAN_GPIO: i32 = 23;

// ---------------------------------------------------------------------------
// Status indicator
// ---------------------------------------------------------------------------

/// On-board blue LED.
pub const STATUS_LED_GPIO: i32 = 2;
