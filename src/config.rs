//! Application-wide constants and compile-time configuration.
//!
//! All protocol identifiers, buffer sizes, timing parameters, and pin
//! assignments live here so they can be tuned in one place.

// Nordic UART Service (NUS)
//
// The same UUIDs are used by the firmware for advertising/GATT and by
// the host for scan filtering and characteristic lookup.

/// NUS service UUID.
pub const UART_SERVICE_UUID: u128 = 0x6E400001_B5A3_F393_E0A9_E50E24DCCA9E;

/// NUS RX characteristic (central writes, peripheral receives).
pub const UART_RX_CHAR_UUID: u128 = 0x6E400002_B5A3_F393_E0A9_E50E24DCCA9E;

/// NUS TX characteristic (peripheral notifies, central receives).
pub const UART_TX_CHAR_UUID: u128 = 0x6E400003_B5A3_F393_E0A9_E50E24DCCA9E;

/// GAP device name carried in the scan response.
pub const DEVICE_NAME: &str = "PADLINK";

// BLE

/// ATT MTU configured on the SoftDevice; also the capacity of the NUS
/// characteristic value buffers.
pub const ATT_MTU: usize = 247;

/// Duration of the host-side BLE scan window (seconds).
pub const BLE_SCAN_DURATION_SECS: u64 = 8;

/// Maximum payload per write-without-response from the host.
///
/// btleplug does not expose the negotiated MTU, so we stay at the
/// 23-byte default ATT MTU minus the 3-byte write header. A button
/// frame is 6 bytes and always fits in one chunk at this size.
pub const MAX_WRITE_NO_RESPONSE_LEN: usize = 20;

// Receive path

/// Capacity of the firmware's frame reassembly buffer.
///
/// A single RX write can legally carry a full ATT payload of batched
/// frames, and a partial frame may be left over from the previous
/// write. The buffer must hold both at once or complete, valid frames
/// get dropped on the floor.
pub const RX_BUFFER_LEN: usize = ATT_MTU + 16;

// GPIO pin assignments (Seeed XIAO nRF52840 defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` pins are
// selected in `main.rs`.  All three LEDs are active-low.
//
//   LED red    → P0.26
//   LED green  → P0.30
//   LED blue   → P0.06
