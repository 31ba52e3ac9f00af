//! Nordic UART Service (NUS) GATT definition.
//!
//! One writable characteristic (RX, central-to-peripheral) and one
//! notifying characteristic (TX, peripheral-to-central) emulating a
//! serial byte stream. Button frames arrive on RX; TX is exposed for
//! protocol completeness but nothing meaningful is sent back.

use heapless::Vec;
use nrf_softdevice::gatt_service;
use padlink::config::ATT_MTU;

#[gatt_service(uuid = "6E400001-B5A3-F393-E0A9-E50E24DCCA9E")]
pub struct NusService {
    #[characteristic(uuid = "6E400002-B5A3-F393-E0A9-E50E24DCCA9E", write, write_without_response)]
    pub rx: Vec<u8, ATT_MTU>,

    #[characteristic(uuid = "6E400003-B5A3-F393-E0A9-E50E24DCCA9E", notify)]
    pub tx: Vec<u8, ATT_MTU>,
}
