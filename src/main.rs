//! padlink firmware entry point (nRF52840, Seeed XIAO BLE).
//!
//! Advertises the Nordic UART Service and drives the board's RGB LED
//! from control-pad button packets written to the RX characteristic.
//! Lost connections loop straight back into advertising; the only way
//! out is a reset.

#![no_std]
#![no_main]

mod ble;

use defmt::{info, unwrap, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_nrf::interrupt::Priority;
use nrf_softdevice::ble::gatt_server;
use nrf_softdevice::Softdevice;
use panic_probe as _;

use padlink::config;
use padlink::leds::{self, LedOutputs};
use padlink::packet::{Frame, FrameBuffer};

use ble::{advertise, softdevice_config, NusServiceEvent, PadServer, PadServerEvent};

/// RGB outputs on the XIAO nRF52840. Active-low: pin high = LED off.
struct RgbLeds {
    red: Output<'static>,
    green: Output<'static>,
    blue: Output<'static>,
}

impl RgbLeds {
    fn level_for(on: bool) -> Level {
        if on {
            Level::Low
        } else {
            Level::High
        }
    }
}

impl LedOutputs for RgbLeds {
    fn set_red(&mut self, on: bool) {
        self.red.set_level(Self::level_for(on));
    }
    fn set_green(&mut self, on: bool) {
        self.green.set_level(Self::level_for(on));
    }
    fn set_blue(&mut self, on: bool) {
        self.blue.set_level(Self::level_for(on));
    }
}

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut nrf_config = embassy_nrf::config::Config::default();
    // Interrupt priorities 0, 1 and 4 are reserved by the SoftDevice.
    nrf_config.gpiote_interrupt_priority = Priority::P2;
    nrf_config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(nrf_config);

    // All channels off at boot (pins high).
    let mut rgb = RgbLeds {
        red: Output::new(p.P0_26, Level::High, OutputDrive::Standard),
        green: Output::new(p.P0_30, Level::High, OutputDrive::Standard),
        blue: Output::new(p.P0_06, Level::High, OutputDrive::Standard),
    };

    let sd = Softdevice::enable(&softdevice_config());
    let server = unwrap!(PadServer::new(sd));
    unwrap!(spawner.spawn(softdevice_task(sd)));

    let mut rx_frames: FrameBuffer<{ config::RX_BUFFER_LEN }> = FrameBuffer::new();

    loop {
        info!("advertising as {}", config::DEVICE_NAME);
        let conn = match advertise(sd).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("advertise failed: {}", e);
                continue;
            }
        };
        info!("central connected");

        // Serve GATT events until the central goes away. Every RX
        // write is fed through the reassembly buffer; malformed
        // frames are dropped without touching the connection.
        let disconnect = gatt_server::run(&conn, &server, |event| match event {
            PadServerEvent::Nus(NusServiceEvent::RxWrite(data)) => {
                rx_frames.push(&data);
                while let Some(frame) = rx_frames.next_frame() {
                    match frame {
                        Ok(Frame::Button(packet)) => {
                            info!("button {} pressed={}", packet.button, packet.pressed);
                            leds::apply(&packet, &mut rgb);
                        }
                        Ok(Frame::Other { kind }) => {
                            info!("ignoring packet kind {=u8:a}", kind);
                        }
                        Err(e) => warn!("dropped frame: {}", e),
                    }
                }
            }
            PadServerEvent::Nus(NusServiceEvent::TxCccdWrite { notifications }) => {
                info!("notifications enabled: {}", notifications);
            }
        })
        .await;

        info!("central disconnected: {}", disconnect);
    }
}
