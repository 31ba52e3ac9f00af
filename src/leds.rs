//! LED policy for received control-pad button events.
//!
//! The policy is latching: Up/Left/Right each turn on their own
//! channel and leave the others alone; Down and button 1 are the only
//! reset actions and clear all three. Releases never change state.

use crate::packet::{Button, ButtonPacket};

/// Narrow interface over the three RGB outputs.
///
/// `on`/`off` here are logical; the firmware's implementation maps
/// them onto the active-low pins.
pub trait LedOutputs {
    fn set_red(&mut self, on: bool);
    fn set_green(&mut self, on: bool);
    fn set_blue(&mut self, on: bool);

    fn reset_all(&mut self) {
        self.set_red(false);
        self.set_green(false);
        self.set_blue(false);
    }
}

/// Apply one decoded button event to the outputs.
pub fn apply(packet: &ButtonPacket, leds: &mut impl LedOutputs) {
    if !packet.pressed {
        return;
    }
    match packet.button {
        Button::Up => leds.set_green(true),
        Button::Left => leds.set_red(true),
        Button::Right => leds.set_blue(true),
        // Button 1 duplicates the Down reset; kept as observed behavior.
        Button::Down | Button::Button1 => leds.reset_all(),
        _ => {}
    }
}
