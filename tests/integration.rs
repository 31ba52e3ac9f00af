//! Integration tests for padlink host-testable logic: the path from a
//! typed command through encoding, fragmentation, reassembly, and the
//! LED policy on the far side.

use padlink::input::{map_line, write_chunks, LineAction};
use padlink::leds::{apply, LedOutputs};
use padlink::packet::{Button, ButtonPacket, Frame, FrameBuffer, PacketError};

#[derive(Default, Debug, PartialEq)]
struct Rgb {
    red: bool,
    green: bool,
    blue: bool,
}

impl LedOutputs for Rgb {
    fn set_red(&mut self, on: bool) {
        self.red = on;
    }
    fn set_green(&mut self, on: bool) {
        self.green = on;
    }
    fn set_blue(&mut self, on: bool) {
        self.blue = on;
    }
}

#[test]
fn keystroke_to_led_end_to_end() {
    // Host side: each typed line becomes one frame, sent in chunks.
    let mut wire: Vec<u8> = Vec::new();
    for line in ["l", "u", "d", "r"] {
        let packet = match map_line(line).unwrap() {
            LineAction::Send(packet) => packet,
            other => panic!("{line:?} mapped to {other:?}"),
        };
        for chunk in write_chunks(&packet.to_bytes(), 4) {
            wire.extend_from_slice(chunk);
        }
    }

    // Peripheral side: reassemble from arbitrary write boundaries and
    // drive the policy.
    let mut leds = Rgb::default();
    let mut frames: FrameBuffer<64> = FrameBuffer::new();
    let mut states = Vec::new();
    for piece in wire.chunks(5) {
        frames.push(piece);
        while let Some(frame) = frames.next_frame() {
            match frame.unwrap() {
                Frame::Button(packet) => {
                    apply(&packet, &mut leds);
                    states.push((leds.red, leds.green, leds.blue));
                }
                Frame::Other { kind } => panic!("unexpected foreign frame {kind}"),
            }
        }
    }

    assert_eq!(
        states,
        vec![
            (true, false, false),  // Left: red on
            (true, true, false),   // Up: green on, red untouched
            (false, false, false), // Down: reset
            (false, false, true),  // Right: blue on only
        ]
    );
}

#[test]
fn foreign_frames_pass_through_without_disturbing_buttons() {
    let mut frames: FrameBuffer<64> = FrameBuffer::new();
    // A color packet between two button packets, as Bluefruit Connect
    // would interleave them.
    frames.push(b"!B51\r\n!C\x00\x80\xFF\r\n!B60\r\n");

    assert_eq!(
        frames.next_frame(),
        Some(Ok(Frame::Button(ButtonPacket {
            button: Button::Up,
            pressed: true,
        })))
    );
    assert_eq!(frames.next_frame(), Some(Ok(Frame::Other { kind: b'C' })));
    assert_eq!(
        frames.next_frame(),
        Some(Ok(Frame::Button(ButtonPacket {
            button: Button::Down,
            pressed: false,
        })))
    );
    assert_eq!(frames.next_frame(), None);
}

#[test]
fn command_loop_actions_match_the_terminal_contract() {
    // "u" sends the Up packet bytes.
    match map_line("u").unwrap() {
        LineAction::Send(packet) => assert_eq!(packet.to_bytes(), *b"!B51\r\n"),
        other => panic!("unexpected {other:?}"),
    }

    // Both quit spellings stop the loop without a packet.
    assert_eq!(map_line("q").unwrap(), LineAction::Quit);
    assert_eq!(map_line("quit").unwrap(), LineAction::Quit);

    // Multi-character input is a user error, not a loop exit.
    assert_eq!(map_line("ab").unwrap(), LineAction::Rejected);

    // A literal character outside the enumeration fails encoding.
    assert_eq!(map_line("x"), Err(PacketError::InvalidButton(b'x')));
}

#[test]
fn fragmentation_is_ordered_and_bounded() {
    let frame = ButtonPacket {
        button: Button::Left,
        pressed: true,
    }
    .to_bytes();

    for max in 1..=frame.len() {
        let chunks: Vec<&[u8]> = write_chunks(&frame, max).collect();
        assert!(chunks.iter().all(|c| !c.is_empty() && c.len() <= max));

        let rebuilt: Vec<u8> = chunks.concat();
        assert_eq!(rebuilt, frame);
    }
}
