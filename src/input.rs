//! Keyboard-command mapping for the host-side sender.
//!
//! One typed line becomes at most one button packet. The first letter
//! of `u`/`d`/`l`/`r` words (case-sensitive) maps to the directional
//! identifiers; any other single character is passed through as a
//! candidate identifier and validated by the codec.

use crate::packet::{ButtonPacket, PacketError};

/// What the sender loop should do with one line of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineAction {
    /// Encode and transmit this packet.
    Send(ButtonPacket),
    /// Quit token (`q`, `quit`, ...); stop the loop without sending.
    Quit,
    /// Not a single-character command; tell the user and keep going.
    Rejected,
}

/// Map one trimmed line of input to a loop action.
///
/// Returns `Err(InvalidButton)` when a single character falls outside
/// the button enumeration; the caller treats that as fatal rather
/// than sending anything.
pub fn map_line(line: &str) -> Result<LineAction, PacketError> {
    let cmd = line.trim();

    // Directional shorthand, matched on the first letter only so that
    // "u" and "up" both work.
    let cmd = match cmd.as_bytes().first() {
        Some(&b'u') => "5",
        Some(&b'd') => "6",
        Some(&b'l') => "7",
        Some(&b'r') => "8",
        _ => cmd,
    };

    // Quit is matched before the length check so "quit" is accepted.
    if cmd.starts_with('q') {
        return Ok(LineAction::Quit);
    }

    let bytes = cmd.as_bytes();
    if bytes.len() != 1 {
        return Ok(LineAction::Rejected);
    }

    ButtonPacket::new(bytes[0], true).map(LineAction::Send)
}

/// Split an encoded frame into transport-sized chunks for
/// write-without-response: ordered, non-overlapping, and
/// reconstructible by concatenation.
pub fn write_chunks(frame: &[u8], max_write: usize) -> core::slice::Chunks<'_, u8> {
    frame.chunks(max_write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::Button;

    #[test]
    fn directional_letters_map_to_identifiers() {
        for (line, button) in [
            ("u", Button::Up),
            ("d", Button::Down),
            ("l", Button::Left),
            ("r", Button::Right),
            ("up", Button::Up),
            ("right", Button::Right),
        ] {
            match map_line(line) {
                Ok(LineAction::Send(packet)) => {
                    assert_eq!(packet.button, button);
                    assert!(packet.pressed);
                }
                other => panic!("{line:?} mapped to {other:?}"),
            }
        }
    }

    #[test]
    fn digits_pass_through_as_identifiers() {
        match map_line("1") {
            Ok(LineAction::Send(packet)) => assert_eq!(packet.button, Button::Button1),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn quit_tokens_terminate_without_sending() {
        assert_eq!(map_line("q"), Ok(LineAction::Quit));
        assert_eq!(map_line("quit"), Ok(LineAction::Quit));
    }

    #[test]
    fn multi_character_input_is_rejected_not_fatal() {
        assert_eq!(map_line("ab"), Ok(LineAction::Rejected));
        assert_eq!(map_line(""), Ok(LineAction::Rejected));
        assert_eq!(map_line("  "), Ok(LineAction::Rejected));
    }

    #[test]
    fn substitution_is_case_sensitive() {
        // 'U' is not shorthand; it reaches the codec and fails there.
        assert_eq!(map_line("U"), Err(PacketError::InvalidButton(b'U')));
    }

    #[test]
    fn invalid_single_character_is_a_codec_error() {
        assert_eq!(map_line("x"), Err(PacketError::InvalidButton(b'x')));
    }

    #[test]
    fn chunks_reconstruct_the_frame() {
        let frame = *b"!B51\r\n";
        let chunks: Vec<&[u8]> = write_chunks(&frame, 4).collect();
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() <= 4));

        let mut rebuilt = Vec::new();
        for chunk in &chunks {
            rebuilt.extend_from_slice(chunk);
        }
        assert_eq!(rebuilt, frame);
    }
}
