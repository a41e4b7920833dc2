//! Dispatch tests: routing, packet staging, identifier bookkeeping.

mod common;

use common::*;
use slipradio_node::{
    CommandHandler, Dispatch, FrameSink, NodeConfig, NodeError, SlipRadio, SlotPolicy,
    StackDrivers,
};
use slipradio_protocol::{PacketAttribute, SendStatus};

fn release_unsubmitted() -> NodeConfig {
    NodeConfig {
        slot_policy: SlotPolicy::ReleaseUnsubmitted,
        ..Default::default()
    }
}

// ============================================================================
// Outgoing Packets
// ============================================================================

#[test]
fn test_send_stages_payload_after_attributes() {
    let (stack, log) = MockStack::new();
    let mut radio = radio_with_stack(NodeConfig::default(), stack);

    let attrs = [2, 9, 0x00, 0x03, 1, 0x00, 0x1a];
    let frame = send_frame(0x31, &attrs, b"hello radio");
    assert_eq!(radio.dispatch(&frame), Dispatch::Handled);

    let log = log.lock().unwrap();
    assert_eq!(log.parses, 1);
    assert_eq!(log.sends.len(), 1);
    let sent = &log.sends[0];
    assert_eq!(sent.payload, b"hello radio");
    assert_eq!(sent.attributes.get(PacketAttribute::MaxMacTransmissions), 3);
    assert_eq!(sent.attributes.get(PacketAttribute::Channel), 26);
    assert_eq!(sent.token.index(), 0);

    assert_eq!(radio.packet().payload(), b"hello radio");
    assert!(radio.transport().frames.is_empty(), "no reply until completion");
}

#[test]
fn test_send_with_empty_attribute_list_and_payload() {
    let (stack, log) = MockStack::new();
    let mut radio = radio_with_stack(NodeConfig::default(), stack);

    assert_eq!(radio.dispatch(&send_frame(1, &[0], &[])), Dispatch::Handled);
    let log = log.lock().unwrap();
    assert_eq!(log.sends.len(), 1);
    assert!(log.sends[0].payload.is_empty());
}

#[test]
fn test_send_truncates_long_payload() {
    let (stack, log) = MockStack::new();
    let config = NodeConfig {
        payload_capacity: 16,
        ..Default::default()
    };
    let mut radio = radio_with_stack(config, stack);

    let payload: Vec<u8> = (0..40).collect();
    assert_eq!(radio.dispatch(&send_frame(7, &[0], &payload)), Dispatch::Handled);

    let log = log.lock().unwrap();
    assert_eq!(log.sends[0].payload, &payload[..16]);
    assert_eq!(radio.packet().len(), 16);
}

#[test]
fn test_payload_exactly_capacity_is_kept_whole() {
    let (stack, log) = MockStack::new();
    let mut radio = radio_with_stack(NodeConfig::default(), stack);

    let payload = vec![0x5a; 128];
    radio.dispatch(&send_frame(7, &[0], &payload));
    assert_eq!(log.lock().unwrap().sends[0].payload.len(), 128);
}

#[test]
fn test_send_records_packet_id_at_cursor() {
    let (stack, _log) = MockStack::new();
    let mut radio = radio_with_stack(NodeConfig::default(), stack);

    for (i, id) in [0xa0u8, 0xa1, 0xa2].into_iter().enumerate() {
        assert_eq!(radio.ring().cursor(), i);
        radio.dispatch(&send_frame(id, &[0], b"x"));
        assert_eq!(radio.ring().slots()[i], id);
        assert_eq!(radio.ring().cursor(), i + 1);
    }
}

#[test]
fn test_seventeenth_send_overwrites_slot_zero() {
    let (stack, log) = MockStack::new();
    let mut radio = radio_with_stack(NodeConfig::default(), stack);

    for id in 0..16u8 {
        radio.dispatch(&send_frame(id, &[0], b"p"));
    }
    assert_eq!(radio.ring().cursor(), 0);
    assert_eq!(radio.ring().slots()[0], 0);

    radio.dispatch(&send_frame(0xff, &[0], b"p"));
    assert_eq!(radio.ring().slots()[0], 0xff);
    assert_eq!(radio.ring().cursor(), 1);
    assert_eq!(log.lock().unwrap().sends[16].token.index(), 0);
}

#[test]
fn test_malformed_attributes_stage_nothing_and_skip_send() {
    let (stack, log) = MockStack::new();
    let mut radio = radio_with_stack(NodeConfig::default(), stack);
    radio.dispatch(&send_frame(1, &[0], b"previous"));

    // Unknown tag 0xee
    let frame = send_frame(2, &[1, 0xee, 0x00, 0x01], b"payload");
    assert_eq!(radio.dispatch(&frame), Dispatch::Handled);

    let log = log.lock().unwrap();
    assert_eq!(log.sends.len(), 1, "malformed command never reaches the stack");
    assert_eq!(log.parses, 1);
    assert!(radio.packet().is_empty());
    assert!(radio.packet().attributes().is_empty());
    assert!(radio.transport().frames.is_empty());
    assert_eq!(radio.ring().cursor(), 2);
}

#[test]
fn test_truncated_attributes_are_malformed() {
    let (stack, log) = MockStack::new();
    let mut radio = radio_with_stack(NodeConfig::default(), stack);

    // Declares two entries, carries one and a half
    let frame = send_frame(2, &[2, 1, 0x00, 0x0b, 4], &[]);
    radio.dispatch(&frame);
    assert!(log.lock().unwrap().sends.is_empty());
    // Header only: not even the count byte
    radio.dispatch(b"!S\x05");
    assert!(log.lock().unwrap().sends.is_empty());
}

#[test]
fn test_unsubmitted_slot_is_released_on_request() {
    let mut radio = radio_without_stack(release_unsubmitted());

    radio.dispatch(&send_frame(0x10, &[0], b"lost"));
    assert_eq!(radio.ring().cursor(), 0);

    radio.dispatch(&send_frame(0x11, &[0xff], b"bad"));
    assert_eq!(radio.ring().cursor(), 0);
    assert_eq!(radio.ring().slots()[0], 0x11, "slot written before the decode");
}

#[test]
fn test_cursor_advances_regardless_of_outcome_by_default() {
    let mut radio = radio_without_stack(NodeConfig::default());

    radio.dispatch(&send_frame(0x10, &[0], b"no stack"));
    assert_eq!(radio.ring().cursor(), 1);

    radio.dispatch(&send_frame(0x11, &[0xff], b"bad attrs"));
    assert_eq!(radio.ring().cursor(), 2);
    assert_eq!(&radio.ring().slots()[..2], &[0x10, 0x11]);
}

#[test]
fn test_parse_failure_still_sends() {
    let (mut stack, log) = MockStack::new();
    stack.fail_parse = true;
    let mut radio = radio_with_stack(NodeConfig::default(), stack);

    radio.dispatch(&send_frame(3, &[0], b"x"));
    let log = log.lock().unwrap();
    assert_eq!(log.parses, 1);
    assert_eq!(log.sends.len(), 1);
}

#[test]
fn test_detach_stack_stops_submission() {
    let (stack, log) = MockStack::new();
    let mut radio = radio_with_stack(NodeConfig::default(), stack);
    assert!(radio.detach_stack().is_some());

    radio.dispatch(&send_frame(3, &[0], b"x"));
    assert!(log.lock().unwrap().sends.is_empty());
    assert!(radio.stack().is_none());
}

// ============================================================================
// Stack Profile
// ============================================================================

#[test]
fn test_attach_installs_bridge_profile() {
    let (stack, _log) = MockStack::new();
    let radio = radio_with_stack(NodeConfig::default(), stack);
    let drivers = &radio.stack().unwrap().drivers;
    assert_eq!(drivers.framer.as_deref(), Some("noframer"));
    assert_eq!(drivers.dll_controller.as_deref(), Some("null"));
}

#[test]
fn test_attach_rejects_foreign_profile() {
    let (mut stack, _log) = MockStack::new();
    stack.drivers = StackDrivers {
        header_compression: Some("sicslowpan".to_string()),
        framer: Some("framer802154".to_string()),
        dll_security: Some("null".to_string()),
        dll_controller: Some("csma".to_string()),
    };

    let mut radio = radio_without_stack(NodeConfig::default());
    let err = radio.attach_stack(stack).unwrap_err();
    assert!(matches!(err, NodeError::StackProfileMismatch { layer: "header compression", .. }));
    assert!(radio.stack().is_none());
}

#[test]
fn test_invalid_config_rejected() {
    let config = NodeConfig {
        payload_capacity: 0,
        ..Default::default()
    };
    let result: Result<TestRadio, _> =
        SlipRadio::new(config, RecordingSink::default(), MockBoard::default());
    assert!(result.is_err());
}

#[test]
fn test_huge_capacity_rejected_before_allocation() {
    let config = NodeConfig {
        payload_capacity: usize::MAX,
        ..Default::default()
    };
    let result: Result<TestRadio, _> =
        SlipRadio::new(config, RecordingSink::default(), MockBoard::default());
    assert!(matches!(result, Err(NodeError::InvalidConfig(_))));
}

// ============================================================================
// Query and Control
// ============================================================================

#[test]
fn test_reboot_resets_once_without_reply() {
    let mut radio = radio_without_stack(NodeConfig::default());
    assert_eq!(radio.dispatch(b"!R"), Dispatch::Handled);
    assert_eq!(radio.board().resets, 1);
    assert!(radio.transport().frames.is_empty());
}

#[test]
fn test_address_query_reply() {
    let mut radio = radio_without_stack(NodeConfig::default());
    assert_eq!(radio.dispatch(b"?M"), Dispatch::Handled);

    let mut expected = vec![b'!', b'M'];
    expected.extend_from_slice(TEST_ADDRESS.as_bytes());
    assert_eq!(radio.transport().frames, vec![expected]);
    assert!(radio.reply_buffer().is_empty(), "reply buffer consumed after send");
}

#[test]
fn test_transport_failure_is_absorbed() {
    let mut radio = SlipRadio::<_, _, MockStack>::new(
        NodeConfig::default(),
        RecordingSink {
            fail: true,
            ..Default::default()
        },
        MockBoard::default(),
    )
    .unwrap();

    assert_eq!(radio.dispatch(b"?M"), Dispatch::Handled);
    assert!(radio.reply_buffer().is_empty());
}

// ============================================================================
// Unrecognised Frames
// ============================================================================

#[test]
fn test_unknown_frames_are_unhandled_without_side_effects() {
    let (stack, log) = MockStack::new();
    let mut radio = radio_with_stack(NodeConfig::default(), stack);

    let frames: [&[u8]; 9] = [b"", b"!", b"?", b"!X", b"?Z", b"!R\x00", b"?M\x00", b"!S", b"xS\x01"];
    for frame in frames {
        assert_eq!(radio.dispatch(frame), Dispatch::Unhandled, "frame {frame:?}");
    }

    assert_eq!(radio.ring().cursor(), 0);
    assert_eq!(radio.board().resets, 0);
    assert!(radio.transport().frames.is_empty());
    assert!(log.lock().unwrap().sends.is_empty());
}

struct EchoChannel;

impl CommandHandler for EchoChannel {
    fn handle(&mut self, frame: &[u8], sink: &mut dyn FrameSink) -> Dispatch {
        if frame == b"?C" {
            let _ = sink.send_frame(b"!C\x1a");
            Dispatch::Handled
        } else {
            Dispatch::Unhandled
        }
    }
}

#[test]
fn test_extension_handler_sees_only_unrecognised_frames() {
    let mut radio = radio_without_stack(NodeConfig::default());
    radio.add_handler(EchoChannel);

    assert_eq!(radio.dispatch(b"?C"), Dispatch::Handled);
    assert_eq!(radio.dispatch(b"?M"), Dispatch::Handled);
    assert_eq!(radio.dispatch(b"?Q"), Dispatch::Unhandled);

    assert_eq!(radio.transport().frames.len(), 2);
    assert_eq!(radio.transport().frames[0], b"!C\x1a");
    assert_eq!(&radio.transport().frames[1][..2], b"!M");
}

#[test]
fn test_completions_ignore_dispatch_of_unknown_frames() {
    let (stack, _log) = MockStack::completing(SendStatus::Ok, 1);
    let mut radio = radio_with_stack(NodeConfig::default(), stack);
    radio.dispatch(b"!X");
    assert_eq!(radio.poll_completions(), 0);
}
