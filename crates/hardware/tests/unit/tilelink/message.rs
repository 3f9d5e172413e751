//! # Channel Payload Tests

use rvspad_core::tilelink::{AOpcode, ArithParam, ChannelA, ChannelD, DOpcode, LogicParam, TieOffs};

#[test]
fn opcode_encodings() {
    for bits in 0..8u8 {
        assert_eq!(AOpcode::from_bits(bits).map(AOpcode::bits), Some(bits));
    }
    assert_eq!(AOpcode::from_bits(8), None);
    assert_eq!(AOpcode::Get.bits(), 4);
    assert_eq!(AOpcode::ArithmeticData.bits(), 2);
    assert!(AOpcode::PutPartialData.is_put());
    assert!(!AOpcode::LogicalData.is_put());
}

#[test]
fn atomic_param_encodings() {
    assert_eq!(ArithParam::from_bits(4), Some(ArithParam::Add));
    assert_eq!(ArithParam::from_bits(2), Some(ArithParam::MinU));
    assert_eq!(ArithParam::from_bits(5), None);
    assert_eq!(LogicParam::from_bits(3), Some(LogicParam::Swap));
    assert_eq!(LogicParam::from_bits(4), None);
}

#[test]
fn builders_fill_mask_from_address_and_size() {
    let get = ChannelA::get(7, 0x8000_0004, 2, 8);
    assert_eq!(get.opcode, 4);
    assert_eq!(get.source, 7);
    assert_eq!(get.mask, 0xF0);

    let put = ChannelA::put_full(1, 0x8000_0000, 3, 0xAB, 8);
    assert_eq!(put.mask, 0xFF);
    assert!(put.is_put());

    let amo = ChannelA::arithmetic(2, ArithParam::Max, 0x8000_0000, 2, 5, 8);
    assert_eq!((amo.opcode, amo.param, amo.mask), (2, 1, 0x0F));

    let logic = ChannelA::logical(3, LogicParam::And, 0x8000_0008, 3, 5, 8);
    assert_eq!((logic.opcode, logic.param, logic.mask), (3, 2, 0xFF));

    let partial = ChannelA::put_partial(4, 0x8000_0000, 3, 0, 0b1010_0000);
    assert_eq!(partial.mask, 0b1010_0000);
    assert_eq!(partial.decoded_opcode(), Some(AOpcode::PutPartialData));
}

#[test]
fn unmapped_bits_do_not_decode() {
    let a = ChannelA {
        opcode: 5,
        ..ChannelA::default()
    };
    assert_eq!(a.decoded_opcode(), Some(AOpcode::Hint));
    assert!(!a.is_put());
}

#[test]
fn acknowledgements_echo_size_and_source() {
    let a = ChannelA::get(9, 0x8000_0000, 3, 8);
    let d = ChannelD::access_ack_data(&a, 0x1234);
    assert_eq!(d.opcode, DOpcode::AccessAckData);
    assert_eq!((d.size, d.source, d.data), (3, 9, 0x1234));
    assert!(d.has_data());
    assert!(!d.denied && !d.corrupt);

    let ack = ChannelD::access_ack(&a);
    assert_eq!(ack.opcode, DOpcode::AccessAck);
    assert_eq!(ack.data, 0);
    assert!(!ack.has_data());
}

#[test]
fn tie_offs() {
    assert!(!TieOffs::UNUSED.b_valid);
    assert!(TieOffs::UNUSED.c_ready);
    assert!(TieOffs::UNUSED.e_ready);
}

#[test]
fn channel_a_from_json() {
    let a: ChannelA = serde_json::from_str(r#"{ "opcode": 6, "size": 3, "address": 2147483648 }"#).unwrap();
    assert_eq!(a.opcode, 6);
    assert_eq!(a.param, 0);
    assert_eq!(a.mask, 0);
}
