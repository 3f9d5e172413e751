//! # Register Vector Tests
//!
//! Verifies width checking, reset values, the write enable, and that a held reset
//! wins over the enable.

use rvspad_core::common::ConfigError;
use rvspad_core::reset::AsyncResetRegVec;

#[test]
fn width_out_of_range() {
    assert!(matches!(AsyncResetRegVec::new(0, 0), Err(ConfigError::RegWidth(0))));
    assert!(matches!(AsyncResetRegVec::new(65, 0), Err(ConfigError::RegWidth(65))));
    assert!(AsyncResetRegVec::new(64, u64::MAX).is_ok());
}

#[test]
fn init_is_truncated_to_width() {
    let reg = AsyncResetRegVec::new(4, 0xFF).unwrap();
    assert_eq!(reg.init(), 0xF);
    assert_eq!(reg.q(), 0xF);
    assert_eq!(reg.width(), 4);
}

#[test]
fn clock_respects_enable_and_width() {
    let mut reg = AsyncResetRegVec::new(4, 0).unwrap();
    reg.clock(false, false, 0x5);
    assert_eq!(reg.q(), 0);
    reg.clock(false, true, 0x35);
    assert_eq!(reg.q(), 0x5);
    assert!(reg.bit(0));
    assert!(!reg.bit(1));
    assert!(!reg.bit(4));
}

#[test]
fn reset_wins_over_enable() {
    let mut reg = AsyncResetRegVec::new(8, 0xA5).unwrap();
    reg.clock(false, true, 0x11);
    reg.clock(true, true, 0x22);
    assert_eq!(reg.q(), 0xA5);
}

#[test]
fn assert_reset_is_immediate() {
    let mut reg = AsyncResetRegVec::new(3, 0).unwrap();
    reg.clock(false, true, 0b111);
    reg.assert_reset();
    assert_eq!(reg.q(), 0);
}

#[test]
fn full_width_register() {
    let mut reg = AsyncResetRegVec::new(64, 0).unwrap();
    reg.clock(false, true, u64::MAX);
    assert_eq!(reg.q(), u64::MAX);
    assert!(reg.bit(63));
}
