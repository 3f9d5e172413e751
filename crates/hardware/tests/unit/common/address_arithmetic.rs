//! # Address Arithmetic Tests
//!
//! This module contains unit tests for the `PhysAddr` and `AddressSet` types. It
//! verifies beat-base and lane extraction, and region membership for single
//! addresses and whole accesses.

use rvspad_core::common::addr::{AddressSet, PhysAddr};

/// Tests that the stored value can be retrieved and is displayed in hex.
#[test]
fn phys_addr_new_val_and_display() {
    let pa = PhysAddr::new(0x8000_1234);
    assert_eq!(pa.val(), 0x8000_1234);
    assert_eq!(pa.to_string(), "0x80001234");
}

#[test]
fn phys_addr_beat_base_and_lane() {
    let pa = PhysAddr::new(0x8000_000D);
    assert_eq!(pa.beat_base(8), 0x8000_0008);
    assert_eq!(pa.lane(8), 5);
    assert_eq!(pa.beat_base(4), 0x8000_000C);
    assert_eq!(pa.lane(4), 1);
}

#[test]
fn phys_addr_ordering() {
    assert!(PhysAddr::new(0x1000) < PhysAddr::new(0x2000));
    assert_eq!(PhysAddr::new(0x1000), PhysAddr(0x1000));
}

#[test]
fn address_set_aligned_region() {
    let set = AddressSet::aligned(0x8000_0000, 0x4000).unwrap();
    assert_eq!(set.mask, 0x3FFF);
    assert_eq!(set.size(), 0x4000);
    assert!(set.contains(0x8000_0000));
    assert!(set.contains(0x8000_3FFF));
    assert!(!set.contains(0x8000_4000));
    assert!(!set.contains(0x7FFF_FFFF));
}

/// Sizes that are zero, not powers of two, or misaligned bases describe no region.
#[test]
fn address_set_rejects_bad_regions() {
    assert_eq!(AddressSet::aligned(0x8000_0000, 0), None);
    assert_eq!(AddressSet::aligned(0x8000_0000, 0x3000), None);
    assert_eq!(AddressSet::aligned(0x8000_1000, 0x4000), None);
}

#[test]
fn address_set_contains_range() {
    let set = AddressSet::aligned(0x1000, 0x100).unwrap();
    assert!(set.contains_range(0x1000, 0x100));
    assert!(set.contains_range(0x10F8, 8));
    assert!(!set.contains_range(0x10FC, 8));
    assert!(set.contains_range(0x1010, 0));
    assert!(!set.contains_range(u64::MAX, 2));
}
