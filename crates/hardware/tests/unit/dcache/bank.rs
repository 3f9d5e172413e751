//! # Scratchpad Bank Tests
//!
//! Drives the reference pipeline directly through [`DcachePipeline`]: a request
//! accepted at `t` takes its data at `t + 1` and answers (or nacks) at `t + 2`.

use rvspad_core::common::PhysAddr;
use rvspad_core::config::{DcacheConfig, ScratchpadConfig};
use rvspad_core::dcache::{DcachePipeline, DcacheReq, MemCmd, PipelineOutputs, S1Data, ScratchpadBank};

const BASE: u64 = 0x8000_0000;

fn bank(dcache: DcacheConfig) -> ScratchpadBank {
    ScratchpadBank::new(&ScratchpadConfig::default(), &dcache)
}

fn req(cmd: MemCmd, addr: u64, size: u8) -> DcacheReq {
    DcacheReq {
        cmd,
        addr: PhysAddr::new(addr),
        size,
        signed: false,
        tag: 0,
        phys: true,
        no_xcpt: true,
    }
}

/// Issues one request and its s1 data, returning the s2 outputs before the final edge.
fn issue(bank: &mut ScratchpadBank, r: DcacheReq, data: u64, mask: u8) -> PipelineOutputs {
    bank.clock(Some(r), S1Data::default(), false);
    assert_eq!(bank.outputs(), PipelineOutputs::IDLE);
    bank.clock(None, S1Data { data, mask }, false);
    let out = bank.outputs();
    bank.clock(None, S1Data::default(), false);
    out
}

#[test]
fn idle_bank_is_ready() {
    let bank = bank(DcacheConfig::default());
    assert_eq!(bank.outputs(), PipelineOutputs::IDLE);
    assert!(!bank.busy());
}

#[test]
fn read_answers_two_cycles_later() {
    let mut bank = bank(DcacheConfig::default());
    bank.load(BASE, &0x1122_3344_5566_7788u64.to_le_bytes());

    let out = issue(&mut bank, req(MemCmd::Read, BASE, 3), 0, 0);
    let resp = out.resp.unwrap();
    assert_eq!(resp.data_raw, 0x1122_3344_5566_7788);
    assert!(resp.has_data);
    assert!(!out.s2_nack);
    assert!(!bank.busy());
    assert_eq!(bank.accepted(), 1);
}

/// The response carries the beat as it was before the write commits.
#[test]
fn write_commits_at_end_of_s2() {
    let mut bank = bank(DcacheConfig::default());
    bank.load(BASE, &[0xAA; 8]);

    let r = req(MemCmd::Write, BASE + 4, 2);
    bank.clock(Some(r), S1Data::default(), false);
    bank.clock(None, S1Data { data: 0xDEAD_BEEF_0000_0000, mask: 0 }, false);
    let out = bank.outputs();
    assert_eq!(out.resp.unwrap().data_raw, 0xAAAA_AAAA_AAAA_AAAA);
    assert!(!out.resp.unwrap().has_data);
    assert_eq!(bank.read_beat(BASE), 0xAAAA_AAAA_AAAA_AAAA);

    bank.clock(None, S1Data::default(), false);
    assert_eq!(bank.read_beat(BASE), 0xDEAD_BEEF_AAAA_AAAA);
}

#[test]
fn partial_write_uses_staged_mask() {
    let mut bank = bank(DcacheConfig::default());
    let _ = issue(&mut bank, req(MemCmd::PartialWrite, BASE, 3), u64::MAX, 0b1000_0001);
    assert_eq!(bank.read_beat(BASE), 0xFF00_0000_0000_00FF);
}

#[test]
fn word_atomic_in_upper_lanes() {
    let mut bank = bank(DcacheConfig::default());
    bank.load(BASE, &0x0000_0005_0000_0009u64.to_le_bytes());

    let out = issue(&mut bank, req(MemCmd::AmoAdd, BASE + 4, 2), 3 << 32, 0xF0);
    assert_eq!(out.resp.unwrap().data_raw, 0x0000_0005_0000_0009);
    assert_eq!(bank.read_beat(BASE), 0x0000_0008_0000_0009);
}

#[test]
fn double_atomic_swap() {
    let mut bank = bank(DcacheConfig::default());
    bank.load(BASE + 8, &7u64.to_le_bytes());
    let out = issue(&mut bank, req(MemCmd::AmoSwap, BASE + 8, 3), 99, 0xFF);
    assert_eq!(out.resp.unwrap().data_raw, 7);
    assert_eq!(bank.read_beat(BASE + 8), 99);
}

#[test]
fn nacked_request_leaves_memory() {
    let mut bank = bank(DcacheConfig {
        nack_every: 0,
        nack_on: vec![0],
    });
    let out = issue(&mut bank, req(MemCmd::Write, BASE, 3), 0x55, 0);
    assert!(out.s2_nack);
    assert!(out.resp.is_none());
    assert!(out.req_ready);
    assert_eq!(bank.read_beat(BASE), 0);

    let out = issue(&mut bank, req(MemCmd::Write, BASE, 3), 0x55, 0);
    assert!(!out.s2_nack);
    assert_eq!(bank.read_beat(BASE), 0x55);
}

#[test]
fn nack_every_counts_sequence_numbers() {
    let mut bank = bank(DcacheConfig {
        nack_every: 2,
        nack_on: Vec::new(),
    });
    let nacks: Vec<bool> = (0..4)
        .map(|_| issue(&mut bank, req(MemCmd::Read, BASE, 3), 0, 0).s2_nack)
        .collect();
    assert_eq!(nacks, vec![false, true, false, true]);
}

#[test]
fn nack_request_adds_to_schedule() {
    let mut bank = bank(DcacheConfig::default());
    bank.nack_request(1);
    assert!(!issue(&mut bank, req(MemCmd::Read, BASE, 3), 0, 0).s2_nack);
    assert!(issue(&mut bank, req(MemCmd::Read, BASE, 3), 0, 0).s2_nack);
}

#[test]
fn s1_kill_drops_request() {
    let mut bank = bank(DcacheConfig::default());
    bank.clock(Some(req(MemCmd::Write, BASE, 3)), S1Data::default(), false);
    bank.clock(None, S1Data { data: 1, mask: 0 }, true);
    assert_eq!(bank.outputs(), PipelineOutputs::IDLE);
    bank.clock(None, S1Data::default(), false);
    assert_eq!(bank.read_beat(BASE), 0);
}

#[test]
fn addresses_wrap_at_region_size() {
    let mut bank = bank(DcacheConfig::default());
    bank.load(BASE + 0x3FFE, &[1, 2, 3, 4]);
    assert_eq!(bank.read_bytes(BASE, 2), vec![3, 4]);
    assert_eq!(bank.read_bytes(BASE + 0x3FFE, 4), vec![1, 2, 3, 4]);
}
