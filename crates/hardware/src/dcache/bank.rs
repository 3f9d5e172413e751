//! Scratchpad storage behind a three-stage request pipeline.
//!
//! Stands in for the data cache when the port is exercised on its own: there are no
//! tags and no misses, every access hits the backing array. Stages:
//! - s0: request accepted (always ready).
//! - s1: store data and mask captured from the requester.
//! - s2: either a nack or a response; memory is updated at the end of s2.
//!
//! Nacks are injected per accepted-request sequence number. A nacked request leaves
//! memory untouched.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use super::amo::{AmoWidth, amo_alu};
use super::{DcachePipeline, DcacheReq, DcacheResp, MemCmd, PipelineOutputs, S1Data};
use crate::common::constants::{expand_mask, lane_mask};
use crate::config::{DcacheConfig, ScratchpadConfig};

#[derive(Clone, Copy, Debug)]
struct Stage1 {
    seq: u64,
    req: DcacheReq,
}

#[derive(Clone, Copy, Debug)]
struct Stage2 {
    seq: u64,
    req: DcacheReq,
    data: S1Data,
    nack: bool,
}

/// Reference model of the pipeline behind a scratchpad.
#[derive(Clone, Debug)]
pub struct ScratchpadBank {
    storage: Vec<u8>,
    size: u64,
    beat_bytes: u64,
    nack_every: u64,
    nack_on: BTreeSet<u64>,
    next_seq: u64,
    s1: Option<Stage1>,
    s2: Option<Stage2>,
}

impl ScratchpadBank {
    /// Creates a zero-filled bank.
    ///
    /// `spad` is expected to have passed [`ScratchpadConfig::validate`]. Addresses are
    /// taken modulo the region size, as the index bits of a real array would be.
    pub fn new(spad: &ScratchpadConfig, dcache: &DcacheConfig) -> Self {
        Self {
            storage: vec![0; spad.size as usize],
            size: spad.size,
            beat_bytes: spad.data_bytes,
            nack_every: dcache.nack_every,
            nack_on: dcache.nack_on.iter().copied().collect(),
            next_seq: 0,
            s1: None,
            s2: None,
        }
    }

    /// Number of requests accepted so far, replays included.
    pub const fn accepted(&self) -> u64 {
        self.next_seq
    }

    /// Returns whether a request is somewhere in s1 or s2.
    pub const fn busy(&self) -> bool {
        self.s1.is_some() || self.s2.is_some()
    }

    /// Schedules a nack for the request with sequence number `seq`.
    pub fn nack_request(&mut self, seq: u64) {
        let _ = self.nack_on.insert(seq);
    }

    /// Copies `bytes` into storage starting at `addr`.
    pub fn load(&mut self, addr: u64, bytes: &[u8]) {
        for (i, byte) in bytes.iter().enumerate() {
            let idx = self.index(addr.wrapping_add(i as u64));
            self.storage[idx] = *byte;
        }
    }

    /// Reads `len` bytes starting at `addr`.
    pub fn read_bytes(&self, addr: u64, len: usize) -> Vec<u8> {
        (0..len)
            .map(|i| self.storage[self.index(addr.wrapping_add(i as u64))])
            .collect()
    }

    /// Reads the whole beat containing `addr`, little-endian.
    pub fn read_beat(&self, addr: u64) -> u64 {
        let base = addr & !(self.beat_bytes - 1);
        (0..self.beat_bytes).fold(0u64, |acc, i| {
            acc | (u64::from(self.storage[self.index(base + i)]) << (i * 8))
        })
    }

    fn index(&self, addr: u64) -> usize {
        (addr & (self.size - 1)) as usize
    }

    fn write_beat(&mut self, addr: u64, data: u64, mask: u8) {
        let base = addr & !(self.beat_bytes - 1);
        for i in 0..self.beat_bytes {
            if mask & (1 << i) != 0 {
                let idx = self.index(base + i);
                self.storage[idx] = (data >> (i * 8)) as u8;
            }
        }
    }

    fn should_nack(&self, seq: u64) -> bool {
        self.nack_on.contains(&seq) || (self.nack_every != 0 && (seq + 1) % self.nack_every == 0)
    }

    fn commit(&mut self, stage: &Stage2) {
        let addr = stage.req.addr.val();
        match stage.req.cmd {
            MemCmd::Read => {}
            MemCmd::Write => {
                let mask = lane_mask(addr, stage.req.size, self.beat_bytes);
                self.write_beat(addr, stage.data.data, mask);
            }
            MemCmd::PartialWrite => self.write_beat(addr, stage.data.data, stage.data.mask),
            cmd => {
                let Some(width) = AmoWidth::from_lg_size(stage.req.size) else {
                    debug!(?cmd, size = stage.req.size, "atomic with unsupported size dropped");
                    return;
                };
                let shift = (addr & (self.beat_bytes - 1)) * 8;
                let mask = lane_mask(addr, stage.req.size, self.beat_bytes);
                let old = (self.read_beat(addr) & expand_mask(mask)) >> shift;
                let operand = (stage.data.data & expand_mask(mask)) >> shift;
                if let Some(new) = amo_alu(cmd, old, operand, width) {
                    self.write_beat(addr, new << shift, mask);
                }
            }
        }
    }
}

impl DcachePipeline for ScratchpadBank {
    fn outputs(&self) -> PipelineOutputs {
        let Some(stage) = &self.s2 else {
            return PipelineOutputs::IDLE;
        };
        if stage.nack {
            return PipelineOutputs {
                req_ready: true,
                resp: None,
                s2_nack: true,
            };
        }
        PipelineOutputs {
            req_ready: true,
            resp: Some(DcacheResp {
                data_raw: self.read_beat(stage.req.addr.val()),
                has_data: stage.req.cmd.is_read(),
                tag: stage.req.tag,
            }),
            s2_nack: false,
        }
    }

    fn clock(&mut self, req: Option<DcacheReq>, s1: S1Data, s1_kill: bool) {
        if let Some(stage) = self.s2.take() {
            if stage.nack {
                debug!(seq = stage.seq, addr = %stage.req.addr, "s2 nack");
            } else {
                self.commit(&stage);
            }
        }

        self.s2 = match self.s1.take() {
            Some(stage) if !s1_kill => Some(Stage2 {
                seq: stage.seq,
                req: stage.req,
                data: s1,
                nack: self.should_nack(stage.seq),
            }),
            _ => None,
        };

        self.s1 = req.map(|req| {
            let seq = self.next_seq;
            self.next_seq += 1;
            trace!(seq, cmd = ?req.cmd, addr = %req.addr, "s0 accept");
            Stage1 { seq, req }
        });
    }
}
