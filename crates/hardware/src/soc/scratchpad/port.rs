//! Scratchpad slave port state machine.
//!
//! Bridges TileLink channel A/D to the data-cache pipeline with one request in
//! flight. The accepted A beat is captured in `acq`; every later cycle of the request
//! (s1 store data, replay after a nack, the D response) works from that copy rather
//! than from the bus.
//!
//! ```text
//!            req fire          resp valid          d fire
//!   Ready ────────────▶ Wait ────────────▶ Grant ────────────▶ Ready
//!                       ▲  │
//!              req fire │  │ s2_nack
//!                       │  ▼
//!                      Replay   (offers acq every cycle until accepted)
//! ```
//!
//! A response and its D beat may complete in the same cycle, going straight back to
//! `Ready`. `Grant` only holds the response while the master is not ready on D.

use serde::Serialize;
use tracing::{debug, warn};

use super::lookup::{form_cache_req, lookup_cmd};
use crate::dcache::{DcacheReq, PipelineOutputs, S1Data};
use crate::tilelink::message::{ChannelA, ChannelD, TieOffs};

/// Control register of the port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum PortState {
    /// Idle; channel A may be accepted.
    #[default]
    Ready,
    /// Request issued; waiting for s2 (response or nack).
    Wait,
    /// Nacked; reissuing the captured request.
    Replay,
    /// Response received; holding it until channel D fires.
    Grant,
}

/// Registered state of the port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PortRegs {
    /// Control state.
    pub state: PortState,
    /// The captured request. Its data field is overwritten by the response data.
    pub acq: ChannelA,
}

/// Signals driven into the port during one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortInputs {
    /// Channel A beat offered by the master, if valid.
    pub a: Option<ChannelA>,
    /// Master is ready on channel D.
    pub d_ready: bool,
    /// Pipeline outputs for this cycle.
    pub dmem: PipelineOutputs,
}

impl PortInputs {
    /// Nothing on A, D ready, pipeline idle.
    pub const IDLE: Self = Self {
        a: None,
        d_ready: true,
        dmem: PipelineOutputs::IDLE,
    };
}

/// Signals the port drives during one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PortOutputs {
    /// Channel A ready.
    pub a_ready: bool,
    /// Channel D beat, if valid.
    pub d: Option<ChannelD>,
    /// Pipeline request, if valid.
    pub dmem_req: Option<DcacheReq>,
    /// Store data for the request issued in the previous cycle.
    pub s1_data: S1Data,
    /// Kill the request issued in the previous cycle.
    pub s1_kill: bool,
    /// Values on the unused channels.
    pub tie_offs: TieOffs,
}

/// Handshakes that complete in a cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Handshakes {
    /// Channel A valid and ready.
    pub a_fire: bool,
    /// Channel D valid and ready.
    pub d_fire: bool,
    /// Pipeline request valid and ready.
    pub req_fire: bool,
}

impl PortOutputs {
    /// Handshakes completed given the inputs of the same cycle.
    pub const fn handshakes(&self, inputs: &PortInputs) -> Handshakes {
        Handshakes {
            a_fire: self.a_ready && inputs.a.is_some(),
            d_fire: self.d.is_some() && inputs.d_ready,
            req_fire: self.dmem_req.is_some() && inputs.dmem.req_ready,
        }
    }
}

/// TileLink slave port in front of the data-cache pipeline.
#[derive(Clone, Debug, Default)]
pub struct ScratchpadSlavePort {
    regs: PortRegs,
}

impl ScratchpadSlavePort {
    /// Creates a port in `Ready`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous reset: returns to `Ready`. The captured request has no reset value.
    pub fn reset(&mut self) {
        if self.regs.state != PortState::Ready {
            debug!(from = ?self.regs.state, "port reset");
        }
        self.regs.state = PortState::Ready;
    }

    /// Current control state.
    pub const fn state(&self) -> PortState {
        self.regs.state
    }

    /// The captured request.
    pub const fn captured(&self) -> &ChannelA {
        &self.regs.acq
    }

    /// Current registers.
    pub const fn regs(&self) -> &PortRegs {
        &self.regs
    }

    /// Combinational outputs for this cycle's inputs.
    pub fn eval(&self, inputs: &PortInputs) -> PortOutputs {
        let PortRegs { state, acq } = &self.regs;
        let ready = *state == PortState::Ready;
        let replay = *state == PortState::Replay;

        let req_source = if replay {
            Some(acq)
        } else if ready {
            inputs.a.as_ref()
        } else {
            None
        };

        let resp = inputs.dmem.resp;
        let d_valid = resp.is_some() || *state == PortState::Grant;
        let d = d_valid.then(|| {
            if acq.is_put() {
                ChannelD::access_ack(acq)
            } else {
                ChannelD::access_ack_data(acq, resp.map_or(acq.data, |r| r.data_raw))
            }
        });

        PortOutputs {
            a_ready: inputs.dmem.req_ready && ready,
            d,
            dmem_req: req_source.map(form_cache_req),
            s1_data: S1Data {
                data: acq.data,
                mask: acq.mask,
            },
            s1_kill: false,
            tie_offs: TieOffs::UNUSED,
        }
    }

    /// Next-state function: registers after the coming edge, and this cycle's outputs.
    ///
    /// When several conditions hold in one cycle the later one below wins:
    /// response → `Grant`, D fire → `Ready`, nack → `Replay`, request fire → `Wait`.
    pub fn step(&self, inputs: &PortInputs) -> (PortRegs, PortOutputs) {
        let out = self.eval(inputs);
        let fire = out.handshakes(inputs);
        let mut next = self.regs;

        if let Some(resp) = inputs.dmem.resp {
            next.state = PortState::Grant;
            next.acq.data = resp.data_raw;
        }
        if fire.d_fire {
            next.state = PortState::Ready;
        }
        if inputs.dmem.s2_nack {
            next.state = PortState::Replay;
        }
        if fire.req_fire {
            next.state = PortState::Wait;
        }
        if fire.a_fire {
            if let Some(a) = inputs.a {
                next.acq = a;
            }
        }
        (next, out)
    }

    /// Evaluates the cycle and commits the clock edge.
    pub fn tick(&mut self, inputs: &PortInputs) -> PortOutputs {
        let (next, out) = self.step(inputs);
        if out.handshakes(inputs).a_fire && lookup_cmd(next.acq.opcode, next.acq.param).is_none() {
            warn!(
                opcode = next.acq.opcode,
                param = next.acq.param,
                address = next.acq.address,
                "unmapped A opcode, issuing as read"
            );
        }
        if next.state != self.regs.state {
            debug!(from = ?self.regs.state, to = ?next.state, "port state");
        }
        self.regs = next;
        out
    }
}
