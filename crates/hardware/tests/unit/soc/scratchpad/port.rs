//! # Port State Machine Tests
//!
//! Drives the port's combinational inputs directly, one cycle per `tick`, and checks
//! both the outputs of each cycle and the registered state after the edge.

use pretty_assertions::assert_eq;
use rvspad_core::dcache::{DcacheResp, PipelineOutputs, S1Data};
use rvspad_core::soc::scratchpad::{PortInputs, PortState, ScratchpadSlavePort, form_cache_req};
use rvspad_core::tilelink::{ArithParam, ChannelA, ChannelD, TieOffs};

const BASE: u64 = 0x8000_0000;

const NACK: PipelineOutputs = PipelineOutputs {
    req_ready: true,
    resp: None,
    s2_nack: true,
};

const BUSY: PipelineOutputs = PipelineOutputs {
    req_ready: false,
    resp: None,
    s2_nack: false,
};

fn resp(data: u64) -> PipelineOutputs {
    PipelineOutputs {
        req_ready: true,
        resp: Some(DcacheResp {
            data_raw: data,
            has_data: true,
            tag: 0,
        }),
        s2_nack: false,
    }
}

fn inputs(a: Option<ChannelA>, d_ready: bool, dmem: PipelineOutputs) -> PortInputs {
    PortInputs { a, d_ready, dmem }
}

fn get() -> ChannelA {
    ChannelA::get(3, BASE + 8, 3, 8)
}

fn put() -> ChannelA {
    ChannelA::put_partial(4, BASE, 3, 0x1234, 0b0000_0011)
}

/// A port that accepted `a` in the previous cycle.
fn waiting_on(a: ChannelA) -> ScratchpadSlavePort {
    let mut port = ScratchpadSlavePort::new();
    let _ = port.tick(&inputs(Some(a), true, PipelineOutputs::IDLE));
    assert_eq!(port.state(), PortState::Wait);
    port
}

fn replaying(a: ChannelA) -> ScratchpadSlavePort {
    let mut port = waiting_on(a);
    let _ = port.tick(&inputs(None, true, NACK));
    assert_eq!(port.state(), PortState::Replay);
    port
}

fn granting(a: ChannelA, data: u64) -> ScratchpadSlavePort {
    let mut port = waiting_on(a);
    let _ = port.tick(&inputs(None, false, resp(data)));
    assert_eq!(port.state(), PortState::Grant);
    port
}

#[test]
fn starts_ready() {
    let port = ScratchpadSlavePort::new();
    assert_eq!(port.state(), PortState::Ready);
    assert_eq!(port.captured(), &ChannelA::default());
}

#[test]
fn ready_accepts_and_issues_in_same_cycle() {
    let mut port = ScratchpadSlavePort::new();
    let a = get();
    let ins = inputs(Some(a), true, PipelineOutputs::IDLE);

    let out = port.tick(&ins);
    assert!(out.a_ready);
    assert_eq!(out.dmem_req, Some(form_cache_req(&a)));
    assert_eq!(out.d, None);
    assert!(!out.s1_kill);
    assert_eq!(out.tie_offs, TieOffs::UNUSED);

    let fire = out.handshakes(&ins);
    assert!(fire.a_fire && fire.req_fire && !fire.d_fire);
    assert_eq!(port.state(), PortState::Wait);
    assert_eq!(port.captured(), &a);
}

/// The request is offered whenever A is valid in `Ready`, but A is only accepted
/// when the pipeline is ready too.
#[test]
fn ready_waits_for_pipeline() {
    let mut port = ScratchpadSlavePort::new();
    let out = port.tick(&inputs(Some(get()), true, BUSY));
    assert!(!out.a_ready);
    assert!(out.dmem_req.is_some());
    assert_eq!(port.state(), PortState::Ready);
    assert_eq!(port.captured(), &ChannelA::default());
}

#[test]
fn ready_without_request_stays_idle() {
    let mut port = ScratchpadSlavePort::new();
    let out = port.tick(&PortInputs::IDLE);
    assert!(out.a_ready);
    assert_eq!(out.dmem_req, None);
    assert_eq!(port.state(), PortState::Ready);
}

/// While a request is outstanding, A is not ready and nothing is issued; the
/// captured data and mask are staged for s1.
#[test]
fn wait_blocks_a_and_stages_data() {
    let a = put();
    let port = waiting_on(a);
    let out = port.eval(&inputs(Some(get()), true, PipelineOutputs::IDLE));
    assert!(!out.a_ready);
    assert_eq!(out.dmem_req, None);
    assert_eq!(out.d, None);
    assert_eq!(
        out.s1_data,
        S1Data {
            data: 0x1234,
            mask: 0b0000_0011
        }
    );
}

#[test]
fn nack_leads_to_replay_of_captured_request() {
    let a = ChannelA::arithmetic(1, ArithParam::Add, BASE + 4, 2, 5 << 32, 8);
    let mut port = replaying(a);

    let out = port.eval(&inputs(Some(get()), true, PipelineOutputs::IDLE));
    assert!(!out.a_ready);
    assert_eq!(out.dmem_req, Some(form_cache_req(&a)));

    let _ = port.tick(&inputs(Some(get()), true, PipelineOutputs::IDLE));
    assert_eq!(port.state(), PortState::Wait);
    assert_eq!(port.captured(), &a);
}

#[test]
fn replay_holds_until_pipeline_ready() {
    let mut port = replaying(get());
    for _ in 0..3 {
        let out = port.tick(&inputs(None, true, BUSY));
        assert!(out.dmem_req.is_some());
        assert_eq!(port.state(), PortState::Replay);
    }
}

#[test]
fn response_with_d_ready_completes_read() {
    let a = get();
    let mut port = waiting_on(a);
    let ins = inputs(None, true, resp(0xCAFE));
    let out = port.tick(&ins);
    assert_eq!(out.d, Some(ChannelD::access_ack_data(&a, 0xCAFE)));
    assert!(out.handshakes(&ins).d_fire);
    assert_eq!(port.state(), PortState::Ready);
}

#[test]
fn put_is_acknowledged_without_data() {
    let a = put();
    let mut port = waiting_on(a);
    let out = port.tick(&inputs(None, true, resp(0xFFFF)));
    let d = out.d.unwrap();
    assert_eq!(d, ChannelD::access_ack(&a));
    assert_eq!(d.data, 0);
    assert_eq!(d.source, 4);
}

#[test]
fn grant_holds_response_until_d_ready() {
    let a = get();
    let mut port = granting(a, 0xBEEF);
    assert_eq!(port.captured().data, 0xBEEF);

    let out = port.tick(&inputs(Some(put()), false, PipelineOutputs::IDLE));
    assert!(!out.a_ready);
    assert_eq!(out.d, Some(ChannelD::access_ack_data(&a, 0xBEEF)));
    assert_eq!(port.state(), PortState::Grant);

    let out = port.tick(&inputs(None, true, PipelineOutputs::IDLE));
    assert_eq!(out.d.map(|d| d.data), Some(0xBEEF));
    assert_eq!(port.state(), PortState::Ready);
}

/// A nack in the same cycle as a response wins over `Grant`.
#[test]
fn nack_overrides_response() {
    let mut port = waiting_on(get());
    let both = PipelineOutputs {
        s2_nack: true,
        ..resp(1)
    };
    let _ = port.tick(&inputs(None, false, both));
    assert_eq!(port.state(), PortState::Replay);
}

/// A nack also overrides the return to `Ready` from a D handshake.
#[test]
fn nack_overrides_d_fire() {
    let mut port = waiting_on(get());
    let both = PipelineOutputs {
        s2_nack: true,
        ..resp(1)
    };
    let ins = inputs(None, true, both);
    let out = port.tick(&ins);
    assert!(out.handshakes(&ins).d_fire);
    assert_eq!(port.state(), PortState::Replay);
}

/// Issuing the replay in the same cycle as a nack goes to `Wait`.
#[test]
fn request_fire_overrides_nack() {
    let mut port = replaying(get());
    let _ = port.tick(&inputs(None, true, NACK));
    assert_eq!(port.state(), PortState::Wait);
}

#[test]
fn step_is_pure() {
    let port = waiting_on(get());
    let ins = inputs(None, false, resp(9));
    let (next, out) = port.step(&ins);
    assert_eq!(next.state, PortState::Grant);
    assert_eq!(next.acq.data, 9);
    assert_eq!(out, port.eval(&ins));
    assert_eq!(port.state(), PortState::Wait);
}

#[test]
fn reset_returns_to_ready_and_keeps_capture() {
    let a = get();
    let mut port = granting(a, 0x77);
    port.reset();
    assert_eq!(port.state(), PortState::Ready);
    assert_eq!(port.captured().source, a.source);
    assert_eq!(port.regs().acq.data, 0x77);
}

/// An unmapped opcode is accepted and issued as a read.
#[test]
fn unmapped_opcode_issues_read() {
    let a = ChannelA {
        opcode: 6,
        ..get()
    };
    let mut port = ScratchpadSlavePort::new();
    let out = port.tick(&inputs(Some(a), true, PipelineOutputs::IDLE));
    assert!(out.a_ready);
    assert_eq!(out.dmem_req.map(|r| r.cmd), Some(rvspad_core::dcache::MemCmd::Read));

    let out = port.tick(&inputs(None, true, resp(0x42)));
    assert_eq!(out.d, Some(ChannelD::access_ack_data(&a, 0x42)));
}
