//! Cycle-by-cycle testbench.
//!
//! Connects the blocks as a tile would: the reset synchronizer drives the port's
//! reset, the port sits between a TileLink master and a data-cache pipeline. The
//! master offers the scenario's requests in order and sinks D beats.
//!
//! Each [`Testbench::tick`] is one clock period:
//! 1. Drive the async reset and sample the synchronized reset.
//! 2. Sample the pipeline's outputs and evaluate the port combinationally.
//! 3. Check handshakes (monitor, single outstanding request, replay fidelity, ordering).
//! 4. Apply the rising edge to the port, the pipeline, and the synchronizer.

use std::collections::{BTreeSet, VecDeque};

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::SimError;
use super::scenario::Scenario;
use crate::config::Config;
use crate::dcache::{DcachePipeline, DcacheReq, DcacheResp, S1Data, ScratchpadBank};
use crate::reset::ResetSynchronizer;
use crate::soc::scratchpad::{Handshakes, PortInputs, PortState, ScratchpadSlavePort, form_cache_req, lookup_cmd};
use crate::stats::PortStats;
use crate::tilelink::message::{ChannelA, ChannelD, DOpcode};
use crate::tilelink::monitor::check_a;
use crate::tilelink::params::ManagerParams;

/// A request answered on channel D.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// The accepted A beat.
    pub request: ChannelA,
    /// The D beat that answered it.
    pub response: ChannelD,
    /// Cycle of the A handshake.
    pub accepted_at: u64,
    /// Cycle of the D handshake.
    pub completed_at: u64,
}

/// Signals of one cycle, as seen before the clock edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CycleRecord {
    /// Cycle number.
    pub cycle: u64,
    /// Synchronized reset level.
    pub sync_reset: bool,
    /// Port state during the cycle.
    pub state: PortState,
    /// A beat offered by the master.
    pub a: Option<ChannelA>,
    /// Request offered to the pipeline.
    pub dmem_req: Option<DcacheReq>,
    /// Pipeline response.
    pub resp: Option<DcacheResp>,
    /// Pipeline nack.
    pub s2_nack: bool,
    /// D beat offered to the master.
    pub d: Option<ChannelD>,
    /// Completed handshakes.
    pub fire: Handshakes,
}

#[derive(Clone, Copy, Debug)]
struct Outstanding {
    request: ChannelA,
    accepted_at: u64,
}

/// Testbench around one scratchpad port.
#[derive(Debug)]
pub struct Testbench<P = ScratchpadBank> {
    params: ManagerParams,
    strict_monitor: bool,
    record_trace: bool,
    max_cycles: u64,
    reset: ResetSynchronizer,
    reset_until: u64,
    port: ScratchpadSlavePort,
    pipeline: P,
    pending: VecDeque<ChannelA>,
    outstanding: VecDeque<Outstanding>,
    staged_check: bool,
    d_stall: BTreeSet<u64>,
    completions: Vec<Completion>,
    trace: Vec<CycleRecord>,
    stats: PortStats,
    cycle: u64,
}

impl Testbench<ScratchpadBank> {
    /// Builds a testbench with the reference pipeline model.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] when the configuration does not validate.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        let bank = ScratchpadBank::new(&config.scratchpad, &config.dcache);
        Self::with_pipeline(config, bank)
    }

    /// Builds a testbench and loads a scenario into it.
    ///
    /// The scenario's nacks and preloads go to the reference pipeline model.
    ///
    /// # Errors
    ///
    /// As [`Testbench::new`].
    pub fn from_scenario(config: &Config, scenario: &Scenario) -> Result<Self, SimError> {
        let mut tb = Self::new(config)?;
        for seq in &scenario.nack_on {
            tb.pipeline.nack_request(*seq);
        }
        for preload in &scenario.preload {
            tb.pipeline.load(preload.address, &preload.bytes);
        }
        tb.hold_reset(scenario.reset_cycles);
        for cycle in &scenario.d_stall_cycles {
            tb.stall_d(*cycle);
        }
        let beat = config.scratchpad.data_bytes;
        for request in &scenario.requests {
            tb.enqueue(request.to_channel_a(beat));
        }
        Ok(tb)
    }
}

impl<P: DcachePipeline> Testbench<P> {
    /// Builds a testbench around any pipeline implementation.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] when the configuration does not validate.
    pub fn with_pipeline(config: &Config, pipeline: P) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            params: ManagerParams::scratchpad(&config.scratchpad),
            strict_monitor: config.general.strict_monitor,
            record_trace: config.general.trace,
            max_cycles: config.general.max_cycles,
            reset: ResetSynchronizer::new(config.reset.sync_depth)?,
            reset_until: 0,
            port: ScratchpadSlavePort::new(),
            pipeline,
            pending: VecDeque::new(),
            outstanding: VecDeque::new(),
            staged_check: false,
            d_stall: BTreeSet::new(),
            completions: Vec::new(),
            trace: Vec::new(),
            stats: PortStats::default(),
            cycle: 0,
        })
    }

    /// Queues an A beat behind the ones already pending.
    pub fn enqueue(&mut self, a: ChannelA) {
        self.pending.push_back(a);
    }

    /// Holds the asynchronous reset from now until `cycles` more cycles have passed.
    pub fn hold_reset(&mut self, cycles: u64) {
        self.reset_until = self.cycle + cycles;
    }

    /// Holds D ready low during `cycle`.
    pub fn stall_d(&mut self, cycle: u64) {
        let _ = self.d_stall.insert(cycle);
    }

    /// Current cycle number (cycles simulated so far).
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// The port under test.
    pub const fn port(&self) -> &ScratchpadSlavePort {
        &self.port
    }

    /// The pipeline behind the port.
    pub const fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Mutable access to the pipeline behind the port.
    pub const fn pipeline_mut(&mut self) -> &mut P {
        &mut self.pipeline
    }

    /// The reset synchronizer in front of the port.
    pub const fn reset_sync(&self) -> &ResetSynchronizer {
        &self.reset
    }

    /// Manager parameters checked by the monitor.
    pub const fn params(&self) -> &ManagerParams {
        &self.params
    }

    /// Requests answered so far, in completion order.
    pub fn completions(&self) -> &[Completion] {
        &self.completions
    }

    /// Recorded cycles (empty unless tracing is enabled).
    pub fn trace(&self) -> &[CycleRecord] {
        &self.trace
    }

    /// Counters.
    pub const fn stats(&self) -> &PortStats {
        &self.stats
    }

    /// Requests accepted on A but not yet answered on D.
    pub fn in_flight(&self) -> usize {
        self.outstanding.len()
    }

    /// Returns whether reset has been released and every queued request answered.
    pub fn is_idle(&self) -> bool {
        self.cycle >= self.reset_until
            && !self.reset.sync_reset()
            && self.pending.is_empty()
            && self.outstanding.is_empty()
    }

    /// Simulates one clock period.
    ///
    /// # Errors
    ///
    /// A protocol violation by the master (when the monitor is strict) or a broken
    /// port invariant.
    pub fn tick(&mut self) -> Result<CycleRecord, SimError> {
        let cycle = self.cycle;
        self.reset.set_async_reset(cycle < self.reset_until);
        let sync_reset = self.reset.sync_reset();
        let dmem = self.pipeline.outputs();

        let record = if sync_reset {
            self.stats.reset_cycles += 1;
            self.port.reset();
            self.pipeline.clock(None, S1Data::default(), true);
            self.staged_check = false;
            if !self.outstanding.is_empty() {
                warn!(cycle, dropped = self.outstanding.len(), "reset with requests in flight");
                self.outstanding.clear();
            }
            CycleRecord {
                cycle,
                sync_reset,
                state: self.port.state(),
                a: None,
                dmem_req: None,
                resp: dmem.resp,
                s2_nack: dmem.s2_nack,
                d: None,
                fire: Handshakes::default(),
            }
        } else {
            let inputs = PortInputs {
                a: self.pending.front().copied(),
                d_ready: !self.d_stall.contains(&cycle),
                dmem,
            };
            let state = self.port.state();
            let out = self.port.eval(&inputs);
            let fire = out.handshakes(&inputs);

            self.check_cycle(cycle, state, &inputs, out.dmem_req.as_ref(), out.s1_data, fire)?;

            let _ = self.port.tick(&inputs);
            self.pipeline
                .clock(out.dmem_req.filter(|_| fire.req_fire), out.s1_data, out.s1_kill);

            if dmem.s2_nack {
                self.stats.nacks += 1;
            }
            if fire.req_fire {
                self.stats.pipeline_issues += 1;
                if state == PortState::Replay {
                    self.stats.replays += 1;
                }
            }
            self.staged_check = fire.req_fire;
            if fire.a_fire {
                self.accept(cycle, &inputs);
            }
            if fire.d_fire {
                if let Some(d) = out.d {
                    self.complete(cycle, d)?;
                }
            }

            CycleRecord {
                cycle,
                sync_reset,
                state,
                a: inputs.a,
                dmem_req: out.dmem_req,
                resp: dmem.resp,
                s2_nack: dmem.s2_nack,
                d: out.d,
                fire,
            }
        };

        self.reset.posedge();
        self.cycle += 1;
        self.stats.cycles += 1;

        if cfg!(feature = "always-trace") || self.record_trace {
            trace!(?record, "cycle");
        }
        if self.record_trace {
            self.trace.push(record);
        }
        Ok(record)
    }

    /// Ticks until every queued request is answered.
    ///
    /// # Errors
    ///
    /// [`SimError::Timeout`] when the configured cycle cap is reached first, or any
    /// error from [`Testbench::tick`].
    pub fn run(&mut self) -> Result<&[Completion], SimError> {
        while !self.is_idle() {
            if self.cycle >= self.max_cycles {
                return Err(SimError::Timeout(self.cycle));
            }
            let _ = self.tick()?;
        }
        debug!(cycles = self.cycle, completed = self.completions.len(), "scenario done");
        Ok(&self.completions)
    }

    fn check_cycle(
        &self,
        cycle: u64,
        state: PortState,
        inputs: &PortInputs,
        dmem_req: Option<&DcacheReq>,
        s1_data: S1Data,
        fire: Handshakes,
    ) -> Result<(), SimError> {
        if fire.a_fire {
            if let Some(a) = &inputs.a {
                if let Err(source) = check_a(&self.params, a) {
                    if self.strict_monitor {
                        return Err(SimError::Protocol { cycle, source });
                    }
                    warn!(cycle, %source, "A-channel violation");
                }
            }
            if !self.outstanding.is_empty() {
                return Err(SimError::Overlap {
                    cycle,
                    outstanding: self.outstanding.len(),
                });
            }
        }

        let Some(head) = self.outstanding.front() else {
            return Ok(());
        };
        if state == PortState::Replay {
            if let Some(replayed) = dmem_req {
                let captured = form_cache_req(&head.request);
                if *replayed != captured {
                    return Err(SimError::ReplayMismatch {
                        cycle,
                        captured: Box::new(captured),
                        replayed: Box::new(*replayed),
                    });
                }
            }
        }
        if self.staged_check {
            let expected = S1Data {
                data: head.request.data,
                mask: head.request.mask,
            };
            if s1_data != expected {
                return Err(SimError::StagedDataMismatch {
                    cycle,
                    expected,
                    staged: s1_data,
                });
            }
        }
        Ok(())
    }

    fn accept(&mut self, cycle: u64, inputs: &PortInputs) {
        let Some(request) = self.pending.pop_front() else {
            return;
        };
        debug_assert_eq!(Some(request), inputs.a);
        self.stats.a_accepted += 1;
        if lookup_cmd(request.opcode, request.param).is_none() {
            self.stats.defaulted_opcodes += 1;
        }
        self.outstanding.push_back(Outstanding {
            request,
            accepted_at: cycle,
        });
    }

    fn complete(&mut self, cycle: u64, d: ChannelD) -> Result<(), SimError> {
        let expected = self.outstanding.front().map(|o| o.request.source);
        let Some(head) = self.outstanding.pop_front().filter(|o| o.request.source == d.source) else {
            return Err(SimError::OutOfOrder {
                cycle,
                expected,
                got: d.source,
            });
        };
        match d.opcode {
            DOpcode::AccessAck => self.stats.write_acks += 1,
            DOpcode::AccessAckData => self.stats.read_acks += 1,
        }
        let latency = cycle - head.accepted_at;
        self.stats.record_latency(latency);
        debug!(cycle, source = d.source, latency, opcode = ?d.opcode, "response");
        self.completions.push(Completion {
            request: head.request,
            response: d,
            accepted_at: head.accepted_at,
            completed_at: cycle,
        });
        Ok(())
    }
}
