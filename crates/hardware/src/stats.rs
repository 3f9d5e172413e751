//! Testbench statistics collection and reporting.
//!
//! This module tracks what the port did during a run. It provides:
//! 1. **Cycles:** Total cycles and cycles spent in reset.
//! 2. **Traffic:** Requests accepted on A, requests issued to the pipeline, acknowledgements.
//! 3. **Retries:** Pipeline nacks and the replays they caused.
//! 4. **Latency:** Cycles from A acceptance to D handshake.

use serde::Serialize;

/// Counters collected by the testbench.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PortStats {
    /// Total cycles simulated.
    pub cycles: u64,
    /// Cycles with the synchronized reset asserted.
    pub reset_cycles: u64,
    /// Channel A handshakes.
    pub a_accepted: u64,
    /// Requests accepted by the pipeline, replays included.
    pub pipeline_issues: u64,
    /// Pipeline nacks.
    pub nacks: u64,
    /// Requests reissued from `Replay`.
    pub replays: u64,
    /// `AccessAck` beats delivered.
    pub write_acks: u64,
    /// `AccessAckData` beats delivered.
    pub read_acks: u64,
    /// Accepted requests whose opcode fell back to a read.
    pub defaulted_opcodes: u64,
    /// Sum of request latencies, for the mean.
    pub total_latency: u64,
    /// Longest request latency.
    pub max_latency: u64,
}

impl PortStats {
    /// Requests completed on channel D.
    pub const fn completed(&self) -> u64 {
        self.write_acks + self.read_acks
    }

    /// Records one completed request.
    pub fn record_latency(&mut self, cycles: u64) {
        self.total_latency += cycles;
        self.max_latency = self.max_latency.max(cycles);
    }

    /// Mean cycles from A acceptance to D handshake.
    pub fn mean_latency(&self) -> f64 {
        let done = self.completed();
        if done == 0 {
            0.0
        } else {
            self.total_latency as f64 / done as f64
        }
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        let cyc = self.cycles.max(1);
        println!("\n==========================================================");
        println!("SCRATCHPAD PORT STATISTICS");
        println!("==========================================================");
        println!("sim_cycles               {}", self.cycles);
        println!(
            "reset_cycles             {} ({:.2}%)",
            self.reset_cycles,
            (self.reset_cycles as f64 / cyc as f64) * 100.0
        );
        println!("----------------------------------------------------------");
        println!("TRAFFIC");
        println!("  a.accepted             {}", self.a_accepted);
        println!("  dmem.issued            {}", self.pipeline_issues);
        println!("  d.access_ack           {}", self.write_acks);
        println!("  d.access_ack_data      {}", self.read_acks);
        println!("  opcode.defaulted       {}", self.defaulted_opcodes);
        println!("----------------------------------------------------------");
        println!("RETRIES");
        println!("  dmem.nacks             {}", self.nacks);
        println!("  port.replays           {}", self.replays);
        println!("----------------------------------------------------------");
        println!("LATENCY");
        println!("  latency.mean           {:.2} cycles", self.mean_latency());
        println!("  latency.max            {} cycles", self.max_latency);
        println!("==========================================================");
    }
}
