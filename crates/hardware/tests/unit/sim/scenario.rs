//! # Scenario Parsing Tests

use pretty_assertions::assert_eq;
use rvspad_core::sim::{Preload, Request, Scenario, SimError};
use rvspad_core::tilelink::{ArithParam, ChannelA, LogicParam};
use std::io::Write;
use tempfile::NamedTempFile;

const SCENARIO: &str = r#"{
    "reset_cycles": 2,
    "requests": [
        { "op": "put_full", "address": 2147483648, "size": 3, "data": 4660, "source": 1 },
        { "op": "get", "address": 2147483648, "size": 3 },
        { "op": "put_partial", "address": 2147483648, "size": 3, "data": 255, "mask": 1 },
        { "op": "arithmetic", "param": "add", "address": 2147483652, "size": 2, "data": 0 },
        { "op": "logical", "param": "swap", "address": 2147483656, "size": 3, "data": 9 },
        { "op": "raw", "opcode": 6, "size": 3, "address": 2147483648 }
    ],
    "nack_on": [0, 3],
    "d_stall_cycles": [7],
    "preload": [ { "address": 2147483648, "bytes": [1, 2, 3] } ]
}"#;

#[test]
fn parses_every_request_kind() {
    let scenario = Scenario::from_json(SCENARIO).unwrap();
    assert_eq!(scenario.reset_cycles, 2);
    assert_eq!(scenario.nack_on, vec![0, 3]);
    assert_eq!(scenario.d_stall_cycles, vec![7]);
    assert_eq!(
        scenario.preload,
        vec![Preload {
            address: 0x8000_0000,
            bytes: vec![1, 2, 3]
        }]
    );
    assert_eq!(
        scenario.requests[3],
        Request::Arithmetic {
            param: ArithParam::Add,
            address: 0x8000_0004,
            size: 2,
            data: 0,
            source: 0
        }
    );
    assert_eq!(
        scenario.requests[4],
        Request::Logical {
            param: LogicParam::Swap,
            address: 0x8000_0008,
            size: 3,
            data: 9,
            source: 0
        }
    );
    assert!(matches!(scenario.requests[5], Request::Raw(ChannelA { opcode: 6, .. })));
}

#[test]
fn requests_become_channel_a_beats() {
    let scenario = Scenario::from_json(SCENARIO).unwrap();
    let beats: Vec<ChannelA> = scenario.requests.iter().map(|r| r.to_channel_a(8)).collect();
    assert_eq!(beats[0], ChannelA::put_full(1, 0x8000_0000, 3, 4660, 8));
    assert_eq!(beats[1].mask, 0xFF);
    assert_eq!(beats[2].mask, 0x01);
    assert_eq!(beats[3].mask, 0xF0);
    assert_eq!(beats[5].opcode, 6);
}

#[test]
fn empty_scenario() {
    assert_eq!(Scenario::from_json("{}").unwrap(), Scenario::default());
}

#[test]
fn unknown_op_is_rejected() {
    let err = Scenario::from_json(r#"{ "requests": [ { "op": "acquire", "address": 0, "size": 3 } ] }"#);
    assert!(matches!(err, Err(SimError::Scenario(_))));
}

#[test]
fn from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SCENARIO.as_bytes()).unwrap();
    file.flush().unwrap();
    assert_eq!(Scenario::from_file(file.path()).unwrap().requests.len(), 6);

    let missing = file.path().with_extension("missing");
    assert!(matches!(Scenario::from_file(&missing), Err(SimError::Io { .. })));
}
