//! Minimal NMT master cycle on a real (or virtual) SocketCAN interface.
//!
//! Run against a virtual bus:
//!   sudo ip link add dev vcan0 type vcan && sudo ip link set up vcan0
//!   cargo run --example nmt_master -- vcan0

use canopen_nmt_io_linux::SocketCanInterface;
use canopen_nmt_rs::frame::{CanCodec, NodeGuardReply};
use canopen_nmt_rs::{CanInterface, NmtCommand, NmtMaster, NmtTarget};
use log::info;
use std::time::{Duration, Instant};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let interface_name = std::env::args().nth(1).unwrap_or_else(|| "can0".into());
    let mut bus = SocketCanInterface::new(&interface_name)?;
    let mut master = NmtMaster::new();

    // Bring every node to Pre-operational, then ask the whole bus for its
    // state with a single broadcast guard poll.
    master.send_nmt_command(&mut bus, NmtTarget::AllNodes, NmtCommand::EnterPreOperational)?;
    master.request_node_state(&mut bus, NmtTarget::AllNodes)?;

    // Collect guard replies for a short window. A real stack would also
    // track toggle bits and guard timeouts here.
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        match bus.receive_frame()? {
            Some(frame) => {
                if let Ok(reply) = NodeGuardReply::from_frame(&frame) {
                    info!("Node {} reported {}", reply.node, reply.state);
                    master.table_mut().set(reply.node, reply.state);
                }
            }
            None => std::thread::sleep(Duration::from_millis(10)),
        }
    }

    for (node, state) in master.table().iter() {
        if state.is_confirmed() {
            println!("node {:3}: {}", node, state);
        }
    }

    Ok(())
}
