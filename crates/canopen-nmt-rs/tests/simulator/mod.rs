// crates/canopen-nmt-rs/tests/simulator/mod.rs
use canopen_nmt_rs::frame::{CanCodec, NodeGuardReply, NodeGuardRequest};
use canopen_nmt_rs::hal::{CanInterface, CanOpenError};
use canopen_nmt_rs::{CanFrame, NmtTarget, NodeId, NodeState};
use std::collections::VecDeque;

/// A simulated CAN bus that buffers frames in memory.
pub struct SimulatedCanBus {
    /// Incoming frames (from bus to master).
    rx_queue: VecDeque<CanFrame>,
    /// Outgoing frames (from master to bus).
    tx_queue: VecDeque<CanFrame>,
}

impl SimulatedCanBus {
    pub fn new() -> Self {
        Self {
            rx_queue: VecDeque::new(),
            tx_queue: VecDeque::new(),
        }
    }

    /// Pushes a frame into the receive buffer (simulating arrival from the bus).
    pub fn push_rx(&mut self, frame: CanFrame) {
        self.rx_queue.push_back(frame);
    }

    /// Extracts all pending transmitted frames.
    pub fn take_tx_frames(&mut self) -> Vec<CanFrame> {
        self.tx_queue.drain(..).collect()
    }
}

impl CanInterface for SimulatedCanBus {
    fn send_frame(&mut self, frame: &CanFrame) -> Result<(), CanOpenError> {
        self.tx_queue.push_back(*frame);
        Ok(())
    }

    fn receive_frame(&mut self) -> Result<Option<CanFrame>, CanOpenError> {
        Ok(self.rx_queue.pop_front())
    }
}

/// A minimal slave model: answers guard polls addressed to it (or broadcast)
/// with its current state, alternating the toggle bit between replies.
pub struct SimulatedSlave {
    pub node_id: NodeId,
    pub state: NodeState,
    toggle: bool,
}

impl SimulatedSlave {
    pub fn new(node_id: NodeId, state: NodeState) -> Self {
        Self {
            node_id,
            state,
            toggle: false,
        }
    }

    /// Produces this slave's reply to `frame` if it is a guard poll that
    /// addresses it, advancing the toggle bit.
    pub fn answer(&mut self, frame: &CanFrame) -> Option<CanFrame> {
        let request = NodeGuardRequest::from_frame(frame).ok()?;
        let addressed = match request.target {
            NmtTarget::AllNodes => true,
            NmtTarget::Node(id) => id == self.node_id,
        };
        if !addressed {
            return None;
        }
        let reply = NodeGuardReply {
            node: self.node_id,
            state: self.state,
            toggle: self.toggle,
        };
        self.toggle = !self.toggle;
        Some(reply.to_frame())
    }
}
