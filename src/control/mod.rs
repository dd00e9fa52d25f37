//! Actuator decision logic for the local node.

pub mod hysteresis;
