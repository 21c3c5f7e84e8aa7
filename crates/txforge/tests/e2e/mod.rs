//! End-to-end flows through the command handlers and both chain families.

pub mod build_flow_test;
pub mod config_flow_test;
pub mod parse_flow_test;
