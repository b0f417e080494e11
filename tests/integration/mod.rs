//! Integration tests for the navtrack engine

mod cli_replay;
mod config_integration;
mod frame_queries;
mod frame_teardown;
mod retargeting;
mod test_utils;
