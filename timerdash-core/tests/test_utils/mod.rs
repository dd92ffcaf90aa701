// tests/test_utils/mod.rs
#![allow(dead_code)]

pub mod fake_api;
pub mod fixtures;
