#![cfg(test)]

pub mod common;
pub mod script_tests;
pub mod storage_tests;
