//! Library side of the `growthref` binary: logging setup, output naming
//! and the self-test cases.

pub mod logging;
pub mod outputs;
pub mod selftest;
