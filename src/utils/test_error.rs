use std::{error::Error, fmt::Display};

/// An error for simulating failures in tests.
#[derive(Debug)]
pub struct TestError;

impl Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TestError")
    }
}

impl Error for TestError {}
