//! Report formatting for the `mushaf` binary.
//!
//! Analysis results stay plain data in `mushaf-analysis`; everything that
//! turns them into text tables or the primes JSON document lives here.

pub mod report;
