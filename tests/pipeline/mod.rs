//! End-to-end pipeline tests.

mod properties;
mod scenarios;
mod sources;
