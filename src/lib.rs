//! Ember Smoke: a burning cigarette, optionally held by a breathing stick
//! figure, with a real-time smoke particle simulation.

pub mod breath;
pub mod burn;
pub mod config;
pub mod controls;
pub mod error;
pub mod frame_loop;
pub mod ik;
pub mod math;
pub mod persistence;
pub mod pose;
pub mod scene;
pub mod session;
pub mod smoke;
pub mod surface;
pub mod timer;

pub use error::{Error, Result};
