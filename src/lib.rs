//! Counts sustained facial expressions in a face-landmark feed.
//!
//! Frames come from a [`capture::FrameSource`], each face is classified by
//! mouth width, and [`emotion::StabilityFilter`] counts an expression once it
//! has been held for [`emotion::MIN_FRAMES`] consecutive frames.

pub mod capture;
pub mod config;
pub mod device;
pub mod display;
pub mod emotion;
pub mod pipeline;
pub mod session;
