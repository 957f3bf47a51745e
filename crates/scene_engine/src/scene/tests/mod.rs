//! Multi-frame scene scenarios

mod frame_integration;
