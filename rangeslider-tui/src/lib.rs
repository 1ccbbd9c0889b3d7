//! Rangeslider TUI — terminal host for the dual-handle range slider.
//!
//! Mounts a slider into an in-memory host page and drives it from the
//! keyboard and mouse:
//! - Track with filled selection and two handles
//! - Value tooltips while a handle is held
//! - Readout of the live selection and the last committed one

pub mod app;
pub mod config;
pub mod input;
pub mod logging;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use config::{HostConfig, SliderOverrides};
pub use input::{handle_key, handle_mouse};
pub use theme::Theme;
