//! Portfolio site: a yew frontend with a small behavior layer (theme, scroll
//! chrome, reveals, motion, preview frames) and an axum backend that serves
//! the page, its data and the resume download.

pub mod chrome;
pub mod error;
pub mod hover;
pub mod motion;
pub mod navigation;
pub mod portfolio;
pub mod preview;
pub mod reveal;
pub mod schedule;
pub mod signal;
pub mod surface;
pub mod theme;

#[cfg(not(target_arch = "wasm32"))]
pub mod backend;

#[cfg(target_arch = "wasm32")]
mod controller;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
