//! Client-side behaviors for the profile video page.
//!
//! This crate is compiled to WebAssembly and enhances server-rendered markup:
//! a countdown over the recording, elements that move between containers at
//! responsive breakpoints, modal dialogs with a backdrop fade, floating input
//! labels, and the live camera preview. The markup and styling are owned by
//! the page; this crate only attaches behavior to them.
//!
//! Every behavior is written against a small trait (`Scheduler`, `Dom`,
//! `Viewport`, `TextTarget`, `ModalSurface`, `LabeledField`) so the logic is
//! testable natively. The browser implementations live in [`web`], which is
//! only compiled with the `hydrate` feature.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`countdown`] | Countdown state machine, display formatting, lifecycle listeners |
//! | [`relocate`] | Anchor-based responsive element relocation |
//! | [`modal`] | Modal show/hide and the stepped backdrop fade |
//! | [`input_focus`] | Floating-label rules for `.input-row` fields |
//! | [`camera`] | Capture constraints and device selection for the preview |
//! | [`page`] | Page-level registry that wires widgets from [`config`] |
//! | [`schedule`] | Cancellable recurring/one-shot callbacks and a manual clock |
//! | [`throttle`] | Trailing throttle over a scheduler |
//! | [`viewport`] | Media-query parsing/matching and resize subscriptions |
//! | [`dom`] | Tree mutation surface and the in-memory tree |
//! | [`config`] | Page wiring loaded from JSON |
//! | [`consts`] | Shared names and timing constants |
//! | [`error`] | Crate error type |

pub mod camera;
pub mod config;
pub mod consts;
pub mod countdown;
pub mod dom;
pub mod error;
pub mod input_focus;
pub mod modal;
pub mod page;
pub mod relocate;
pub mod schedule;
pub mod throttle;
pub mod viewport;
#[cfg(feature = "hydrate")]
pub mod web;

pub use error::PageError;
