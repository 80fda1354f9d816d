//! Diagnostic creation, severity management, and terminal rendering.
//!
//! This crate provides structured [`Diagnostic`] messages carrying a severity,
//! a code and a call-site [`Backtrace`](globguard_source::Backtrace). The
//! [`Messenger`] trait is the channel through which the glob cache reports
//! problems and renders backtrace titles; [`SinkMessenger`] implements it on
//! top of a thread-safe [`DiagnosticSink`].

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod messenger;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use messenger::{Messenger, SinkMessenger};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
