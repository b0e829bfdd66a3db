//! Line-oriented terminal host for the order form.
//!
//! Reads shopper commands from stdin, drives an [`OrderFormController`] and
//! prints whatever the controller pushes into the sink.
//!
//! [`OrderFormController`]: orderform_form::OrderFormController

pub mod command;
pub mod config;
pub mod sink;

pub use command::{Input, InputError, parse_line};
pub use config::TerminalConfig;
pub use sink::TerminalSink;
