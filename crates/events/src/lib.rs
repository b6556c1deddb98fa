//! Domain events emitted by dutydesk aggregates.

pub mod event;

pub use event::Event;
