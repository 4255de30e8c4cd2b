//! Streletz Decoder
//!
//! This crate reconstructs Streletz serial bus packets from a stream of
//! timestamped, direction-tagged bytes and emits annotations as it goes.

pub mod assembler;
pub mod sink;
pub mod uart;

pub use assembler::{AssemblerStats, FieldLabels, FrameAssembler, PacketBuffer};
pub use sink::RowFilterSink;
pub use uart::{StreletzDecoder, UartEvent, UartEventKind};
