//! 帧组装模块
//!
//! 从带时间戳和方向标记的字节流中重建Streletz数据包

pub mod buffer;
pub mod core;
pub mod labels;
pub mod stats;

pub use buffer::PacketBuffer;
pub use self::core::FrameAssembler;
pub use labels::FieldLabels;
pub use stats::AssemblerStats;
