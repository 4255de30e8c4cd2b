//! Streletz Core Library
//!
//! This crate provides the shared data model for the Streletz serial bus
//! decoder: byte and annotation events, decoder options, registration
//! metadata and rendering helpers.

pub mod error;
pub mod options;
pub mod protocol_meta;
pub mod utils;

// 导出错误类型
pub use error::StreletzError;

pub use options::DecoderOptions;

// 导出协议元数据类型，便于其他模块使用
pub use protocol_meta::*;

/// 标注输出接口
///
/// 只追加、保序，已输出的事件不会被撤回
pub trait AnnotationSink {
    fn put(&mut self, event: FieldEvent);
}

impl AnnotationSink for Vec<FieldEvent> {
    fn put(&mut self, event: FieldEvent) {
        self.push(event);
    }
}
