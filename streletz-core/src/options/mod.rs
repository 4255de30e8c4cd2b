//! 解码器选项
//!
//! 会话开始时提供一次，此后不再改变

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::StreletzError;
use crate::protocol_meta::Direction;

pub const DEFAULT_HEADER_TX: u8 = 217;
pub const DEFAULT_HEADER_RX: u8 = 157;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecoderOptions {
    /// 请求包头
    #[serde(default = "default_header_tx")]
    pub header_tx: u8,
    /// 应答包头
    #[serde(default = "default_header_rx")]
    pub header_rx: u8,
    /// 在标注文本前打印起始时间（秒）
    #[serde(default)]
    pub print_sec: bool,
}

fn default_header_tx() -> u8 {
    DEFAULT_HEADER_TX
}

fn default_header_rx() -> u8 {
    DEFAULT_HEADER_RX
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            header_tx: DEFAULT_HEADER_TX,
            header_rx: DEFAULT_HEADER_RX,
            print_sec: false,
        }
    }
}

impl DecoderOptions {
    /// 给定方向的包头标记
    pub fn header_for(&self, direction: Direction) -> u8 {
        match direction {
            Direction::Inbound => self.header_rx,
            Direction::Outbound => self.header_tx,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, StreletzError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StreletzError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
