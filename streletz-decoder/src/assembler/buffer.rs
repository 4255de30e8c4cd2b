//! 包缓存实现
//!
//! 定长缓存，容量为最大包长度，复位时清空后重复使用

use streletz_core::MAX_PACKET_SIZE;

/// 候选包的原始字节，按到达顺序保存
#[derive(Debug, Clone, Copy)]
pub struct PacketBuffer {
    data: [u8; MAX_PACKET_SIZE],
    len: usize,
}

// 只比较有效字节，清空后残留的旧数据不参与比较
impl PartialEq for PacketBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for PacketBuffer {}

impl Default for PacketBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketBuffer {
    pub const fn new() -> Self {
        Self {
            data: [0; MAX_PACKET_SIZE],
            len: 0,
        }
    }

    /// 追加一个字节
    ///
    /// # 返回
    /// - `true`: 追加成功
    /// - `false`: 缓存已满，字节被丢弃
    pub fn push(&mut self, byte: u8) -> bool {
        if self.len >= MAX_PACKET_SIZE {
            return false;
        }
        self.data[self.len] = byte;
        self.len += 1;
        true
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}
