//! 会话统计

use serde::Serialize;
use std::fmt;

/// 帧组装统计计数，不影响标注输出
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssemblerStats {
    /// 收到的字节总数
    pub bytes_seen: u64,
    /// 空闲状态下未匹配包头而被丢弃的字节
    pub bytes_discarded: u64,
    /// 匹配到的包头
    pub headers: u64,
    /// 校验通过的完整包
    pub packets: u64,
    pub checksum_failures: u64,
    /// 声明长度超限
    pub size_warnings: u64,
    /// 方向中断导致的复位
    pub direction_resets: u64,
}

impl fmt::Display for AssemblerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bytes: {} (discarded {}), headers: {}, packets: {}, \
             checksum failures: {}, size warnings: {}, direction resets: {}",
            self.bytes_seen,
            self.bytes_discarded,
            self.headers,
            self.packets,
            self.checksum_failures,
            self.size_warnings,
            self.direction_resets
        )
    }
}
