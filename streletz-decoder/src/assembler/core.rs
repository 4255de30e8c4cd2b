//! FrameAssembler核心实现
//!
//! 逐字节驱动的帧组装状态机：搜索包头、校验声明长度和累积校验和，
//! 子字段标注在包校验结果未知之前即时输出，整包标注只在校验通过后输出

use log::{debug, trace, warn};
use streletz_core::{
    AnnotationSink, ByteEvent, DecoderOptions, Direction, MAX_PACKET_SIZE, MIN_PACKET_SIZE,
};

use super::buffer::PacketBuffer;
use super::labels::FieldLabels;
use super::stats::AssemblerStats;

/// 包内固定位置（从包头起以1计数）
pub mod position {
    pub const HEADER: usize = 1;
    pub const DATA_SIZE: usize = 2;
    pub const DATA_TYPE: usize = 3;
    pub const DATA_START: usize = 4;
}

/// 正在收集的候选包，原始字节在组装器的`buffer`中
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    /// 锁定方向
    direction: Direction,
    /// buffer中全部字节的异或
    checksum: u8,
    declared_size: Option<usize>,
    packet_start: u64,
    data_start: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssemblerState {
    /// 等待包头
    Idle,
    Collecting(Candidate),
}

/// 帧组装器
///
/// 每个解码会话持有一个实例，按到达顺序对每个字节事件调用一次`accept`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameAssembler {
    options: DecoderOptions,
    labels: FieldLabels,
    state: AssemblerState,
    /// 整个会话复用的包缓存，空闲时为空
    buffer: PacketBuffer,
    stats: AssemblerStats,
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new(DecoderOptions::default())
    }
}

impl FrameAssembler {
    /// 创建新的帧组装器
    pub fn new(options: DecoderOptions) -> Self {
        Self {
            options,
            labels: FieldLabels::new(options.print_sec),
            state: AssemblerState::Idle,
            buffer: PacketBuffer::default(),
            stats: AssemblerStats::default(),
        }
    }

    /// 处理一个字节事件，产生的标注写入`sink`
    pub fn accept<S>(&mut self, event: &ByteEvent, sink: &mut S)
    where
        S: AnnotationSink + ?Sized,
    {
        self.stats.bytes_seen += 1;

        // 方向锁：对侧字节中断当前候选包，该字节随后按空闲状态重新判断
        if let AssemblerState::Collecting(candidate) = &self.state {
            if candidate.direction != event.direction {
                debug!(
                    "{} packet interrupted at position {} by {} byte 0x{:02X}",
                    candidate.direction.tag(),
                    self.buffer.len(),
                    event.direction.tag(),
                    event.value
                );
                self.stats.direction_resets += 1;
                self.reset();
            }
        }

        if self.is_idle() {
            self.search_header(event, sink);
        } else {
            self.accumulate(event, sink);
        }
    }

    fn search_header<S>(&mut self, event: &ByteEvent, sink: &mut S)
    where
        S: AnnotationSink + ?Sized,
    {
        if event.value != self.options.header_for(event.direction) {
            self.stats.bytes_discarded += 1;
            return;
        }

        self.buffer.push(event.value);
        self.state = AssemblerState::Collecting(Candidate {
            direction: event.direction,
            checksum: event.value,
            declared_size: None,
            packet_start: event.start,
            data_start: None,
        });
        self.stats.headers += 1;
        trace!("{} header 0x{:02X} at {}", event.direction.tag(), event.value, event.start);

        sink.put(self.labels.header(event));
    }

    fn accumulate<S>(&mut self, event: &ByteEvent, sink: &mut S)
    where
        S: AnnotationSink + ?Sized,
    {
        let AssemblerState::Collecting(candidate) = &mut self.state else {
            return;
        };

        if !self.buffer.push(event.value) {
            // 声明长度已限制在缓存容量以内，正常情况下不会到达
            warn!("packet buffer overflow at {}, resetting", event.start);
            self.reset();
            return;
        }
        candidate.checksum ^= event.value;
        let pos = self.buffer.len();

        match pos {
            position::DATA_SIZE => {
                let declared = MIN_PACKET_SIZE + event.value as usize;
                if declared > MAX_PACKET_SIZE {
                    warn!(
                        "declared packet size {} exceeds maximum {} at {}",
                        declared, MAX_PACKET_SIZE, event.start
                    );
                    self.stats.size_warnings += 1;
                    sink.put(self.labels.wrong_size(event));
                    self.reset();
                    return;
                }
                candidate.declared_size = Some(declared);
                sink.put(self.labels.size(event));
            }
            position::DATA_TYPE => sink.put(self.labels.packet_type(event)),
            position::DATA_START => candidate.data_start = Some(event.start),
            _ => {}
        }

        let Some(declared) = candidate.declared_size else {
            return;
        };

        if declared > MIN_PACKET_SIZE && pos == declared - 1 {
            // 数据块结束
            let payload = &self.buffer.as_slice()[position::DATA_START - 1..declared - 1];
            let data_start = candidate.data_start.unwrap_or(event.start);
            sink.put(self.labels.data(data_start, event.end, event.direction, payload));
        } else if pos == declared {
            // 校验和字节：包结束
            sink.put(self.labels.checksum(event));
            if candidate.checksum == 0 {
                debug!(
                    "{} packet of {} bytes at {}..{}",
                    candidate.direction.tag(),
                    declared,
                    candidate.packet_start,
                    event.end
                );
                self.stats.packets += 1;
                sink.put(self.labels.packet(
                    candidate.packet_start,
                    event.end,
                    candidate.direction,
                    self.buffer.as_slice(),
                ));
            } else {
                debug!(
                    "{} packet at {} failed checksum (residue 0x{:02X})",
                    candidate.direction.tag(),
                    candidate.packet_start,
                    candidate.checksum
                );
                self.stats.checksum_failures += 1;
            }
            self.reset();
        }
    }

    /// 回到空闲状态并清空包缓存，可在任意状态下重复调用
    pub fn reset(&mut self) {
        self.state = AssemblerState::Idle;
        self.buffer.clear();
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, AssemblerState::Idle)
    }

    /// 已接收的候选包字节数，空闲时为0
    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    pub fn locked_direction(&self) -> Option<Direction> {
        match &self.state {
            AssemblerState::Idle => None,
            AssemblerState::Collecting(candidate) => Some(candidate.direction),
        }
    }

    pub fn declared_size(&self) -> Option<usize> {
        match &self.state {
            AssemblerState::Idle => None,
            AssemblerState::Collecting(candidate) => candidate.declared_size,
        }
    }

    /// 当前候选包的累积校验和
    pub fn checksum(&self) -> u8 {
        match &self.state {
            AssemblerState::Idle => 0,
            AssemblerState::Collecting(candidate) => candidate.checksum,
        }
    }

    pub fn buffered(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn stats(&self) -> &AssemblerStats {
        &self.stats
    }
}
