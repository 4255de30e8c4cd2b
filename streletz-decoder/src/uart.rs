//! UART事件适配模块
//!
//! 上游UART解码器输出多种带标记的事件，只有数据字节交给帧组装器

use serde::{Deserialize, Serialize};
use streletz_core::{AnnotationSink, ByteEvent, DecoderOptions, Direction};

use crate::assembler::{AssemblerStats, FrameAssembler};

/// UART事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum UartEventKind {
    /// 完整的数据字节
    Data { value: u8 },
    StartBit,
    StopBit,
    ParityBit,
    Idle,
    Break,
    FrameError,
    ParityError,
}

/// 上游UART事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UartEvent {
    pub start: u64,
    pub end: u64,
    pub direction: Direction,
    #[serde(flatten)]
    pub kind: UartEventKind,
}

impl UartEvent {
    pub fn data(start: u64, end: u64, value: u8, direction: Direction) -> Self {
        Self {
            start,
            end,
            direction,
            kind: UartEventKind::Data { value },
        }
    }

    /// 数据事件转换为字节事件，其他类型返回None
    pub fn as_byte(&self) -> Option<ByteEvent> {
        match self.kind {
            UartEventKind::Data { value } => {
                Some(ByteEvent::new(self.start, self.end, value, self.direction))
            }
            _ => None,
        }
    }
}

/// 解码会话：一个帧组装器加一个标注输出
pub struct StreletzDecoder<S: AnnotationSink> {
    assembler: FrameAssembler,
    sink: S,
}

impl<S: AnnotationSink> StreletzDecoder<S> {
    pub fn new(options: DecoderOptions, sink: S) -> Self {
        Self {
            assembler: FrameAssembler::new(options),
            sink,
        }
    }

    /// 处理一个UART事件，非数据事件被忽略
    pub fn decode(&mut self, event: &UartEvent) {
        if let Some(byte) = event.as_byte() {
            self.push_byte(&byte);
        }
    }

    pub fn push_byte(&mut self, event: &ByteEvent) {
        self.assembler.accept(event, &mut self.sink);
    }

    pub fn assembler(&self) -> &FrameAssembler {
        &self.assembler
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// 结束会话，返回标注输出和统计
    pub fn finish(self) -> (S, AssemblerStats) {
        let stats = *self.assembler.stats();
        (self.sink, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streletz_core::{AnnotationClass, FieldEvent};

    #[test]
    fn test_uart_event_json() {
        let event: UartEvent = serde_json::from_str(
            r#"{"start": 0, "end": 87, "direction": "rx", "kind": "data", "value": 157}"#,
        )
        .unwrap();
        assert_eq!(event, UartEvent::data(0, 87, 0x9D, Direction::Inbound));

        let event: UartEvent = serde_json::from_str(
            r#"{"start": 87, "end": 96, "direction": "tx", "kind": "stop-bit"}"#,
        )
        .unwrap();
        assert_eq!(event.kind, UartEventKind::StopBit);
        assert_eq!(event.as_byte(), None);
    }

    #[test]
    fn test_non_data_events_filtered() {
        let mut decoder = StreletzDecoder::new(DecoderOptions::default(), Vec::<FieldEvent>::new());
        let noise = [
            UartEventKind::StartBit,
            UartEventKind::ParityBit,
            UartEventKind::StopBit,
            UartEventKind::FrameError,
            UartEventKind::Break,
        ];
        for (i, kind) in noise.into_iter().enumerate() {
            decoder.decode(&UartEvent {
                start: i as u64,
                end: i as u64 + 1,
                direction: Direction::Inbound,
                kind,
            });
        }
        assert!(decoder.sink().is_empty());
        assert_eq!(decoder.assembler().stats().bytes_seen, 0);
    }

    #[test]
    fn test_interleaved_bits_do_not_break_packet() {
        let mut decoder = StreletzDecoder::new(DecoderOptions::default(), Vec::<FieldEvent>::new());
        let mut t = 0;
        for value in [0x9D, 0x00, 0x01, 0x9C] {
            decoder.decode(&UartEvent {
                start: t,
                end: t + 1,
                direction: Direction::Inbound,
                kind: UartEventKind::StartBit,
            });
            decoder.decode(&UartEvent::data(t + 1, t + 9, value, Direction::Inbound));
            decoder.decode(&UartEvent {
                start: t + 9,
                end: t + 10,
                direction: Direction::Inbound,
                kind: UartEventKind::StopBit,
            });
            t += 10;
        }

        let (events, stats) = decoder.finish();
        let packet = events.last().unwrap();
        assert_eq!(packet.class, AnnotationClass::PacketInbound);
        assert_eq!((packet.start, packet.end), (1, 39));
        assert_eq!(stats.packets, 1);
        assert_eq!(stats.bytes_seen, 4);
    }
}
