//! 标注文本构造
//!
//! 每类标注给出由详细到简略的一组文本

use streletz_core::utils::{byte_to_hex, bytes_to_hex, time_sec_str};
use streletz_core::{AnnotationClass, ByteEvent, Direction, FieldEvent};

/// 标注构造器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldLabels {
    /// 在首选文本前加上起始时间（秒）
    print_sec: bool,
}

impl FieldLabels {
    pub fn new(print_sec: bool) -> Self {
        Self { print_sec }
    }

    fn field(
        &self,
        start: u64,
        end: u64,
        class: AnnotationClass,
        mut labels: Vec<String>,
    ) -> FieldEvent {
        if self.print_sec {
            if let Some(primary) = labels.first_mut() {
                primary.insert_str(0, &time_sec_str(start));
            }
        }
        FieldEvent::new(start, end, class, labels)
    }

    pub fn header(&self, event: &ByteEvent) -> FieldEvent {
        self.field(
            event.start,
            event.end,
            AnnotationClass::Header,
            vec![
                format!("HEAD: 0x{}", byte_to_hex(event.value)),
                "HEAD".to_string(),
                "H".to_string(),
            ],
        )
    }

    pub fn size(&self, event: &ByteEvent) -> FieldEvent {
        self.field(
            event.start,
            event.end,
            AnnotationClass::Size,
            vec![format!("DS: 0x{}", byte_to_hex(event.value)), "DS".to_string()],
        )
    }

    /// 声明长度超限
    pub fn wrong_size(&self, event: &ByteEvent) -> FieldEvent {
        self.field(
            event.start,
            event.end,
            AnnotationClass::Warning,
            vec![
                format!("Wrong DS: 0x{}", byte_to_hex(event.value)),
                "WDS".to_string(),
            ],
        )
    }

    /// 类型字段：请求为CMD，应答为ANS
    pub fn packet_type(&self, event: &ByteEvent) -> FieldEvent {
        let tag = match event.direction {
            Direction::Outbound => "CMD",
            Direction::Inbound => "ANS",
        };
        self.field(
            event.start,
            event.end,
            AnnotationClass::type_field(event.direction),
            vec![
                format!("{tag}: 0x{}", byte_to_hex(event.value)),
                tag.to_string(),
            ],
        )
    }

    pub fn data(&self, start: u64, end: u64, direction: Direction, payload: &[u8]) -> FieldEvent {
        let tag = direction.tag();
        self.field(
            start,
            end,
            AnnotationClass::data(direction),
            vec![
                format!("{tag} DATA: {}", bytes_to_hex(payload)),
                format!("{tag}DATA"),
                format!("{tag}D"),
                "D".to_string(),
            ],
        )
    }

    pub fn checksum(&self, event: &ByteEvent) -> FieldEvent {
        self.field(
            event.start,
            event.end,
            AnnotationClass::Checksum,
            vec![format!("CS: 0x{}", byte_to_hex(event.value)), "CS".to_string()],
        )
    }

    pub fn packet(&self, start: u64, end: u64, direction: Direction, packet: &[u8]) -> FieldEvent {
        let tag = direction.tag();
        self.field(
            start,
            end,
            AnnotationClass::packet(direction),
            vec![
                format!("{tag} PACKET: {}", bytes_to_hex(packet)),
                format!("{tag} PACKET"),
                format!("{tag}P"),
            ],
        )
    }
}
