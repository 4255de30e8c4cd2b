//! 协议元数据模块
//!
//! 定义字节事件、标注事件以及解码器的静态注册信息

use serde::{Deserialize, Serialize};

/// 最小包长度：包头 + 长度 + 类型 + 校验和，无数据
pub const MIN_PACKET_SIZE: usize = 4;
/// 最大包长度
pub const MAX_PACKET_SIZE: usize = 64;

/// 传输方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// 应答（RX）
    #[serde(rename = "rx", alias = "inbound")]
    Inbound,
    /// 请求（TX）
    #[serde(rename = "tx", alias = "outbound")]
    Outbound,
}

impl Direction {
    /// 标注文本中使用的方向缩写
    pub fn tag(self) -> &'static str {
        match self {
            Direction::Inbound => "RX",
            Direction::Outbound => "TX",
        }
    }
}

/// 上游UART解码器交付的单字节事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteEvent {
    pub start: u64,
    pub end: u64,
    pub value: u8,
    pub direction: Direction,
}

impl ByteEvent {
    pub fn new(start: u64, end: u64, value: u8, direction: Direction) -> Self {
        Self {
            start,
            end,
            value,
            direction,
        }
    }
}

/// 标注类别，顺序与注册表一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnotationClass {
    Header,
    Size,
    Checksum,
    Answer,
    Command,
    DataInbound,
    DataOutbound,
    PacketInbound,
    PacketOutbound,
    Warning,
}

impl AnnotationClass {
    pub const ALL: [AnnotationClass; 10] = [
        AnnotationClass::Header,
        AnnotationClass::Size,
        AnnotationClass::Checksum,
        AnnotationClass::Answer,
        AnnotationClass::Command,
        AnnotationClass::DataInbound,
        AnnotationClass::DataOutbound,
        AnnotationClass::PacketInbound,
        AnnotationClass::PacketOutbound,
        AnnotationClass::Warning,
    ];

    /// 在注册表中的序号
    pub fn index(self) -> usize {
        self as usize
    }

    /// 注册标识
    pub fn id(self) -> &'static str {
        match self {
            AnnotationClass::Header => "head",
            AnnotationClass::Size => "datasize",
            AnnotationClass::Checksum => "checksum",
            AnnotationClass::Answer => "answer",
            AnnotationClass::Command => "command",
            AnnotationClass::DataInbound => "rx-data",
            AnnotationClass::DataOutbound => "tx-data",
            AnnotationClass::PacketInbound => "rx-packet",
            AnnotationClass::PacketOutbound => "tx-packet",
            AnnotationClass::Warning => "warning",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AnnotationClass::Header => "Header",
            AnnotationClass::Size => "Data Size",
            AnnotationClass::Checksum => "Checksum",
            AnnotationClass::Answer => "Answer",
            AnnotationClass::Command => "Command",
            AnnotationClass::DataInbound => "RX Data",
            AnnotationClass::DataOutbound => "TX Data",
            AnnotationClass::PacketInbound => "RX packet",
            AnnotationClass::PacketOutbound => "TX packet",
            AnnotationClass::Warning => "Warning",
        }
    }

    pub fn from_id(id: &str) -> Option<AnnotationClass> {
        Self::ALL.into_iter().find(|class| class.id() == id)
    }

    /// 类型字段：请求为命令，应答为回答
    pub fn type_field(direction: Direction) -> AnnotationClass {
        match direction {
            Direction::Inbound => AnnotationClass::Answer,
            Direction::Outbound => AnnotationClass::Command,
        }
    }

    pub fn data(direction: Direction) -> AnnotationClass {
        match direction {
            Direction::Inbound => AnnotationClass::DataInbound,
            Direction::Outbound => AnnotationClass::DataOutbound,
        }
    }

    pub fn packet(direction: Direction) -> AnnotationClass {
        match direction {
            Direction::Inbound => AnnotationClass::PacketInbound,
            Direction::Outbound => AnnotationClass::PacketOutbound,
        }
    }

    /// 所属的标注行
    pub fn row(self) -> &'static AnnotationRow {
        ANNOTATION_ROWS
            .iter()
            .find(|row| row.classes.contains(&self))
            .unwrap_or(&ANNOTATION_ROWS[0])
    }
}

/// 标注事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEvent {
    pub start: u64,
    pub end: u64,
    pub class: AnnotationClass,
    /// 由详细到简略的备选文本
    pub labels: Vec<String>,
}

impl FieldEvent {
    pub fn new(start: u64, end: u64, class: AnnotationClass, labels: Vec<String>) -> Self {
        Self {
            start,
            end,
            class,
            labels,
        }
    }

    /// 最详细的文本
    pub fn primary_label(&self) -> &str {
        self.labels.first().map(String::as_str).unwrap_or("")
    }
}

/// 解码器描述信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub longname: &'static str,
    pub desc: &'static str,
    pub license: &'static str,
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    pub tags: &'static [&'static str],
}

/// 可选通道
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub desc: &'static str,
    pub direction: Direction,
}

/// 标注行：把若干标注类别归到同一行显示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationRow {
    pub id: &'static str,
    pub description: &'static str,
    pub classes: &'static [AnnotationClass],
}

pub const DECODER_INFO: DecoderInfo = DecoderInfo {
    id: "streletz",
    name: "Streletz",
    longname: "Streletz RS232 (Serial bus)",
    desc: "Serial bus for guard system Streletz",
    license: "mit",
    inputs: &["uart"],
    outputs: &["streletz"],
    tags: &["Embedded/industrial"],
};

pub const OPTIONAL_CHANNELS: [ChannelInfo; 2] = [
    ChannelInfo {
        id: "tx",
        name: "TX",
        desc: "Requests",
        direction: Direction::Outbound,
    },
    ChannelInfo {
        id: "rx",
        name: "RX",
        desc: "Responses",
        direction: Direction::Inbound,
    },
];

pub static ANNOTATION_ROWS: [AnnotationRow; 4] = [
    AnnotationRow {
        id: "framing",
        description: "Framing",
        classes: &[
            AnnotationClass::Header,
            AnnotationClass::Size,
            AnnotationClass::Checksum,
        ],
    },
    AnnotationRow {
        id: "data",
        description: "Data",
        classes: &[
            AnnotationClass::Answer,
            AnnotationClass::Command,
            AnnotationClass::DataInbound,
            AnnotationClass::DataOutbound,
        ],
    },
    AnnotationRow {
        id: "warnings",
        description: "Warnings",
        classes: &[AnnotationClass::Warning],
    },
    AnnotationRow {
        id: "packets",
        description: "Packets",
        classes: &[AnnotationClass::PacketInbound, AnnotationClass::PacketOutbound],
    },
];

/// 按标识查找标注行
pub fn annotation_row(id: &str) -> Option<&'static AnnotationRow> {
    ANNOTATION_ROWS.iter().find(|row| row.id == id)
}
