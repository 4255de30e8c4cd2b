//! 标注输出

use clap::ValueEnum;
use std::io::{self, Write};
use streletz_core::{AnnotationSink, FieldEvent};

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// 每行：`起始-结束 类别 文本`
    Text,
    /// 每行一个JSON对象
    Json,
}

/// 把标注逐行写入`W`
///
/// 标注接口不返回错误，第一个写入错误被记录下来，在会话结束时报告
pub struct WriterSink<W: Write> {
    writer: W,
    format: OutputFormat,
    error: Option<io::Error>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            error: None,
        }
    }

    fn write_event(&mut self, event: &FieldEvent) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(
                self.writer,
                "{}-{} {} {}",
                event.start,
                event.end,
                event.class.id(),
                event.primary_label()
            ),
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.writer, event)?;
                writeln!(self.writer)
            }
        }
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> AnnotationSink for WriterSink<W> {
    fn put(&mut self, event: FieldEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write_event(&event) {
            self.error = Some(err);
        }
    }
}
