//! 采集输入读取
//!
//! 输入为JSON Lines格式的UART事件，空行和`#`开头的注释行被跳过

use streletz_core::{AnnotationSink, StreletzError};
use streletz_decoder::{StreletzDecoder, UartEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// 解析一行输入
///
/// # 返回
/// - `Ok(Some(event))`: 解析出的事件
/// - `Ok(None)`: 空行或注释
/// - `Err(StreletzError)`: 格式错误
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<UartEvent>, StreletzError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(line)
        .map(Some)
        .map_err(|e| StreletzError::invalid_input(line_no, e.to_string()))
}

/// 把输入中的全部事件依次交给解码会话
///
/// 按原始字节逐行读取，非UTF-8的行与格式错误的行一样报告行号
///
/// # 返回
/// 读取的事件数
pub async fn feed_events<R, S>(
    mut reader: R,
    decoder: &mut StreletzDecoder<S>,
) -> Result<u64, StreletzError>
where
    R: AsyncBufRead + Unpin,
    S: AnnotationSink,
{
    let mut raw = Vec::new();
    let mut line_no = 0;
    let mut count = 0;
    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw).await? == 0 {
            break;
        }
        line_no += 1;
        let line = std::str::from_utf8(&raw)
            .map_err(|e| StreletzError::invalid_input(line_no, e.to_string()))?;
        if let Some(event) = parse_line(line, line_no)? {
            decoder.decode(&event);
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use streletz_core::{AnnotationClass, DecoderOptions, Direction, FieldEvent};
    use streletz_decoder::UartEventKind;

    #[test]
    fn test_parse_line() {
        assert!(parse_line("", 1).unwrap().is_none());
        assert!(parse_line("   # comment", 2).unwrap().is_none());

        let event = parse_line(r#"{"start":1,"end":2,"direction":"tx","kind":"break"}"#, 3)
            .unwrap()
            .unwrap();
        assert_eq!(event.kind, UartEventKind::Break);
        assert_eq!(event.direction, Direction::Outbound);
    }

    #[test]
    fn test_parse_line_error_names_line() {
        let err = parse_line(r#"{"start":1}"#, 42).unwrap_err();
        assert!(matches!(err, StreletzError::InvalidInput { line: 42, .. }));
    }

    #[tokio::test]
    async fn test_feed_events() {
        let capture = r#"
# minimal RX packet
{"start":0,"end":10,"direction":"rx","kind":"start-bit"}
{"start":0,"end":10,"direction":"rx","kind":"data","value":157}
{"start":10,"end":20,"direction":"rx","kind":"data","value":0}
{"start":20,"end":30,"direction":"rx","kind":"data","value":1}
{"start":30,"end":40,"direction":"rx","kind":"data","value":156}
"#;
        let mut decoder = StreletzDecoder::new(DecoderOptions::default(), Vec::<FieldEvent>::new());
        let count = feed_events(capture.as_bytes(), &mut decoder).await.unwrap();
        assert_eq!(count, 5);

        let (events, stats) = decoder.finish();
        assert_eq!(stats.packets, 1);
        assert_eq!(events.last().unwrap().class, AnnotationClass::PacketInbound);
    }

    const RX_HEADER_LINE: &str =
        r#"{"start":0,"end":10,"direction":"rx","kind":"data","value":157}"#;

    #[tokio::test]
    async fn test_feed_events_stops_on_bad_line() {
        let capture = format!("{RX_HEADER_LINE}\nnot json\n");
        let mut decoder = StreletzDecoder::new(DecoderOptions::default(), Vec::<FieldEvent>::new());
        let err = feed_events(capture.as_bytes(), &mut decoder).await.unwrap_err();
        assert!(matches!(err, StreletzError::InvalidInput { line: 2, .. }));
        assert_eq!(decoder.assembler().position(), 1);
    }

    #[tokio::test]
    async fn test_feed_events_rejects_invalid_utf8() {
        println!("=== 非UTF-8输入行 ===");
        let mut capture = Vec::new();
        capture.extend_from_slice(RX_HEADER_LINE.as_bytes());
        capture.push(b'\n');
        capture.extend_from_slice(b"\xff\xfe garbage\n");
        capture.extend_from_slice(RX_HEADER_LINE.as_bytes());
        capture.push(b'\n');

        let mut decoder = StreletzDecoder::new(DecoderOptions::default(), Vec::<FieldEvent>::new());
        let err = feed_events(capture.as_slice(), &mut decoder).await.unwrap_err();
        println!("错误: {err}");
        assert!(matches!(err, StreletzError::InvalidInput { line: 2, .. }));
        // 第二行之后的内容不再读取
        assert_eq!(decoder.assembler().position(), 1);
        assert_eq!(decoder.assembler().stats().bytes_seen, 1);
    }

    #[tokio::test]
    async fn test_feed_events_crlf_and_missing_final_newline() {
        let capture = concat!(
            "# capture\r\n\r\n",
            r#"{"start":0,"end":1,"direction":"tx","kind":"idle"}"#
        );
        let mut decoder = StreletzDecoder::new(DecoderOptions::default(), Vec::<FieldEvent>::new());
        let count = feed_events(capture.as_bytes(), &mut decoder).await.unwrap();
        assert_eq!(count, 1);
    }
}
