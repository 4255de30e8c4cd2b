//! 工具模块
//!
//! 提供标注文本渲染和数值解析等常用工具函数

/// 累积异或校验和
pub fn xor_checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &byte| acc ^ byte)
}

/// 将单个字节渲染为两位大写十六进制
pub fn byte_to_hex(byte: u8) -> String {
    hex::encode_upper([byte])
}

/// 将字节序列渲染为空格分隔的十六进制字符串
pub fn bytes_to_hex<'a, I>(bytes: I) -> String
where
    I: IntoIterator<Item = &'a u8>,
{
    bytes
        .into_iter()
        .map(|&b| byte_to_hex(b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 以秒为单位渲染微秒时间戳（定宽，末尾带空格）
pub fn time_sec_str(micros: u64) -> String {
    format!("{:8.3} ", micros as f64 * 1e-6)
}

/// 解析字节取值，支持十进制和0x前缀的十六进制
pub fn parse_byte(text: &str) -> Result<u8, String> {
    let text = text.trim();
    let parsed = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(digits) => u8::from_str_radix(digits, 16),
        None => text.parse::<u8>(),
    };
    parsed.map_err(|e| format!("`{text}` is not a byte value: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor_checksum() {
        assert_eq!(xor_checksum(&[0x9D, 0x00, 0x01]), 0x9C);
        assert_eq!(xor_checksum(&[0x9D, 0x00, 0x01, 0x9C]), 0x00);
        assert_eq!(xor_checksum(&[]), 0x00);
    }

    #[test]
    fn test_hex_rendering() {
        assert_eq!(byte_to_hex(0x0A), "0A");
        assert_eq!(byte_to_hex(0xD9), "D9");
        assert_eq!(bytes_to_hex(&[0x9D, 0x00, 0x01, 0x9C]), "9D 00 01 9C");
        assert_eq!(bytes_to_hex(&[]), "");
    }

    #[test]
    fn test_time_sec_str() {
        assert_eq!(time_sec_str(1_500_000), "   1.500 ");
        assert_eq!(time_sec_str(0), "   0.000 ");
        assert_eq!(time_sec_str(12_345_678), "  12.346 ");
    }

    #[test]
    fn test_parse_byte() {
        assert_eq!(parse_byte("157"), Ok(157));
        assert_eq!(parse_byte("0xD9"), Ok(0xD9));
        assert_eq!(parse_byte(" 0x9d "), Ok(0x9D));
        assert!(parse_byte("256").is_err());
        assert!(parse_byte("0xGG").is_err());
    }
}
