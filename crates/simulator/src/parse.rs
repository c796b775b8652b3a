//! Command-line value parsers.

/// Register write scheduled for a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledWrite {
    /// Cycle count at which the write lands (before that tick is evaluated).
    pub tick: u64,
    /// Value written to the register.
    pub value: u32,
}

/// Parse a decimal or `0x`-prefixed hexadecimal `u32`.
pub fn parse_value(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => s.replace('_', "").parse::<u32>(),
    };
    parsed.map_err(|e| format!("invalid value '{s}': {e}"))
}

/// Parse `TICK=VALUE`.
pub fn parse_write(s: &str) -> Result<ScheduledWrite, String> {
    let (tick, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TICK=VALUE, got '{s}'"))?;
    let tick = tick
        .trim()
        .replace('_', "")
        .parse::<u64>()
        .map_err(|e| format!("invalid tick '{tick}': {e}"))?;
    Ok(ScheduledWrite {
        tick,
        value: parse_value(value)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_decimal_and_hex() {
        assert_eq!(parse_value("42"), Ok(42));
        assert_eq!(parse_value("0xABC"), Ok(0xABC));
        assert_eq!(parse_value("0Xabc"), Ok(0xABC));
        assert_eq!(parse_value("1_000"), Ok(1000));
    }

    #[test]
    fn test_parse_value_rejects_garbage() {
        assert!(parse_value("abc").is_err());
        assert!(parse_value("0xZZ").is_err());
        assert!(parse_value("-1").is_err());
    }

    #[test]
    fn test_parse_write() {
        assert_eq!(
            parse_write("100=0x1F"),
            Ok(ScheduledWrite {
                tick: 100,
                value: 0x1F
            })
        );
        assert_eq!(
            parse_write("2_000 = 7"),
            Ok(ScheduledWrite {
                tick: 2000,
                value: 7
            })
        );
    }

    #[test]
    fn test_parse_write_requires_separator() {
        let err = parse_write("100").unwrap_err();
        assert!(err.contains("TICK=VALUE"), "unexpected error: {err}");
    }
}
