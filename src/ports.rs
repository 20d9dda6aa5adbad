use crate::error::PortSpecError;

/// Parse a comma-separated port specification into a list of TCP ports.
///
/// Supported tokens:
/// - single port number: `80`
/// - inclusive range: `8000-8010`
///
/// Whitespace around tokens is ignored and empty tokens are skipped, so `""`
/// and `","` both parse to an empty list. Ports keep the order in which they
/// appear and duplicates are kept.
pub fn parse_ports_str(s: &str) -> Result<Vec<u16>, PortSpecError> {
    let mut out: Vec<u16> = Vec::new();

    for raw in s.split(',') {
        let token = raw.trim();
        if token.is_empty() {
            continue;
        }

        if token.contains('-') {
            let parts: Vec<&str> = token.split('-').collect();
            if parts.len() != 2 {
                return Err(PortSpecError::MalformedRange(token.to_string()));
            }
            let start = parse_port_str(parts[0].trim(), token)?;
            let end = parse_port_str(parts[1].trim(), token)?;
            out.extend(port_range(start, end)?);
            continue;
        }

        out.push(parse_port_str(token, token)?);
    }

    Ok(out)
}

/// Inclusive `start..=end` port list, as used by the `--start/--end` form.
pub fn port_range(start: u16, end: u16) -> Result<Vec<u16>, PortSpecError> {
    if start > end {
        return Err(PortSpecError::InvertedRange {
            start: start.into(),
            end: end.into(),
        });
    }
    Ok((start..=end).collect())
}

fn parse_port_str(s: &str, token: &str) -> Result<u16, PortSpecError> {
    let val: u32 = s
        .parse()
        .map_err(|_| PortSpecError::InvalidNumber(token.to_string()))?;
    u16::try_from(val).map_err(|_| PortSpecError::OutOfRange(token.to_string()))
}
