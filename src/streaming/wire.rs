//! Line-delimited JSON framing
//!
//! Each message is one JSON object followed by `\n`:
//!
//! ```text
//! {"type":"cloud","data":{"header":{...},"points":[{"x":0.0,"y":0.12,"z":1.0}, ...]}}
//! {"type":"reconfigure","data":{"min_height":0.1,"max_height":0.2}}
//! ```
//!
//! NaN coordinates travel as `null`. Blank lines are skipped. A line that
//! fails to decode is reported to the caller and the stream continues.

use crate::error::Result;
use crate::streaming::messages::{Inbound, Outbound};
use std::io::{BufRead, Write};

/// JSON-lines codec for node messages
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLines;

impl JsonLines {
    /// Decode one inbound line; `Ok(None)` for blank lines
    pub fn decode(&self, line: &str) -> Result<Option<Inbound>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(line)?))
    }

    /// Encode one outbound message without the trailing newline
    pub fn encode(&self, msg: &Outbound) -> Result<String> {
        Ok(serde_json::to_string(msg)?)
    }

    /// Write one outbound message and its newline
    pub fn write<W: Write>(&self, writer: &mut W, msg: &Outbound) -> Result<()> {
        serde_json::to_writer(&mut *writer, msg)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Iterate decoded inbound messages from a reader
    ///
    /// I/O errors end iteration after being yielded; decode errors are
    /// yielded and iteration continues.
    pub fn read<R: BufRead>(self, reader: R) -> impl Iterator<Item = Result<Inbound>> {
        reader.lines().filter_map(move |line| match line {
            Ok(line) => self.decode(&line).transpose(),
            Err(e) => Some(Err(e.into())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HeightBandUpdate, ScanConfig};
    use crate::error::Error;
    use crate::pipeline::CloudToScan;
    use crate::types::{FrameHeader, Point3D, PointCloudFrame};
    use std::io::Cursor;

    #[test]
    fn test_decode_skips_blank_lines() {
        assert!(JsonLines.decode("   ").unwrap().is_none());
        assert!(JsonLines.decode("").unwrap().is_none());
    }

    #[test]
    fn test_decode_error_is_serialization() {
        assert!(matches!(
            JsonLines.decode("{not json"),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_read_continues_after_bad_line() {
        let input = concat!(
            "{\"type\":\"reconfigure\",\"data\":{\"min_height\":0.0,\"max_height\":1.0}}\n",
            "garbage\n",
            "\n",
            "{\"type\":\"reconfigure\",\"data\":{\"max_height\":2.0}}\n",
        );
        let results: Vec<_> = JsonLines.read(Cursor::new(input)).collect();

        assert_eq!(results.len(), 3);
        assert!(matches!(
            results[0],
            Ok(Inbound::Reconfigure(u)) if u == HeightBandUpdate::new(0.0, 1.0)
        ));
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_write_outbound_lines() {
        let frame = PointCloudFrame::new(
            FrameHeader::new(9, "cam"),
            vec![Point3D::new(0.0, 0.12, 1.0)],
        );
        let out = CloudToScan::process_with(&frame, &ScanConfig::default());

        let mut buf = Vec::new();
        JsonLines.write(&mut buf, &Outbound::Scan(out.scan.clone())).unwrap();
        JsonLines.write(&mut buf, &Outbound::Marker(out.marker)).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(r#"{"type":"scan""#));
        assert!(lines[1].contains(r#""ns":"points_and_lines""#));

        let scan: Outbound = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(scan, Outbound::Scan(out.scan));
    }
}
