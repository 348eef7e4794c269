use super::{Action, Event, Menu};
use crate::error::{BridgeError, Result};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub fn decode_menu(line: &str) -> Result<Menu> {
    decode(line)
}

pub fn decode_action(line: &str) -> Result<Action> {
    decode(line)
}

fn decode<T: DeserializeOwned>(line: &str) -> Result<T> {
    serde_json::from_str(line).map_err(BridgeError::Decode)
}

/// Serializes an event as one newline-terminated record.
pub fn encode_event(event: &Event) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec(event).map_err(BridgeError::Encode)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Reads newline-delimited records from the parent.
pub struct RecordReader<R> {
    reader: R,
    line: String,
}

impl<R: AsyncBufRead + Unpin> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }

    /// Returns the next non-blank line with surrounding whitespace trimmed.
    pub async fn next_record(&mut self) -> Result<&str> {
        loop {
            self.line.clear();
            let bytes_read = self
                .reader
                .read_line(&mut self.line)
                .await
                .map_err(BridgeError::Read)?;

            if bytes_read == 0 {
                return Err(BridgeError::StreamClosed);
            }
            if !self.line.trim().is_empty() {
                return Ok(self.line.trim());
            }
        }
    }

    /// The startup descriptor is a bare `Menu`, not an `Action`.
    pub async fn read_menu(&mut self) -> Result<Menu> {
        decode_menu(self.next_record().await?)
    }

    pub async fn read_action(&mut self) -> Result<Action> {
        decode_action(self.next_record().await?)
    }
}

/// Writes newline-terminated events, flushing after each one so the parent
/// sees every record as soon as it is produced.
pub struct EventWriter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin> EventWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub async fn send(&mut self, event: &Event) -> Result<()> {
        let bytes = encode_event(event)?;
        self.writer.write_all(&bytes).await.map_err(BridgeError::Write)?;
        self.writer.flush().await.map_err(BridgeError::Write)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
