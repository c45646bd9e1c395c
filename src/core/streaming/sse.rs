//! Incremental Server-Sent Events decoder
//!
//! Shared by the provider backends (reading the LLM stream) and the chat client
//! (reading the chat route). Bytes may arrive split at any position, including
//! inside a UTF-8 sequence.

/// One decoded SSE event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseEvent {
    /// `event:` field, if any
    pub event: Option<String>,
    /// `data:` fields joined with `\n`
    pub data: String,
}

/// Incremental SSE decoder
#[derive(Debug, Default)]
pub struct SseDecoder {
    bytes: Vec<u8>,
    current: Option<SseEvent>,
}

impl SseDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes, returning every event completed by them
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.bytes.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.bytes.iter().position(|b| *b == b'\n') {
            let line_bytes: Vec<u8> = self.bytes.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line_bytes);
            let line = line.trim_end_matches(['\n', '\r']);
            if let Some(event) = self.process_line(line) {
                events.push(event);
            }
        }
        events
    }

    /// Flush a trailing event that was not followed by a blank line
    pub fn finish(&mut self) -> Option<SseEvent> {
        if !self.bytes.is_empty() {
            let rest = std::mem::take(&mut self.bytes);
            let line = String::from_utf8_lossy(&rest).trim_end_matches('\r').to_string();
            // A blank line here would already have dispatched the event
            let _ = self.process_line(&line);
        }
        self.current.take().filter(|e| !e.data.is_empty())
    }

    fn process_line(&mut self, line: &str) -> Option<SseEvent> {
        // Empty line signals end of event
        if line.is_empty() {
            return self.current.take().filter(|e| !e.data.is_empty());
        }

        // Comments
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.find(':') {
            Some(pos) => {
                let value = &line[pos + 1..];
                (&line[..pos], value.strip_prefix(' ').unwrap_or(value))
            }
            None => (line, ""),
        };

        let current = self.current.get_or_insert_with(SseEvent::default);
        match field {
            "data" => {
                if !current.data.is_empty() {
                    current.data.push('\n');
                }
                current.data.push_str(value);
            }
            "event" => current.event = Some(value.to_string()),
            _ => {}
        }
        None
    }
}
