//! Server-sent-events plumbing for streamed generation.
//!
//! Gemini's `streamGenerateContent?alt=sse` endpoint frames every partial
//! candidate as one SSE event. Events are separated by a blank line, and the
//! server may use either `\n` or `\r\n` line endings.
//!
//! - [`decode_utf8_prefix`] moves complete UTF-8 out of the raw byte buffer
//! - [`drain_data_lines`] pulls complete `data:` payloads out of a buffer
//! - [`sse_response_stream`] turns a response + parser into a [`BoxStream`]

use crate::util::from_reqwest;
use futures_util::{Stream, StreamExt};
use sg_domain::error::Result;
use sg_domain::stream::{BoxStream, StreamEvent};

/// Append the longest valid UTF-8 prefix of `pending` to `out`.
///
/// An incomplete multi-byte sequence at the end stays in `pending` until
/// the next network chunk completes it. Bytes that can never form a valid
/// character become U+FFFD.
pub(crate) fn decode_utf8_prefix(pending: &mut Vec<u8>, out: &mut String) {
    loop {
        match std::str::from_utf8(pending) {
            Ok(text) => {
                out.push_str(text);
                pending.clear();
                return;
            }
            Err(e) => {
                let valid = e.valid_up_to();
                out.push_str(&String::from_utf8_lossy(&pending[..valid]));
                match e.error_len() {
                    None => {
                        pending.drain(..valid);
                        return;
                    }
                    Some(bad) => {
                        out.push(char::REPLACEMENT_CHARACTER);
                        pending.drain(..valid + bad);
                    }
                }
            }
        }
    }
}

/// Extract complete `data:` payloads from an SSE buffer.
///
/// `\r\n` pairs and lone `\r` are normalised to `\n` first so both line
/// ending styles delimit events. A trailing `\r` is held back: its `\n` may
/// still be in flight. Consumed text is removed from the buffer; a trailing
/// partial event stays put for the next call.
pub(crate) fn drain_data_lines(buffer: &mut String) -> Vec<String> {
    if buffer.contains('\r') {
        let held_cr = buffer.ends_with('\r');
        if held_cr {
            buffer.pop();
        }
        *buffer = buffer.replace("\r\n", "\n").replace('\r', "\n");
        if held_cr {
            buffer.push('\r');
        }
    }

    let mut payloads = Vec::new();
    while let Some(pos) = buffer.find("\n\n") {
        let block: String = buffer.drain(..pos + 2).collect();

        // Multiple `data:` lines in one event are joined with newlines.
        let mut joined: Option<String> = None;
        for line in block.lines() {
            if let Some(data) = line.trim().strip_prefix("data:") {
                let data = data.trim();
                match joined.as_mut() {
                    Some(acc) => {
                        acc.push('\n');
                        acc.push_str(data);
                    }
                    None => joined = Some(data.to_string()),
                }
            }
        }
        if let Some(data) = joined.filter(|d| !d.is_empty()) {
            payloads.push(data);
        }
    }
    payloads
}

/// Build a [`BoxStream`] from an SSE `reqwest::Response` and a parser closure.
pub(crate) fn sse_response_stream<F>(
    response: reqwest::Response,
    parse_data: F,
) -> BoxStream<'static, Result<StreamEvent>>
where
    F: FnMut(&str) -> Vec<Result<StreamEvent>> + Send + 'static,
{
    let chunks = response
        .bytes_stream()
        .map(|chunk| chunk.map_err(from_reqwest));
    sse_event_stream(chunks, parse_data)
}

/// Decode a stream of raw body chunks into parsed events.
///
/// The closure receives each `data:` payload and returns zero or more
/// events. The stream flushes any unterminated final event when the body
/// closes and emits a fallback `Done` if the parser never produced one.
pub(crate) fn sse_event_stream<S, B, F>(
    chunks: S,
    mut parse_data: F,
) -> BoxStream<'static, Result<StreamEvent>>
where
    S: Stream<Item = Result<B>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    F: FnMut(&str) -> Vec<Result<StreamEvent>> + Send + 'static,
{
    let stream = async_stream::stream! {
        let mut chunks = Box::pin(chunks);
        let mut pending: Vec<u8> = Vec::new();
        let mut buffer = String::new();
        let mut done_emitted = false;

        loop {
            let payloads = match chunks.next().await {
                Some(Ok(bytes)) => {
                    pending.extend_from_slice(bytes.as_ref());
                    decode_utf8_prefix(&mut pending, &mut buffer);
                    drain_data_lines(&mut buffer)
                }
                None => {
                    if !pending.is_empty() {
                        buffer.push_str(&String::from_utf8_lossy(&pending));
                        pending.clear();
                    }
                    if buffer.trim().is_empty() {
                        break;
                    }
                    buffer.push_str("\n\n");
                    let rest = drain_data_lines(&mut buffer);
                    buffer.clear();
                    for data in rest {
                        for event in parse_data(&data) {
                            done_emitted |= matches!(&event, Ok(StreamEvent::Done { .. }));
                            yield event;
                        }
                    }
                    break;
                }
                Some(Err(e)) => {
                    yield Err(e);
                    break;
                }
            };

            for data in payloads {
                for event in parse_data(&data) {
                    done_emitted |= matches!(&event, Ok(StreamEvent::Done { .. }));
                    yield event;
                }
            }
        }

        if !done_emitted {
            yield Ok(StreamEvent::Done {
                usage: None,
                finish_reason: Some("stop".into()),
            });
        }
    };

    Box::pin(stream)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
