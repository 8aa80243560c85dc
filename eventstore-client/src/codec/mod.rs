//! gRPC length-prefixed message framing.
//!
//! Frames on the wire are 5 header bytes (one compression flag, four
//! big-endian length bytes) followed by that many payload bytes. The decoder
//! is pull-based and tolerates payloads split across any number of network
//! reads; the residual between calls never exceeds one in-flight message
//! plus the 5 prefix bytes.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::status::{Code, Status};

/// Compression flag plus four big-endian length bytes.
pub const HEADER_SIZE: usize = 5;

/// Frames larger than this are refused with `ResourceExhausted`.
pub const DEFAULT_MAX_FRAME_LENGTH: usize = 16 * 1024 * 1024;

const BUFFER_SIZE: usize = 8 * 1024;

/// Incremental decoder for a stream of length-prefixed gRPC messages.
pub struct FrameDecoder {
    buf: BytesMut,
    state: State,
    max_frame_length: usize,
}

#[derive(Debug)]
enum State {
    ReadHeader,
    ReadBody { len: usize },
    Error,
}

impl FrameDecoder {
    pub fn new(max_frame_length: usize) -> Self {
        FrameDecoder {
            buf: BytesMut::with_capacity(BUFFER_SIZE),
            state: State::ReadHeader,
            max_frame_length,
        }
    }

    /// Append a chunk of raw bytes received from the transport.
    pub fn extend(&mut self, chunk: &[u8]) {
        self.buf.put(chunk);
    }

    /// Pull the next complete payload out of the accumulator, if one has
    /// arrived. After a fatal framing error the decoder stays poisoned and
    /// yields nothing further.
    pub fn next_frame(&mut self) -> Result<Option<Bytes>, Status> {
        if let State::Error = self.state {
            return Ok(None);
        }

        if let State::ReadHeader = self.state {
            if self.buf.remaining() < HEADER_SIZE {
                return Ok(None);
            }

            match self.buf.get_u8() {
                0 => {}
                1 => {
                    // https://grpc.github.io/grpc/core/md_doc_compression.html
                    // A message with the Compressed-Flag bit set but no
                    // grpc-encoding negotiated MUST fail with INTERNAL.
                    self.state = State::Error;
                    return Err(Status::internal(
                        "protocol error: received message with compressed-flag but no grpc-encoding was negotiated",
                    ));
                }
                f => {
                    trace!("unexpected compression flag");
                    self.state = State::Error;
                    return Err(Status::internal(format!(
                        "protocol error: received message with invalid compression flag: {} (valid flags are 0 and 1)",
                        f
                    )));
                }
            }

            let len = self.buf.get_u32() as usize;
            if len > self.max_frame_length {
                self.state = State::Error;
                return Err(Status::resource_exhausted(format!(
                    "message length {} exceeds the limit of {} bytes",
                    len, self.max_frame_length
                )));
            }
            self.buf.reserve(len);

            self.state = State::ReadBody { len };
        }

        if let State::ReadBody { len } = self.state {
            if self.buf.remaining() < len {
                return Ok(None);
            }

            let payload = self.buf.split_to(len).freeze();
            self.state = State::ReadHeader;
            return Ok(Some(payload));
        }

        Ok(None)
    }

    /// True when the accumulator holds no partial frame.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Wrap an already-encoded message payload in a gRPC frame. The compression
/// flag is always 0.
pub fn encode_frame(payload: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    buf.put_u8(0);
    buf.put_u32(payload.len() as u32);
    buf.put(payload);
    buf.freeze()
}

/// Encode a protobuf message into a single gRPC frame.
pub fn encode_message<M: prost::Message>(message: &M) -> Result<Bytes, Status> {
    let len = message.encoded_len();
    if len > u32::MAX as usize {
        return Err(Status::internal("message too large to frame"));
    }

    let mut buf = BytesMut::with_capacity(HEADER_SIZE + len);
    buf.put_u8(0);
    buf.put_u32(len as u32);
    let mut body = buf.split_off(HEADER_SIZE);
    message
        .encode(&mut body)
        .map_err(|err| Status::internal(format!("Error encoding: {}", err)))?;
    buf.unsplit(body);
    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn wire(payloads: &[Vec<u8>]) -> Vec<u8> {
        let mut out = Vec::new();
        for p in payloads {
            out.extend_from_slice(&encode_frame(p));
        }
        out
    }

    fn decode_all(decoder: &mut FrameDecoder) -> Vec<Bytes> {
        let mut frames = Vec::new();
        while let Some(frame) = decoder.next_frame().unwrap() {
            frames.push(frame);
        }
        frames
    }

    #[quickcheck]
    fn chunking_is_invisible(payloads: Vec<Vec<u8>>, cuts: Vec<u8>) -> bool {
        let bytes = wire(&payloads);

        let mut whole = FrameDecoder::new(DEFAULT_MAX_FRAME_LENGTH);
        whole.extend(&bytes);
        let expected = decode_all(&mut whole);

        let mut chunked = FrameDecoder::new(DEFAULT_MAX_FRAME_LENGTH);
        let mut got = Vec::new();
        let mut rest = &bytes[..];
        for cut in cuts {
            if rest.is_empty() {
                break;
            }
            let n = (cut as usize % rest.len()).max(1);
            let (head, tail) = rest.split_at(n);
            chunked.extend(head);
            got.extend(decode_all(&mut chunked));
            rest = tail;
        }
        chunked.extend(rest);
        got.extend(decode_all(&mut chunked));

        got == expected
            && expected
                .iter()
                .map(|b| b.as_ref().to_vec())
                .collect::<Vec<_>>()
                == payloads
    }

    #[test]
    fn partial_prefix_waits_for_more_input() {
        let frame = encode_frame(b"hello");
        let mut decoder = FrameDecoder::new(DEFAULT_MAX_FRAME_LENGTH);

        decoder.extend(&frame[..3]);
        assert!(decoder.next_frame().unwrap().is_none());

        decoder.extend(&frame[3..]);
        assert_eq!(decoder.next_frame().unwrap().unwrap().as_ref(), b"hello");
        assert!(decoder.is_empty());
    }

    #[test]
    fn compressed_flag_is_internal() {
        let mut decoder = FrameDecoder::new(DEFAULT_MAX_FRAME_LENGTH);
        decoder.extend(&[1, 0, 0, 0, 0]);
        let err = decoder.next_frame().unwrap_err();
        assert_eq!(err.code(), Code::Internal);
        // poisoned afterwards
        decoder.extend(&encode_frame(b"x"));
        assert!(decoder.next_frame().unwrap().is_none());
    }

    #[test]
    fn invalid_flag_is_internal() {
        let mut decoder = FrameDecoder::new(DEFAULT_MAX_FRAME_LENGTH);
        decoder.extend(&[7, 0, 0, 0, 0]);
        assert_eq!(decoder.next_frame().unwrap_err().code(), Code::Internal);
    }

    #[test]
    fn oversized_frame_is_resource_exhausted() {
        let mut decoder = FrameDecoder::new(16);
        let mut prefix = Vec::new();
        prefix.push(0u8);
        prefix.extend_from_slice(&17u32.to_be_bytes());
        decoder.extend(&prefix);
        assert_eq!(
            decoder.next_frame().unwrap_err().code(),
            Code::ResourceExhausted
        );
    }

    #[test]
    fn empty_payload_roundtrips() {
        let mut decoder = FrameDecoder::new(DEFAULT_MAX_FRAME_LENGTH);
        decoder.extend(&encode_frame(b""));
        assert_eq!(decoder.next_frame().unwrap().unwrap().len(), 0);
    }
}
