//! Domain events: what the server recorded, and what a caller proposes.

use std::collections::HashMap;

use bytes::Bytes;
use uuid::Uuid;

use crate::proto::{shared, streams};
use crate::status::Status;

/// A commit/prepare pair locating an event in the global `$all` log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub commit: u64,
    pub prepare: u64,
}

/// An event as recorded by the server.
#[derive(Debug, Clone)]
pub struct RecordedEvent {
    pub id: String,
    pub stream_name: String,
    pub revision: u64,
    pub event_type: String,
    pub data: Bytes,
    pub custom_metadata: Bytes,
    pub is_json: bool,
    pub position: Position,
    pub metadata: HashMap<String, String>,
}

/// A recorded event together with the link that resolved to it, if the
/// read went through a link event.
#[derive(Debug, Clone)]
pub struct ResolvedEvent {
    pub event: Option<RecordedEvent>,
    pub link: Option<RecordedEvent>,
    pub commit_position: Option<u64>,
}

impl ResolvedEvent {
    /// Convert one read response into a resolved event. Responses that do
    /// not carry an event (confirmations, checkpoints, stream-not-found
    /// markers) are an `Internal` error here; callers route those variants
    /// before converting.
    pub fn from_read_response(resp: streams::ReadResp) -> Result<ResolvedEvent, Status> {
        match resp.content {
            Some(streams::read_resp::Content::Event(read_event)) => {
                let commit_position = match read_event.position {
                    Some(streams::read_resp::read_event::Position::CommitPosition(c)) => Some(c),
                    _ => None,
                };
                Ok(ResolvedEvent {
                    event: read_event.event.map(RecordedEvent::from_proto),
                    link: read_event.link.map(RecordedEvent::from_proto),
                    commit_position,
                })
            }
            other => Err(Status::internal(format!(
                "expected an event read response, got {:?}",
                other
            ))),
        }
    }

    /// The recorded event itself, preferring the resolved target over the
    /// link.
    pub fn recorded(&self) -> Option<&RecordedEvent> {
        self.event.as_ref().or(self.link.as_ref())
    }

    /// The revision that positions this event in the stream it was read
    /// from: the link's when the read resolved a link, else the event's
    /// own.
    pub(crate) fn cursor_revision(&self) -> u64 {
        self.link
            .as_ref()
            .or(self.event.as_ref())
            .map(|e| e.revision)
            .unwrap_or_default()
    }
}

impl RecordedEvent {
    pub(crate) fn from_proto(event: streams::read_resp::read_event::RecordedEvent) -> RecordedEvent {
        let id = match event.id.and_then(|u| u.value) {
            Some(shared::uuid::Value::String(s)) => s,
            Some(shared::uuid::Value::Structured(s)) => Uuid::from_u64_pair(
                s.most_significant_bits as u64,
                s.least_significant_bits as u64,
            )
            .to_string(),
            None => String::new(),
        };

        let event_type = event.metadata.get("type").cloned().unwrap_or_default();
        let is_json = event
            .metadata
            .get("content-type")
            .map(|ct| ct == "application/json")
            .unwrap_or(false);

        RecordedEvent {
            id,
            stream_name: event
                .stream_identifier
                .map(|s| s.name().into_owned())
                .unwrap_or_default(),
            revision: event.stream_revision,
            event_type,
            data: event.data,
            custom_metadata: event.custom_metadata,
            is_json,
            position: Position {
                commit: event.commit_position,
                prepare: event.prepare_position,
            },
            metadata: event.metadata,
        }
    }
}

/// An event proposed for appending.
#[derive(Debug, Clone)]
pub struct EventData {
    pub id: Option<Uuid>,
    pub event_type: String,
    pub data: Bytes,
    pub custom_metadata: Bytes,
    pub is_json: bool,
}

impl EventData {
    /// A JSON-bodied event. The payload is the caller's serialized bytes.
    pub fn json(event_type: impl Into<String>, data: impl Into<Bytes>) -> EventData {
        EventData {
            id: None,
            event_type: event_type.into(),
            data: data.into(),
            custom_metadata: Bytes::new(),
            is_json: true,
        }
    }

    /// An opaque binary event.
    pub fn binary(event_type: impl Into<String>, data: impl Into<Bytes>) -> EventData {
        EventData {
            id: None,
            event_type: event_type.into(),
            data: data.into(),
            custom_metadata: Bytes::new(),
            is_json: false,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> EventData {
        self.id = Some(id);
        self
    }

    pub(crate) fn into_proposed(self) -> streams::append_req::ProposedMessage {
        let id = self.id.unwrap_or_else(Uuid::new_v4);
        let mut metadata = HashMap::new();
        metadata.insert("type".to_owned(), self.event_type);
        metadata.insert(
            "content-type".to_owned(),
            if self.is_json {
                "application/json"
            } else {
                "application/octet-stream"
            }
            .to_owned(),
        );

        streams::append_req::ProposedMessage {
            id: Some(shared::Uuid {
                value: Some(shared::uuid::Value::String(id.to_string())),
            }),
            metadata,
            custom_metadata: self.custom_metadata,
            data: self.data,
        }
    }
}
