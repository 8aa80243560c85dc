//! A client for the EventStore 20+ streaming protocol over HTTP/2 with
//! gRPC framing.
//!
//! One long-lived HTTP/2 connection carries many concurrent logical
//! requests — unary, server-streaming and client-streaming — each with its
//! own lifecycle, buffering, cancellation and delivery discipline. The
//! connection is owned by a single actor task that drives the `h2` engine
//! with manually managed flow control; public operations talk to it
//! through a command queue and never touch the engine themselves.
//!
//! ```no_run
//! use eventstore_client::{Client, ClientSettings, EventData, ReadOptions};
//!
//! # async fn example() -> Result<(), eventstore_client::ClientError> {
//! let client = Client::connect(ClientSettings::new("localhost:2113")?).await?;
//!
//! client
//!     .append(
//!         "accounts-1",
//!         [EventData::json("account-opened", &br#"{"owner":"alice"}"#[..])],
//!         &Default::default(),
//!     )
//!     .await?;
//!
//! let mut events = client.stream("accounts-1", ReadOptions::default());
//! while let Some(event) = events.next().await? {
//!     let recorded = event.recorded().expect("read events carry a recorded event");
//!     println!("{} @ {}", recorded.event_type, recorded.revision);
//! }
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod options;
pub mod proto;

mod client;
mod error;
mod event;
mod status;
mod streams;

pub use client::{Client, ClientSettings, Credentials, SubscriptionHandle};
pub use error::ClientError;
pub use event::{EventData, Position, RecordedEvent, ResolvedEvent};
pub use options::{
    AppendOptions, CurrentRevision, Cursor, DeleteOptions, Direction, ExpectedRevision,
    ReadOptions, ReadTarget, SubscribeOptions,
};
pub use status::{Code, Status};
pub use streams::{ReadStream, SubscriptionEvent, WriteResult};
