//! Hand-maintained protobuf types for the `event_store.client` gRPC surface
//! consumed by this crate: the `Streams` service plus the shared value
//! messages it references. Field numbers match the published protocol
//! definitions; messages and fields this client never touches are omitted.

pub mod shared {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Empty {}

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct StreamIdentifier {
        #[prost(bytes = "bytes", tag = "3")]
        pub stream_name: ::bytes::Bytes,
    }

    impl StreamIdentifier {
        pub fn from_name(name: &str) -> Self {
            StreamIdentifier {
                stream_name: ::bytes::Bytes::copy_from_slice(name.as_bytes()),
            }
        }

        pub fn name(&self) -> ::std::borrow::Cow<'_, str> {
            String::from_utf8_lossy(&self.stream_name)
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Uuid {
        #[prost(oneof = "uuid::Value", tags = "1, 2")]
        pub value: Option<uuid::Value>,
    }

    pub mod uuid {
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Structured {
            #[prost(int64, tag = "1")]
            pub most_significant_bits: i64,
            #[prost(int64, tag = "2")]
            pub least_significant_bits: i64,
        }

        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum Value {
            #[prost(message, tag = "1")]
            Structured(Structured),
            #[prost(string, tag = "2")]
            String(std::string::String),
        }
    }
}

pub mod streams {
    use super::shared;

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ReadReq {
        #[prost(message, optional, tag = "1")]
        pub options: Option<read_req::Options>,
    }

    pub mod read_req {
        use super::shared;

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Options {
            #[prost(enumeration = "options::ReadDirection", tag = "3")]
            pub read_direction: i32,
            #[prost(bool, tag = "4")]
            pub resolve_links: bool,
            #[prost(message, optional, tag = "9")]
            pub uuid_option: Option<options::UuidOption>,
            #[prost(oneof = "options::StreamOption", tags = "1, 2")]
            pub stream_option: Option<options::StreamOption>,
            #[prost(oneof = "options::CountOption", tags = "5, 6")]
            pub count_option: Option<options::CountOption>,
            #[prost(oneof = "options::FilterOption", tags = "7, 8")]
            pub filter_option: Option<options::FilterOption>,
        }

        pub mod options {
            use super::shared;

            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
            #[repr(i32)]
            pub enum ReadDirection {
                Forwards = 0,
                Backwards = 1,
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct StreamOptions {
                #[prost(message, optional, tag = "1")]
                pub stream_identifier: Option<shared::StreamIdentifier>,
                #[prost(oneof = "stream_options::RevisionOption", tags = "2, 3, 4")]
                pub revision_option: Option<stream_options::RevisionOption>,
            }

            pub mod stream_options {
                use super::shared;

                #[derive(Clone, PartialEq, ::prost::Oneof)]
                pub enum RevisionOption {
                    #[prost(uint64, tag = "2")]
                    Revision(u64),
                    #[prost(message, tag = "3")]
                    Start(shared::Empty),
                    #[prost(message, tag = "4")]
                    End(shared::Empty),
                }
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct AllOptions {
                #[prost(oneof = "all_options::AllOption", tags = "1, 2, 3")]
                pub all_option: Option<all_options::AllOption>,
            }

            pub mod all_options {
                use super::shared;

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct Position {
                    #[prost(uint64, tag = "1")]
                    pub commit_position: u64,
                    #[prost(uint64, tag = "2")]
                    pub prepare_position: u64,
                }

                #[derive(Clone, PartialEq, ::prost::Oneof)]
                pub enum AllOption {
                    #[prost(message, tag = "1")]
                    Position(Position),
                    #[prost(message, tag = "2")]
                    Start(shared::Empty),
                    #[prost(message, tag = "3")]
                    End(shared::Empty),
                }
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct SubscriptionOptions {}

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct FilterOptions {
                #[prost(uint32, tag = "5")]
                pub checkpoint_interval_multiplier: u32,
                #[prost(oneof = "filter_options::Filter", tags = "1, 2")]
                pub filter: Option<filter_options::Filter>,
                #[prost(oneof = "filter_options::Window", tags = "3, 4")]
                pub window: Option<filter_options::Window>,
            }

            pub mod filter_options {
                use super::shared;

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct Expression {
                    #[prost(string, tag = "1")]
                    pub regex: std::string::String,
                    #[prost(string, repeated, tag = "2")]
                    pub prefix: Vec<std::string::String>,
                }

                #[derive(Clone, PartialEq, ::prost::Oneof)]
                pub enum Filter {
                    #[prost(message, tag = "1")]
                    StreamIdentifier(Expression),
                    #[prost(message, tag = "2")]
                    EventType(Expression),
                }

                #[derive(Clone, PartialEq, ::prost::Oneof)]
                pub enum Window {
                    #[prost(uint32, tag = "3")]
                    Max(u32),
                    #[prost(message, tag = "4")]
                    Count(shared::Empty),
                }
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct UuidOption {
                #[prost(oneof = "uuid_option::Content", tags = "1, 2")]
                pub content: Option<uuid_option::Content>,
            }

            pub mod uuid_option {
                use super::shared;

                #[derive(Clone, PartialEq, ::prost::Oneof)]
                pub enum Content {
                    #[prost(message, tag = "1")]
                    Structured(shared::Empty),
                    #[prost(message, tag = "2")]
                    String(shared::Empty),
                }
            }

            #[derive(Clone, PartialEq, ::prost::Oneof)]
            pub enum StreamOption {
                #[prost(message, tag = "1")]
                Stream(StreamOptions),
                #[prost(message, tag = "2")]
                All(AllOptions),
            }

            #[derive(Clone, PartialEq, ::prost::Oneof)]
            pub enum CountOption {
                #[prost(uint64, tag = "5")]
                Count(u64),
                #[prost(message, tag = "6")]
                Subscription(SubscriptionOptions),
            }

            #[derive(Clone, PartialEq, ::prost::Oneof)]
            pub enum FilterOption {
                #[prost(message, tag = "7")]
                Filter(FilterOptions),
                #[prost(message, tag = "8")]
                NoFilter(shared::Empty),
            }
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ReadResp {
        #[prost(oneof = "read_resp::Content", tags = "1, 2, 3, 4")]
        pub content: Option<read_resp::Content>,
    }

    pub mod read_resp {
        use super::shared;

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ReadEvent {
            #[prost(message, optional, tag = "1")]
            pub event: Option<read_event::RecordedEvent>,
            #[prost(message, optional, tag = "2")]
            pub link: Option<read_event::RecordedEvent>,
            #[prost(oneof = "read_event::Position", tags = "3, 4")]
            pub position: Option<read_event::Position>,
        }

        pub mod read_event {
            use super::shared;

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct RecordedEvent {
                #[prost(message, optional, tag = "1")]
                pub id: Option<shared::Uuid>,
                #[prost(message, optional, tag = "2")]
                pub stream_identifier: Option<shared::StreamIdentifier>,
                #[prost(uint64, tag = "3")]
                pub stream_revision: u64,
                #[prost(uint64, tag = "4")]
                pub prepare_position: u64,
                #[prost(uint64, tag = "5")]
                pub commit_position: u64,
                #[prost(map = "string, string", tag = "6")]
                pub metadata: std::collections::HashMap<std::string::String, std::string::String>,
                #[prost(bytes = "bytes", tag = "7")]
                pub custom_metadata: ::bytes::Bytes,
                #[prost(bytes = "bytes", tag = "8")]
                pub data: ::bytes::Bytes,
            }

            #[derive(Clone, PartialEq, ::prost::Oneof)]
            pub enum Position {
                #[prost(uint64, tag = "3")]
                CommitPosition(u64),
                #[prost(message, tag = "4")]
                NoPosition(shared::Empty),
            }
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct SubscriptionConfirmation {
            #[prost(string, tag = "1")]
            pub subscription_id: std::string::String,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Checkpoint {
            #[prost(uint64, tag = "1")]
            pub commit_position: u64,
            #[prost(uint64, tag = "2")]
            pub prepare_position: u64,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct StreamNotFound {
            #[prost(message, optional, tag = "1")]
            pub stream_identifier: Option<shared::StreamIdentifier>,
        }

        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum Content {
            #[prost(message, tag = "1")]
            Event(ReadEvent),
            #[prost(message, tag = "2")]
            Confirmation(SubscriptionConfirmation),
            #[prost(message, tag = "3")]
            Checkpoint(Checkpoint),
            #[prost(message, tag = "4")]
            StreamNotFound(StreamNotFound),
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct AppendReq {
        #[prost(oneof = "append_req::Content", tags = "1, 2")]
        pub content: Option<append_req::Content>,
    }

    pub mod append_req {
        use super::shared;

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Options {
            #[prost(message, optional, tag = "1")]
            pub stream_identifier: Option<shared::StreamIdentifier>,
            #[prost(oneof = "options::ExpectedStreamRevision", tags = "2, 3, 4, 5")]
            pub expected_stream_revision: Option<options::ExpectedStreamRevision>,
        }

        pub mod options {
            use super::shared;

            #[derive(Clone, PartialEq, ::prost::Oneof)]
            pub enum ExpectedStreamRevision {
                #[prost(uint64, tag = "2")]
                Revision(u64),
                #[prost(message, tag = "3")]
                NoStream(shared::Empty),
                #[prost(message, tag = "4")]
                Any(shared::Empty),
                #[prost(message, tag = "5")]
                StreamExists(shared::Empty),
            }
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ProposedMessage {
            #[prost(message, optional, tag = "1")]
            pub id: Option<shared::Uuid>,
            #[prost(map = "string, string", tag = "2")]
            pub metadata: std::collections::HashMap<std::string::String, std::string::String>,
            #[prost(bytes = "bytes", tag = "3")]
            pub custom_metadata: ::bytes::Bytes,
            #[prost(bytes = "bytes", tag = "4")]
            pub data: ::bytes::Bytes,
        }

        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum Content {
            #[prost(message, tag = "1")]
            Options(Options),
            #[prost(message, tag = "2")]
            ProposedMessage(ProposedMessage),
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct AppendResp {
        #[prost(oneof = "append_resp::Result", tags = "1, 2")]
        pub result: Option<append_resp::Result>,
    }

    pub mod append_resp {
        use super::shared;

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Position {
            #[prost(uint64, tag = "1")]
            pub commit_position: u64,
            #[prost(uint64, tag = "2")]
            pub prepare_position: u64,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Success {
            #[prost(oneof = "success::CurrentRevisionOption", tags = "1, 2")]
            pub current_revision_option: Option<success::CurrentRevisionOption>,
            #[prost(oneof = "success::PositionOption", tags = "3, 4")]
            pub position_option: Option<success::PositionOption>,
        }

        pub mod success {
            use super::shared;

            #[derive(Clone, PartialEq, ::prost::Oneof)]
            pub enum CurrentRevisionOption {
                #[prost(uint64, tag = "1")]
                CurrentRevision(u64),
                #[prost(message, tag = "2")]
                NoStream(shared::Empty),
            }

            #[derive(Clone, PartialEq, ::prost::Oneof)]
            pub enum PositionOption {
                #[prost(message, tag = "3")]
                Position(super::Position),
                #[prost(message, tag = "4")]
                NoPosition(shared::Empty),
            }
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct WrongExpectedVersion {
            #[prost(oneof = "wrong_expected_version::CurrentRevisionOption", tags = "1, 2")]
            pub current_revision_option: Option<wrong_expected_version::CurrentRevisionOption>,
            #[prost(oneof = "wrong_expected_version::ExpectedRevisionOption", tags = "3, 4, 5, 6")]
            pub expected_revision_option: Option<wrong_expected_version::ExpectedRevisionOption>,
        }

        pub mod wrong_expected_version {
            use super::shared;

            #[derive(Clone, PartialEq, ::prost::Oneof)]
            pub enum CurrentRevisionOption {
                #[prost(uint64, tag = "1")]
                CurrentRevision(u64),
                #[prost(message, tag = "2")]
                CurrentNoStream(shared::Empty),
            }

            #[derive(Clone, PartialEq, ::prost::Oneof)]
            pub enum ExpectedRevisionOption {
                #[prost(uint64, tag = "3")]
                ExpectedRevision(u64),
                #[prost(message, tag = "4")]
                ExpectedAny(shared::Empty),
                #[prost(message, tag = "5")]
                ExpectedStreamExists(shared::Empty),
                #[prost(message, tag = "6")]
                ExpectedNoStream(shared::Empty),
            }
        }

        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum Result {
            #[prost(message, tag = "1")]
            Success(Success),
            #[prost(message, tag = "2")]
            WrongExpectedVersion(WrongExpectedVersion),
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DeleteReq {
        #[prost(message, optional, tag = "1")]
        pub options: Option<delete_req::Options>,
    }

    pub mod delete_req {
        use super::shared;

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Options {
            #[prost(message, optional, tag = "1")]
            pub stream_identifier: Option<shared::StreamIdentifier>,
            #[prost(oneof = "options::ExpectedStreamRevision", tags = "2, 3, 4, 5")]
            pub expected_stream_revision: Option<options::ExpectedStreamRevision>,
        }

        pub mod options {
            use super::shared;

            #[derive(Clone, PartialEq, ::prost::Oneof)]
            pub enum ExpectedStreamRevision {
                #[prost(uint64, tag = "2")]
                Revision(u64),
                #[prost(message, tag = "3")]
                NoStream(shared::Empty),
                #[prost(message, tag = "4")]
                Any(shared::Empty),
                #[prost(message, tag = "5")]
                StreamExists(shared::Empty),
            }
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DeleteResp {
        #[prost(oneof = "delete_resp::PositionOption", tags = "1, 2")]
        pub position_option: Option<delete_resp::PositionOption>,
    }

    pub mod delete_resp {
        use super::shared;

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Position {
            #[prost(uint64, tag = "1")]
            pub commit_position: u64,
            #[prost(uint64, tag = "2")]
            pub prepare_position: u64,
        }

        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum PositionOption {
            #[prost(message, tag = "1")]
            Position(Position),
            #[prost(message, tag = "2")]
            NoPosition(shared::Empty),
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct TombstoneReq {
        #[prost(message, optional, tag = "1")]
        pub options: Option<tombstone_req::Options>,
    }

    pub mod tombstone_req {
        use super::shared;

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Options {
            #[prost(message, optional, tag = "1")]
            pub stream_identifier: Option<shared::StreamIdentifier>,
            #[prost(oneof = "options::ExpectedStreamRevision", tags = "2, 3, 4, 5")]
            pub expected_stream_revision: Option<options::ExpectedStreamRevision>,
        }

        pub mod options {
            use super::shared;

            #[derive(Clone, PartialEq, ::prost::Oneof)]
            pub enum ExpectedStreamRevision {
                #[prost(uint64, tag = "2")]
                Revision(u64),
                #[prost(message, tag = "3")]
                NoStream(shared::Empty),
                #[prost(message, tag = "4")]
                Any(shared::Empty),
                #[prost(message, tag = "5")]
                StreamExists(shared::Empty),
            }
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct TombstoneResp {
        #[prost(oneof = "tombstone_resp::PositionOption", tags = "1, 2")]
        pub position_option: Option<tombstone_resp::PositionOption>,
    }

    pub mod tombstone_resp {
        use super::shared;

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Position {
            #[prost(uint64, tag = "1")]
            pub commit_position: u64,
            #[prost(uint64, tag = "2")]
            pub prepare_position: u64,
        }

        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum PositionOption {
            #[prost(message, tag = "1")]
            Position(Position),
            #[prost(message, tag = "2")]
            NoPosition(shared::Empty),
        }
    }

    /// Fully qualified RPC paths for the `Streams` service.
    pub mod paths {
        pub const READ: &str = "/event_store.client.streams.Streams/Read";
        pub const APPEND: &str = "/event_store.client.streams.Streams/Append";
        pub const DELETE: &str = "/event_store.client.streams.Streams/Delete";
        pub const TOMBSTONE: &str = "/event_store.client.streams.Streams/Tombstone";
    }
}
