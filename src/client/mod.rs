//! Backend client protocol.
//!
//! The plugin never performs network I/O itself: it emits [`HttpRequest`]s as
//! actions and the Zellij runtime executes them, delivering each result back
//! as an event together with the request's context map.
//!
//! - `context`: routing data echoed back with every response, including the
//!   generation token used to discard stale responses
//! - `protocol`: URL and multipart construction, response decoding

pub mod context;
pub mod protocol;

pub use context::{RequestContext, RequestKind, TraceContext, CONTEXT_SOURCE};
pub use protocol::{
    decode_search_response, is_success, HttpMethod, HttpRequest, SearchResponse,
};
