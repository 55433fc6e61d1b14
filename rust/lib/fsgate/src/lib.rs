//! Filesystem gateway used by the page generator.
//!
//! The generator only talks to [`FsGateway`]. Two implementations exist:
//! [`LocalGateway`] works on a sandboxed local directory, and
//! [`HttpGateway`] forwards to a remote `POST /api/filesystem` endpoint,
//! which [`router`] serves on top of a `LocalGateway`.

pub mod error;
pub mod gateway;
pub mod http;
pub mod local;
pub mod protocol;
pub mod server;

pub use error::FsError;
pub use gateway::FsGateway;
pub use http::HttpGateway;
pub use local::LocalGateway;
pub use protocol::{ExistsResponse, FsRequest, FsResult, Operation, PagePaths, PathValidation};
pub use server::{FILESYSTEM_PATH, FsModule, router};
