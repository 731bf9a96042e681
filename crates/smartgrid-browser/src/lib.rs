pub mod browser;
pub mod classify;
pub mod error;
pub mod gateway;
pub mod log;
pub mod pagination;
pub mod query;
pub mod retry;
pub mod session;
pub mod types;

pub use browser::{CollectionBrowser, ProductPage};
pub use classify::{classify, Classified};
pub use error::{BrowserError, ErrorKind, GatewayError};
pub use gateway::{Gateway, GraphqlError, GraphqlResponse, HttpGateway};
pub use log::{DiagnosticLog, LogEntry};
pub use query::CollectionQuery;
pub use session::{BrowserSession, Selection};
