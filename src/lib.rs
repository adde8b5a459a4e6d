//! A single-shot HTTP/1.1 GET client.
//!
//! See the `url` module for splitting a url into host, port and path.
//! See the `protocol` module for the request text that is sent.
//! See the `client` module for connecting and running the exchange.
//! See the `output` module for where the response bytes end up.
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod protocol;
pub mod url;
