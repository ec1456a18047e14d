// brewfinder-api: Async Rust client for the Brewery Finder API

pub mod client;
pub mod error;
pub mod geocode;
pub mod models;
pub mod request;
pub mod session;
pub mod transport;

mod resources;

pub use client::BreweryClient;
pub use error::Error;
pub use request::{CallArgs, RequestOptions, RequestSpec};
pub use session::{ResponseEnvelope, Session};
pub use transport::TransportConfig;
