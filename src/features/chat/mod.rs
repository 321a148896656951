pub mod handler;
pub mod relay;
pub mod routes;

pub use relay::ChatRelay;
