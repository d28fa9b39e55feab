//! HTTP implementation of the LoanLens gateway.

pub mod envelope;
pub mod http_gateway;

pub use http_gateway::HttpGateway;
