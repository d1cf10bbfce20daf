//! NATS Transport
//!
//! Request/reply over NATS using NestJS-compatible packets, so the service
//! interoperates with NestJS `ClientProxy` callers and product services.

mod listener;
mod packet;
mod product_client;

pub use listener::listen;
pub use product_client::NatsProductClient;
