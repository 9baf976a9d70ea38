pub mod app;
mod deserializers;
pub mod error;
mod extract;
mod pagination;
mod routes;
