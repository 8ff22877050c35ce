pub mod app;
mod deserializers;
mod extract;
mod routes;
