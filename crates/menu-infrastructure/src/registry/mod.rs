//! Host registry adapters

pub mod route_file;

pub use route_file::RouteFileRegistry;
