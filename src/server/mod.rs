pub mod proxy;
pub mod rejection;
pub mod routes;

pub use proxy::RelayServer;
pub use rejection::handle_rejection;
pub use routes::create_app;
