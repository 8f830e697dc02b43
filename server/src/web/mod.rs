// realshop/server/src/web/mod.rs

// Declare child modules
pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::ValidatedJson;
pub use routes::configure_app_routes;
