pub mod files;
pub mod routes;
