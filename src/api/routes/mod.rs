//! API route declarations (e.g., /api/v1/*)

pub mod statistics_routes;
pub mod system_routes;
