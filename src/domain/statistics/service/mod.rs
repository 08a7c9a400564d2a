pub mod aggregate_filler;
pub mod bucket_generator;
pub mod period_resolver;
pub mod statistics_service;
