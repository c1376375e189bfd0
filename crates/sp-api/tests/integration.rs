//! Single integration test binary; each module covers one route group.

mod common;

mod auth_tests;
mod health_tests;
mod protected_route_tests;
