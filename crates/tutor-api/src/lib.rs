// Tutor Booking API Library
// Decision: Shared library for binaries (API server, CLI tools) and integration tests

// API routes and types (shared for OpenAPI generation)
pub mod api;

// Session credentials and the access guard
pub mod auth;

// Process configuration
pub mod config;

// Services layer
pub mod services;
pub use services::{BookingService, TutorService};

// Storage layer
pub mod storage;

// OpenAPI spec generation
pub mod openapi;

// Application router assembly
pub mod router;
pub use router::build_app;
