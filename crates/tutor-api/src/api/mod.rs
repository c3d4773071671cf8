// Public API routes
pub mod bookings;
pub mod common;
pub mod tutors;

pub use bookings::BookingsState;
pub use tutors::TutorsState;
