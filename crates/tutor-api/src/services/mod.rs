// Services layer for business logic
// Services own the mapping from API operations to collection primitives

pub mod booking;
pub mod tutor;

pub use booking::BookingService;
pub use tutor::TutorService;
