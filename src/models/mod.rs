pub mod event_record;
pub mod geometry;
pub mod member;
pub mod occupant;
pub mod station;

pub use event_record::EventRecord;
pub use geometry::{Point, Size};
pub use member::Member;
pub use occupant::Occupant;
pub use station::{Station, StationCategory, StationStatus};
