pub mod clock;
pub mod event_log;
pub mod ledger;
pub mod lounge;
pub mod notify;
pub mod radial;
pub mod roster;
pub mod slot_layout;
pub mod views;

pub use event_log::{CloseOutcome, EventLog};
pub use ledger::{CheckInForm, OccupancyLedger, build_station_pool};
pub use lounge::{Lounge, TickReport};
pub use radial::{CardSide, Placement, PlacerConfig, RadialPlacer};
pub use roster::MemberRoster;
pub use slot_layout::{SlotGrid, SlotLayoutStore};
