//! The lounge facade: ledger, event log, slot layout, radial placement and
//! roster behind the operations a presentation layer calls.

use crate::config::Config;
use crate::core::clock::DayWatch;
use crate::core::event_log::EventLog;
use crate::core::ledger::OccupancyLedger;
use crate::core::notify::{Observer, SubscriptionId};
use crate::core::radial::{PlacerConfig, RadialPlacer};
use crate::core::roster::MemberRoster;
use crate::core::slot_layout::SlotLayoutStore;
use crate::core::views::{LogRow, OccupantRow, StationRow};
use crate::errors::AppResult;
use crate::models::{Member, Occupant, Point, Size, Station};
use crate::ui::messages::warning;
use chrono::{DateTime, Local, NaiveDate};
use std::sync::Arc;

/// What a UI tick should refresh.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Ledger changed since the previous tick (observers already ran).
    pub changed: bool,
    /// The log view must be reloaded.
    pub log_stale: bool,
    /// Calendar date changed: the active bucket is now this day.
    pub rolled_over: Option<NaiveDate>,
}

pub struct Lounge {
    ledger: OccupancyLedger,
    layout: SlotLayoutStore,
    placer: RadialPlacer,
    roster: MemberRoster,
    day: DayWatch,
}

impl Lounge {
    pub fn open(cfg: &Config) -> Self {
        let canvas = Size::new(cfg.canvas_width, cfg.canvas_height);
        let placer = RadialPlacer::new(PlacerConfig::default(), canvas);
        Self::open_with(cfg, placer, Local::now())
    }

    pub fn open_with(cfg: &Config, placer: RadialPlacer, now: DateTime<Local>) -> Self {
        let log = Arc::new(EventLog::new(cfg.log_dir()));
        let ledger = OccupancyLedger::from_config(cfg, log);

        let mut layout = SlotLayoutStore::load(
            cfg.layout_file(),
            &cfg.layout_order,
            &ledger.station_ids(),
        );
        layout.set_canvas(Size::new(cfg.canvas_width, cfg.canvas_height));

        let mut lounge = Self {
            ledger,
            layout,
            placer,
            roster: MemberRoster::load(cfg.member_path()),
            day: DayWatch::new(now),
        };
        lounge.placer.sync(lounge.ledger.occupants());
        lounge
    }

    pub fn ledger(&self) -> &OccupancyLedger {
        &self.ledger
    }

    pub fn layout(&self) -> &SlotLayoutStore {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut SlotLayoutStore {
        &mut self.layout
    }

    pub fn placer(&self) -> &RadialPlacer {
        &self.placer
    }

    pub fn roster(&self) -> &MemberRoster {
        &self.roster
    }

    pub fn event_log(&self) -> &Arc<EventLog> {
        self.ledger.event_log()
    }

    // ------------------------------------------------
    // Core → presentation
    // ------------------------------------------------

    pub fn list_stations(&self) -> &[Station] {
        self.ledger.stations()
    }

    pub fn list_active_occupants(&self) -> &[Occupant] {
        self.ledger.occupants()
    }

    pub fn list_queued(&self) -> Vec<&Occupant> {
        self.ledger.queued()
    }

    pub fn station_position(&self, station_id: u32) -> Option<Point> {
        self.layout.station_position(station_id)
    }

    pub fn occupant_position(&self, occupant_id: &str) -> Option<Point> {
        self.placer.position(occupant_id)
    }

    pub fn subscribe(&mut self, on_change: Observer) -> SubscriptionId {
        self.ledger.subscribe(on_change)
    }

    pub fn station_rows(&self) -> Vec<StationRow> {
        self.ledger
            .stations()
            .iter()
            .map(|st| {
                StationRow::bind(st, &self.ledger.occupants_on(st.id), self.layout.slot_of(st.id))
            })
            .collect()
    }

    pub fn occupant_rows(&self, now: DateTime<Local>) -> Vec<OccupantRow> {
        self.ledger
            .occupants()
            .iter()
            .map(|o| OccupantRow::bind(o, self.ledger.station(o.station_id), now))
            .collect()
    }

    pub fn log_rows(&self, date: NaiveDate) -> Vec<LogRow> {
        self.event_log()
            .read_bucket(date)
            .iter()
            .map(LogRow::bind)
            .collect()
    }

    pub fn search_members(&self, query: &str) -> Vec<Member> {
        self.roster.search(query).into_iter().cloned().collect()
    }

    pub fn next_member_id(&self) -> String {
        self.roster.next_member_id()
    }

    // ------------------------------------------------
    // Presentation → core
    // ------------------------------------------------

    pub fn check_in(&mut self, name: &str, occupant_id: &str, station_id: u32) -> AppResult<Occupant> {
        self.check_in_at(name, occupant_id, station_id, Local::now())
    }

    pub fn check_in_at(
        &mut self,
        name: &str,
        occupant_id: &str,
        station_id: u32,
        now: DateTime<Local>,
    ) -> AppResult<Occupant> {
        let occupant = self.ledger.check_in_at(name, occupant_id, station_id, now)?;
        if let Err(e) = self.roster.ensure_member(&occupant.name, &occupant.id) {
            warning(format!("Could not add {} to the roster: {}", occupant.id, e));
        }
        self.placer.sync(self.ledger.occupants());
        Ok(occupant)
    }

    pub fn check_out(&mut self, occupant_id: &str) -> AppResult<()> {
        self.check_out_at(occupant_id, Local::now())
    }

    pub fn check_out_at(&mut self, occupant_id: &str, now: DateTime<Local>) -> AppResult<()> {
        self.ledger.check_out_at(occupant_id, now)?;
        self.placer.sync(self.ledger.occupants());
        Ok(())
    }

    pub fn assign_queued(&mut self, occupant_id: &str, station_id: u32) -> AppResult<()> {
        self.assign_queued_at(occupant_id, station_id, Local::now())
    }

    pub fn assign_queued_at(
        &mut self,
        occupant_id: &str,
        station_id: u32,
        now: DateTime<Local>,
    ) -> AppResult<()> {
        self.ledger.assign_queued_at(occupant_id, station_id, now)
    }

    pub fn remove_queued(&mut self, occupant_id: &str) -> AppResult<()> {
        self.remove_queued_at(occupant_id, Local::now())
    }

    pub fn remove_queued_at(&mut self, occupant_id: &str, now: DateTime<Local>) -> AppResult<()> {
        self.ledger.remove_queued_at(occupant_id, now)?;
        self.placer.sync(self.ledger.occupants());
        Ok(())
    }

    /// Drop a station onto the slot nearest to `target`.
    pub fn swap_slot(&mut self, station_id: u32, target: Point) -> AppResult<bool> {
        self.layout.swap_to_point(station_id, target)
    }

    pub fn drag_occupant(&mut self, occupant_id: &str, pointer: Point) -> bool {
        self.placer.drag(occupant_id, pointer)
    }

    pub fn release_occupant(&mut self, occupant_id: &str, pointer: Point) -> bool {
        self.placer.release(occupant_id, pointer)
    }

    pub fn resize(&mut self, size: Size) {
        self.layout.set_canvas(size);
        self.placer.resize(size);
    }

    pub fn reset_occupant_layout(&mut self) {
        self.placer.reset();
    }

    /// Called by the UI every [`crate::core::clock::REFRESH_INTERVAL`].
    pub fn tick(&mut self, now: DateTime<Local>) -> TickReport {
        let changed = self.ledger.flush_changes();
        let rolled_over = self.day.poll(now);
        let log_stale = self.event_log().take_stale() || rolled_over.is_some();
        TickReport {
            changed,
            log_stale,
            rolled_over,
        }
    }
}
