//! Occupancy ledger: the station pool, the active occupants and the
//! check-in / check-out / assignment transitions between them.

use crate::config::Config;
use crate::core::event_log::{CloseOutcome, EventLog};
use crate::core::notify::{ChangeNotifier, Observer, SubscriptionId};
use crate::errors::{AppError, AppResult};
use crate::models::station::QUEUE_STATION;
use crate::models::{Occupant, Station, StationCategory};
use crate::store::{read_json, write_json};
use crate::ui::messages::warning;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::sync::Arc;

/// Build the station pool: primary stations `1..=N`, then the configured
/// shared stations in declaration order.
pub fn build_station_pool(cfg: &Config) -> Vec<Station> {
    let mut pool: Vec<Station> = (1..=cfg.primary_stations).map(Station::primary).collect();
    pool.extend(
        cfg.auxiliary_stations
            .iter()
            .map(|aux| Station::auxiliary(aux.id, aux.label.clone())),
    );
    pool
}

/// Validated check-in input, as typed in a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInForm {
    pub name: String,
    pub occupant_id: String,
    pub station_id: u32,
}

impl CheckInForm {
    /// Trim and validate raw input. An empty station text queues the occupant.
    pub fn parse(name: &str, occupant_id: &str, station: &str) -> AppResult<Self> {
        let name = name.trim();
        let occupant_id = occupant_id.trim();
        if name.is_empty() || occupant_id.is_empty() {
            return Err(AppError::InvalidInput("name and ID are required".into()));
        }

        let station = station.trim();
        let station_id = if station.is_empty() {
            QUEUE_STATION
        } else {
            station.parse::<u32>().map_err(|_| {
                AppError::InvalidInput(format!("invalid station ID '{}': must be a number", station))
            })?
        };

        Ok(Self {
            name: name.to_string(),
            occupant_id: occupant_id.to_string(),
            station_id,
        })
    }
}

pub struct OccupancyLedger {
    stations: Vec<Station>,
    occupants: Vec<Occupant>,
    ledger_file: PathBuf,
    log: Arc<EventLog>,
    notifier: ChangeNotifier,
}

impl OccupancyLedger {
    /// Open the ledger and restore station status from the persisted occupants.
    pub fn open(stations: Vec<Station>, ledger_file: impl Into<PathBuf>, log: Arc<EventLog>) -> Self {
        let mut ledger = Self {
            stations,
            occupants: Vec::new(),
            ledger_file: ledger_file.into(),
            log,
            notifier: ChangeNotifier::new(),
        };
        ledger.restore();
        ledger
    }

    pub fn from_config(cfg: &Config, log: Arc<EventLog>) -> Self {
        Self::open(build_station_pool(cfg), cfg.ledger_file(), log)
    }

    fn restore(&mut self) {
        let occupants = match read_json::<Vec<Occupant>>(&self.ledger_file) {
            Ok(list) => list.unwrap_or_default(),
            Err(e) => {
                warning(format!(
                    "Could not read {} ({}); starting with no active occupants.",
                    self.ledger_file.display(),
                    e
                ));
                Vec::new()
            }
        };

        for occ in &occupants {
            if occ.is_queued() {
                continue;
            }
            match self.station_mut(occ.station_id) {
                Some(st) => st.occupy(&occ.id),
                None => warning(format!(
                    "Occupant {} ({}) references unknown station {}.",
                    occ.name, occ.id, occ.station_id
                )),
            }
        }
        self.occupants = occupants;
    }

    // ------------------------------------------------
    // Read views
    // ------------------------------------------------

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, id: u32) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    fn station_mut(&mut self, id: u32) -> Option<&mut Station> {
        self.stations.iter_mut().find(|s| s.id == id)
    }

    pub fn station_ids(&self) -> Vec<u32> {
        self.stations.iter().map(|s| s.id).collect()
    }

    /// Active occupants in arrival order.
    pub fn occupants(&self) -> &[Occupant] {
        &self.occupants
    }

    pub fn occupant(&self, id: &str) -> Option<&Occupant> {
        self.occupants.iter().find(|o| o.id == id)
    }

    pub fn queued(&self) -> Vec<&Occupant> {
        self.occupants.iter().filter(|o| o.is_queued()).collect()
    }

    pub fn occupants_on(&self, station_id: u32) -> Vec<&Occupant> {
        self.occupants
            .iter()
            .filter(|o| o.station_id == station_id)
            .collect()
    }

    pub fn event_log(&self) -> &Arc<EventLog> {
        &self.log
    }

    // ------------------------------------------------
    // Change notification
    // ------------------------------------------------

    pub fn subscribe(&mut self, on_change: Observer) -> SubscriptionId {
        self.notifier.subscribe(on_change)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn has_pending_changes(&self) -> bool {
        self.notifier.is_dirty()
    }

    /// Run subscribers once if the ledger changed since the last flush.
    pub fn flush_changes(&mut self) -> bool {
        self.notifier.flush()
    }

    // ------------------------------------------------
    // Transitions
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
        let form = CheckInForm::parse(name, occupant_id, &station_id.to_string())?;

        if let Some(existing) = self.occupant(&form.occupant_id) {
            return Err(AppError::DuplicateOccupant {
                id: existing.id.clone(),
                name: existing.name.clone(),
                station_id: existing.station_id,
            });
        }

        if station_id != QUEUE_STATION {
            self.ensure_accepts(station_id)?;
        }

        // all checks passed: apply
        if let Some(st) = self.station_mut(station_id) {
            st.occupy(&form.occupant_id);
        }

        let occupant = Occupant::new(&form.occupant_id, &form.name, station_id, now);
        self.occupants.push(occupant.clone());

        if let Err(e) = self.log.append_checkin_on(now.date_naive(), &occupant, station_id) {
            warning(format!("Failed to record check-in of {}: {}", occupant.id, e));
        }
        self.persist();
        self.notifier.mark();

        Ok(occupant)
    }

    pub fn check_out(&mut self, occupant_id: &str) -> AppResult<()> {
        self.check_out_at(occupant_id, Local::now())
    }

    pub fn check_out_at(&mut self, occupant_id: &str, now: DateTime<Local>) -> AppResult<()> {
        let idx = self
            .occupants
            .iter()
            .position(|o| o.id == occupant_id)
            .ok_or_else(|| AppError::NotFound(occupant_id.to_string()))?;

        let occupant = self.occupants.remove(idx);
        self.release_station(occupant.station_id);
        self.close_log(&occupant, now);
        self.persist();
        self.notifier.mark();
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
        let occupant = self
            .occupant(occupant_id)
            .ok_or_else(|| AppError::NotFound(occupant_id.to_string()))?;
        if !occupant.is_queued() {
            return Err(AppError::AlreadyAssigned {
                id: occupant.id.clone(),
                station_id: occupant.station_id,
            });
        }
        if station_id == QUEUE_STATION {
            return Err(AppError::UnknownStation(station_id));
        }
        self.ensure_free(station_id)?;

        if let Some(st) = self.station_mut(station_id) {
            st.occupy(occupant_id);
        }
        let Some(occupant) = self.occupants.iter_mut().find(|o| o.id == occupant_id) else {
            return Err(AppError::NotFound(occupant_id.to_string()));
        };
        occupant.station_id = station_id;
        let checkin_time = occupant.checkin_time;

        self.persist();
        match self
            .log
            .reassign_station_on(now.date_naive(), occupant_id, checkin_time, station_id)
        {
            Ok(true) => {}
            Ok(false) => warning(format!(
                "No open queued check-in found for {} to move onto station {}.",
                occupant_id, station_id
            )),
            Err(e) => warning(format!("Failed to update log for {}: {}", occupant_id, e)),
        }
        self.notifier.mark();
        Ok(())
    }

    pub fn remove_queued(&mut self, occupant_id: &str) -> AppResult<()> {
        self.remove_queued_at(occupant_id, Local::now())
    }

    /// Cancel a queued occupant; logged as a check-out from station 0.
    pub fn remove_queued_at(&mut self, occupant_id: &str, now: DateTime<Local>) -> AppResult<()> {
        let occupant = self
            .occupant(occupant_id)
            .ok_or_else(|| AppError::NotFound(occupant_id.to_string()))?;
        if !occupant.is_queued() {
            return Err(AppError::AlreadyAssigned {
                id: occupant.id.clone(),
                station_id: occupant.station_id,
            });
        }
        self.check_out_at(occupant_id, now)
    }

    // ------------------------------------------------
    // Helpers
    // ------------------------------------------------

    /// Check-in rule: shared stations accept anyone, exclusive ones only when free.
    fn ensure_accepts(&self, station_id: u32) -> AppResult<()> {
        let station = self.known_station(station_id)?;
        if station.category.is_shared() {
            return Ok(());
        }
        self.ensure_free(station_id)
    }

    /// Queue promotion rule: any occupied station is busy, shared or not.
    fn ensure_free(&self, station_id: u32) -> AppResult<()> {
        let station = self.known_station(station_id)?;
        if station.is_free() {
            return Ok(());
        }

        let holder = match &station.holder {
            Some(id) => id.clone(),
            None => self
                .occupants_on(station_id)
                .iter()
                .map(|o| o.id.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        };
        Err(AppError::StationBusy { station_id, holder })
    }

    fn known_station(&self, station_id: u32) -> AppResult<&Station> {
        self.station(station_id)
            .ok_or(AppError::UnknownStation(station_id))
    }

    fn release_station(&mut self, station_id: u32) {
        if station_id == QUEUE_STATION {
            return;
        }
        let still_used = self.occupants.iter().any(|o| o.station_id == station_id);
        if let Some(st) = self.station_mut(station_id) {
            match st.category {
                StationCategory::Primary => st.release(),
                StationCategory::Auxiliary if !still_used => st.release(),
                StationCategory::Auxiliary => {}
            }
        }
    }

    fn close_log(&self, occupant: &Occupant, now: DateTime<Local>) {
        match self.log.close_checkin_at(
            now,
            &occupant.id,
            occupant.station_id,
            Some(occupant.checkin_time),
        ) {
            Ok(CloseOutcome::Closed) => {}
            Ok(CloseOutcome::NoMatch) => warning(format!(
                "No matching check-in for {} (ID: {}) on station {} in today's log.",
                occupant.name, occupant.id, occupant.station_id
            )),
            Err(e) => warning(format!("Failed to record check-out of {}: {}", occupant.id, e)),
        }
    }

    /// Whole-list rewrite; failures are reported and the in-memory state stays authoritative.
    fn persist(&self) {
        if let Err(e) = write_json(&self.ledger_file, &self.occupants) {
            warning(format!(
                "Failed to save active occupants to {}: {}",
                self.ledger_file.display(),
                e
            ));
        }
    }
}
