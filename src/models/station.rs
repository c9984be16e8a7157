use serde::Serialize;

/// Station id used by queued occupants (no concrete station yet).
pub const QUEUE_STATION: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StationCategory {
    Primary,   // exclusive (workstation)
    Auxiliary, // shared (console)
}

impl StationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StationCategory::Primary => "primary",
            StationCategory::Auxiliary => "auxiliary",
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, StationCategory::Auxiliary)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StationStatus {
    Free,
    Occupied,
}

impl StationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StationStatus::Free => "free",
            StationStatus::Occupied => "occupied",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Station {
    pub id: u32,
    pub category: StationCategory,
    pub status: StationStatus,
    /// Holder of a primary station. Shared stations never record one.
    pub holder: Option<String>,
    /// Display prefix for shared stations ("Xbox", "PS4", ...).
    pub label: Option<String>,
}

impl Station {
    pub fn primary(id: u32) -> Self {
        Self {
            id,
            category: StationCategory::Primary,
            status: StationStatus::Free,
            holder: None,
            label: None,
        }
    }

    pub fn auxiliary(id: u32, label: impl Into<String>) -> Self {
        Self {
            id,
            category: StationCategory::Auxiliary,
            status: StationStatus::Free,
            holder: None,
            label: Some(label.into()),
        }
    }

    pub fn is_free(&self) -> bool {
        self.status == StationStatus::Free
    }

    /// "12" for a workstation, "Xbox 17" for a labelled console.
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(l) if !l.trim().is_empty() => format!("{} {}", l.trim(), self.id),
            _ => self.id.to_string(),
        }
    }

    pub(crate) fn occupy(&mut self, occupant_id: &str) {
        self.status = StationStatus::Occupied;
        if self.category == StationCategory::Primary {
            self.holder = Some(occupant_id.to_string());
        }
    }

    pub(crate) fn release(&mut self) {
        self.status = StationStatus::Free;
        self.holder = None;
    }
}
