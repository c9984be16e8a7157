//! Membership roster (`membership.csv`): searched while checking in and
//! extended with every occupant id it hasn't seen before.

use crate::errors::AppResult;
use crate::models::Member;
use crate::ui::messages::warning;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Fallback columns when the sheet has no recognizable header.
const FALLBACK_NAME_COL: usize = 2;
const FALLBACK_ID_COL: usize = 3;

#[derive(Debug, Default)]
pub struct MemberRoster {
    path: PathBuf,
    members: Vec<Member>,
}

impl MemberRoster {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let members = if path.exists() {
            match read_members(&path) {
                Ok(m) => m,
                Err(e) => {
                    warning(format!("Could not read roster {}: {}", path.display(), e));
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        Self { path, members }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn by_id(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Case-insensitive match on name or id; an empty query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&Member> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Vec::new();
        }
        self.members.iter().filter(|m| m.matches(&q)).collect()
    }

    /// Generated id for walk-ins without a card.
    pub fn next_member_id(&self) -> String {
        format!("LOUNGE-{}", self.members.len() + 1)
    }

    /// Append `(name, id)` unless the id is already known. Returns whether a row was written.
    pub fn ensure_member(&mut self, name: &str, id: &str) -> AppResult<bool> {
        if self.by_id(id.trim()).is_some() {
            return Ok(false);
        }
        let member = Member::new(name, id);

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        wtr.write_record(["", "", member.name.as_str(), member.id.as_str()])?;
        wtr.flush()?;

        self.members.push(member);
        Ok(true)
    }
}

fn read_members(path: &Path) -> AppResult<Vec<Member>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows: Vec<csv::StringRecord> = Vec::new();
    for rec in rdr.records() {
        rows.push(rec?);
    }
    let Some(header) = rows.first() else {
        return Ok(Vec::new());
    };

    let mut name_idx = None;
    let mut id_idx = None;
    for (i, cell) in header.iter().enumerate() {
        match cell.trim().to_lowercase().as_str() {
            "student name" | "name" => name_idx = Some(i),
            "student number" | "id" | "student id" => id_idx = Some(i),
            _ => {}
        }
    }

    let (name_idx, id_idx, start) = match (name_idx, id_idx) {
        (Some(n), Some(i)) => (n, i, 1),
        _ => (FALLBACK_NAME_COL, FALLBACK_ID_COL, 0),
    };

    Ok(rows[start..]
        .iter()
        .filter_map(|row| {
            let name = row.get(name_idx)?.trim();
            let id = row.get(id_idx)?.trim();
            (!name.is_empty() && !id.is_empty()).then(|| Member::new(name, id))
        })
        .collect())
}
