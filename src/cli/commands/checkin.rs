use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{CheckInForm, Lounge};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkin {
        name,
        id,
        auto_id,
        station,
    } = cmd
    {
        let mut lounge = Lounge::open(cfg);

        let occupant_id = match id {
            Some(id) => id.clone(),
            None if *auto_id => lounge.next_member_id(),
            None => String::new(),
        };

        // "0" and an absent station both mean "queue"
        let station_text = match station.as_deref().map(str::trim) {
            Some("0") | None => "",
            Some(s) => s,
        };
        let form = CheckInForm::parse(name, &occupant_id, station_text)?;

        let occupant = lounge.check_in(&form.name, &form.occupant_id, form.station_id)?;

        if occupant.is_queued() {
            info(format!(
                "{} ({}) added to the queue at {}",
                occupant.name,
                occupant.id,
                occupant.checkin_str()
            ));
        } else {
            let label = lounge
                .ledger()
                .station(occupant.station_id)
                .map(|s| s.display_name())
                .unwrap_or_else(|| occupant.station_id.to_string());
            success(format!(
                "{} ({}) checked in on station {} at {}",
                occupant.name,
                occupant.id,
                label,
                occupant.checkin_str()
            ));
        }
    }
    Ok(())
}
