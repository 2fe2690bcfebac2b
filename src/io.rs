use crate::model::{Day, RosterConfig, ShiftKind, ShiftRequest};
use crate::roster::Roster;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Configuration JSON ; les champs absents prennent leur valeur par défaut.
pub fn load_config<P: AsRef<Path>>(path: P) -> anyhow::Result<RosterConfig> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let config: RosterConfig =
        serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// Import de demandes de repos: header `pharmacist,week,day,shift[,weight]`
pub fn import_requests_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ShiftRequest>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let fields: Vec<&str> = rec.iter().collect();
        let req = request_from_fields(&fields).with_context(|| format!("invalid request row {}", line + 1))?;
        out.push(req);
    }
    Ok(out)
}

/// Demande en ligne de commande : `pharmacist,week,day,shift[,weight]`.
pub fn parse_request(raw: &str) -> anyhow::Result<ShiftRequest> {
    let fields: Vec<&str> = raw.split(',').collect();
    request_from_fields(&fields).with_context(|| format!("invalid request: {raw}"))
}

fn request_from_fields(fields: &[&str]) -> anyhow::Result<ShiftRequest> {
    if !(4..=5).contains(&fields.len()) {
        bail!("expected 4 or 5 fields, got {}", fields.len());
    }
    let pharmacist: usize = fields[0]
        .trim()
        .trim_start_matches(['P', 'p'])
        .parse()
        .context("pharmacist index")?;
    let week: usize = fields[1].trim().parse().context("week index")?;
    let day: Day = fields[2].parse().map_err(anyhow::Error::msg)?;
    let shift: ShiftKind = fields[3].parse().map_err(anyhow::Error::msg)?;
    let mut req = ShiftRequest::new(pharmacist, week, day, shift);
    if let Some(weight) = fields.get(4).map(|w| w.trim()).filter(|w| !w.is_empty()) {
        req = req.with_weight(weight.parse().context("weight")?);
    }
    Ok(req)
}

/// Export JSON du roulement (jolie mise en forme)
pub fn export_roster_json<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(roster)?;
    fs::write(path, s)?;
    Ok(())
}

pub fn load_roster_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Roster> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let roster: Roster =
        serde_json::from_slice(&data).with_context(|| format!("parsing roster {}", path.display()))?;
    Ok(roster)
}

/// Export CSV des créneaux: header `week,day,date,shift,pharmacist`
pub fn export_roster_csv<P: AsRef<Path>>(path: P, roster: &Roster, config: &RosterConfig) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["week", "day", "date", "shift", "pharmacist"])?;
    for (period, pharmacist) in roster.slots() {
        let date = config
            .date_of(period.week, period.day)
            .map(|d| d.to_string())
            .unwrap_or_default();
        w.write_record([
            period.week.to_string(),
            period.day.short_name().to_string(),
            date,
            period.shift.to_string(),
            pharmacist.to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
