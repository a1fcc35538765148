use crate::errors::TrackerError;
use crate::form::FormState;
use crate::models::{DayRecord, SectionEntries, Section};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub const KEY_PREFIX: &str = "calorieData-";

/// String-keyed storage the day records live in.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalStore {
    pub items: BTreeMap<String, String>,
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.items.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.items.remove(key);
    }
}

pub fn storage_key(date: NaiveDate) -> String {
    format!("{KEY_PREFIX}{}", date.format("%Y-%m-%d"))
}

pub fn snapshot(form: &FormState) -> DayRecord {
    let mut entries = SectionEntries::default();
    for section in Section::ALL {
        *entries.get_mut(section) = form.entries(section);
    }
    DayRecord {
        budget: form.budget().to_string(),
        entries,
    }
}

pub fn save<S: KeyValueStore>(
    form: &FormState,
    date: NaiveDate,
    store: &mut S,
) -> Result<(), TrackerError> {
    let key = storage_key(date);
    let payload = serde_json::to_string(&snapshot(form)).map_err(|err| {
        TrackerError::SaveFailed {
            key: key.clone(),
            reason: err.to_string(),
        }
    })?;
    debug!(%key, bytes = payload.len(), "saving day record");
    store.set(&key, payload);
    Ok(())
}

pub fn read_record<S: KeyValueStore>(
    date: NaiveDate,
    store: &S,
) -> Result<Option<DayRecord>, TrackerError> {
    let key = storage_key(date);
    let Some(saved) = store.get(&key) else {
        return Ok(None);
    };
    serde_json::from_str(&saved)
        .map(Some)
        .map_err(|err| TrackerError::CorruptRecord {
            key,
            reason: err.to_string(),
        })
}

/// Rebuilds the form from the stored record. Returns `false` and leaves the
/// form untouched when nothing is stored for the date.
pub fn load<S: KeyValueStore>(
    form: &mut FormState,
    date: NaiveDate,
    store: &S,
) -> Result<bool, TrackerError> {
    let Some(record) = read_record(date, store)? else {
        debug!(%date, "no stored record");
        return Ok(false);
    };
    form.set_budget(record.budget);
    for section in Section::ALL {
        form.rebuild_section(section, record.entries.get(section));
    }
    Ok(true)
}

pub fn remove<S: KeyValueStore>(date: NaiveDate, store: &mut S) {
    store.remove(&storage_key(date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entry;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn filled_form() -> FormState {
        let mut form = FormState::default();
        form.set_budget("2100");
        form.rebuild_section(
            Section::Breakfast,
            &[Entry::new("eggs", "210"), Entry::new("toast", "+90")],
        );
        form.rebuild_section(Section::Exercise, &[Entry::new("bike", "400")]);
        form
    }

    #[test]
    fn key_combines_prefix_and_iso_date() {
        assert_eq!(storage_key(date(7)), "calorieData-2026-03-07");
    }

    #[test]
    fn save_then_load_restores_the_day() {
        let mut store = LocalStore::default();
        let original = filled_form();
        save(&original, date(1), &mut store).unwrap();

        let mut restored = FormState::default();
        restored.add_entry("lunch").unwrap();
        assert!(load(&mut restored, date(1), &store).unwrap());

        assert_eq!(restored.budget(), "2100");
        for section in Section::ALL {
            assert_eq!(restored.entries(section), original.entries(section));
        }
        assert!(restored.rows(Section::Lunch).is_empty());
    }

    #[test]
    fn stored_json_has_the_documented_shape() {
        let mut store = LocalStore::default();
        save(&filled_form(), date(2), &mut store).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&store.get("calorieData-2026-03-02").unwrap()).unwrap();
        assert_eq!(value["budget"], "2100");
        assert_eq!(value["entries"]["breakfast"][1]["calories"], "+90");
        assert_eq!(value["entries"]["lunch"], serde_json::json!([]));
    }

    #[test]
    fn saved_text_always_parses_back() {
        let mut store = LocalStore::default();
        let mut form = filled_form();
        form.rebuild_section(Section::Snacks, &[Entry::new("\"crème\" brûlée\n", "")]);
        save(&form, date(9), &mut store).unwrap();

        let record = read_record(date(9), &store).unwrap().unwrap();
        assert_eq!(record, snapshot(&form));
    }

    #[test]
    fn load_without_record_is_a_no_op() {
        let store = LocalStore::default();
        let mut form = filled_form();
        assert!(!load(&mut form, date(3), &store).unwrap());
        assert_eq!(form.budget(), "2100");
        assert_eq!(form.rows(Section::Breakfast).len(), 2);
    }

    #[test]
    fn records_are_independent_per_date() {
        let mut store = LocalStore::default();
        save(&filled_form(), date(4), &mut store).unwrap();
        save(&FormState::default(), date(5), &mut store).unwrap();

        let mut form = FormState::default();
        load(&mut form, date(4), &store).unwrap();
        assert_eq!(form.rows(Section::Breakfast).len(), 2);
    }

    #[test]
    fn removed_record_no_longer_loads() {
        let mut store = LocalStore::default();
        save(&filled_form(), date(6), &mut store).unwrap();
        remove(date(6), &mut store);

        let mut form = FormState::default();
        assert!(!load(&mut form, date(6), &store).unwrap());
    }

    #[test]
    fn malformed_record_is_reported_and_form_kept() {
        let mut store = LocalStore::default();
        store.set(&storage_key(date(8)), "{not json".to_string());

        let mut form = filled_form();
        let err = load(&mut form, date(8), &store).unwrap_err();
        assert!(matches!(err, TrackerError::CorruptRecord { .. }));
        assert_eq!(form.budget(), "2100");
    }
}
