use crate::errors::TrackerError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
    Exercise,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Breakfast,
        Section::Lunch,
        Section::Dinner,
        Section::Snacks,
        Section::Exercise,
    ];

    /// Identifier used in field ids, the dropdown, and the stored record.
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Breakfast => "breakfast",
            Section::Lunch => "lunch",
            Section::Dinner => "dinner",
            Section::Snacks => "snacks",
            Section::Exercise => "exercise",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Breakfast => "Breakfast",
            Section::Lunch => "Lunch",
            Section::Dinner => "Dinner",
            Section::Snacks => "Snacks",
            Section::Exercise => "Exercise",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = TrackerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == value)
            .ok_or_else(|| TrackerError::MissingSection(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, deserialize_with = "text_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub calories: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, calories: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calories: calories.into(),
        }
    }
}

/// Entries per section. Always carries all five keys when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionEntries {
    #[serde(default, deserialize_with = "list_or_null")]
    pub breakfast: Vec<Entry>,
    #[serde(default, deserialize_with = "list_or_null")]
    pub lunch: Vec<Entry>,
    #[serde(default, deserialize_with = "list_or_null")]
    pub dinner: Vec<Entry>,
    #[serde(default, deserialize_with = "list_or_null")]
    pub snacks: Vec<Entry>,
    #[serde(default, deserialize_with = "list_or_null")]
    pub exercise: Vec<Entry>,
}

impl SectionEntries {
    pub fn get(&self, section: Section) -> &[Entry] {
        match section {
            Section::Breakfast => &self.breakfast,
            Section::Lunch => &self.lunch,
            Section::Dinner => &self.dinner,
            Section::Snacks => &self.snacks,
            Section::Exercise => &self.exercise,
        }
    }

    pub fn get_mut(&mut self, section: Section) -> &mut Vec<Entry> {
        match section {
            Section::Breakfast => &mut self.breakfast,
            Section::Lunch => &mut self.lunch,
            Section::Dinner => &mut self.dinner,
            Section::Snacks => &mut self.snacks,
            Section::Exercise => &mut self.exercise,
        }
    }
}

/// Persisted snapshot of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayRecord {
    #[serde(default, deserialize_with = "text_or_number")]
    pub budget: String,
    #[serde(default)]
    pub entries: SectionEntries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    pub section: String,
}

#[derive(Debug, Deserialize)]
pub struct DateRequest {
    pub date: String,
}

/// Field values keyed by field id, as the page would post them.
#[derive(Debug, Default, Deserialize)]
pub struct FieldsRequest {
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub balance: String,
    pub magnitude: f64,
    pub budget: f64,
    pub consumed: f64,
    pub burned: f64,
    pub remaining: f64,
    pub chart: [f64; 5],
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StateResponse {
    pub date: String,
    pub theme: Theme,
    pub record: DayRecord,
    pub output: Option<SummaryResponse>,
    pub chart_visible: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<TextOrNumber> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(TextOrNumber::Text(text)) => text,
        Some(TextOrNumber::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

fn list_or_null<'de, D>(deserializer: D) -> Result<Vec<Entry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Entry>>::deserialize(deserializer)?.unwrap_or_default())
}
