use crate::calc::Summary;
use crate::errors::TrackerError;
use crate::models::{Entry, Section};
use std::collections::BTreeMap;
use std::fmt;

pub const BUDGET_FIELD: &str = "budget";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Name,
    Calories,
}

impl FieldRole {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldRole::Name => "name",
            FieldRole::Calories => "calories",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldRole::Name => "Name",
            FieldRole::Calories => "Calories",
        }
    }
}

/// Identifier of one input on the page: the budget field or a role within an entry row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Budget,
    Row {
        section: Section,
        number: usize,
        role: FieldRole,
    },
}

impl FieldId {
    pub fn row(section: Section, number: usize, role: FieldRole) -> Self {
        FieldId::Row {
            section,
            number,
            role,
        }
    }

    /// Parses ids of the form `budget` or `<section>-<n>-<name|calories>`.
    pub fn parse(id: &str) -> Option<Self> {
        if id == BUDGET_FIELD {
            return Some(FieldId::Budget);
        }
        let mut parts = id.splitn(3, '-');
        let section = parts.next()?.parse::<Section>().ok()?;
        let number = parts.next()?.parse::<usize>().ok().filter(|n| *n > 0)?;
        let role = match parts.next()? {
            "name" => FieldRole::Name,
            "calories" => FieldRole::Calories,
            _ => return None,
        };
        Some(FieldId::row(section, number, role))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldId::Budget => f.write_str(BUDGET_FIELD),
            FieldId::Row {
                section,
                number,
                role,
            } => write!(f, "{}-{}-{}", section, number, role.as_str()),
        }
    }
}

/// One rendered entry: a name field and a calorie field. Its number is its position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryRow {
    pub name: String,
    pub calories: String,
}

impl EntryRow {
    pub fn field(&self, role: FieldRole) -> &str {
        match role {
            FieldRole::Name => &self.name,
            FieldRole::Calories => &self.calories,
        }
    }

    fn field_mut(&mut self, role: FieldRole) -> &mut String {
        match role {
            FieldRole::Name => &mut self.name,
            FieldRole::Calories => &mut self.calories,
        }
    }

    pub fn to_entry(&self) -> Entry {
        Entry::new(self.name.clone(), self.calories.clone())
    }
}

impl From<&Entry> for EntryRow {
    fn from(entry: &Entry) -> Self {
        Self {
            name: entry.name.clone(),
            calories: entry.calories.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Output {
    #[default]
    Hidden,
    Shown(Summary),
}

#[derive(Debug, Clone)]
pub struct FormState {
    budget: String,
    sections: BTreeMap<Section, Vec<EntryRow>>,
    output: Output,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            budget: String::new(),
            sections: Section::ALL
                .into_iter()
                .map(|section| (section, Vec::new()))
                .collect(),
            output: Output::Hidden,
        }
    }
}

impl FormState {
    pub fn budget(&self) -> &str {
        &self.budget
    }

    pub fn set_budget(&mut self, value: impl Into<String>) {
        self.budget = value.into();
    }

    pub fn rows(&self, section: Section) -> &[EntryRow] {
        self.sections.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    fn rows_mut(&mut self, section: Section) -> &mut Vec<EntryRow> {
        self.sections.entry(section).or_default()
    }

    /// Appends an empty row to the section named by the dropdown value and returns its number.
    pub fn add_entry(&mut self, section_name: &str) -> Result<usize, TrackerError> {
        let section = section_name.parse::<Section>()?;
        let rows = self.rows_mut(section);
        rows.push(EntryRow::default());
        Ok(rows.len())
    }

    pub fn rebuild_section(&mut self, section: Section, entries: &[Entry]) {
        let rows = self.rows_mut(section);
        rows.clear();
        rows.extend(entries.iter().map(EntryRow::from));
    }

    pub fn clear_all(&mut self) {
        for rows in self.sections.values_mut() {
            rows.clear();
        }
        self.budget.clear();
        self.output = Output::Hidden;
    }

    /// Copies posted field values into the budget and the existing rows.
    /// Ids that don't name an existing field are ignored.
    pub fn apply_fields<'a, I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (id, value) in fields {
            match FieldId::parse(id) {
                Some(FieldId::Budget) => self.budget = value.to_string(),
                Some(FieldId::Row {
                    section,
                    number,
                    role,
                }) => {
                    if let Some(row) = self.rows_mut(section).get_mut(number - 1) {
                        *row.field_mut(role) = value.to_string();
                    }
                }
                None => {}
            }
        }
    }

    pub fn calorie_values(&self, section: Section) -> impl Iterator<Item = &str> + '_ {
        self.rows(section)
            .iter()
            .map(|row| row.field(FieldRole::Calories))
    }

    pub fn entries(&self, section: Section) -> Vec<Entry> {
        self.rows(section).iter().map(EntryRow::to_entry).collect()
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn show_output(&mut self, summary: Summary) {
        self.output = Output::Shown(summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_ids_round_trip_through_text() {
        let id = FieldId::row(Section::Dinner, 3, FieldRole::Calories);
        assert_eq!(id.to_string(), "dinner-3-calories");
        assert_eq!(FieldId::parse("dinner-3-calories"), Some(id));
        assert_eq!(FieldId::parse("budget"), Some(FieldId::Budget));
        assert_eq!(FieldId::parse("dinner-0-name"), None);
        assert_eq!(FieldId::parse("brunch-1-name"), None);
        assert_eq!(FieldId::parse("lunch-1-notes"), None);
        assert_eq!(FieldId::parse("entry-dropdown"), None);
    }

    #[test]
    fn add_entry_numbers_rows_sequentially() {
        let mut form = FormState::default();
        let numbers: Vec<usize> = (0..4)
            .map(|_| form.add_entry("lunch").unwrap())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(form.rows(Section::Lunch).len(), 4);
        assert!(form.rows(Section::Dinner).is_empty());
    }

    #[test]
    fn numbering_follows_current_rows_after_rebuild_and_clear() {
        let mut form = FormState::default();
        form.rebuild_section(
            Section::Snacks,
            &[Entry::new("apple", "95"), Entry::new("nuts", "180")],
        );
        assert_eq!(form.add_entry("snacks").unwrap(), 3);

        form.clear_all();
        assert_eq!(form.add_entry("snacks").unwrap(), 1);
        assert_eq!(form.add_entry("snacks").unwrap(), 2);
    }

    #[test]
    fn add_entry_to_unknown_section_changes_nothing() {
        let mut form = FormState::default();
        form.add_entry("breakfast").unwrap();
        let err = form.add_entry("brunch").unwrap_err();
        assert_eq!(err.to_string(), "Cannot find container for section: brunch");
        assert_eq!(form.rows(Section::Breakfast).len(), 1);
    }

    #[test]
    fn rebuild_replaces_rows_in_order() {
        let mut form = FormState::default();
        form.add_entry("exercise").unwrap();
        form.rebuild_section(
            Section::Exercise,
            &[Entry::new("run", "300"), Entry::new("swim", "250")],
        );
        assert_eq!(
            form.entries(Section::Exercise),
            vec![Entry::new("run", "300"), Entry::new("swim", "250")]
        );
    }

    #[test]
    fn apply_fields_updates_existing_rows_only() {
        let mut form = FormState::default();
        form.add_entry("breakfast").unwrap();
        form.apply_fields([
            ("budget", "1800"),
            ("breakfast-1-name", "oats"),
            ("breakfast-1-calories", "350"),
            ("breakfast-2-name", "ghost"),
            ("entry-dropdown", "lunch"),
        ]);
        assert_eq!(form.budget(), "1800");
        assert_eq!(form.entries(Section::Breakfast), vec![Entry::new("oats", "350")]);
    }

    #[test]
    fn clear_all_hides_output_and_empties_everything() {
        let mut form = FormState::default();
        form.set_budget("2000");
        form.add_entry("dinner").unwrap();
        form.show_output(Summary {
            budget: 2000.0,
            breakfast: 0.0,
            lunch: 0.0,
            dinner: 0.0,
            snacks: 0.0,
            exercise: 0.0,
        });
        form.clear_all();
        assert_eq!(form.budget(), "");
        assert_eq!(form.output(), &Output::Hidden);
        for section in Section::ALL {
            assert!(form.rows(section).is_empty());
        }
    }
}
