use crate::calc::{self, Summary};
use crate::chart::ChartSlot;
use crate::errors::TrackerError;
use crate::form::{FormState, Output};
use crate::models::{StateResponse, Theme};
use crate::persistence::{self, KeyValueStore, LocalStore};
use chrono::NaiveDate;
use tracing::{debug, info};

/// Everything one open calorie form owns: field state, the chart, the selected date and the store.
#[derive(Debug)]
pub struct CalorieTracker<S: KeyValueStore = LocalStore> {
    form: FormState,
    chart: ChartSlot,
    date: NaiveDate,
    theme: Theme,
    store: S,
}

impl<S: KeyValueStore> CalorieTracker<S> {
    pub fn new(store: S, date: NaiveDate) -> Self {
        Self {
            form: FormState::default(),
            chart: ChartSlot::default(),
            date,
            theme: Theme::default(),
            store,
        }
    }

    /// Loads whatever is stored for the initial date.
    pub fn open(&mut self) -> Result<bool, TrackerError> {
        persistence::load(&mut self.form, self.date, &self.store)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn chart(&self) -> &ChartSlot {
        &self.chart
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn add_entry(&mut self, section_name: &str) -> Result<usize, TrackerError> {
        let number = self.form.add_entry(section_name)?;
        debug!(section = section_name, number, "entry added");
        self.save()?;
        Ok(number)
    }

    /// Runs the calculation. On failure nothing is shown, drawn or saved.
    pub fn calculate(&mut self) -> Result<Summary, TrackerError> {
        let summary = calc::calculate(&self.form)?;
        info!(
            date = %self.date,
            balance = summary.balance().as_str(),
            magnitude = summary.magnitude(),
            "calculated"
        );
        self.chart.render(summary.chart_series());
        self.form.show_output(summary.clone());
        self.save()?;
        Ok(summary)
    }

    pub fn clear_all(&mut self) {
        self.form.clear_all();
        self.chart.destroy();
        persistence::remove(self.date, &mut self.store);
        info!(date = %self.date, "day cleared");
    }

    /// Switches to another day. Unsaved edits for the previous day are not flushed.
    pub fn change_date(&mut self, date: NaiveDate) -> Result<bool, TrackerError> {
        self.date = date;
        let loaded = persistence::load(&mut self.form, date, &self.store)?;
        debug!(%date, loaded, "date changed");
        Ok(loaded)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn save(&mut self) -> Result<(), TrackerError> {
        persistence::save(&self.form, self.date, &mut self.store)
    }

    pub fn snapshot(&self) -> StateResponse {
        StateResponse {
            date: self.date.to_string(),
            theme: self.theme,
            record: persistence::snapshot(&self.form),
            output: match self.form.output() {
                Output::Shown(summary) => Some(summary.to_response()),
                Output::Hidden => None,
            },
            chart_visible: self.chart.current().is_some(),
        }
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, TrackerError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| TrackerError::InvalidDate(value.to_string()))
}
