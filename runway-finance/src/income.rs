//! Recurring income streams and the monthly expense baseline.

use runway_core::{IncomeStream, coerce_amount, parse_amount};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSettings {
    #[serde(default)]
    pub streams: Vec<IncomeStream>,
    #[serde(default = "default_next_id")]
    pub next_id: u32,
    #[serde(default, deserialize_with = "coerce_amount")]
    pub monthly_expenses: f64,
}

fn default_next_id() -> u32 {
    1
}

impl Default for IncomeSettings {
    fn default() -> Self {
        let mut settings = Self {
            streams: Vec::new(),
            next_id: default_next_id(),
            monthly_expenses: 0.0,
        };
        settings.add_stream();
        settings
    }
}

impl IncomeSettings {
    pub fn total_monthly_income(&self) -> f64 {
        self.streams.iter().map(|s| s.amount).sum()
    }

    /// Income minus expenses with every stream active
    pub fn net_monthly(&self) -> f64 {
        self.total_monthly_income() - self.monthly_expenses
    }

    /// Append a zero-amount stream named `Income {id}`
    pub fn add_stream(&mut self) -> &IncomeStream {
        let id = self.next_id;
        self.next_id += 1;
        self.streams.push(IncomeStream::new(id, format!("Income {id}"), 0.0));
        &self.streams[self.streams.len() - 1]
    }

    /// Append a named stream, keeping ids unique
    pub fn push_stream(&mut self, name: impl Into<String>, amount: f64) {
        let id = self.next_id.max(self.max_id() + 1);
        self.next_id = id + 1;
        self.streams.push(IncomeStream::new(id, name, amount));
    }

    pub fn remove_stream(&mut self, id: u32) -> bool {
        let before = self.streams.len();
        self.streams.retain(|s| s.id != id);
        self.streams.len() != before
    }

    pub fn rename_stream(&mut self, id: u32, name: impl Into<String>) -> bool {
        match self.streams.iter_mut().find(|s| s.id == id) {
            Some(stream) => {
                stream.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Set a stream's amount from entered text; non-numeric text is 0
    pub fn set_amount(&mut self, id: u32, amount: &str) -> bool {
        match self.streams.iter_mut().find(|s| s.id == id) {
            Some(stream) => {
                stream.amount = parse_amount(amount);
                true
            }
            None => false,
        }
    }

    fn max_id(&self) -> u32 {
        self.streams.iter().map(|s| s.id).max().unwrap_or(0)
    }
}
