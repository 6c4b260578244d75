//! Which accounts count toward the emergency fund.

use anyhow::{Context, Result, bail};
use runway_core::AccountEntry;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// An account addressed by its category and its position within it.
///
/// Text form is `Category_index`, e.g. `Savings_0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountKey {
    pub category: String,
    pub index: usize,
}

impl AccountKey {
    pub fn new(category: impl Into<String>, index: usize) -> Self {
        Self {
            category: category.into(),
            index,
        }
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.category, self.index)
    }
}

impl FromStr for AccountKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        // Category names may contain '_', the index never does
        let Some((category, index)) = s.rsplit_once('_') else {
            bail!("account key '{s}' should look like Category_index");
        };
        if category.is_empty() {
            bail!("account key '{s}' has no category");
        }
        let index = index
            .parse()
            .with_context(|| format!("account key '{s}' has a non-numeric index"))?;
        Ok(Self::new(category, index))
    }
}

impl TryFrom<String> for AccountKey {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AccountKey> for String {
    fn from(key: AccountKey) -> Self {
        key.to_string()
    }
}

/// Selected emergency-fund accounts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountSelection {
    selected: BTreeSet<AccountKey>,
}

impl AccountSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, key: &AccountKey) -> bool {
        self.selected.contains(key)
    }

    pub fn select(&mut self, key: AccountKey) {
        self.selected.insert(key);
    }

    pub fn keys(&self) -> impl Iterator<Item = &AccountKey> {
        self.selected.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Flip one account; returns the new state
    pub fn toggle(&mut self, key: AccountKey) -> bool {
        if self.selected.remove(&key) {
            false
        } else {
            self.selected.insert(key);
            true
        }
    }

    /// Select every account in a category unless all already are, in which
    /// case deselect them all.
    pub fn toggle_category(
        &mut self,
        category: &str,
        accounts: &BTreeMap<String, Vec<AccountEntry>>,
    ) {
        let count = accounts.get(category).map(Vec::len).unwrap_or(0);
        let select = !self.all_selected(category, count);
        for index in 0..count {
            let key = AccountKey::new(category, index);
            if select {
                self.selected.insert(key);
            } else {
                self.selected.remove(&key);
            }
        }
    }

    /// Every account in the category is selected (false for an empty category)
    pub fn is_category_selected(
        &self,
        category: &str,
        accounts: &BTreeMap<String, Vec<AccountEntry>>,
    ) -> bool {
        let count = accounts.get(category).map(Vec::len).unwrap_or(0);
        count > 0 && self.all_selected(category, count)
    }

    /// Some, but not all, accounts in the category are selected
    pub fn is_category_indeterminate(
        &self,
        category: &str,
        accounts: &BTreeMap<String, Vec<AccountEntry>>,
    ) -> bool {
        let count = accounts.get(category).map(Vec::len).unwrap_or(0);
        let chosen = self.selected_in(category, count);
        chosen > 0 && chosen < count
    }

    /// Sum of the latest balances of selected accounts that still exist
    pub fn fund_total(&self, accounts: &BTreeMap<String, Vec<AccountEntry>>) -> f64 {
        self.selected
            .iter()
            .filter_map(|key| accounts.get(&key.category)?.get(key.index))
            .map(|account| account.latest)
            .sum()
    }

    fn selected_in(&self, category: &str, count: usize) -> usize {
        (0..count)
            .filter(|&i| self.selected.contains(&AccountKey::new(category, i)))
            .count()
    }

    fn all_selected(&self, category: &str, count: usize) -> bool {
        self.selected_in(category, count) == count
    }
}

impl FromIterator<AccountKey> for AccountSelection {
    fn from_iter<I: IntoIterator<Item = AccountKey>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}
