//! Account registry: the accounts a run generates activity for.
//!
//! Identifiers are assigned from 0 in load order and only ever grow.
//! Each account's pattern is drawn once, at creation, from a stream
//! keyed on (seed, account id) and never changes afterwards. Reloading
//! the same rows under the same seed reproduces the same patterns.

use crate::{
    error::{SimResult, ValidationError},
    pattern::{PatternKind, PatternWeights},
    rng::{RngBank, StreamSlot},
    types::{AccountId, Seed},
};
use serde::{Deserialize, Serialize};

/// One row of uploaded account data. Fields are optional so that a
/// missing column surfaces as a validation error, not a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRow {
    #[serde(default, alias = "forum-website")]
    pub site: Option<String>,
    #[serde(default, alias = "email address")]
    pub contact_email: Option<String>,
    #[serde(default, alias = "password")]
    pub secret: Option<String>,
    #[serde(default, alias = "username")]
    pub display_name: Option<String>,
}

impl AccountRow {
    pub fn new(display_name: &str, contact_email: &str, secret: &str, site: &str) -> Self {
        Self {
            site: Some(site.to_string()),
            contact_email: Some(contact_email.to_string()),
            secret: Some(secret.to_string()),
            display_name: Some(display_name.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub display_name: String,
    pub pattern: PatternKind,
    pub site: String,
    pub contact_email: String,
    pub secret: String,
}

/// Row fields after validation, before an id and pattern are attached.
struct ValidRow {
    display_name: String,
    contact_email: String,
    secret: String,
    site: String,
}

fn required(value: &Option<String>, row: usize, field: &'static str) -> SimResult<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::MissingField { row, field }.into()),
    }
}

fn validate_row(row: &AccountRow, index: usize) -> SimResult<ValidRow> {
    Ok(ValidRow {
        site:          required(&row.site, index, "site")?,
        contact_email: required(&row.contact_email, index, "contact_email")?,
        secret:        required(&row.secret, index, "secret")?,
        display_name:  required(&row.display_name, index, "display_name")?,
    })
}

pub struct AccountRegistry {
    accounts: Vec<Account>,
    weights: PatternWeights,
    bank: RngBank,
    next_id: AccountId,
}

impl AccountRegistry {
    /// An empty registry whose pattern draws are seeded from `seed`.
    pub fn new(seed: Seed, weights: PatternWeights) -> SimResult<Self> {
        weights.validate()?;
        Ok(Self {
            accounts: Vec::new(),
            weights,
            bank: RngBank::new(seed),
            next_id: 0,
        })
    }

    /// Replace the registry contents with one account per row.
    /// All rows are validated first; on error nothing changes.
    pub fn load(&mut self, rows: &[AccountRow]) -> SimResult<()> {
        if rows.is_empty() {
            return Err(ValidationError::EmptyAccountList.into());
        }
        let valid = rows
            .iter()
            .enumerate()
            .map(|(i, row)| validate_row(row, i))
            .collect::<SimResult<Vec<_>>>()?;

        self.accounts.clear();
        self.next_id = 0;
        for row in valid {
            self.push(row)?;
        }
        log::info!("registry: loaded {} accounts", self.accounts.len());
        Ok(())
    }

    /// Add one more account with the next identifier and a fresh pattern.
    pub fn append(
        &mut self,
        display_name: &str,
        contact_email: &str,
        secret: &str,
        site: &str,
    ) -> SimResult<&Account> {
        let row = AccountRow::new(display_name, contact_email, secret, site);
        let valid = validate_row(&row, self.accounts.len())?;
        self.push(valid)?;
        let account = &self.accounts[self.accounts.len() - 1];
        log::info!(
            "registry: appended account id={} pattern={}",
            account.id,
            account.pattern
        );
        Ok(account)
    }

    fn push(&mut self, row: ValidRow) -> SimResult<()> {
        let mut rng = self.bank.for_account(StreamSlot::Registry, self.next_id);
        let pattern = self.weights.choose(&mut rng)?;
        self.accounts.push(Account {
            id: self.next_id,
            display_name: row.display_name,
            pattern,
            site: row.site,
            contact_email: row.contact_email,
            secret: row.secret,
        });
        self.next_id += 1;
        Ok(())
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
