//! Query filters understood by storage adapters.
//!
//! Filters are plain equality and lower-bound conditions. Adapters translate
//! them into their native query language; `matches` gives the reference
//! semantics used by the in-memory adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Company, Role, User};

/// Filter over the company collection. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyFilter {
    pub is_active: Option<bool>,
    /// Inclusive lower bound on `created_at`.
    pub created_since: Option<DateTime<Utc>>,
}

impl CompanyFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn created_since(mut self, since: DateTime<Utc>) -> Self {
        self.created_since = Some(since);
        self
    }

    pub fn matches(&self, company: &Company) -> bool {
        self.is_active.is_none_or(|active| company.is_active == active)
            && self.created_since.is_none_or(|since| company.created_at >= since)
    }
}

/// Filter over the user collection. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    /// Inclusive lower bound on `created_at`.
    pub created_since: Option<DateTime<Utc>>,
}

impl UserFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn created_since(mut self, since: DateTime<Utc>) -> Self {
        self.created_since = Some(since);
        self
    }

    pub fn matches(&self, user: &User) -> bool {
        self.role.is_none_or(|role| user.role == role)
            && self.is_active.is_none_or(|active| user.is_active == active)
            && self.created_since.is_none_or(|since| user.created_at >= since)
    }
}

/// Inclusive `[start, end]` range over snapshot dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// An inverted range contains nothing.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}
