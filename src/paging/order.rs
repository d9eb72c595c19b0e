//! Ordering arguments shared by local and remote listings

use crate::error::{LabError, LabResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field a listing is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    #[default]
    Name,
    CreatedOn,
    ModifiedOn,
}

impl OrderBy {
    /// Value understood by the remote `order_by` query parameter
    pub fn remote_param(self) -> &'static str {
        match self {
            OrderBy::Name => "name",
            OrderBy::CreatedOn => "created_at",
            OrderBy::ModifiedOn => "modified_at",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            OrderBy::Name => "name",
            OrderBy::CreatedOn => "created_on",
            OrderBy::ModifiedOn => "modified_on",
        }
    }
}

impl FromStr for OrderBy {
    type Err = LabError;

    fn from_str(s: &str) -> LabResult<Self> {
        match s {
            "name" => Ok(OrderBy::Name),
            "created_on" => Ok(OrderBy::CreatedOn),
            "modified_on" => Ok(OrderBy::ModifiedOn),
            other => Err(LabError::UnsupportedOrderBy(other.to_string())),
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Whether results should be reversed relative to ascending order
    pub fn is_descending(self) -> bool {
        self == SortDirection::Desc
    }

    /// Value understood by the remote `sort` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = LabError;

    fn from_str(s: &str) -> LabResult<Self> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(LabError::UnsupportedSort(other.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
