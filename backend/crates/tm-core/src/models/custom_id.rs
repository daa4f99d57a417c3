//! Human-readable project identifier: `{TYPE}-{COUNTRY}-{YYMM}-{SEQ4}`,
//! e.g. `DES-ID-2507-0001`.

use crate::{CoreError, CoreResult};

use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const TYPE_CODE_LEN: usize = 3;
const COUNTRY_CODE_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomId {
    type_code: String,
    country: String,
    year_month: String,
    sequence: u32,
}

impl CustomId {
    #[track_caller]
    pub fn new(
        project_type: &str,
        country: &str,
        created_at: DateTime<Utc>,
        sequence: u32,
    ) -> CoreResult<Self> {
        if sequence == 0 {
            return Err(invalid(project_type, "sequence starts at 1"));
        }

        Ok(Self {
            type_code: type_code(project_type)?,
            country: country_code(country)?,
            year_month: year_month(created_at),
            sequence,
        })
    }

    /// Counter key shared by every id minted in the same month for the same
    /// type and country.
    #[track_caller]
    pub fn prefix_for(
        project_type: &str,
        country: &str,
        created_at: DateTime<Utc>,
    ) -> CoreResult<String> {
        Ok(format!(
            "{}-{}-{}",
            type_code(project_type)?,
            country_code(country)?,
            year_month(created_at)
        ))
    }

    pub fn prefix(&self) -> String {
        format!("{}-{}-{}", self.type_code, self.country, self.year_month)
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }
}

impl std::fmt::Display for CustomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:04}", self.prefix(), self.sequence)
    }
}

impl FromStr for CustomId {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        let parts: Vec<&str> = s.split('-').collect();
        let [type_part, country, yymm, seq] = parts.as_slice() else {
            return Err(invalid(s, "expected four dash-separated parts"));
        };

        if type_part.len() != TYPE_CODE_LEN || !type_part.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(invalid(s, "type code must be three uppercase letters"));
        }
        if country.len() != COUNTRY_CODE_LEN || !country.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(invalid(s, "country code must be two uppercase letters"));
        }
        let month = yymm
            .get(2..)
            .filter(|_| yymm.len() == 4 && yymm.chars().all(|c| c.is_ascii_digit()))
            .and_then(|m| m.parse::<u32>().ok());
        if !matches!(month, Some(1..=12)) {
            return Err(invalid(s, "period must be YYMM"));
        }
        if seq.len() < 4 || !seq.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(s, "sequence must be at least four digits"));
        }
        let sequence = seq
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| invalid(s, "sequence starts at 1"))?;

        Ok(Self {
            type_code: type_part.to_string(),
            country: country.to_string(),
            year_month: yymm.to_string(),
            sequence,
        })
    }
}

impl Serialize for CustomId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CustomId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        CustomId::from_str(&value).map_err(serde::de::Error::custom)
    }
}

#[track_caller]
fn type_code(project_type: &str) -> CoreResult<String> {
    let code: String = project_type
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(TYPE_CODE_LEN)
        .collect::<String>()
        .to_ascii_uppercase();

    if code.len() == TYPE_CODE_LEN {
        Ok(code)
    } else {
        Err(invalid(project_type, "project type needs at least three letters"))
    }
}

#[track_caller]
fn country_code(country: &str) -> CoreResult<String> {
    let code = country.trim().to_ascii_uppercase();
    if code.len() == COUNTRY_CODE_LEN && code.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(code)
    } else {
        Err(invalid(country, "country code must be two letters"))
    }
}

fn year_month(at: DateTime<Utc>) -> String {
    format!("{:02}{:02}", at.year() % 100, at.month())
}

#[track_caller]
fn invalid(value: &str, reason: &str) -> CoreError {
    CoreError::InvalidCustomId {
        value: value.to_string(),
        reason: reason.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
