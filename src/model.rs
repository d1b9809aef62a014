// Data model: a single monkey species record.
// Records are immutable once built. The JSON shape coming from the remote
// source is matched case-insensitively, so `Name`, `name` and `NAME` all
// bind to the same field.

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Raised when a record would break its construction invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidRecord {
    #[error("monkey name must not be empty")]
    EmptyName,
    #[error("monkey location must not be empty")]
    EmptyLocation,
}

/// One species entry: name, habitat and an approximate population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Monkey {
    name: String,
    location: String,
    population: i64,
}

impl Monkey {
    /// Build a record, rejecting a blank name or location.
    /// Population is taken as-is.
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        population: i64,
    ) -> Result<Self, InvalidRecord> {
        let name = name.into();
        let location = location.into();
        if name.trim().is_empty() {
            return Err(InvalidRecord::EmptyName);
        }
        if location.trim().is_empty() {
            return Err(InvalidRecord::EmptyLocation);
        }
        Ok(Monkey {
            name,
            location,
            population,
        })
    }

    /// Build a record from values that already hold the invariants.
    pub(crate) fn trusted(name: &str, location: &str, population: i64) -> Self {
        Monkey {
            name: name.to_string(),
            location: location.to_string(),
            population,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn population(&self) -> i64 {
        self.population
    }

    /// Case-insensitive comparison against an already trimmed query.
    pub fn matches_name(&self, query: &str) -> bool {
        self.name == query || self.name.to_lowercase() == query.to_lowercase()
    }
}

enum Field {
    Name,
    Location,
    Population,
    Other,
}

impl Field {
    fn from_key(key: &str) -> Self {
        if key.eq_ignore_ascii_case("name") {
            Field::Name
        } else if key.eq_ignore_ascii_case("location") {
            Field::Location
        } else if key.eq_ignore_ascii_case("population") {
            Field::Population
        } else {
            Field::Other
        }
    }
}

struct MonkeyVisitor;

impl<'de> Visitor<'de> for MonkeyVisitor {
    type Value = Monkey;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object with name, location and population")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Monkey, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut name: Option<String> = None;
        let mut location: Option<String> = None;
        let mut population: Option<i64> = None;

        // Keys differing only in case overwrite each other; the last one wins.
        while let Some(key) = map.next_key::<String>()? {
            match Field::from_key(&key) {
                Field::Name => name = Some(map.next_value()?),
                Field::Location => location = Some(map.next_value()?),
                Field::Population => population = Some(map.next_value()?),
                Field::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        let name = name.ok_or_else(|| de::Error::missing_field("name"))?;
        let location = location.ok_or_else(|| de::Error::missing_field("location"))?;
        let population = population.ok_or_else(|| de::Error::missing_field("population"))?;
        Monkey::new(name, location, population).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Monkey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MonkeyVisitor)
    }
}
