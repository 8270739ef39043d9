use serde::{Deserialize, Serialize};

/// A movie, identified by name and usually a release year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Movie {
    pub name: String,
    pub year: Option<i32>,
}

impl Movie {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}
