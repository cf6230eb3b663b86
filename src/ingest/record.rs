use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One institute/program/category/round/gender combination with its rank window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionRecord {
    pub rank: u64,
    pub year: String,
    pub round: String,
    pub institute_name: String,
    pub institute_code: String,
    pub location: String,
    pub institute_type: InstituteType,
    pub branch: String,
    pub duration: String,
    pub category: String,
    pub gender: String,
    pub opening_rank: u64,
    pub closing_rank: u64,
    pub quota: String,
}

/// Composite identity used to detect an already-stored admission record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub institute_name: String,
    pub branch: String,
    pub category: String,
    pub gender: String,
    pub round: String,
    pub opening_rank: u64,
    pub closing_rank: u64,
}

impl AdmissionRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey {
            institute_name: self.institute_name.clone(),
            branch: self.branch.clone(),
            category: self.category.clone(),
            gender: self.gender.clone(),
            round: self.round.clone(),
            opening_rank: self.opening_rank,
            closing_rank: self.closing_rank,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstituteType {
    #[serde(rename = "IIT")]
    Iit,
    #[serde(rename = "NIT")]
    Nit,
    #[serde(rename = "IIIT")]
    Iiit,
    #[serde(rename = "IIEST")]
    Iiest,
    #[serde(rename = "GFTI")]
    Gfti,
}

impl InstituteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstituteType::Iit => "IIT",
            InstituteType::Nit => "NIT",
            InstituteType::Iiit => "IIIT",
            InstituteType::Iiest => "IIEST",
            InstituteType::Gfti => "GFTI",
        }
    }
}

impl fmt::Display for InstituteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Degree {
    #[serde(rename = "B.Tech")]
    BTech,
    #[serde(rename = "B.Sc")]
    BSc,
    #[serde(rename = "B.Arch")]
    BArch,
    #[serde(rename = "M.Tech")]
    MTech,
    #[serde(rename = "M.Sc")]
    MSc,
}

impl Degree {
    pub fn as_str(&self) -> &'static str {
        match self {
            Degree::BTech => "B.Tech",
            Degree::BSc => "B.Sc",
            Degree::BArch => "B.Arch",
            Degree::MTech => "M.Tech",
            Degree::MSc => "M.Sc",
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Institute {
    pub code: String,
    pub label: String,
    #[serde(rename = "type")]
    pub institute_type: InstituteType,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Program {
    pub code: String,
    pub label: String,
    pub duration: String,
    pub degree: Degree,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub value: String,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Round {
    pub value: String,
    pub label: String,
    pub year: String,
    pub status: String,
}

/// A validated data line, keyed by header name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAdmissionRow {
    fields: HashMap<String, String>,
}

impl RawAdmissionRow {
    pub fn from_fields(headers: &[String], values: Vec<String>) -> Self {
        let fields = headers.iter().cloned().zip(values).collect();
        Self { fields }
    }

    /// Trimmed value of `column`, empty when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(|value| value.trim()).unwrap_or("")
    }

    /// Value of `column`, or `default` when it is blank.
    pub fn get_or<'a>(&'a self, column: &str, default: &'a str) -> &'a str {
        let value = self.get(column);
        if value.is_empty() {
            default
        } else {
            value
        }
    }
}

/// Everything derived from one raw row; the record's rank is assigned at merge time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredEntities {
    pub record: AdmissionRecord,
    pub institute: Institute,
    pub program: Program,
    pub category: Category,
    pub round: Round,
}

/// The five normalized collections handed to (and read back from) storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub colleges: Vec<AdmissionRecord>,
    pub institutes: Vec<Institute>,
    pub programs: Vec<Program>,
    pub categories: Vec<Category>,
    pub rounds: Vec<Round>,
}

impl Dataset {
    pub fn max_rank(&self) -> u64 {
        self.colleges.iter().map(|record| record.rank).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.colleges.is_empty()
            && self.institutes.is_empty()
            && self.programs.is_empty()
            && self.categories.is_empty()
            && self.rounds.is_empty()
    }
}
