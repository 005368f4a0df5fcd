use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

pub const SERVING_UNITS: [ServingUnit; 8] = [
    ServingUnit::Ushering,
    ServingUnit::Choir,
    ServingUnit::FreeSpiritMedia,
    ServingUnit::Sound,
    ServingUnit::Greeters,
    ServingUnit::Integrative,
    ServingUnit::Maintenance,
    ServingUnit::BeautyAndAesthetics,
];

pub const SCHOOL_STATUSES: [SchoolStatus; 4] = [
    SchoolStatus::SecondarySchool,
    SchoolStatus::Undergraduate,
    SchoolStatus::Postgraduate,
    SchoolStatus::Trainee,
];

pub const GENDERS: [Gender; 3] = [
    Gender::Male,
    Gender::Female,
    Gender::Other,
];

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SchoolStatus {
    #[serde(rename = "secondaryschool")]
    SecondarySchool,
    Undergraduate,
    Postgraduate,
    Trainee,
}

impl SchoolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchoolStatus::SecondarySchool => "secondaryschool",
            SchoolStatus::Undergraduate => "undergraduate",
            SchoolStatus::Postgraduate => "postgraduate",
            SchoolStatus::Trainee => "trainee",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SchoolStatus::SecondarySchool => "Secondary School",
            SchoolStatus::Undergraduate => "Undergraduate",
            SchoolStatus::Postgraduate => "Postgraduate",
            SchoolStatus::Trainee => "Trainee",
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServingUnit {
    Ushering,
    Choir,
    #[serde(rename = "Free spirit media")]
    FreeSpiritMedia,
    Sound,
    Greeters,
    Integrative,
    Maintenance,
    #[serde(rename = "Beauty and Aesthetics")]
    BeautyAndAesthetics,
}

impl ServingUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServingUnit::Ushering => "Ushering",
            ServingUnit::Choir => "Choir",
            ServingUnit::FreeSpiritMedia => "Free spirit media",
            ServingUnit::Sound => "Sound",
            ServingUnit::Greeters => "Greeters",
            ServingUnit::Integrative => "Integrative",
            ServingUnit::Maintenance => "Maintenance",
            ServingUnit::BeautyAndAesthetics => "Beauty and Aesthetics",
        }
    }
}

/// Returned when user input names none of the known choices.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownChoice {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownChoice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}' is not a valid {}", self.value, self.kind)
    }
}

impl std::error::Error for UnknownChoice {}

// Input is matched on letters only so "free-spirit media", "Free Spirit Media"
// and "freespiritmedia" all resolve to the same unit.
fn normalize(value: &str) -> String {
    value.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

impl FromStr for Gender {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        GENDERS.iter()
            .find(|g| normalize(g.as_str()) == wanted)
            .copied()
            .ok_or(UnknownChoice { kind: "gender", value: String::from(s) })
    }
}

impl FromStr for SchoolStatus {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        // older records were written with "highschool"
        if wanted == "highschool" {
            return Ok(SchoolStatus::SecondarySchool)
        }
        SCHOOL_STATUSES.iter()
            .find(|st| st.as_str() == wanted || normalize(st.label()) == wanted)
            .copied()
            .ok_or(UnknownChoice { kind: "school status", value: String::from(s) })
    }
}

impl FromStr for ServingUnit {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        SERVING_UNITS.iter()
            .find(|u| normalize(u.as_str()) == wanted)
            .copied()
            .ok_or(UnknownChoice { kind: "serving unit", value: String::from(s) })
    }
}

// Wire values go through the same lenient matching as user input, so a
// record spelled "choir" or "FEMALE" still loads.
fn from_wire<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = UnknownChoice>,
{
    let value = String::deserialize(deserializer)?;
    T::from_str(&value).map_err(de::Error::custom)
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        from_wire(deserializer)
    }
}

impl<'de> Deserialize<'de> for SchoolStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        from_wire(deserializer)
    }
}

impl<'de> Deserialize<'de> for ServingUnit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        from_wire(deserializer)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SchoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ServingUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submitted member record as the remote service returns it.
///
/// The identifier is assigned by the service and never changes locally. The
/// submission timestamp arrives as `submittedAt` or `createdAt` depending on
/// the backend version, so both are kept.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Registrant {
    #[serde(rename = "_id")]
    id: String,
    first_name: String,
    surname: String,
    phone: String,
    gender: Gender,
    parents_number: String,
    school_status: SchoolStatus,
    serving_unit: ServingUnit,
    membership_status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    submitted_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<String>,
}

impl Registrant {
    pub fn new(
        id: String,
        first_name: String,
        surname: String,
        phone: String,
        gender: Gender,
        parents_number: String,
        school_status: SchoolStatus,
        serving_unit: ServingUnit,
        membership_status: bool,
        submitted_at: Option<String>,
    ) -> Registrant {
        Registrant {
            id,
            first_name,
            surname,
            phone,
            gender,
            parents_number,
            school_status,
            serving_unit,
            membership_status,
            submitted_at,
            created_at: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn parents_number(&self) -> &str {
        &self.parents_number
    }

    pub fn school_status(&self) -> SchoolStatus {
        self.school_status
    }

    pub fn serving_unit(&self) -> ServingUnit {
        self.serving_unit
    }

    pub fn membership_status(&self) -> bool {
        self.membership_status
    }

    /// The submission time under whichever name the backend used.
    pub fn submitted(&self) -> Option<&str> {
        self.submitted_at.as_deref().or(self.created_at.as_deref())
    }

    pub(crate) fn set_membership_status(&mut self, status: bool) {
        self.membership_status = status;
    }

    pub(crate) fn set_first_name(&mut self, value: String) {
        self.first_name = value;
    }

    pub(crate) fn set_surname(&mut self, value: String) {
        self.surname = value;
    }

    pub(crate) fn set_phone(&mut self, value: String) {
        self.phone = value;
    }

    pub(crate) fn set_parents_number(&mut self, value: String) {
        self.parents_number = value;
    }

    pub(crate) fn set_school_status(&mut self, value: SchoolStatus) {
        self.school_status = value;
    }

    pub(crate) fn set_serving_unit(&mut self, value: ServingUnit) {
        self.serving_unit = value;
    }
}
