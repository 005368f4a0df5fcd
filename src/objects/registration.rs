use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::registrant::{Gender, SchoolStatus, ServingUnit};

#[cfg(test)]
mod tests;

/// Body of `POST /register`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub first_name: String,
    pub surname: String,
    pub phone: String,
    pub gender: Gender,
    pub parents_number: String,
    pub school_status: SchoolStatus,
    pub serving_unit: ServingUnit,
    pub membership_status: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationField {
    FirstName,
    Surname,
    Phone,
    Gender,
    ParentsNumber,
    SchoolStatus,
    ServingUnit,
}

pub const REQUIRED_FIELDS: [RegistrationField; 7] = [
    RegistrationField::FirstName,
    RegistrationField::Surname,
    RegistrationField::Phone,
    RegistrationField::Gender,
    RegistrationField::ParentsNumber,
    RegistrationField::SchoolStatus,
    RegistrationField::ServingUnit,
];

impl RegistrationField {
    pub fn label(&self) -> &'static str {
        match self {
            RegistrationField::FirstName => "First name",
            RegistrationField::Surname => "Surname",
            RegistrationField::Phone => "Phone",
            RegistrationField::Gender => "Gender",
            RegistrationField::ParentsNumber => "Parent's number",
            RegistrationField::SchoolStatus => "School status",
            RegistrationField::ServingUnit => "Serving unit",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: RegistrationField,
    pub message: String,
}

/// Client side rejection of a form. Raised before any request is made.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has_error(&self, field: RegistrationField) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Raw values of the registration form as the user typed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    first_name: String,
    surname: String,
    phone: String,
    gender: String,
    parents_number: String,
    school_status: String,
    serving_unit: String,
    membership_status: bool,
}

impl RegistrationForm {
    pub fn new() -> RegistrationForm {
        RegistrationForm::default()
    }

    pub fn set(&mut self, field: RegistrationField, value: &str) {
        let value = String::from(value);
        match field {
            RegistrationField::FirstName => self.first_name = value,
            RegistrationField::Surname => self.surname = value,
            RegistrationField::Phone => self.phone = value,
            RegistrationField::Gender => self.gender = value,
            RegistrationField::ParentsNumber => self.parents_number = value,
            RegistrationField::SchoolStatus => self.school_status = value,
            RegistrationField::ServingUnit => self.serving_unit = value,
        }
    }

    pub fn get(&self, field: RegistrationField) -> &str {
        match field {
            RegistrationField::FirstName => &self.first_name,
            RegistrationField::Surname => &self.surname,
            RegistrationField::Phone => &self.phone,
            RegistrationField::Gender => &self.gender,
            RegistrationField::ParentsNumber => &self.parents_number,
            RegistrationField::SchoolStatus => &self.school_status,
            RegistrationField::ServingUnit => &self.serving_unit,
        }
    }

    pub fn set_membership_status(&mut self, value: bool) {
        self.membership_status = value;
    }

    pub fn membership_status(&self) -> bool {
        self.membership_status
    }

    pub fn reset(&mut self) {
        *self = RegistrationForm::default();
    }

    /// Checks every required field and builds the request body.
    ///
    /// All problems are collected rather than stopping at the first one.
    pub fn validate(&self) -> Result<RegistrationRequest, ValidationError> {
        let mut errors: Vec<FieldError> = Vec::new();
        for field in REQUIRED_FIELDS {
            if self.get(field).trim().is_empty() {
                errors.push(FieldError {
                    field,
                    message: format!("{} is required", field.label()),
                });
            }
        }
        let gender = parse_choice::<Gender>(RegistrationField::Gender, &self.gender, &mut errors);
        let school_status = parse_choice::<SchoolStatus>(RegistrationField::SchoolStatus, &self.school_status, &mut errors);
        let serving_unit = parse_choice::<ServingUnit>(RegistrationField::ServingUnit, &self.serving_unit, &mut errors);
        match (gender, school_status, serving_unit) {
            (Some(gender), Some(school_status), Some(serving_unit)) if errors.is_empty() => {
                Ok(RegistrationRequest {
                    first_name: String::from(self.first_name.trim()),
                    surname: String::from(self.surname.trim()),
                    phone: String::from(self.phone.trim()),
                    gender,
                    parents_number: String::from(self.parents_number.trim()),
                    school_status,
                    serving_unit,
                    membership_status: self.membership_status,
                })
            },
            _ => Err(ValidationError { errors }),
        }
    }
}

fn parse_choice<T>(field: RegistrationField, value: &str, errors: &mut Vec<FieldError>) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    // empty values were already reported as missing
    if value.trim().is_empty() {
        return None
    }
    match T::from_str(value.trim()) {
        Ok(v) => Some(v),
        Err(e) => {
            errors.push(FieldError { field, message: e.to_string() });
            None
        }
    }
}
