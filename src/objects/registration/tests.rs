use super::{RegistrationField, RegistrationForm, REQUIRED_FIELDS};
use crate::objects::registrant::{Gender, SchoolStatus, ServingUnit};

pub fn filled_form() -> RegistrationForm {
    let mut form = RegistrationForm::new();
    form.set(RegistrationField::FirstName, "Ada");
    form.set(RegistrationField::Surname, "Obi");
    form.set(RegistrationField::Phone, "08031234567");
    form.set(RegistrationField::Gender, "Female");
    form.set(RegistrationField::ParentsNumber, "08037654321");
    form.set(RegistrationField::SchoolStatus, "undergraduate");
    form.set(RegistrationField::ServingUnit, "Choir");
    form
}

#[test]
fn test_validate_complete_form() {
    let form = filled_form();
    let req = form.validate().unwrap();
    assert_eq!("Ada", req.first_name);
    assert_eq!(Gender::Female, req.gender);
    assert_eq!(SchoolStatus::Undergraduate, req.school_status);
    assert_eq!(ServingUnit::Choir, req.serving_unit);
    // checkbox defaults to unset and is never required
    assert!(!req.membership_status);
}

#[test]
fn test_validate_each_missing_field() {
    for field in REQUIRED_FIELDS {
        let mut form = filled_form();
        form.set(field, "   ");
        let err = form.validate().unwrap_err();
        assert!(err.has_error(field));
        assert_eq!(1, err.errors().len());
        assert_eq!(format!("{} is required", field.label()), err.errors()[0].message);
    }
}

#[test]
fn test_validate_empty_form_reports_everything() {
    let form = RegistrationForm::new();
    let err = form.validate().unwrap_err();
    assert_eq!(REQUIRED_FIELDS.len(), err.errors().len());
}

#[test]
fn test_validate_bad_choice() {
    let mut form = filled_form();
    form.set(RegistrationField::ServingUnit, "Kitchen");
    let err = form.validate().unwrap_err();
    assert!(err.has_error(RegistrationField::ServingUnit));
    assert_eq!("'Kitchen' is not a valid serving unit", err.to_string());
}

#[test]
fn test_request_wire_shape() {
    let mut form = filled_form();
    form.set_membership_status(true);
    let v = serde_json::to_value(form.validate().unwrap()).unwrap();
    assert_eq!("Ada", v["firstName"]);
    assert_eq!("08037654321", v["parentsNumber"]);
    assert_eq!("undergraduate", v["schoolStatus"]);
    assert_eq!("Choir", v["servingUnit"]);
    assert_eq!(true, v["membershipStatus"]);
}

#[test]
fn test_reset() {
    let mut form = filled_form();
    form.set_membership_status(true);
    form.reset();
    assert_eq!(RegistrationForm::new(), form);
    assert!(!form.membership_status());
}
