use std::str::FromStr;

use super::{Gender, Registrant, SchoolStatus, ServingUnit, SERVING_UNITS};

#[test]
fn test_deserialize_submitted_at() {
    let body = r#"{
        "_id": "64f0c2",
        "firstName": "Ada",
        "surname": "Obi",
        "phone": "08031234567",
        "gender": "Female",
        "parentsNumber": "08037654321",
        "schoolStatus": "undergraduate",
        "servingUnit": "Free spirit media",
        "membershipStatus": true,
        "submittedAt": "2024-03-01T10:00:00.000Z",
        "__v": 0
    }"#;
    let r: Registrant = serde_json::from_str(body).unwrap();
    assert_eq!("64f0c2", r.id());
    assert_eq!("Ada", r.first_name());
    assert_eq!(Gender::Female, r.gender());
    assert_eq!(SchoolStatus::Undergraduate, r.school_status());
    assert_eq!(ServingUnit::FreeSpiritMedia, r.serving_unit());
    assert!(r.membership_status());
    assert_eq!(Some("2024-03-01T10:00:00.000Z"), r.submitted());
}

#[test]
fn test_deserialize_created_at_and_legacy_values() {
    let body = r#"{
        "_id": "a1",
        "firstName": "Tunde",
        "surname": "Bello",
        "phone": "0801",
        "gender": "male",
        "parentsNumber": "0802",
        "schoolStatus": "highschool",
        "servingUnit": "Beauty and Aesthetics",
        "membershipStatus": false,
        "createdAt": "2023-12-24T08:30:00Z"
    }"#;
    let r: Registrant = serde_json::from_str(body).unwrap();
    assert_eq!(Gender::Male, r.gender());
    assert_eq!(SchoolStatus::SecondarySchool, r.school_status());
    assert_eq!(ServingUnit::BeautyAndAesthetics, r.serving_unit());
    assert_eq!(Some("2023-12-24T08:30:00Z"), r.submitted());
}

#[test]
fn test_submitted_prefers_submitted_at() {
    let body = r#"{
        "_id": "a1", "firstName": "A", "surname": "B", "phone": "1",
        "gender": "Other", "parentsNumber": "2", "schoolStatus": "trainee",
        "servingUnit": "Sound", "membershipStatus": false,
        "submittedAt": "first", "createdAt": "second"
    }"#;
    let r: Registrant = serde_json::from_str(body).unwrap();
    assert_eq!(Some("first"), r.submitted());
}

#[test]
fn test_missing_timestamp() {
    let body = r#"{
        "_id": "a1", "firstName": "A", "surname": "B", "phone": "1",
        "gender": "Other", "parentsNumber": "2", "schoolStatus": "postgraduate",
        "servingUnit": "Greeters", "membershipStatus": false
    }"#;
    let r: Registrant = serde_json::from_str(body).unwrap();
    assert_eq!(None, r.submitted());
}

#[test]
fn test_unknown_unit_rejected() {
    let body = r#"{
        "_id": "a1", "firstName": "A", "surname": "B", "phone": "1",
        "gender": "Other", "parentsNumber": "2", "schoolStatus": "trainee",
        "servingUnit": "Kitchen", "membershipStatus": false
    }"#;
    assert!(serde_json::from_str::<Registrant>(body).is_err());
}

#[test]
fn test_lenient_wire_spellings() {
    let body = r#"{
        "_id": "a2", "firstName": "A", "surname": "B", "phone": "1",
        "gender": "male", "parentsNumber": "2", "schoolStatus": "highschool",
        "servingUnit": "free-spirit media", "membershipStatus": true
    }"#;
    let r: Registrant = serde_json::from_str(body).unwrap();
    assert_eq!(Gender::Male, r.gender());
    assert_eq!(SchoolStatus::SecondarySchool, r.school_status());
    assert_eq!(ServingUnit::FreeSpiritMedia, r.serving_unit());
}

#[test]
fn test_serialize_wire_names() {
    let r = Registrant::new(
        String::from("x9"),
        String::from("Ada"),
        String::from("Obi"),
        String::from("080"),
        Gender::Female,
        String::from("081"),
        SchoolStatus::SecondarySchool,
        ServingUnit::Choir,
        false,
        None,
    );
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!("x9", v["_id"]);
    assert_eq!("Ada", v["firstName"]);
    assert_eq!("081", v["parentsNumber"]);
    assert_eq!("secondaryschool", v["schoolStatus"]);
    assert_eq!("Choir", v["servingUnit"]);
    assert_eq!(false, v["membershipStatus"]);
    assert!(v.get("submittedAt").is_none());
}

#[test]
fn test_parse_choices() {
    assert_eq!(Ok(ServingUnit::FreeSpiritMedia), ServingUnit::from_str("free spirit media"));
    assert_eq!(Ok(ServingUnit::BeautyAndAesthetics), ServingUnit::from_str("beautyandaesthetics"));
    assert_eq!(Ok(ServingUnit::Choir), ServingUnit::from_str("CHOIR"));
    assert!(ServingUnit::from_str("Kitchen").is_err());
    assert_eq!(Ok(SchoolStatus::SecondarySchool), SchoolStatus::from_str("Secondary School"));
    assert_eq!(Ok(SchoolStatus::SecondarySchool), SchoolStatus::from_str("highschool"));
    assert_eq!(Ok(SchoolStatus::Trainee), SchoolStatus::from_str("trainee"));
    assert_eq!(Ok(Gender::Other), Gender::from_str("other"));
    assert!(Gender::from_str("").is_err());
}

#[test]
fn test_unit_names_round_trip_through_from_str() {
    for unit in SERVING_UNITS {
        assert_eq!(Ok(unit), ServingUnit::from_str(unit.as_str()));
    }
}
