use std::collections::VecDeque;
use std::sync::Mutex;

use crate::network::api::RegistryApi;
use crate::network::errors::ApiError;
use crate::objects::registrant::{Gender, Registrant, SchoolStatus, ServingUnit};
use crate::objects::registration::RegistrationRequest;

/// A call as seen by `FakeApi`.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Register(RegistrationRequest),
    Login(String, String),
    ListAll,
    ListByUnit(ServingUnit),
    SetMembership(String, bool),
}

/// In-process stand-in for the remote service.
///
/// Each operation answers from its own queue of scripted results; an empty
/// queue falls back to a plain success.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    register_results: Mutex<VecDeque<Result<Option<Registrant>, ApiError>>>,
    login_results: Mutex<VecDeque<Result<Option<String>, ApiError>>>,
    list_results: Mutex<VecDeque<Result<Vec<Registrant>, ApiError>>>,
    membership_results: Mutex<VecDeque<Result<Option<Registrant>, ApiError>>>,
}

impl FakeApi {
    pub fn new() -> FakeApi {
        FakeApi::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn push_register(&self, result: Result<Option<Registrant>, ApiError>) {
        self.register_results.lock().unwrap().push_back(result);
    }

    pub fn push_login(&self, result: Result<Option<String>, ApiError>) {
        self.login_results.lock().unwrap().push_back(result);
    }

    pub fn push_list(&self, result: Result<Vec<Registrant>, ApiError>) {
        self.list_results.lock().unwrap().push_back(result);
    }

    pub fn push_membership(&self, result: Result<Option<Registrant>, ApiError>) {
        self.membership_results.lock().unwrap().push_back(result);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl RegistryApi for FakeApi {
    fn submit_registration(&self, request: &RegistrationRequest) -> Result<Option<Registrant>, ApiError> {
        self.record(Call::Register(request.clone()));
        self.register_results.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }

    fn admin_login(&self, admin_id: &str, password: &str) -> Result<Option<String>, ApiError> {
        self.record(Call::Login(String::from(admin_id), String::from(password)));
        self.login_results.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }

    fn list_all_registrants(&self) -> Result<Vec<Registrant>, ApiError> {
        self.record(Call::ListAll);
        self.list_results.lock().unwrap().pop_front().unwrap_or(Ok(Vec::new()))
    }

    fn list_registrants_by_unit(&self, unit: ServingUnit) -> Result<Vec<Registrant>, ApiError> {
        self.record(Call::ListByUnit(unit));
        self.list_results.lock().unwrap().pop_front().unwrap_or(Ok(Vec::new()))
    }

    fn set_membership_status(&self, registrant_id: &str, status: bool) -> Result<Option<Registrant>, ApiError> {
        self.record(Call::SetMembership(String::from(registrant_id), status));
        self.membership_results.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }
}

pub fn registrant(id: &str, first_name: &str, surname: &str, phone: &str) -> Registrant {
    Registrant::new(
        String::from(id),
        String::from(first_name),
        String::from(surname),
        String::from(phone),
        Gender::Female,
        String::from("08000000000"),
        SchoolStatus::Undergraduate,
        ServingUnit::Choir,
        false,
        Some(String::from("2024-03-01T10:00:00.000Z")),
    )
}

/// `count` distinct registrants numbered from 1.
pub fn registrants(count: usize) -> Vec<Registrant> {
    (1..=count)
        .map(|i| registrant(&format!("id{i}"), &format!("First{i}"), &format!("Last{i}"), &format!("0803{i:07}")))
        .collect()
}
