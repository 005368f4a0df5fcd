use std::fmt;
use std::str::FromStr;

use crate::defaults::{PAGE_BUTTONS, PAGE_SIZE};
use crate::network::api::RegistryApi;
use crate::network::errors::ApiError;
use crate::notifications::{Notification, Notifier};
use crate::objects::registrant::{Registrant, SchoolStatus, ServingUnit, UnknownChoice};


pub const LOAD_FAILED_MESSAGE: &str = "Failed to load users";
pub const MEMBERSHIP_UPDATED_MESSAGE: &str = "Membership updated";
pub const MEMBERSHIP_FAILED_MESSAGE: &str = "Failed to update membership";
pub const EDIT_SAVED_MESSAGE: &str = "User updated (local only - backend update needed)";

/// Handed out when a load starts. Only the most recent ticket may settle.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTicket {
    seq: u64,
    unit: Option<ServingUnit>,
}

impl LoadTicket {
    pub fn unit(&self) -> Option<ServingUnit> {
        self.unit
    }

    /// Runs the request this ticket stands for. Needs no access to the roster,
    /// so callers can release their lock while it runs.
    pub fn fetch(&self, api: &dyn RegistryApi) -> Result<Vec<Registrant>, ApiError> {
        match self.unit {
            Some(unit) => api.list_registrants_by_unit(unit),
            None => api.list_all_registrants(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    FirstName,
    Surname,
    Phone,
    ParentsNumber,
    SchoolStatus,
    ServingUnit,
}

impl FromStr for EditField {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "firstname" | "first" => Ok(EditField::FirstName),
            "surname" | "last" => Ok(EditField::Surname),
            "phone" => Ok(EditField::Phone),
            "parentsnumber" | "parent" => Ok(EditField::ParentsNumber),
            "schoolstatus" | "school" => Ok(EditField::SchoolStatus),
            "servingunit" | "unit" => Ok(EditField::ServingUnit),
            _ => Err(UnknownChoice { kind: "editable field", value: String::from(s) }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditError {
    NotEditing,
    InvalidValue(UnknownChoice),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EditError::NotEditing => write!(f, "no row is being edited"),
            EditError::InvalidValue(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EditError {}

/// Scratch copy of the editable fields of one row.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    id: String,
    first_name: String,
    surname: String,
    phone: String,
    parents_number: String,
    school_status: SchoolStatus,
    serving_unit: ServingUnit,
}

impl EditBuffer {
    fn snapshot(r: &Registrant) -> EditBuffer {
        EditBuffer {
            id: String::from(r.id()),
            first_name: String::from(r.first_name()),
            surname: String::from(r.surname()),
            phone: String::from(r.phone()),
            parents_number: String::from(r.parents_number()),
            school_status: r.school_status(),
            serving_unit: r.serving_unit(),
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

    pub fn parents_number(&self) -> &str {
        &self.parents_number
    }

    pub fn school_status(&self) -> SchoolStatus {
        self.school_status
    }

    pub fn serving_unit(&self) -> ServingUnit {
        self.serving_unit
    }

    pub fn set(&mut self, field: EditField, value: &str) -> Result<(), EditError> {
        match field {
            EditField::FirstName => self.first_name = String::from(value),
            EditField::Surname => self.surname = String::from(value),
            EditField::Phone => self.phone = String::from(value),
            EditField::ParentsNumber => self.parents_number = String::from(value),
            EditField::SchoolStatus => {
                self.school_status = SchoolStatus::from_str(value).map_err(EditError::InvalidValue)?;
            },
            EditField::ServingUnit => {
                self.serving_unit = ServingUnit::from_str(value).map_err(EditError::InvalidValue)?;
            },
        }
        Ok(())
    }

    fn apply(&self, r: &mut Registrant) {
        r.set_first_name(self.first_name.clone());
        r.set_surname(self.surname.clone());
        r.set_phone(self.phone.clone());
        r.set_parents_number(self.parents_number.clone());
        r.set_school_status(self.school_status);
        r.set_serving_unit(self.serving_unit);
    }
}

/// Name matching ignores case, phone matching is a raw substring test.
pub fn matches_search(r: &Registrant, term: &str) -> bool {
    if term.is_empty() {
        return true
    }
    let lowered = term.to_lowercase();
    r.first_name().to_lowercase().contains(&lowered)
        || r.surname().to_lowercase().contains(&lowered)
        || r.phone().contains(term)
}

/// State behind the admin roster table.
///
/// `all` is the last accepted load. `filtered` is derived from it and the
/// search term, and is recomputed (resetting to page 1) whenever either
/// changes.
pub struct Roster {
    all: Vec<Registrant>,
    filtered: Vec<Registrant>,
    current_page: usize,
    loading: bool,
    selected_unit: Option<ServingUnit>,
    search_term: String,
    editing: Option<EditBuffer>,
    load_seq: u64,
}

impl Roster {
    pub fn new() -> Roster {
        Roster {
            all: Vec::new(),
            filtered: Vec::new(),
            current_page: 1,
            loading: false,
            selected_unit: None,
            search_term: String::new(),
            editing: None,
            load_seq: 0,
        }
    }

    // Loading

    /// Marks a load as started for the current unit filter.
    ///
    /// Any ticket handed out earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_seq += 1;
        self.loading = true;
        log::debug!("load {} started for {:?}", self.load_seq, self.selected_unit);
        LoadTicket {
            seq: self.load_seq,
            unit: self.selected_unit,
        }
    }

    /// Applies the result of a load. Returns false when the ticket was stale
    /// and the result was dropped.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Registrant>, ApiError>,
        notifier: &dyn Notifier,
    ) -> bool {
        if ticket.seq != self.load_seq {
            log::debug!("dropping stale load {} (latest {})", ticket.seq, self.load_seq);
            return false
        }
        self.loading = false;
        let unit = match ticket.unit() {
            Some(u) => u.as_str(),
            None => "all units",
        };
        match result {
            Ok(users) => {
                log::info!("loaded {} registrants for {unit}", users.len());
                self.all = users;
            },
            Err(e) => {
                log::warn!("unable to load registrants for {unit}: {e}");
                notifier.notify(Notification::error(LOAD_FAILED_MESSAGE));
                self.all = Vec::new();
            }
        }
        self.refilter();
        true
    }

    /// Runs a whole load in place.
    pub fn load(&mut self, api: &dyn RegistryApi, notifier: &dyn Notifier) -> bool {
        let ticket = self.begin_load();
        let result = ticket.fetch(api);
        self.finish_load(ticket, result, notifier)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Forgets every row and any pending edit. Loads still in flight become
    /// stale and are dropped when they settle.
    pub fn reset(&mut self) {
        self.load_seq += 1;
        self.loading = false;
        self.all.clear();
        self.filtered.clear();
        self.editing = None;
        self.current_page = 1;
        log::debug!("roster reset, loads before {} dropped", self.load_seq);
    }

    // Filtering

    /// Changes the unit filter. Returns true when it differs from the current
    /// one, meaning the caller should start a load.
    pub fn select_unit(&mut self, unit: Option<ServingUnit>) -> bool {
        if self.selected_unit == unit {
            return false
        }
        self.selected_unit = unit;
        true
    }

    pub fn selected_unit(&self) -> Option<ServingUnit> {
        self.selected_unit
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = String::from(term);
        self.refilter();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    fn refilter(&mut self) {
        self.filtered = self.all.iter()
            .filter(|r| matches_search(r, &self.search_term))
            .cloned()
            .collect();
        self.current_page = 1;
    }

    pub fn all_rows(&self) -> &[Registrant] {
        &self.all
    }

    pub fn filtered_rows(&self) -> &[Registrant] {
        &self.filtered
    }

    // Pagination

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        (self.filtered.len() + PAGE_SIZE - 1) / PAGE_SIZE
    }

    fn page_start(&self) -> usize {
        (self.current_page - 1) * PAGE_SIZE
    }

    pub fn page_rows(&self) -> &[Registrant] {
        let start = self.page_start().min(self.filtered.len());
        let end = (start + PAGE_SIZE).min(self.filtered.len());
        &self.filtered[start..end]
    }

    /// One-based first and last row numbers shown, and the filtered total.
    pub fn showing_range(&self) -> (usize, usize, usize) {
        let total = self.filtered.len();
        let start = self.page_start();
        ((start + 1).min(total), (start + PAGE_SIZE).min(total), total)
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous_page() {
            return false
        }
        self.current_page -= 1;
        true
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next_page() {
            return false
        }
        self.current_page += 1;
        true
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false
        }
        self.current_page = page;
        true
    }

    /// Numbered page buttons. Always the first pages, not a window around
    /// the current one.
    pub fn page_buttons(&self) -> Vec<usize> {
        (1..=self.total_pages().min(PAGE_BUTTONS)).collect()
    }

    // Summary

    pub fn active_members(&self) -> usize {
        self.filtered.iter().filter(|r| r.membership_status()).count()
    }

    // Membership

    /// Flips membership for one row once the service confirms it.
    pub fn toggle_membership(&mut self, id: &str, api: &dyn RegistryApi, notifier: &dyn Notifier) -> bool {
        let current = match self.all.iter().find(|r| r.id() == id) {
            Some(r) => r.membership_status(),
            None => {
                log::warn!("toggle requested for unknown row {id}");
                notifier.notify(Notification::error(MEMBERSHIP_FAILED_MESSAGE));
                return false
            }
        };
        match api.set_membership_status(id, !current) {
            Ok(_) => {
                self.apply_membership(id, !current);
                notifier.notify(Notification::success(MEMBERSHIP_UPDATED_MESSAGE));
                true
            },
            Err(e) => {
                log::warn!("unable to update membership for {id}: {e}");
                notifier.notify(Notification::error(MEMBERSHIP_FAILED_MESSAGE));
                false
            }
        }
    }

    fn apply_membership(&mut self, id: &str, status: bool) {
        if let Some(r) = self.all.iter_mut().find(|r| r.id() == id) {
            r.set_membership_status(status);
        }
        self.refilter();
    }

    // Inline edit

    /// Starts editing a row. An edit already in progress is dropped first.
    pub fn start_edit(&mut self, id: &str) -> bool {
        if self.editing.is_some() {
            self.cancel_edit();
        }
        match self.all.iter().find(|r| r.id() == id) {
            Some(r) => {
                self.editing = Some(EditBuffer::snapshot(r));
                true
            },
            None => false,
        }
    }

    pub fn editing(&self) -> Option<&EditBuffer> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, id: &str) -> bool {
        matches!(&self.editing, Some(buf) if buf.id == id)
    }

    pub fn set_edit_field(&mut self, field: EditField, value: &str) -> Result<(), EditError> {
        match self.editing.as_mut() {
            Some(buf) => buf.set(field, value),
            None => Err(EditError::NotEditing),
        }
    }

    pub fn cancel_edit(&mut self) {
        if let Some(buf) = self.editing.take() {
            log::debug!("edit of {} discarded", buf.id);
        }
    }

    /// Merges the scratch copy into the local list. Nothing is sent to the
    /// service; only membership has a persistence path.
    pub fn save_edit(&mut self, notifier: &dyn Notifier) -> bool {
        let buf = match self.editing.take() {
            Some(buf) => buf,
            None => return false,
        };
        if let Some(r) = self.all.iter_mut().find(|r| r.id() == buf.id) {
            buf.apply(r);
        }
        self.refilter();
        notifier.notify(Notification::success(EDIT_SAVED_MESSAGE));
        true
    }
}

impl Default for Roster {
    fn default() -> Self {
        Roster::new()
    }
}
