use std::fmt::Write;

use crate::control::roster::Roster;
use crate::objects::registrant::{Registrant, SERVING_UNITS};
use crate::util;

const ACTIVE: &str = "✓ Active";
const INACTIVE: &str = "○ Inactive";

pub fn membership_label(active: bool) -> &'static str {
    if active { ACTIVE } else { INACTIVE }
}

fn row(out: &mut String, r: &Registrant) {
    _ = writeln!(
        out,
        "{:<26} {:<8} {:<14} {:<22} {:<17} {:<22} {:<11} {}",
        format!("{} {}", r.first_name(), r.surname()),
        r.gender().as_str(),
        r.phone(),
        format!("Parent: {}", r.parents_number()),
        r.school_status().label(),
        r.serving_unit().as_str(),
        membership_label(r.membership_status()),
        util::pretty_date(r.submitted()),
    );
    _ = writeln!(out, "    id: {}", r.id());
}

fn editing_row(out: &mut String, roster: &Roster) {
    if let Some(buf) = roster.editing() {
        _ = writeln!(out, "    editing {}:", buf.id());
        _ = writeln!(out, "      firstName     {}", buf.first_name());
        _ = writeln!(out, "      surname       {}", buf.surname());
        _ = writeln!(out, "      phone         {}", buf.phone());
        _ = writeln!(out, "      parentsNumber {}", buf.parents_number());
        _ = writeln!(out, "      schoolStatus  {}", buf.school_status().label());
        _ = writeln!(out, "      servingUnit   {}", buf.serving_unit().as_str());
        _ = writeln!(out, "    (save) or (cancel)");
    }
}

/// Text rendering of the current roster page.
pub fn roster_page(roster: &Roster, admin_id: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(id) = admin_id {
        _ = writeln!(out, "Admin Dashboard -- signed in as {id}");
    }
    if roster.is_loading() {
        _ = writeln!(out, "Loading users...");
        return out
    }
    let unit = match roster.selected_unit() {
        Some(u) => u.as_str(),
        None => "All Units",
    };
    _ = writeln!(out, "Unit: {unit}    Search: {}", if roster.search_term().is_empty() { "-" } else { roster.search_term() });
    _ = writeln!(
        out,
        "{:<26} {:<8} {:<14} {:<22} {:<17} {:<22} {:<11} {}",
        "Name", "Gender", "Phone", "Parent", "Details", "Serving Unit", "Membership", "Submitted"
    );
    let rows = roster.page_rows();
    if rows.is_empty() {
        _ = writeln!(out, "No users found");
        _ = writeln!(out, "Try adjusting your filters or search terms");
    }
    for r in rows {
        row(&mut out, r);
        if roster.is_editing(r.id()) {
            editing_row(&mut out, roster);
        }
    }
    if roster.total_pages() > 1 {
        let (start, end, total) = roster.showing_range();
        let buttons: Vec<String> = roster.page_buttons().iter()
            .map(|p| if *p == roster.current_page() { format!("[{p}]") } else { p.to_string() })
            .collect();
        _ = writeln!(out, "Showing {start} to {end} of {total} users");
        _ = writeln!(
            out,
            "{} {} {}",
            if roster.has_previous_page() { "<prev" } else { "     " },
            buttons.join(" "),
            if roster.has_next_page() { "next>" } else { "" },
        );
    }
    _ = writeln!(
        out,
        "Total Users: {}    Active Members: {}    Total Pages: {}",
        roster.filtered_rows().len(),
        roster.active_members(),
        roster.total_pages(),
    );
    out
}

pub fn unit_list() -> String {
    let names: Vec<&str> = SERVING_UNITS.iter().map(|u| u.as_str()).collect();
    format!("all, {}", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::{membership_label, roster_page, unit_list};
    use crate::control::roster::Roster;
    use crate::network::fake::{registrants, FakeApi};
    use crate::notifications::RecordingNotifier;

    fn loaded(count: usize) -> Roster {
        let api = FakeApi::new();
        api.push_list(Ok(registrants(count)));
        let mut roster = Roster::new();
        roster.load(&api, &RecordingNotifier::new());
        roster
    }

    #[test]
    fn test_empty_page() {
        let out = roster_page(&Roster::new(), Some("admin01"));
        assert!(out.contains("signed in as admin01"));
        assert!(out.contains("No users found"));
        assert!(!out.contains("Showing"));
        assert!(out.contains("Total Users: 0"));
    }

    #[test]
    fn test_loading_placeholder() {
        let mut roster = Roster::new();
        roster.begin_load();
        assert!(roster_page(&roster, None).contains("Loading users..."));
    }

    #[test]
    fn test_paged_output() {
        let mut roster = loaded(250);
        roster.go_to_page(3);
        let out = roster_page(&roster, None);
        assert!(out.contains("Showing 201 to 250 of 250 users"));
        assert!(out.contains("1 2 [3]"));
        assert!(out.contains("First201 Last201"));
        assert!(!out.contains("First200 Last200"));
        assert!(!out.contains("next>"));
        assert!(out.contains("Total Pages: 3"));
    }

    #[test]
    fn test_edit_rows() {
        let mut roster = loaded(2);
        roster.start_edit("id2");
        let out = roster_page(&roster, None);
        assert!(out.contains("editing id2:"));
    }

    #[test]
    fn test_labels() {
        assert_eq!("✓ Active", membership_label(true));
        assert_eq!("○ Inactive", membership_label(false));
        assert!(unit_list().starts_with("all, Ushering, Choir, Free spirit media"));
    }
}
