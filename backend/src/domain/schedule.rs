//! Sibling schedule reconciliation.
//!
//! A package or assessment dialog edits an ordered group of schedule
//! entries (its sessions). Two per-field unify toggles (one for age
//! ranges, one for gender sets) keep the siblings identical while
//! enabled: turning a toggle on copies the first entry's value over the
//! whole group, and any later edit to any entry broadcasts to all of
//! them. Turning a toggle off changes nothing; entries simply become
//! independently editable again.
//!
//! Everything here is pure in-memory propagation over already-validated
//! fields: group in, group out, no failure path. Empty groups and
//! out-of-range indexes are no-ops.

use std::collections::BTreeSet;

use chrono::NaiveTime;

use super::age_range::AgeRange;

/// One session within a package or assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    /// 0 = Sunday, 1 = Monday, ..., 6 = Saturday
    pub day_of_week: u8,
    pub from: NaiveTime,
    pub to: NaiveTime,
    pub memo: String,
    pub age_range: AgeRange,
    pub genders: BTreeSet<String>,
}

/// Per-field unify switches, scoped to one editing session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UnifyToggle {
    pub ages: bool,
    pub genders: bool,
}

/// Whether every entry's age range matches the first entry's.
/// Groups of size zero or one have nothing to diverge.
pub fn ages_in_sync(entries: &[ScheduleEntry]) -> bool {
    match entries.first() {
        Some(first) => entries.iter().all(|e| e.age_range == first.age_range),
        None => true,
    }
}

/// Whether every entry's gender set matches the first entry's.
pub fn genders_in_sync(entries: &[ScheduleEntry]) -> bool {
    match entries.first() {
        Some(first) => entries.iter().all(|e| e.genders == first.genders),
        None => true,
    }
}

/// Copies the first entry's age range over every sibling, unconditionally.
pub fn unify_ages(entries: &[ScheduleEntry]) -> Vec<ScheduleEntry> {
    let Some(first) = entries.first() else {
        return Vec::new();
    };
    let range = first.age_range;
    entries
        .iter()
        .cloned()
        .map(|mut e| {
            e.age_range = range;
            e
        })
        .collect()
}

/// Copies the first entry's gender set over every sibling, unconditionally.
pub fn unify_genders(entries: &[ScheduleEntry]) -> Vec<ScheduleEntry> {
    let Some(first) = entries.first() else {
        return Vec::new();
    };
    let genders = first.genders.clone();
    entries
        .iter()
        .cloned()
        .map(|mut e| {
            e.genders = genders.clone();
            e
        })
        .collect()
}

/// Applies an age-range edit to one entry; broadcasts to the whole group
/// when `unified` is set.
pub fn apply_age_edit(
    entries: &[ScheduleEntry],
    index: usize,
    range: AgeRange,
    unified: bool,
) -> Vec<ScheduleEntry> {
    let mut out = entries.to_vec();
    if index >= out.len() {
        return out;
    }
    if unified {
        for entry in &mut out {
            entry.age_range = range;
        }
    } else {
        out[index].age_range = range;
    }
    out
}

/// Applies a replacement gender set to one entry; broadcasts when unified.
pub fn apply_gender_set(
    entries: &[ScheduleEntry],
    index: usize,
    genders: BTreeSet<String>,
    unified: bool,
) -> Vec<ScheduleEntry> {
    let mut out = entries.to_vec();
    if index >= out.len() {
        return out;
    }
    if unified {
        for entry in &mut out {
            entry.genders = genders.clone();
        }
    } else {
        out[index].genders = genders;
    }
    out
}

/// Toggles one gender label on an entry. The resulting set, not just the
/// label, is what propagates when unified.
pub fn toggle_gender_label(
    entries: &[ScheduleEntry],
    index: usize,
    label: &str,
    unified: bool,
) -> Vec<ScheduleEntry> {
    let Some(entry) = entries.get(index) else {
        return entries.to_vec();
    };
    let mut genders = entry.genders.clone();
    if !genders.remove(label) {
        genders.insert(label.to_string());
    }
    apply_gender_set(entries, index, genders, unified)
}

/// Removes one gender label from an entry; the resulting set propagates
/// when unified.
pub fn remove_gender_label(
    entries: &[ScheduleEntry],
    index: usize,
    label: &str,
    unified: bool,
) -> Vec<ScheduleEntry> {
    let Some(entry) = entries.get(index) else {
        return entries.to_vec();
    };
    let mut genders = entry.genders.clone();
    genders.remove(label);
    apply_gender_set(entries, index, genders, unified)
}

/// Editing session over one sibling group, owned by a single dialog for
/// its lifetime and discarded on close without save.
#[derive(Debug, Clone)]
pub struct ScheduleEditor {
    entries: Vec<ScheduleEntry>,
    toggle: UnifyToggle,
}

impl ScheduleEditor {
    /// Opens a group for editing. Initial toggle state is computed from
    /// whether the siblings already agree, never stored.
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        let toggle = UnifyToggle {
            ages: ages_in_sync(&entries),
            genders: genders_in_sync(&entries),
        };
        Self { entries, toggle }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn toggle(&self) -> UnifyToggle {
        self.toggle
    }

    /// Enabling copies entry 0's age range over the group; disabling
    /// leaves all values untouched.
    pub fn set_unify_ages(&mut self, on: bool) {
        if on {
            self.entries = unify_ages(&self.entries);
        }
        self.toggle.ages = on;
    }

    /// Enabling copies entry 0's gender set over the group; disabling
    /// leaves all values untouched.
    pub fn set_unify_genders(&mut self, on: bool) {
        if on {
            self.entries = unify_genders(&self.entries);
        }
        self.toggle.genders = on;
    }

    pub fn edit_age_range(&mut self, index: usize, range: AgeRange) {
        self.entries = apply_age_edit(&self.entries, index, range, self.toggle.ages);
    }

    pub fn toggle_gender(&mut self, index: usize, label: &str) {
        self.entries = toggle_gender_label(&self.entries, index, label, self.toggle.genders);
    }

    pub fn remove_gender(&mut self, index: usize, label: &str) {
        self.entries = remove_gender_label(&self.entries, index, label, self.toggle.genders);
    }

    /// A session added while a toggle is on inherits the unified value so
    /// the group stays identical.
    pub fn add_entry(&mut self, mut entry: ScheduleEntry) {
        if let Some(first) = self.entries.first() {
            if self.toggle.ages {
                entry.age_range = first.age_range;
            }
            if self.toggle.genders {
                entry.genders = first.genders.clone();
            }
        }
        self.entries.push(entry);
    }

    pub fn remove_entry(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
        }
    }

    pub fn into_entries(self) -> Vec<ScheduleEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::age::AgeSpec;
    use crate::domain::age_range::AgeBound;

    fn range_years(start: f64, end: f64) -> AgeRange {
        AgeRange {
            start: AgeSpec::years(start),
            end: AgeBound::Limited(AgeSpec::years(end)),
        }
    }

    fn range_unlimited(start: f64) -> AgeRange {
        AgeRange {
            start: AgeSpec::years(start),
            end: AgeBound::Unlimited,
        }
    }

    fn genders(labels: &[&str]) -> BTreeSet<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    fn entry(day: u8, range: AgeRange, gender_labels: &[&str]) -> ScheduleEntry {
        ScheduleEntry {
            day_of_week: day,
            from: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            to: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
            memo: String::new(),
            age_range: range,
            genders: genders(gender_labels),
        }
    }

    #[test]
    fn test_sync_detection() {
        let in_sync = vec![
            entry(1, range_years(5.0, 8.0), &["girls", "boys"]),
            entry(3, range_years(5.0, 8.0), &["boys", "girls"]),
            entry(5, range_years(5.0, 8.0), &["girls", "boys"]),
        ];
        assert!(ages_in_sync(&in_sync));
        assert!(genders_in_sync(&in_sync));

        let mut diverged = in_sync.clone();
        diverged[1].genders = genders(&["boys"]);
        assert!(ages_in_sync(&diverged));
        assert!(!genders_in_sync(&diverged));

        diverged[2].age_range = range_unlimited(5.0);
        assert!(!ages_in_sync(&diverged));
    }

    #[test]
    fn test_small_groups_are_always_in_sync() {
        assert!(ages_in_sync(&[]));
        assert!(genders_in_sync(&[]));

        let single = vec![entry(1, range_years(5.0, 8.0), &["girls"])];
        assert!(ages_in_sync(&single));
        assert!(genders_in_sync(&single));
    }

    #[test]
    fn test_enabling_unify_copies_first_entry() {
        let group = vec![
            entry(1, range_unlimited(5.0), &["girls"]),
            entry(3, range_years(6.0, 9.0), &["boys"]),
            entry(5, range_years(7.0, 10.0), &["girls", "boys"]),
        ];

        let unified = unify_ages(&group);
        for e in &unified {
            assert_eq!(e.age_range, range_unlimited(5.0));
        }
        // Gender stayed independent
        assert_eq!(unified[1].genders, genders(&["boys"]));
    }

    #[test]
    fn test_edit_broadcasts_while_unified() {
        let group = vec![
            entry(1, range_years(5.0, 8.0), &["girls"]),
            entry(3, range_years(5.0, 8.0), &["girls"]),
            entry(5, range_years(5.0, 8.0), &["girls"]),
        ];

        let edited = apply_age_edit(&group, 2, range_years(6.0, 10.0), true);
        for e in &edited {
            assert_eq!(e.age_range, range_years(6.0, 10.0));
        }

        let edited = apply_age_edit(&group, 2, range_years(6.0, 10.0), false);
        assert_eq!(edited[0].age_range, range_years(5.0, 8.0));
        assert_eq!(edited[2].age_range, range_years(6.0, 10.0));
    }

    #[test]
    fn test_gender_toggle_propagates_resulting_set() {
        let group = vec![
            entry(1, range_years(5.0, 8.0), &["girls", "boys"]),
            entry(3, range_years(5.0, 8.0), &["girls", "boys"]),
            entry(5, range_years(5.0, 8.0), &["girls", "boys"]),
        ];

        // Toggling off an existing label removes it everywhere
        let toggled = toggle_gender_label(&group, 1, "boys", true);
        for e in &toggled {
            assert_eq!(e.genders, genders(&["girls"]));
        }

        // Toggling a new label adds it everywhere
        let toggled = toggle_gender_label(&toggled, 0, "mixed", true);
        for e in &toggled {
            assert_eq!(e.genders, genders(&["girls", "mixed"]));
        }

        // Removal respects independence when not unified
        let removed = remove_gender_label(&group, 1, "boys", false);
        assert_eq!(removed[0].genders, genders(&["girls", "boys"]));
        assert_eq!(removed[1].genders, genders(&["girls"]));
    }

    #[test]
    fn test_out_of_range_index_is_a_no_op() {
        let group = vec![entry(1, range_years(5.0, 8.0), &["girls"])];

        assert_eq!(apply_age_edit(&group, 5, range_years(1.0, 2.0), true), group);
        assert_eq!(toggle_gender_label(&group, 5, "boys", true), group);
        assert_eq!(unify_ages(&[]), Vec::new());
    }

    #[test]
    fn test_editor_initial_toggle_state_is_computed() {
        let diverged = vec![
            entry(1, range_years(5.0, 8.0), &["girls"]),
            entry(3, range_years(6.0, 9.0), &["girls"]),
        ];
        let editor = ScheduleEditor::new(diverged);
        assert!(!editor.toggle().ages);
        assert!(editor.toggle().genders);

        let single = vec![entry(1, range_years(5.0, 8.0), &["girls"])];
        let editor = ScheduleEditor::new(single);
        assert!(editor.toggle().ages);
        assert!(editor.toggle().genders);
    }

    #[test]
    fn test_editor_enable_then_edit_then_disable() {
        let mut editor = ScheduleEditor::new(vec![
            entry(1, range_unlimited(5.0), &["girls"]),
            entry(3, range_years(6.0, 9.0), &["boys"]),
            entry(5, range_years(7.0, 10.0), &["mixed"]),
        ]);
        assert!(!editor.toggle().ages);

        // Enabling copies entry 0's range over the group
        editor.set_unify_ages(true);
        for e in editor.entries() {
            assert_eq!(e.age_range, range_unlimited(5.0));
        }

        // While unified, an edit anywhere lands everywhere
        editor.edit_age_range(1, range_years(4.0, 6.0));
        for e in editor.entries() {
            assert_eq!(e.age_range, range_years(4.0, 6.0));
        }

        // Disabling changes no values, edits become local again
        editor.set_unify_ages(false);
        editor.edit_age_range(2, range_unlimited(3.0));
        assert_eq!(editor.entries()[0].age_range, range_years(4.0, 6.0));
        assert_eq!(editor.entries()[2].age_range, range_unlimited(3.0));

        // Gender toggle was never enabled; sets stayed independent
        assert_eq!(editor.entries()[0].genders, genders(&["girls"]));
        assert_eq!(editor.entries()[1].genders, genders(&["boys"]));
    }

    #[test]
    fn test_editor_added_entry_inherits_unified_values() {
        let mut editor = ScheduleEditor::new(vec![
            entry(1, range_years(5.0, 8.0), &["girls"]),
            entry(3, range_years(5.0, 8.0), &["girls"]),
        ]);
        assert!(editor.toggle().ages);
        assert!(editor.toggle().genders);

        editor.add_entry(entry(6, range_years(1.0, 2.0), &["boys"]));
        let added = &editor.entries()[2];
        assert_eq!(added.age_range, range_years(5.0, 8.0));
        assert_eq!(added.genders, genders(&["girls"]));
        assert_eq!(added.day_of_week, 6);
    }
}
