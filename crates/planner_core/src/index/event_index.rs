//! Date-grouped event index.

use crate::index::SearchFilter;
use crate::model::event::Event;
use crate::model::validation::ValidationError;
use crate::projection::DateGroup;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Events grouped by calendar date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventIndex {
    groups: BTreeMap<NaiveDate, Vec<Event>>,
}

impl EventIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an index from a full record set.
    ///
    /// Duplicates collapse into one entry; the first invalid record aborts.
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Result<Self, ValidationError> {
        let mut index = Self::new();
        for event in events {
            index.add(event)?;
        }
        Ok(index)
    }

    /// Inserts one event into its date group.
    ///
    /// Returns `Ok(false)` when an identical event already exists; the index
    /// is left unchanged in that case and on validation failure.
    pub fn add(&mut self, event: Event) -> Result<bool, ValidationError> {
        event.validate()?;
        let group = self.groups.entry(event.date).or_default();
        if group.contains(&event) {
            return Ok(false);
        }
        group.push(event);
        Ok(true)
    }

    pub fn contains(&self, event: &Event) -> bool {
        self.groups
            .get(&event.date)
            .is_some_and(|group| group.contains(event))
    }

    /// Removes one event, pruning its date when the group becomes empty.
    pub fn remove(&mut self, event: &Event) -> bool {
        let Some(group) = self.groups.get_mut(&event.date) else {
            return false;
        };
        let before = group.len();
        group.retain(|existing| existing != event);
        let removed = group.len() != before;
        if group.is_empty() {
            self.groups.remove(&event.date);
        }
        removed
    }

    /// Removes a whole date group and returns its events.
    pub fn remove_date(&mut self, date: NaiveDate) -> Vec<Event> {
        self.groups.remove(&date).unwrap_or_default()
    }

    /// Dates that currently hold events, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.groups.keys().copied()
    }

    /// Events stored for `date`, in insertion order.
    pub fn events_on(&self, date: NaiveDate) -> &[Event] {
        self.groups.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of events across all dates.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Projects the index into sorted date groups.
    ///
    /// Dates ascend; events ascend by start time. With a non-blank filter only
    /// events whose name matches are kept, and dates left without events are
    /// dropped.
    ///
    /// The filter is trimmed before matching: `" rev "` behaves like `"rev"`
    /// and a whitespace-only filter behaves like `None`.
    pub fn project(&self, filter: Option<&str>) -> Vec<DateGroup> {
        let filter = SearchFilter::new(filter);
        self.groups
            .iter()
            .filter_map(|(date, events)| {
                let mut matching: Vec<Event> = events
                    .iter()
                    .filter(|event| filter.matches(&event.name))
                    .cloned()
                    .collect();
                if matching.is_empty() {
                    return None;
                }
                matching.sort_by(Event::display_cmp);
                Some(DateGroup {
                    date: *date,
                    events: matching,
                })
            })
            .collect()
    }
}
