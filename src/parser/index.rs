//! Correlation index over the raw event stream.
//!
//! Groups hold references into the loaded event sequence, never copies.
//! Groups are visited in first-appearance order and events inside a group
//! keep the global time order.

use super::events::RawEvent;
use std::collections::HashMap;

/// Events grouped by a correlation key
#[derive(Debug, Default)]
pub struct EventGroups<'a> {
    keys: Vec<&'a str>,
    groups: HashMap<&'a str, Vec<&'a RawEvent>>,
}

impl<'a> EventGroups<'a> {
    fn build(events: &'a [RawEvent], key: impl Fn(&'a RawEvent) -> Option<&'a str>) -> Self {
        let mut index = Self::default();

        for event in events {
            let Some(k) = key(event).filter(|k| !k.is_empty()) else {
                continue;
            };

            index
                .groups
                .entry(k)
                .or_insert_with(|| {
                    index.keys.push(k);
                    Vec::new()
                })
                .push(event);
        }

        index
    }

    /// Events for one key (empty if the key never appeared)
    pub fn get(&self, key: &str) -> &[&'a RawEvent] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Groups in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a RawEvent])> + '_ {
        self.keys.iter().map(|&k| (k, self.get(k)))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Group events by their `type` discriminator
///
/// **Public** - feeds single-type extractors
pub fn group_by_type(events: &[RawEvent]) -> EventGroups<'_> {
    EventGroups::build(events, |event| Some(event.event_type.as_str()))
}

/// Group events by call identifier, omitting events without one
///
/// **Public** - feeds action reconstruction
pub fn group_by_call_id(events: &[RawEvent]) -> EventGroups<'_> {
    EventGroups::build(events, |event| event.call_id.as_deref())
}
