//! qbl-ledger
//!
//! The working set of events for one reconciliation run.
//!
//! # Lookup
//! Events are addressed by name through an explicit `name -> slot` index;
//! date and ticket count never take part in matching.
//!
//! # Duplicates
//! `upsert_create` does not check for an existing event with the same name.
//! A second create adds a second entry. Every name-addressed operation acts on
//! the earliest live entry for that name, and all entries are emitted.
//!
//! # Clamping
//! Ticket counts saturate into `[0, MAX_TICKETS]`; no mutation ever fails or
//! wraps because of a count.
//!
//! Deterministic and pure: no IO, no clock.

use std::collections::BTreeMap;

use qbl_schemas::{clamp_ticket_count, Event, EventDate, EventName};

#[derive(Clone, Debug, Default)]
pub struct EventLedger {
    /// Insertion order. `None` marks a removed event; tombstones are never
    /// reclaimed in place. A ledger lives for one run, and
    /// `into_sorted_by_date` hands back only live events.
    slots: Vec<Option<Event>>,
    /// Live slot numbers per name, ascending.
    index: BTreeMap<String, Vec<usize>>,
    live: usize,
}

impl EventLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    // -----------------------------------------------------------------------
    // Write surface
    // -----------------------------------------------------------------------

    /// Insert a new event. The seed count is clamped to `MAX_TICKETS`.
    pub fn upsert_create(&mut self, name: EventName, date: EventDate, ticket_count: u32) {
        let slot = self.slots.len();
        self.index
            .entry(name.as_str().to_string())
            .or_default()
            .push(slot);
        self.slots.push(Some(Event::new(
            name,
            date,
            clamp_ticket_count(ticket_count),
        )));
        self.live += 1;
    }

    /// Remove `count` tickets, stopping at zero.
    ///
    /// Returns the updated event, or `None` (ledger untouched) when no event
    /// has that name.
    pub fn sell(&mut self, name: &str, count: u32) -> Option<&Event> {
        let event = self.find_mut(name)?;
        event.ticket_count = event.ticket_count.saturating_sub(count);
        Some(&*event)
    }

    /// Add `count` tickets, stopping at `MAX_TICKETS`. Used for both return
    /// and add transactions.
    pub fn add(&mut self, name: &str, count: u32) -> Option<&Event> {
        let event = self.find_mut(name)?;
        event.ticket_count = clamp_ticket_count(event.ticket_count.saturating_add(count));
        Some(&*event)
    }

    /// Remove the event. `None` when no event has that name.
    pub fn delete(&mut self, name: &str) -> Option<Event> {
        let slot = self.slot_of(name)?;
        self.remove_slot(slot)
    }

    /// Drop every event dated strictly before `current_date`. Returns how many
    /// were dropped.
    pub fn prune_before(&mut self, current_date: EventDate) -> usize {
        let expired: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(slot, ev)| match ev {
                Some(ev) if ev.date < current_date => Some(slot),
                _ => None,
            })
            .collect();

        expired
            .into_iter()
            .filter_map(|slot| self.remove_slot(slot))
            .count()
    }

    // -----------------------------------------------------------------------
    // Read surface
    // -----------------------------------------------------------------------

    pub fn find(&self, name: &str) -> Option<&Event> {
        let slot = self.slot_of(name)?;
        self.slots.get(slot)?.as_ref()
    }

    /// Live events in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.slots.iter().flatten()
    }

    /// Live events, stable-sorted ascending by date. Equal dates keep
    /// insertion order.
    pub fn sorted_by_date(&self) -> Vec<Event> {
        let mut events: Vec<Event> = self.iter().cloned().collect();
        events.sort_by_key(|ev| ev.date);
        events
    }

    /// Consuming form of [`sorted_by_date`](Self::sorted_by_date).
    pub fn into_sorted_by_date(self) -> Vec<Event> {
        let mut events: Vec<Event> = self.slots.into_iter().flatten().collect();
        events.sort_by_key(|ev| ev.date);
        events
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn slot_of(&self, name: &str) -> Option<usize> {
        self.index.get(name)?.first().copied()
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Event> {
        let slot = self.slot_of(name)?;
        self.slots.get_mut(slot)?.as_mut()
    }

    fn remove_slot(&mut self, slot: usize) -> Option<Event> {
        let event = self.slots.get_mut(slot)?.take()?;
        let key = event.name.as_str();
        if let Some(slots) = self.index.get_mut(key) {
            slots.retain(|s| *s != slot);
            if slots.is_empty() {
                self.index.remove(key);
            }
        }
        self.live -= 1;
        Some(event)
    }
}

impl FromIterator<Event> for EventLedger {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        let mut ledger = EventLedger::new();
        for ev in iter {
            ledger.upsert_create(ev.name, ev.date, ev.ticket_count);
        }
        ledger
    }
}
