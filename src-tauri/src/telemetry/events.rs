use chrono::{DateTime, Utc};
use serde::Serialize;

/// The two consent-transition signals ForgeMate can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// User agreed to send telemetry.
    OptIn,
    /// User declined (or withdrew consent for) telemetry.
    OptOut,
}

impl EventKind {
    /// Wire name of the event.
    pub fn event_name(self) -> &'static str {
        match self {
            EventKind::OptIn => "telemetry-opt-in",
            EventKind::OptOut => "telemetry-opt-out",
        }
    }
}

/// A consent-transition event as sent to the telemetry sink.
#[derive(Debug, Clone, Serialize)]
pub struct ConsentEvent {
    pub kind: EventKind,
    /// Pseudonymous installation identifier from the preference document.
    pub instance_id: String,
    pub plugin_version: String,
    pub timestamp: DateTime<Utc>,
}

impl ConsentEvent {
    pub fn new(kind: EventKind, instance_id: String, plugin_version: String) -> Self {
        Self {
            kind,
            instance_id,
            plugin_version,
            timestamp: Utc::now(),
        }
    }
}

/// Map a consent transition to the event it should fire, if any.
///
/// `old` is the persisted opt-in state before the save (`None` when the
/// preference file had no prior value); `new` is the checkbox state being
/// committed. An unchanged state fires nothing.
pub fn transition_event(old: Option<bool>, new: bool) -> Option<EventKind> {
    match (old, new) {
        (None, true) => Some(EventKind::OptIn),
        (None, false) => Some(EventKind::OptOut),
        (Some(false), true) => Some(EventKind::OptIn),
        (Some(true), false) => Some(EventKind::OptOut),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_prior_value_fires_by_new_state() {
        assert_eq!(transition_event(None, true), Some(EventKind::OptIn));
        assert_eq!(transition_event(None, false), Some(EventKind::OptOut));
    }

    #[test]
    fn false_to_true_is_opt_in() {
        assert_eq!(transition_event(Some(false), true), Some(EventKind::OptIn));
    }

    #[test]
    fn true_to_false_is_opt_out() {
        assert_eq!(transition_event(Some(true), false), Some(EventKind::OptOut));
    }

    #[test]
    fn unchanged_state_fires_nothing() {
        assert_eq!(transition_event(Some(true), true), None);
        assert_eq!(transition_event(Some(false), false), None);
    }

    #[test]
    fn event_names_are_stable() {
        assert_eq!(EventKind::OptIn.event_name(), "telemetry-opt-in");
        assert_eq!(EventKind::OptOut.event_name(), "telemetry-opt-out");
    }
}
