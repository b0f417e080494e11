//! Event stream formatters for `replay`.

use owo_colors::OwoColorize;
use serde::Serialize;

use crate::dispatch::{EventEnvelope, NavigationEvent};
use crate::error::EngineError;

/// One JSON object per line, in sequence order.
pub fn format_events_json(events: &[EventEnvelope]) -> Result<String, EngineError> {
    let lines = events
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}

pub fn format_events_text(events: &[EventEnvelope], color: bool) -> String {
    if events.is_empty() {
        return "No events emitted.".to_string();
    }
    events
        .iter()
        .map(|envelope| format_event_line(envelope, color))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_event_line(envelope: &EventEnvelope, color: bool) -> String {
    let event = &envelope.event;
    let name = format!("{:<27}", event.name());
    let name = if !color {
        name
    } else if matches!(event, NavigationEvent::ErrorOccurred(_)) {
        name.red().to_string()
    } else if matches!(
        event,
        NavigationEvent::CreatedNavigationTarget(_) | NavigationEvent::TabReplaced(_)
    ) {
        name.cyan().to_string()
    } else {
        name.green().to_string()
    };

    let mut line = format!("{:>4}  {}  {}", envelope.seq, name, describe(event));
    if let Some(extra) = extra(event) {
        line.push_str("  ");
        line.push_str(&extra);
    }
    line
}

fn describe(event: &NavigationEvent) -> String {
    match event {
        NavigationEvent::CreatedNavigationTarget(target) => format!(
            "{}/{} -> {} {}",
            target.source_container, target.source_frame, target.container, target.url
        ),
        NavigationEvent::TabReplaced(replaced) => {
            format!("{} -> {}", replaced.replaced_container, replaced.container)
        }
        _ => match event.frame_details() {
            Some(details) => format!("{}/{} {}", details.container, details.frame, details.url),
            None => event.container().to_string(),
        },
    }
}

fn extra(event: &NavigationEvent) -> Option<String> {
    match event {
        NavigationEvent::Committed(commit)
        | NavigationEvent::ReferenceFragmentUpdated(commit)
        | NavigationEvent::HistoryStateUpdated(commit) => {
            let mut parts = vec![label(&commit.transition_type)];
            parts.extend(commit.transition_qualifiers.iter().map(label));
            Some(format!("[{}]", parts.join(" ")))
        }
        NavigationEvent::ErrorOccurred(error) => Some(error.error.clone()),
        _ => None,
    }
}

fn label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::from("?"),
    }
}
