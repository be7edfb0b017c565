//! Console message extraction.

use crate::parser::events::EventKind;
use crate::parser::index::EventGroups;
use crate::parser::schema::{ConsoleMessage, SourceLocation};
use log::debug;

/// Collect every "console" event as a typed message
///
/// **Public** - main entry point for console extraction
///
/// Message type defaults to "log"; time is the envelope timestamp,
/// falling back to the payload's own `time` field.
pub fn extract_console_messages(type_groups: &EventGroups<'_>) -> Vec<ConsoleMessage> {
    let mut messages: Vec<ConsoleMessage> = type_groups
        .get("console")
        .iter()
        .filter_map(|event| {
            let EventKind::Console(console) = &event.kind else {
                return None;
            };
            let location = console.location.clone().unwrap_or_default();

            Some(ConsoleMessage {
                time: event.timestamp.or(console.time).unwrap_or(0.0),
                page_id: event.page_id.clone(),
                message_type: console
                    .message_type
                    .clone()
                    .unwrap_or_else(|| "log".to_string()),
                text: console.text.clone().unwrap_or_default(),
                location: SourceLocation {
                    url: location.url.unwrap_or_default(),
                    line_number: location.line_number,
                    column_number: location.column_number,
                },
            })
        })
        .collect();

    messages.sort_by(|a, b| a.time.total_cmp(&b.time));

    debug!("Extracted {} console messages", messages.len());
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::events::RawEvent;
    use crate::parser::index::group_by_type;
    use serde_json::json;

    #[test]
    fn test_console_defaults() {
        let events = vec![RawEvent::from_value(&json!({"type": "console"})).unwrap()];
        let messages = extract_console_messages(&group_by_type(&events));

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message_type, "log");
        assert_eq!(messages[0].text, "");
        assert_eq!(messages[0].location.url, "");
        assert_eq!(messages[0].location.line_number, None);
        assert_eq!(messages[0].time, 0.0);
    }

    #[test]
    fn test_console_fields_and_order() {
        let events: Vec<RawEvent> = [
            json!({"type": "console", "messageType": "warning", "text": "later", "time": 2900.0,
                   "pageId": "page@1", "location": {"url": "app.js", "lineNumber": 100}}),
            json!({"type": "console", "messageType": "error", "text": "first", "timestamp": 2800.0,
                   "location": {"url": "script.js", "lineNumber": 42, "columnNumber": 10}}),
        ]
        .iter()
        .map(|v| RawEvent::from_value(v).unwrap())
        .collect();

        let messages = extract_console_messages(&group_by_type(&events));

        assert_eq!(messages[0].text, "first");
        assert_eq!(messages[0].location.column_number, Some(10));
        assert_eq!(messages[1].text, "later");
        assert_eq!(messages[1].time, 2900.0);
        assert_eq!(messages[1].page_id.as_deref(), Some("page@1"));
        assert_eq!(messages[1].location.column_number, None);
    }

    #[test]
    fn test_negative_line_number_keeps_message() {
        let events = vec![RawEvent::from_value(&json!({
            "type": "console", "timestamp": 10.0, "messageType": "error", "text": "boom",
            "location": {"url": "app.js", "lineNumber": -1, "columnNumber": 3}
        }))
        .unwrap()];

        let messages = extract_console_messages(&group_by_type(&events));

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "boom");
        assert_eq!(messages[0].location.url, "app.js");
        assert_eq!(messages[0].location.line_number, None);
        assert_eq!(messages[0].location.column_number, Some(3));
    }
}
