//! Inbound frame dispatch.

use tracing::{debug, trace, warn};

use crate::events::{EventBus, EventKind, ResearchEvent};
use crate::protocol::{frame_types, InboundFrame};

/// Decode one text frame and publish the matching event.
///
/// Malformed frames and unknown types are logged and dropped; neither
/// ends the session. Returns the kind of event published, if any.
pub(crate) fn handle_frame(text: &str, bus: &EventBus) -> Option<EventKind> {
    let frame = match InboundFrame::decode(text) {
        Ok(frame) => frame,
        Err(e) => {
            warn!(error = %e, raw = %text, "failed to decode frame");
            return None;
        }
    };

    let event = match frame.kind.as_str() {
        frame_types::LOGS => ResearchEvent::Logs {
            content: frame.content_text(),
            output: frame.output.unwrap_or_default(),
        },
        frame_types::RESEARCH_PROGRESS => ResearchEvent::Progress {
            content: frame.content_text(),
            output: frame.output.unwrap_or_default(),
        },
        frame_types::PATH => ResearchEvent::ReportComplete {
            output: frame.output.unwrap_or_default(),
        },
        frame_types::LANGGRAPH_UPDATE => ResearchEvent::LanggraphUpdate {
            content: frame.content.unwrap_or_default(),
        },
        frame_types::PONG => {
            trace!("keep-alive acknowledged");
            return None;
        }
        other => {
            debug!(kind = %other, raw = %text, "unhandled frame type");
            return None;
        }
    };

    let kind = event.kind();
    bus.publish(event);
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    fn drain(rx: &mut tokio::sync::broadcast::Receiver<ResearchEvent>) -> Vec<ResearchEvent> {
        let mut out = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(e) => out.push(e),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return out,
                Err(TryRecvError::Lagged(_)) => continue,
            }
        }
    }

    #[test]
    fn path_frame_publishes_only_report_complete() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        let kind = handle_frame(r#"{"type":"path","output":"report.pdf"}"#, &bus);

        assert_eq!(kind, Some(EventKind::ReportComplete));
        assert_eq!(
            drain(&mut rx),
            vec![ResearchEvent::ReportComplete {
                output: serde_json::json!("report.pdf")
            }]
        );
    }

    #[test]
    fn logs_and_progress_carry_content_and_output() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        handle_frame(
            r#"{"type":"logs","content":"subqueries","output":"Searching PubMed"}"#,
            &bus,
        );
        handle_frame(
            r#"{"type":"research_progress","content":"step","output":{"done":2,"total":5}}"#,
            &bus,
        );

        let events = drain(&mut rx);
        assert_eq!(
            events,
            vec![
                ResearchEvent::Logs {
                    content: Some("subqueries".into()),
                    output: serde_json::json!("Searching PubMed"),
                },
                ResearchEvent::Progress {
                    content: Some("step".into()),
                    output: serde_json::json!({"done": 2, "total": 5}),
                },
            ]
        );
    }

    #[test]
    fn langgraph_update_keeps_structured_content() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        handle_frame(
            r#"{"type":"langgraph_update","content":{"nodes":[{"id":"browser"}]}}"#,
            &bus,
        );

        assert_eq!(
            drain(&mut rx),
            vec![ResearchEvent::LanggraphUpdate {
                content: serde_json::json!({"nodes": [{"id": "browser"}]})
            }]
        );
    }

    #[test]
    fn pong_and_unknown_types_publish_nothing() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        assert_eq!(handle_frame(r#"{"type":"pong"}"#, &bus), None);
        assert_eq!(handle_frame(r#"{"type":"human_feedback","content":"?"}"#, &bus), None);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn malformed_frame_is_dropped() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        assert_eq!(handle_frame("{not json", &bus), None);
        assert_eq!(handle_frame(r#"{"output":"no type"}"#, &bus), None);
        assert!(drain(&mut rx).is_empty());

        // The dispatcher keeps working afterwards.
        assert_eq!(
            handle_frame(r#"{"type":"logs","content":"ok"}"#, &bus),
            Some(EventKind::Logs)
        );
    }
}
