use fusen_core::{Ack, Command, CommandRequest, PlacementMode, StatsSnapshot};

#[test]
fn known_actions_parse() {
    assert_eq!(
        Command::parse("toggleSelection"),
        Some(Command::ToggleSelection)
    );
    assert_eq!(Command::parse("clearAll"), Some(Command::ClearAll));
    assert_eq!(Command::parse("getStats"), Some(Command::GetStats));
}

#[test]
fn unknown_actions_are_ignored() {
    assert_eq!(Command::parse("reload"), None);
    assert_eq!(Command::parse(""), None);

    let request: CommandRequest =
        serde_json::from_str(r#"{"action":"selfDestruct"}"#).unwrap();
    assert_eq!(request.command(), None);
}

#[test]
fn requests_without_an_action_are_ignored() {
    let request: CommandRequest = serde_json::from_str("{}").unwrap();
    assert_eq!(request.command(), None);
}

#[test]
fn extra_request_fields_are_tolerated() {
    let request: CommandRequest =
        serde_json::from_str(r#"{"action":"getStats","tabId":7,"nested":{"a":1}}"#).unwrap();
    assert_eq!(request.command(), Some(Command::GetStats));
}

#[test]
fn ack_wire_shape() {
    assert_eq!(serde_json::to_string(&Ack::ok()).unwrap(), r#"{"success":true}"#);
    assert_eq!(
        serde_json::to_string(&Ack::failed()).unwrap(),
        r#"{"success":false}"#
    );
}

#[test]
fn stats_wire_shape_uses_camel_case() {
    let stats = StatsSnapshot {
        sticky_count: 2,
        sticky_scroll_count: 3,
        total_count: 5,
        selection_mode: false,
        current_mode: PlacementMode::Scroll,
        is_pdf_viewer: true,
    };
    let value = serde_json::to_value(&stats).unwrap();
    assert_eq!(value["stickyCount"], 2);
    assert_eq!(value["stickyScrollCount"], 3);
    assert_eq!(value["totalCount"], 5);
    assert_eq!(value["selectionMode"], false);
    assert_eq!(value["currentMode"], "scroll");
    assert_eq!(value["isPdfViewer"], true);
}
