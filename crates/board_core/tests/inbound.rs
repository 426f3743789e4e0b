use board_core::{decode_inbound, DecodeError, Msg, INBOUND_EVENTS};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[test]
fn every_inbound_event_name_decodes() {
    let payloads = [
        Value::Null,
        json!({"message": "Choose an action:"}),
        json!({"message": "Agree?"}),
        json!({"message": "Finished"}),
        json!({"summary": "Checkout times out", "jira_id": "SHOP-17"}),
        json!({"data": "hello"}),
    ];
    for (name, payload) in INBOUND_EVENTS.iter().zip(payloads) {
        assert!(decode_inbound(name, payload).is_ok(), "{name} failed");
    }
}

#[test]
fn story_done_accepts_message_or_data() {
    assert_eq!(
        decode_inbound("user_story_done", json!({"message": "Finished"})).unwrap(),
        Msg::StoryDone {
            message: "Finished".to_string()
        }
    );
    assert_eq!(
        decode_inbound(
            "user_story_done",
            json!({"data": "Let me know how it worked out.."})
        )
        .unwrap(),
        Msg::StoryDone {
            message: "Let me know how it worked out..".to_string()
        }
    );
}

#[test]
fn imported_story_ids_are_kept_opaque() {
    assert_eq!(
        decode_inbound("add_jira_story", json!({"summary": "s", "jira_id": 10042})).unwrap(),
        Msg::JiraStoryImported {
            summary: "s".to_string(),
            jira_id: "10042".to_string(),
        }
    );
    assert_eq!(
        decode_inbound("add_jira_story", json!({"summary": "s"})).unwrap(),
        Msg::JiraStoryImported {
            summary: "s".to_string(),
            jira_id: String::new(),
        }
    );
}

#[test]
fn enable_drop_object_ignores_its_payload() {
    assert_eq!(
        decode_inbound("enable_drop_object", json!({})).unwrap(),
        Msg::DropEnabled
    );
}

#[test]
fn unknown_event_is_reported() {
    let err = decode_inbound("save_settings", json!({})).unwrap_err();
    assert!(matches!(err, DecodeError::UnknownEvent(name) if name == "save_settings"));
}

#[test]
fn malformed_payload_is_reported() {
    let err = decode_inbound("script_output", json!({"text": "hi"})).unwrap_err();
    match err {
        DecodeError::InvalidPayload { event, .. } => assert_eq!(event, "script_output"),
        other => panic!("unexpected error: {other}"),
    }
}
