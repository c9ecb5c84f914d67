#![cfg(unix)]

use diagram::ChangeReason;
use modeler_bridge::{
    decode, BridgeError, EditorHandle, EditorOptions, EmbeddedEditor, ModelerEvent, ProcessEditor,
};
use std::sync::Arc;
use std::time::Duration;

/// Shell prelude for a scripted editor. Requests arrive unterminated, so
/// each `next_request` consumes the previous body together with the next
/// header line, then the blank separator.
const PRELUDE: &str = r#"
respond() { printf 'Content-Length: %d\r\n\r\n%s' "${#1}" "$1"; }
next_request() { read -r _ && read -r _; }
"#;

fn script(body: &str) -> Vec<String> {
    vec!["-c".to_string(), format!("{}{}", PRELUDE, body)]
}

fn options() -> Arc<EditorOptions> {
    Arc::new(EditorOptions::default())
}

#[tokio::test]
async fn scripted_editor_mounts_emits_saves_then_dies() {
    let args = script(
        r#"
next_request
respond '{"jsonrpc":"2.0","id":1,"result":null}'
respond '{"jsonrpc":"2.0","method":"modeler/event","params":{"source":"modeler","event":"content.saved","data":{"xml":"<d1/>","reason":"model.changed"}}}'
next_request
respond '{"jsonrpc":"2.0","id":2,"result":{"xml":"<d2/>","svg":"<svg/>"}}'
next_request
exit 0
"#,
    );

    let (editor, mut events) = ProcessEditor::launch("sh", &args, "<d0/>", options())
        .await
        .unwrap();
    assert!(editor.is_alive());

    let handle = EditorHandle::new();
    handle.bind(editor.clone()).await;

    let record = tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .unwrap()
        .unwrap();
    match decode(&record).unwrap() {
        ModelerEvent::ContentSaved(saved) => {
            assert_eq!(saved.xml, "<d1/>");
            assert_eq!(saved.reason, ChangeReason::ModelChanged);
        }
        other => panic!("unexpected event {:?}", other),
    }

    let saved = handle.request_serialize().await.unwrap();
    assert_eq!(saved.xml, "<d2/>");
    assert_eq!(saved.svg.as_deref(), Some("<svg/>"));

    // The editor reads this request and exits without answering.
    let lost = tokio::time::timeout(Duration::from_secs(5), handle.request_serialize())
        .await
        .unwrap();
    assert_eq!(lost, Err(BridgeError::HandleUnavailable));
    assert!(!editor.is_alive());
    assert_eq!(
        handle.request_serialize().await,
        Err(BridgeError::HandleUnavailable)
    );
}

#[tokio::test]
async fn silent_editor_fails_mount_after_timeout() {
    let args = script("exec sleep 30");

    let launched = tokio::time::timeout(
        Duration::from_secs(5),
        ProcessEditor::launch_with_timeout("sh", &args, "<d0/>", options(), Duration::from_millis(200)),
    )
    .await
    .unwrap();

    match launched {
        Err(BridgeError::Transport(reason)) => assert!(reason.contains("modeler/mount")),
        Err(other) => panic!("unexpected error {:?}", other),
        Ok(_) => panic!("mount should not succeed"),
    }
}

#[tokio::test]
async fn editor_ignoring_shutdown_is_killed_after_timeout() {
    let args = script(
        r#"
next_request
respond '{"jsonrpc":"2.0","id":1,"result":null}'
exec sleep 30
"#,
    );

    let (editor, _events) = ProcessEditor::launch_with_timeout(
        "sh",
        &args,
        "<d0/>",
        options(),
        Duration::from_millis(200),
    )
    .await
    .unwrap();

    let handle = EditorHandle::new();
    handle.bind(editor.clone()).await;

    let result = tokio::time::timeout(Duration::from_secs(5), handle.unmount())
        .await
        .unwrap();
    assert!(matches!(result, Err(BridgeError::Transport(_))));
    assert!(!editor.is_alive());
    assert!(!handle.is_bound().await);
}

#[tokio::test]
async fn cooperative_editor_shuts_down_cleanly() {
    let args = script(
        r#"
next_request
respond '{"jsonrpc":"2.0","id":1,"result":null}'
next_request
respond '{"jsonrpc":"2.0","id":2,"result":null}'
cat > /dev/null
"#,
    );

    let (editor, _events) = ProcessEditor::launch("sh", &args, "<d0/>", options())
        .await
        .unwrap();

    editor.unmount().await.unwrap();
    assert!(!editor.is_alive());
}
