use assistant_core::{
    update, AppState, Effect, Message, Msg, RequestFailure, RequestId, SelectedFile, GREETING,
    PREVIEW_HIDE_LABEL, PREVIEW_SHOW_LABEL, UPLOAD_ERROR_TEXT,
};
use pretty_assertions::assert_eq;

fn csv_file(name: &str, content: &str) -> SelectedFile {
    SelectedFile::new(name, content.as_bytes())
}

fn upload_request(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::UploadFile { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("upload effect")
}

#[test]
fn selecting_a_file_parses_and_uploads_it() {
    assistant_logging::initialize_for_tests();
    let file = csv_file("data.csv", "a,b\n1,2\n3,4");
    let (state, effects) = update(AppState::new(), Msg::FileSelected(file.clone()));

    let table = state.parsed_table().expect("table parsed on selection");
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows()[0].get("a"), Some("1"));
    assert_eq!(table.rows()[0].get("b"), Some("2"));
    assert_eq!(table.rows()[1].get("a"), Some("3"));
    assert_eq!(table.rows()[1].get("b"), Some("4"));

    assert_eq!(state.selected_file(), Some(&file));
    assert_eq!(
        effects,
        vec![Effect::UploadFile {
            request_id: 1,
            file,
        }]
    );
    // Upload success is not announced.
    assert_eq!(state.transcript(), [Message::bot(GREETING)]);
}

#[test]
fn new_selection_replaces_file_and_table() {
    assistant_logging::initialize_for_tests();
    let (state, _) = update(
        AppState::new(),
        Msg::FileSelected(csv_file("one.csv", "x\n1\n")),
    );
    let (state, effects) = update(
        state,
        Msg::FileDropped(csv_file("two.csv", "y,z\n2,3\n4,5\n")),
    );

    assert_eq!(state.selected_file().map(|f| f.name.as_str()), Some("two.csv"));
    let table = state.parsed_table().expect("table");
    assert_eq!(table.headers(), ["y", "z"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(upload_request(&effects), 2);
}

#[test]
fn successful_upload_changes_nothing() {
    assistant_logging::initialize_for_tests();
    let (state, effects) = update(
        AppState::new(),
        Msg::FileSelected(csv_file("a.csv", "a\n1\n")),
    );
    let before = state.clone();

    let (state, effects) = update(
        state,
        Msg::UploadResolved {
            request_id: upload_request(&effects),
            result: Ok(()),
        },
    );

    assert_eq!(state, before);
    assert!(effects.is_empty());
}

#[test]
fn upload_failure_appends_one_error_message() {
    assistant_logging::initialize_for_tests();
    let (state, effects) = update(
        AppState::new(),
        Msg::FileSelected(csv_file("a.csv", "a,b\n1,2\n")),
    );
    let file_before = state.selected_file().cloned();
    let table_before = state.parsed_table().cloned();

    let (state, effects) = update(
        state,
        Msg::UploadResolved {
            request_id: upload_request(&effects),
            result: Err(RequestFailure::new("connection refused")),
        },
    );

    assert_eq!(
        state.transcript(),
        [Message::bot(GREETING), Message::bot(UPLOAD_ERROR_TEXT)]
    );
    assert_eq!(state.selected_file().cloned(), file_before);
    assert_eq!(state.parsed_table().cloned(), table_before);
    assert_eq!(effects, vec![Effect::ScrollTranscriptToBottom]);
}

#[test]
fn stale_upload_failure_still_reports() {
    assistant_logging::initialize_for_tests();
    let (state, first) = update(
        AppState::new(),
        Msg::FileSelected(csv_file("old.csv", "a\n1\n")),
    );
    let (state, _) = update(state, Msg::FileSelected(csv_file("new.csv", "b\n2\n")));

    let (state, _) = update(
        state,
        Msg::UploadResolved {
            request_id: upload_request(&first),
            result: Err(RequestFailure::new("timeout")),
        },
    );

    assert_eq!(state.transcript().last(), Some(&Message::bot(UPLOAD_ERROR_TEXT)));
    assert_eq!(state.selected_file().map(|f| f.name.as_str()), Some("new.csv"));
}

#[test]
fn toggle_preview_twice_restores_flag() {
    let state = AppState::new();
    let original = state.preview_visible();

    let (state, _) = update(state, Msg::PreviewToggled);
    assert_ne!(state.preview_visible(), original);
    let (state, _) = update(state, Msg::PreviewToggled);
    assert_eq!(state.preview_visible(), original);
}

#[test]
fn preview_without_file_renders_nothing() {
    let (state, _) = update(AppState::new(), Msg::PreviewToggled);
    let view = state.view();
    assert!(state.preview_visible());
    assert_eq!(view.preview, None);
    assert_eq!(view.preview_label, None);
}

#[test]
fn preview_view_follows_flag_and_file() {
    let (state, _) = update(
        AppState::new(),
        Msg::FileSelected(csv_file("t.csv", "a,b\n1\n3,4\n")),
    );
    let view = state.view();
    assert_eq!(view.file_name.as_deref(), Some("t.csv"));
    assert_eq!(view.preview_label, Some(PREVIEW_SHOW_LABEL));
    assert_eq!(view.preview, None);

    let (state, _) = update(state, Msg::PreviewToggled);
    let view = state.view();
    assert_eq!(view.preview_label, Some(PREVIEW_HIDE_LABEL));
    let preview = view.preview.expect("preview visible");
    assert_eq!(preview.headers, vec!["a", "b"]);
    assert_eq!(
        preview.rows,
        vec![
            vec!["1".to_string(), String::new()],
            vec!["3".to_string(), "4".to_string()],
        ]
    );
}

#[test]
fn preview_keeps_cells_of_repeated_headers() {
    let (state, _) = update(
        AppState::new(),
        Msg::FileSelected(csv_file("dup.csv", "a,a\n1,2\n")),
    );
    let (state, _) = update(state, Msg::PreviewToggled);
    let preview = state.view().preview.expect("preview visible");
    assert_eq!(preview.headers, vec!["a", "a"]);
    assert_eq!(preview.rows, vec![vec!["1".to_string(), "2".to_string()]]);
}

#[test]
fn drag_enter_and_over_activate_leave_clears() {
    let (state, effects) = update(AppState::new(), Msg::DragEntered);
    assert!(state.drag_active());
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::DragOver);
    assert!(state.drag_active());

    let (state, effects) = update(state, Msg::DragLeft);
    assert!(!state.drag_active());
    assert!(effects.is_empty());
}

#[test]
fn drop_clears_drag_flag_and_selects_file() {
    assistant_logging::initialize_for_tests();
    let (state, _) = update(AppState::new(), Msg::DragEntered);
    let (state, _) = update(state, Msg::DraftChanged("typed".to_string()));
    let (state, effects) = update(
        state,
        Msg::FileDropped(csv_file("drop.csv", "a,b\n1,2\n3,4\n")),
    );

    assert!(!state.drag_active());
    assert_eq!(state.parsed_table().map(|t| t.row_count()), Some(2));
    assert_eq!(upload_request(&effects), 1);
    // A drop never lands in the message box.
    assert_eq!(state.draft(), "typed");
}

#[test]
fn file_and_table_are_present_together() {
    let state = AppState::new();
    assert_eq!(state.selected_file().is_some(), state.parsed_table().is_some());

    let (state, _) = update(state, Msg::FileSelected(csv_file("bad.csv", "a,b\n1,2,3\n")));
    assert!(state.selected_file().is_some());
    let table = state.parsed_table().expect("table");
    assert_eq!(table.issues().len(), 1);
}

#[test]
fn upload_and_send_do_not_block_each_other() {
    assistant_logging::initialize_for_tests();
    let (state, _) = update(AppState::new(), Msg::DraftChanged("q".to_string()));
    let (state, sent) = update(state, Msg::SendClicked);
    let (state, uploaded) = update(state, Msg::FileSelected(csv_file("f.csv", "a\n1\n")));

    let send_id = sent
        .iter()
        .find_map(|effect| match effect {
            Effect::SendQuery { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("send effect");
    let upload_id = upload_request(&uploaded);
    assert_ne!(send_id, upload_id);

    let (state, _) = update(
        state,
        Msg::UploadResolved {
            request_id: upload_id,
            result: Err(RequestFailure::new("down")),
        },
    );
    let (state, _) = update(
        state,
        Msg::QueryResolved {
            request_id: send_id,
            result: Ok("a".to_string()),
        },
    );

    assert_eq!(
        state.transcript(),
        [
            Message::bot(GREETING),
            Message::bot(UPLOAD_ERROR_TEXT),
            Message::user("q"),
            Message::bot("a"),
        ]
    );
}
