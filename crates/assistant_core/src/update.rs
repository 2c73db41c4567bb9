use crate::{AppState, Effect, Key, Msg, SelectedFile, UPLOAD_ERROR_TEXT};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DraftChanged(text) => {
            state.set_draft(text);
            Vec::new()
        }
        Msg::KeyPressed(Key::Enter) | Msg::SendClicked => submit(&mut state),
        Msg::KeyPressed(Key::Other) => Vec::new(),
        Msg::FileSelected(file) => select(&mut state, file),
        Msg::FileDropped(file) => {
            state.set_drag_active(false);
            select(&mut state, file)
        }
        Msg::DragEntered | Msg::DragOver => {
            state.set_drag_active(true);
            Vec::new()
        }
        Msg::DragLeft => {
            state.set_drag_active(false);
            Vec::new()
        }
        Msg::PreviewToggled => {
            state.toggle_preview();
            Vec::new()
        }
        Msg::QueryResolved { request_id, result } => {
            // Send failures leave the transcript untouched; the runner logs them.
            if state.resolve_query(request_id, result.ok()) {
                vec![Effect::ScrollTranscriptToBottom]
            } else {
                Vec::new()
            }
        }
        Msg::UploadResolved { result, .. } => match result {
            Ok(()) => Vec::new(),
            Err(_) => {
                state.append_bot(UPLOAD_ERROR_TEXT);
                vec![Effect::ScrollTranscriptToBottom]
            }
        },
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    match state.take_draft_as_query() {
        Some((request_id, prompt)) => vec![Effect::SendQuery { request_id, prompt }],
        None => Vec::new(),
    }
}

fn select(state: &mut AppState, file: SelectedFile) -> Vec<Effect> {
    let upload = file.clone();
    let request_id = state.load_file(file);
    vec![Effect::UploadFile {
        request_id,
        file: upload,
    }]
}
