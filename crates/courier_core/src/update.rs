use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text.clone());
            vec![Effect::RequestSearch { text }]
        }
        Msg::DownloadClicked { index } => match state.download_target(index) {
            Some((id, label)) => {
                state.clear_banner();
                vec![Effect::RequestDownload { id, label }]
            }
            // Disabled affordance or a stale row number.
            None => Vec::new(),
        },
        Msg::QueryStateChanged(query) => {
            state.apply_query(query);
            Vec::new()
        }
        Msg::JobStateChanged {
            id,
            status,
            message,
        } => {
            state.apply_job(id, status, message);
            Vec::new()
        }
    };

    (state, effects)
}
