use tally_logging::{tally_debug, tally_info};

use crate::{parse_drop_payload, AppState, Effect, Msg, SessionError};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DropReceived(raw) => {
            let mut files = parse_drop_payload(&raw).into_iter();
            let Some(file) = files.next() else {
                tally_debug!("drop payload contained no paths");
                return (state, Vec::new());
            };
            let ignored = files.count();
            if ignored > 0 {
                tally_debug!("ignoring {} additional dropped file(s)", ignored);
            }
            let request = state.begin_read(file.display_name());
            tally_info!("reading {:?} (request {})", file.path, request);
            vec![Effect::ReadFile {
                request,
                path: file.path,
            }]
        }
        Msg::ModelSelected(key) => {
            if key == state.selected_model() {
                return (state, Vec::new());
            }
            tally_info!("model selected: {}", key);
            state.select_model(key);
            // Without buffered text the pending read picks the model up on completion.
            state.begin_count().into_iter().collect()
        }
        Msg::FileLoaded { request, result } => {
            if !state.is_current(request) {
                tally_debug!("discarding stale file read for request {}", request);
                return (state, Vec::new());
            }
            match result {
                Ok(text) => {
                    state.store_text(text);
                    state.begin_count().into_iter().collect()
                }
                Err(message) => {
                    let file_name = state.file_name().unwrap_or_default().to_string();
                    state.fail(SessionError::FileRead { file_name, message });
                    Vec::new()
                }
            }
        }
        Msg::CountFinished { request, result } => {
            if !state.is_current(request) {
                tally_debug!("discarding stale count for request {}", request);
                return (state, Vec::new());
            }
            match result {
                Ok(tally) => state.apply_tally(tally),
                Err(error) => state.fail(error),
            }
            Vec::new()
        }
    };

    (state, effects)
}
