use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::MirrorRequested { source, target } => {
            let source = source.trim();
            let target = target.trim();
            if source.is_empty() || target.is_empty() || state.phase().is_active() {
                return (state, Vec::new());
            }
            state.start_run(source.to_string(), target.to_string());
            vec![Effect::StartMirror {
                source: source.to_string(),
                target: target.to_string(),
            }]
        }
        Msg::ScanStarted => {
            state.mark_scanning();
            Vec::new()
        }
        Msg::ScanCompleted { count } => {
            state.set_discovered(count);
            Vec::new()
        }
        Msg::FileFinished { ok } => {
            state.apply_file_finished(ok);
            Vec::new()
        }
        Msg::MirrorCompleted { ok, skipped, total } => {
            state.finish(ok, skipped, total);
            Vec::new()
        }
        Msg::MirrorFailed(reason) => {
            state.fail(reason);
            Vec::new()
        }
        Msg::CancelClicked => {
            if state.phase().is_active() {
                vec![Effect::Cancel]
            } else {
                Vec::new()
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
