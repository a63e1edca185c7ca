use std::time::Instant;

use super::{
    action::{Action, UpdateResult},
    command::Command,
    features,
    state::AppState,
};

pub fn update(state: &mut AppState, action: Action) -> Option<Command> {
    if let Action::Tick = action {
        state.frame_count = state.frame_count.wrapping_add(1);
        state.clear_expired_status(Instant::now());
        return None;
    }

    // Esc on the error modal only dismisses it.
    if state.last_error.is_some() && action == Action::CancelMode {
        state.last_error = None;
        return None;
    }

    let handlers: [fn(&mut AppState, &Action) -> UpdateResult; 7] = [
        features::navigation::update,
        features::catalog::update,
        features::filter::update,
        features::params::update,
        features::output::update,
        features::favorites::update,
        features::ui::update,
    ];
    for handler in handlers {
        if let UpdateResult::Handled(cmd) = handler(state, &action) {
            return cmd;
        }
    }
    None
}
