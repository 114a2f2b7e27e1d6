// Root reducer. Pure: it only touches `AppState` and returns the side
// effects to run afterwards, so it can be driven directly from tests.
//
use crate::messages::{Command, Message};
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    // Delegate to domain-specific reducers; the first one that consumes the
    // message wins.
    if crate::reducers::chat::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::flow::update(state, &msg, &mut commands) {
        return commands;
    }

    log::warn!("Unhandled message: {:?}", msg);
    commands
}
