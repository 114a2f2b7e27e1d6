use crate::messages::{Command, Message};
use crate::network::api_client::ApiClient;
use crate::state::dispatch_global_message;

/// Run one side effect. Network commands spawn a local future and report
/// back through `dispatch_global_message`; nothing here touches `AppState`
/// directly.
pub fn execute(cmd: Command) {
    match cmd {
        Command::RunAgent { seq, mode, task } => {
            wasm_bindgen_futures::spawn_local(async move {
                let msg = match ApiClient::run_agent(mode, &task).await {
                    Ok(response) => Message::AgentResponseReceived {
                        seq,
                        mode,
                        response,
                    },
                    Err(error) => Message::AgentRequestFailed { seq, error },
                };
                dispatch_global_message(msg);
            });
        }
        Command::CheckHealth => {
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = ApiClient::check_health().await;
                dispatch_global_message(Message::BackendHealthChecked(outcome));
            });
        }
    }
}
