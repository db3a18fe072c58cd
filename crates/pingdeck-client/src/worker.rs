use std::sync::mpsc::Sender;
use std::thread;

use crate::dispatch::ApiClient;

/// Outcome of one dispatched call. `seq` identifies which action produced
/// it; events arrive in completion order, not dispatch order.
#[derive(Debug, Clone)]
pub enum CallEvent {
    Finished { seq: u64, display: String },
}

/// Runs one call on its own thread and delivers the rendered result over
/// the channel. Overlapping calls are neither ordered nor cancelled; the
/// receiver applies whatever finishes last.
pub fn spawn_call(client: &ApiClient, endpoint: &str, seq: u64, sender: Sender<CallEvent>) {
    let client = client.clone();
    let endpoint = endpoint.to_string();
    thread::spawn(move || {
        let display = client.call(&endpoint);
        let _ = sender.send(CallEvent::Finished { seq, display });
    });
}
