//! HTTP dispatch against the local probe API.

pub mod dispatch;
pub mod worker;

pub use dispatch::{ApiClient, API_ERROR_MESSAGE, DEFAULT_BASE_URL};
pub use worker::{spawn_call, CallEvent};
