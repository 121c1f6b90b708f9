pub mod add;
pub mod ask;
pub mod config;
pub mod delete;
pub mod health;
pub mod list;
pub mod run;
pub mod similar;

use kbdesk_core::session::describe_failure;

/// Turn a request failure into the same line the console shows
pub(crate) fn failure(err: kbdesk_core::Error) -> anyhow::Error {
    anyhow::anyhow!(describe_failure(&err))
}
