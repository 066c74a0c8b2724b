//! Support modules for the pull request comment digest BDD tests.

pub(crate) mod payloads;
pub(crate) mod state;

pub(crate) use payloads::{review_page, review_thread};
pub(crate) use state::DigestState;
