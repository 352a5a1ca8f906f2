#![deny(clippy::all, clippy::pedantic)]

pub mod posts;
pub mod session;
pub mod tags;

use blog_admin::application::confirm::{AssumeYes, Confirm};

use crate::io::TerminalConfirm;

/// `--yes` skips the prompt; otherwise the terminal is asked.
pub(crate) fn confirmer(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalConfirm)
    }
}
