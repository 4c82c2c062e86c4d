//! Drop mark-attachment anchors into UFO fonts from the command line.

use anchor_dropper::{core, logging};

fn main() {
    let cli_args = core::platform::get_cli_args();
    let _log_guard = logging::init(cli_args.verbose);
    if let Err(error) = core::run(cli_args) {
        core::platform::handle_error(error);
    }
}
