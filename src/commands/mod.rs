//! # CLI Command Implementations
//!
//! One module per `mbed-project` subcommand. Each module defines an `Args`
//! struct derived with `clap` and an `execute` function that calls into the
//! `mbed_project` library.

use clap::Args;

use mbed_project::defaults::DEFAULT_MAX_RESOLUTION_ROUNDS;
use mbed_project::project::ResolveOptions;

pub mod checkout;
pub mod clone;
pub mod completions;
pub mod init;
pub mod libs;

/// Options for commands that fetch libraries.
#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Give up after this many library fetch rounds.
    ///
    /// Each round fetches every library found missing by the previous scan,
    /// so deeply nested dependencies need more rounds.
    #[arg(
        long,
        value_name = "N",
        env = "MBED_PROJECT_MAX_ROUNDS",
        default_value_t = DEFAULT_MAX_RESOLUTION_ROUNDS
    )]
    pub max_rounds: usize,
}

impl ResolveArgs {
    pub fn options(&self) -> ResolveOptions {
        ResolveOptions {
            max_rounds: self.max_rounds,
        }
    }
}
