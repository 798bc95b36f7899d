pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use self::handlers::Outcome;
use prt_core::Result;

pub fn run(cli: Cli) -> Result<Outcome> {
    match cli.command {
        Commands::Split {
            file,
            parts,
            chunk_size,
            run,
            config,
            no_config,
        } => handlers::handle_split(
            file,
            parts,
            chunk_size,
            run,
            (!no_config).then_some(config),
        ),
        Commands::Stitch {
            file,
            out,
            hash_file,
            run,
        } => handlers::handle_stitch(file, out, hash_file, run),
        Commands::Resume { config, out } => handlers::handle_resume(config, out),
        Commands::List { file, run } => handlers::handle_list(file, run),
        Commands::Verify { file, hash_file } => handlers::handle_verify(file, hash_file),
    }
}
