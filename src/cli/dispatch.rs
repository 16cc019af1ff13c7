use anyhow::Result;
use disciplined::commands::{health, stub, validate, verify, Context};

use super::types::{Cli, Commands};

/// Run the selected command. `Ok(false)` means the command completed but
/// its check did not pass.
pub fn dispatch(cli: Cli) -> Result<bool> {
    let ctx = Context::load(cli.project_dir);

    match cli.command {
        Commands::Health { json } => health::health(&ctx, json),
        Commands::Status { json } => health::status(&ctx, json),
        Commands::Feature { name } => health::feature(&ctx, &name),
        Commands::Lock { reason } => health::lock(&ctx, &reason),
        Commands::Unlock => health::unlock(&ctx),
        Commands::Reset => health::reset(&ctx),
        Commands::Verify {
            task,
            threshold,
            json,
        } => verify::execute(&ctx, &task, threshold, json),
        Commands::Validate { tasks, specs, json } => {
            validate::execute(&ctx, tasks.as_deref(), specs.as_deref(), json)
        }
        Commands::Stub {
            file,
            threshold,
            json,
        } => stub::execute(&ctx, &file, threshold, json),
    }
}
