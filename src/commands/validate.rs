use crate::Host;
use crate::Result;
use crate::commands::common::{CommonArgs, init_logging};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Load a configuration and report whether it is usable
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or parsed
pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    init_logging(args.common.log_level);

    match args.common.load_config(host) {
        Ok(_) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = &args.common.config {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else {
                let _ = writeln!(host.output(), "Using default configuration (no config file given)");
            }
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
