//! Configuration message inspection command.

use clap::Args;
use pulse2_config::{parse_message, to_value};

/// Parse a JSON configuration message and show what the voice would apply.
#[derive(Args)]
pub struct MessageArgs {
    /// Message JSON, e.g. '{"osc1Type":"square","sync12":true}'
    pub json: String,
}

/// Run the message command.
pub fn run(args: MessageArgs) -> anyhow::Result<()> {
    let parsed = parse_message(&args.json)?;

    if parsed.update.is_empty() {
        println!("Update: (no usable fields)");
    } else {
        println!(
            "Update: {}",
            serde_json::to_string_pretty(&to_value(&parsed.update))?
        );
    }

    if !parsed.rejected.is_empty() {
        println!("Rejected: {}", parsed.rejected.join(", "));
    }
    Ok(())
}
