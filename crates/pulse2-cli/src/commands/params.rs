//! Parameter listing command.

use clap::Args;
use pulse2_synth::VoiceParam;

/// List the voice's control-rate parameters.
#[derive(Args)]
pub struct ParamsArgs {
    /// Show only this parameter (string ID, e.g. `pulse_width`)
    pub name: Option<String>,
}

/// Run the params command.
pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let params: Vec<VoiceParam> = match &args.name {
        Some(name) => match VoiceParam::from_string_id(name) {
            Some(param) => vec![param],
            None => anyhow::bail!("Unknown parameter '{name}'"),
        },
        None => VoiceParam::ALL.to_vec(),
    };

    println!("Voice Parameters:\n");
    println!(
        "  {:<4} {:<12} {:<18} {:<7} {:>10} {:>10} {:>10}",
        "ID", "KEY", "NAME", "SHORT", "MIN", "MAX", "DEFAULT"
    );
    for param in params {
        let d = param.descriptor();
        let suffix = d.unit.suffix();
        println!(
            "  {:<4} {:<12} {:<18} {:<7} {:>10} {:>10} {:>10}",
            d.id.0,
            d.string_id,
            d.name,
            d.short_name,
            format!("{}{suffix}", d.min),
            format!("{}{suffix}", d.max),
            format!("{}{suffix}", d.default),
        );
    }
    Ok(())
}
