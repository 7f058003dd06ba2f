use std::io::Write;

use anyhow::{Context as _, Result};
use tracing::debug;

use particle_forge::AbstractParticle;

use super::{log_warnings, resolve_particle};
use crate::cli::{GlobalOptions, JsonArgs};
use crate::display::Context;
use crate::io::{create_output, load_reference_data};

pub fn run_json(args: JsonArgs, global: &GlobalOptions, _ctx: Context) -> Result<()> {
    let data = load_reference_data(global.data.as_deref())?;
    let particle = resolve_particle(&args.particle, data)?;
    log_warnings(particle.warnings());

    let mut output = create_output(args.output.as_deref())?;
    particle
        .json_dump(&mut output)
        .context("Failed to write the particle envelope")?;
    writeln!(output)?;
    output.flush()?;

    debug!(symbol = particle.symbol(), "wrote particle envelope");
    Ok(())
}
