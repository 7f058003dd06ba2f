mod category;
mod decode;
mod json;
mod show;

use category::run_category;
use decode::run_decode;
use json::run_json;
use show::run_show;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::warn;

use particle_forge::{Particle, ParticleArg, ParticleOptions, ReferenceData, Warning};

use crate::cli::{Command, GlobalOptions, ParticleSpec};
use crate::display::Context;

pub fn dispatch(command: Command, global: &GlobalOptions, ctx: Context) -> Result<()> {
    match command {
        Command::Show(args) => run_show(args, global, ctx),
        Command::Json(args) => run_json(args, global, ctx),
        Command::Decode(args) => run_decode(args, global, ctx),
        Command::Category(args) => run_category(args, global, ctx),
    }
}

/// Resolves the positional particle, reading a bare integer as an atomic
/// number.
fn resolve_particle(spec: &ParticleSpec, data: Arc<ReferenceData>) -> Result<Particle> {
    let arg = match spec.particle.parse::<u8>() {
        Ok(z) => ParticleArg::AtomicNumber(z),
        Err(_) => ParticleArg::from(spec.particle.as_str()),
    };
    let options = ParticleOptions {
        mass_number: spec.mass_number,
        charge: spec.charge,
    };
    Particle::with_data(arg, options, data)
        .with_context(|| format!("Failed to resolve particle '{}'", spec.particle))
}

fn log_warnings(warnings: &[Warning]) {
    for warning in warnings {
        warn!(kind = warning.kind(), "{}", warning.message());
    }
}
