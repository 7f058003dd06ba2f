use std::io::{self, Write};

use anyhow::{Context as _, Result, bail};

use particle_forge::{
    AbstractParticle, AnyParticle, Error, Particle, ParticleOptions, Quantity, json_load_particle,
};

use super::show::print_particle;
use crate::cli::{DecodeArgs, GlobalOptions};
use crate::display::{Context, print_kv_table};
use crate::io::{load_reference_data, open_input, stdin_is_tty};

pub fn run_decode(args: DecodeArgs, global: &GlobalOptions, _ctx: Context) -> Result<()> {
    if args.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: pforge decode <FILE> or pipe an envelope via stdin."
        );
    }

    let input = open_input(args.input.as_deref())?;
    let decoded =
        json_load_particle(input).context("Failed to decode the particle envelope")?;

    let mut out = io::stdout().lock();
    match decoded {
        AnyParticle::Particle(particle) => {
            // Re-resolve so that --data tables apply to the decoded symbol.
            let particle = if global.data.is_some() {
                let data = load_reference_data(global.data.as_deref())?;
                Particle::with_data(&particle, ParticleOptions::default(), data)?
            } else {
                particle
            };
            print_particle(&mut out, &particle);
        }
        other => {
            let rows = [
                ("Type", other.type_name().to_string()),
                ("Mass", quantity_cell(other.mass())),
                ("Charge", quantity_cell(other.charge())),
            ];
            print_kv_table(&mut out, &other.to_string(), &rows);
        }
    }

    out.flush()?;
    Ok(())
}

fn quantity_cell(value: Result<Quantity, Error>) -> String {
    match value {
        Ok(q) => q.to_string(),
        Err(e) => format!("<{}>", e.kind()),
    }
}
