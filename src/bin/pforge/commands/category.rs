use anyhow::Result;

use particle_forge::CategoryQuery;

use super::{log_warnings, resolve_particle};
use crate::cli::{CategoryArgs, GlobalOptions, QueryOptions};
use crate::display::Context;
use crate::io::load_reference_data;

pub fn run_category(args: CategoryArgs, global: &GlobalOptions, _ctx: Context) -> Result<()> {
    let data = load_reference_data(global.data.as_deref())?;
    let particle = resolve_particle(&args.particle, data)?;
    log_warnings(particle.warnings());

    let matched = particle.is_category(&build_query(&args.query))?;
    println!("{matched}");
    Ok(())
}

fn tags(list: &[String]) -> Vec<&str> {
    list.iter().map(String::as_str).collect()
}

fn build_query(options: &QueryOptions) -> CategoryQuery {
    CategoryQuery::new()
        .require(&tags(&options.require))
        .any_of(&tags(&options.any_of))
        .exclude(&tags(&options.exclude))
}
