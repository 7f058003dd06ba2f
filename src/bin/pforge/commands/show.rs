use std::fmt::Display;
use std::io::{self, Write};

use anyhow::Result;

use particle_forge::{Error, HalfLife, Particle};

use super::resolve_particle;
use crate::cli::{GlobalOptions, ShowArgs};
use crate::display::{Context, print_kv_table, print_list};
use crate::io::load_reference_data;

pub fn run_show(args: ShowArgs, global: &GlobalOptions, _ctx: Context) -> Result<()> {
    let data = load_reference_data(global.data.as_deref())?;
    let particle = resolve_particle(&args.particle, data)?;

    let mut out = io::stdout().lock();
    print_particle(&mut out, &particle);
    out.flush()?;
    Ok(())
}

/// Attribute table, category list, and warnings for one particle.
pub fn print_particle(out: &mut impl Write, particle: &Particle) {
    let mut warnings: Vec<String> = particle
        .warnings()
        .iter()
        .map(|w| w.to_string())
        .collect();
    let rows = attribute_rows(particle, &mut warnings);

    print_kv_table(out, &format!("Particle {particle}"), &rows);

    let categories: Vec<_> = particle.categories().iter().map(|c| c.name()).collect();
    if !categories.is_empty() {
        print_list(out, "Categories", &[categories.join(", ")]);
    }

    print_list(out, "Warnings", &warnings);
}

/// One row per attribute: the rendered value, or the kind of error the
/// accessor raises.
fn attribute_rows(
    particle: &Particle,
    warnings: &mut Vec<String>,
) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Symbol", particle.symbol().to_string()),
        ("Element", optional(particle.element().map(|e| e.symbol()))),
        ("Isotope", optional(particle.isotope())),
        ("Ionic symbol", optional(particle.ionic_symbol())),
        (
            "Roman symbol",
            match particle.roman_symbol() {
                Ok(symbol) => optional(symbol),
                Err(e) => failed(&e),
            },
        ),
        ("Element name", cell(particle.element_name())),
        ("Isotope name", cell(particle.isotope_name())),
        ("Atomic number", cell(particle.atomic_number())),
        ("Mass number", cell(particle.mass_number())),
        ("Neutron number", cell(particle.neutron_number())),
        ("Charge number", cell(particle.integer_charge())),
        ("Charge", cell(particle.charge())),
        ("Mass", cell(particle.mass())),
        ("Nuclide mass", cell(particle.nuclide_mass())),
        ("Std atomic weight", cell(particle.standard_atomic_weight())),
        ("Mass energy", cell(particle.mass_energy())),
        ("Binding energy", cell(particle.binding_energy())),
    ];

    let half_life = match particle.half_life() {
        Ok(warned) => {
            warnings.extend(warned.warnings.iter().map(|w| w.to_string()));
            match warned.into_value() {
                HalfLife::Bound(text) => text,
                seconds => optional(seconds.as_quantity()),
            }
        }
        Err(e) => failed(&e),
    };
    rows.push(("Half-life", half_life));
    rows.push(("Abundance", cell(particle.isotopic_abundance())));

    rows.extend([
        ("Spin", cell(particle.spin())),
        ("Lepton number", cell(particle.lepton_number())),
        ("Baryon number", cell(particle.baryon_number())),
    ]);

    match particle.periodic_table() {
        Ok(table) => rows.extend([
            (
                "Periodic table",
                format!(
                    "group {}, period {}, {}-block",
                    table.group, table.period, table.block
                ),
            ),
            ("Series", table.category.to_string()),
        ]),
        Err(e) => rows.push(("Periodic table", failed(&e))),
    }

    rows
}

fn cell<T: Display>(value: Result<T, Error>) -> String {
    match value {
        Ok(v) => v.to_string(),
        Err(e) => failed(&e),
    }
}

fn failed(err: &Error) -> String {
    format!("<{}>", err.kind())
}

fn optional<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_forge::Quantity;

    fn row<'a>(rows: &'a [(&str, String)], key: &str) -> &'a str {
        rows.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn inapplicable_attributes_show_their_error_kind() {
        let electron = Particle::new("e-").unwrap();
        let mut warnings = Vec::new();
        let rows = attribute_rows(&electron, &mut warnings);

        assert_eq!(row(&rows, "Symbol"), "e-");
        assert_eq!(row(&rows, "Element"), "-");
        assert_eq!(row(&rows, "Charge number"), "-1");
        assert_eq!(
            row(&rows, "Atomic number"),
            format!("<{}>", electron.atomic_number().unwrap_err().kind())
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn ions_show_periodic_placement() {
        let iron = Particle::new("Fe-56 3+").unwrap();
        let mut warnings = Vec::new();
        let rows = attribute_rows(&iron, &mut warnings);

        assert_eq!(row(&rows, "Mass number"), "56");
        assert_eq!(row(&rows, "Neutron number"), "30");
        assert_eq!(row(&rows, "Roman symbol"), "Fe-56 IV");
        assert_eq!(row(&rows, "Periodic table"), "group 8, period 4, d-block");
        assert_eq!(row(&rows, "Abundance"), "0.91754");
        assert_eq!(
            row(&rows, "Half-life"),
            Quantity::seconds(f64::INFINITY).to_string()
        );
    }

    #[test]
    fn bounded_half_lives_add_a_warning() {
        let hydrogen = Particle::new("H-5").unwrap();
        let mut warnings = Vec::new();
        let rows = attribute_rows(&hydrogen, &mut warnings);

        assert!(!row(&rows, "Half-life").starts_with('<'));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("MissingAtomicDataWarning"));
    }

    #[test]
    fn the_full_report_renders() {
        let mut buf = Vec::new();
        print_particle(&mut buf, &Particle::new("alpha").unwrap());
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Particle He-4 2+"));
        assert!(text.contains("Categories"));
        assert!(!text.contains("Warnings"));
    }
}
