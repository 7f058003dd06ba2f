use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = HintCollector::collect(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn new() -> Self {
        Self {
            hints: Vec::new(),
            has_typed_hints: false,
        }
    }

    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self::new();

        collector.collect_particle_hints(err);
        collector.collect_io_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        if collector.hints.is_empty() {
            None
        } else {
            Some(collector.hints)
        }
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_particle_hints(&mut self, err: &Error) {
        use particle_forge::Error as ParticleError;

        let Some(particle_err) = err.downcast_ref::<ParticleError>() else {
            return;
        };

        self.mark_typed();

        match particle_err {
            ParticleError::InvalidParticle { input, .. } => {
                self.add(format!("'{input}' is not a recognised particle"));
                self.add("Element symbols are case sensitive: Fe, not FE or fe");
                self.add("Isotopes are written 'Fe-56', or given with -A/--mass-number");
                self.add("Charges are written 'Fe 3+', 'Fe+++' or 'Fe IV', or given with -Z/--charge");
            }

            ParticleError::InvalidElement { .. } => {
                self.add("This attribute exists only for atoms, isotopes, and ions");
            }

            ParticleError::InvalidIsotope { .. } => {
                self.add("Give a mass number as 'Fe-56' or with -A/--mass-number");
            }

            ParticleError::InvalidIon { .. } => {
                self.add("The requested charge state cannot exist for this element");
                self.add("Positive charges cannot exceed the atomic number");
            }

            ParticleError::Charge { .. } => {
                self.add("Give a charge as 'Fe 2+' or with -Z/--charge");
            }

            ParticleError::MissingAtomicData { .. } => {
                self.add("The reference tables hold no value for this attribute");
                self.add("Supply extended tables with --data <FILE>");
            }

            ParticleError::Atomic(msg) => {
                if msg.contains("categor") {
                    let known: Vec<_> = particle_forge::Category::iter()
                        .map(|c| c.name())
                        .collect();
                    self.add(format!("Known categories: {}", known.join(", ")));
                } else {
                    self.add("Check that both sides of the comparison are particles");
                }
            }

            ParticleError::InvalidArgument(_) => {
                self.add("Counts must be positive integers");
            }

            ParticleError::ReferenceData(_) => {
                self.add("The --data file must be TOML with [[element]], [[isotope]] and [[particle]] arrays");
                self.add("Symbols, names, and aliases must be unique across the tables");
            }

            ParticleError::Json(_) => {
                self.add("Input must be a JSON object holding a 'plasmapy_particle' envelope");
                self.add("Generate one with `pforge json <PARTICLE>`");
            }
        }
    }

    fn collect_io_hints(&mut self, err: &Error) {
        let Some(io_err) = err.downcast_ref::<io::Error>() else {
            return;
        };

        self.mark_typed();

        use std::io::ErrorKind;

        match io_err.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::InvalidData => {
                self.add("File is not valid UTF-8 text");
            }

            ErrorKind::BrokenPipe => {
                self.add("Output consumer terminated early");
                self.add("This may occur when piping to commands like `head`");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("terminal") || msg.contains("stdin") {
            self.add("Input appears to be from a terminal");
            self.add("Pass a file path or pipe an envelope to stdin");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    err.chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase()
}
