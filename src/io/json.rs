//! The JSON envelope that persists particle values.
//!
//! ```text
//! {"plasmapy_particle": {"type": "CustomParticle",
//!                        "module": "particle_forge.particles",
//!                        "date_created": "2026-10-19 12:00:00 UTC",
//!                        "__init__": {"args": [], "kwargs": {"mass": "5.12 kg"}}}}
//! ```
//!
//! Decoding replays `args` and `kwargs` through the named variant's
//! constructor. Quantities travel as `"<value> <unit>"` strings; bare
//! non-finite numbers are written as `"nan"`, `"inf"`, or `"-inf"`.

use std::borrow::Cow;
use std::io::{Read, Write};

use chrono::Utc;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::model::units::format_value;
use crate::particles::{
    AnyParticle, CustomParticle, DimensionlessParticle, Error, Particle, ParticleOptions,
    QuantityArg,
};

pub const ENVELOPE_KEY: &str = "plasmapy_particle";

const MODULE: &str = "particle_forge.particles";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Tokens some JSON writers emit for non-finite floats, and the strings
/// they are read as. `-Infinity` must be tried before `Infinity`.
const NON_FINITE_LITERALS: [(&str, &str); 3] = [
    ("-Infinity", "\"-inf\""),
    ("Infinity", "\"inf\""),
    ("NaN", "\"nan\""),
];

/// Positional and keyword constructor arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitArgs {
    pub args: Vec<Value>,
    pub kwargs: Map<String, Value>,
}

impl InitArgs {
    /// The keyword argument `name`, or else the positional one at `index`.
    fn get(&self, index: usize, name: &str) -> Option<&Value> {
        self.kwargs
            .get(name)
            .or_else(|| self.args.get(index))
            .filter(|v| !v.is_null())
    }
}

/// A float as JSON: a number when finite, otherwise its text form.
pub fn encode_float(value: f64) -> Value {
    if value.is_finite() {
        json!(value)
    } else {
        Value::String(format_value(value))
    }
}

fn decode_float(value: Option<&Value>, name: &str) -> Result<Option<f64>, Error> {
    match value {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| Error::invalid_particle(text.as_str(), format!("invalid {name}"))),
        Some(other) => Err(Error::invalid_particle(
            other.to_string(),
            format!("{name} must be a number"),
        )),
    }
}

fn envelope(type_name: &str, init: &InitArgs) -> Value {
    json!({
        ENVELOPE_KEY: {
            "type": type_name,
            "module": MODULE,
            "date_created": Utc::now().format(DATE_FORMAT).to_string(),
            "__init__": {
                "args": init.args,
                "kwargs": init.kwargs,
            },
        }
    })
}

pub fn dumps(type_name: &str, init: &InitArgs) -> Result<String, Error> {
    Ok(serde_json::to_string(&envelope(type_name, init))?)
}

pub fn dump<W: Write>(type_name: &str, init: &InitArgs, writer: W) -> Result<(), Error> {
    serde_json::to_writer(writer, &envelope(type_name, init))?;
    Ok(())
}

/// Decodes a particle from envelope text.
pub fn json_loads_particle(text: &str) -> Result<AnyParticle, Error> {
    let value: Value = serde_json::from_str(&quote_non_finite(text))?;
    decode(&value)
}

/// Decodes a particle from a reader holding envelope text.
pub fn json_load_particle<R: Read>(mut reader: R) -> Result<AnyParticle, Error> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::Json(e.to_string()))?;
    json_loads_particle(&text)
}

/// Rewrites bare `NaN`/`Infinity` tokens outside string literals as
/// strings, so the text is valid JSON.
fn quote_non_finite(text: &str) -> Cow<'_, str> {
    if !text.contains("NaN") && !text.contains("Infinity") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some((token, replacement)) = NON_FINITE_LITERALS
            .iter()
            .find(|(token, _)| rest.starts_with(token))
        {
            out.push_str(replacement);
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    Cow::Owned(out)
}

fn decode(value: &Value) -> Result<AnyParticle, Error> {
    let body = value
        .get(ENVELOPE_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| Error::invalid_element(ENVELOPE_KEY, "is not the top-level key"))?;

    let type_name = body
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::invalid_element(ENVELOPE_KEY, "envelope has no 'type' key"))?;
    let init = body
        .get("__init__")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::invalid_element(ENVELOPE_KEY, "envelope has no '__init__' key"))?;

    let init = InitArgs {
        args: init
            .get("args")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        kwargs: init
            .get("kwargs")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default(),
    };

    debug!(type_name, "decoding particle envelope");

    match type_name {
        "Particle" => decode_particle(&init).map(AnyParticle::Particle),
        "CustomParticle" => decode_custom(&init).map(AnyParticle::Custom),
        "DimensionlessParticle" => decode_dimensionless(&init).map(AnyParticle::Dimensionless),
        other => Err(Error::invalid_particle(other, "unknown particle type")),
    }
}

fn decode_particle(init: &InitArgs) -> Result<Particle, Error> {
    let mut options = ParticleOptions::new();
    if let Some(value) = init.kwargs.get("mass_numb").filter(|v| !v.is_null()) {
        let mass_number = value
            .as_u64()
            .and_then(|a| u16::try_from(a).ok())
            .ok_or_else(|| Error::invalid_particle(value.to_string(), "invalid mass number"))?;
        options = options.mass_number(mass_number);
    }
    if let Some(value) = init.kwargs.get("Z").filter(|v| !v.is_null()) {
        let charge = value
            .as_i64()
            .and_then(|z| i32::try_from(z).ok())
            .ok_or_else(|| Error::invalid_particle(value.to_string(), "invalid charge number"))?;
        options = options.charge(charge);
    }

    match init.get(0, "argument") {
        Some(Value::String(symbol)) => Particle::with_options(symbol.as_str(), options),
        Some(Value::Number(n)) => {
            let z = n
                .as_u64()
                .and_then(|z| u8::try_from(z).ok())
                .ok_or_else(|| Error::invalid_particle(n.to_string(), "invalid atomic number"))?;
            Particle::with_options(z, options)
        }
        Some(other) => Err(Error::invalid_particle(
            other.to_string(),
            "expected a particle symbol",
        )),
        None => Err(Error::invalid_particle("", "no particle argument")),
    }
}

fn quantity_arg(value: Option<&Value>) -> Result<Option<QuantityArg>, Error> {
    match value {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(QuantityArg::Text(text.clone()))),
        Some(Value::Number(n)) => Ok(n.as_f64().map(QuantityArg::Number)),
        Some(other) => Err(Error::invalid_particle(
            other.to_string(),
            "expected a quantity string or a number",
        )),
    }
}

fn decode_custom(init: &InitArgs) -> Result<CustomParticle, Error> {
    let mut builder = CustomParticle::builder();
    if let Some(mass) = quantity_arg(init.get(0, "mass"))? {
        builder = builder.mass(mass);
    }
    if let Some(charge) = quantity_arg(init.get(1, "charge"))? {
        builder = builder.charge(charge);
    }
    builder.build()
}

fn decode_dimensionless(init: &InitArgs) -> Result<DimensionlessParticle, Error> {
    let mut builder = DimensionlessParticle::builder();
    if let Some(mass) = decode_float(init.get(0, "mass"), "mass")? {
        builder = builder.mass(mass);
    }
    if let Some(charge) = decode_float(init.get(1, "charge"), "charge")? {
        builder = builder.charge(charge);
    }
    builder.build()
}
