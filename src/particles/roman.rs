//! Roman numerals for spectroscopic ionization states (`Fe XVIII`).

const NUMERALS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Largest value with a standard numeral.
pub const MAX: u32 = 3999;

pub fn to_roman(mut value: u32) -> Option<String> {
    if value == 0 || value > MAX {
        return None;
    }
    let mut out = String::new();
    for (n, numeral) in NUMERALS {
        while value >= n {
            out.push_str(numeral);
            value -= n;
        }
    }
    Some(out)
}

/// Parses a numeral in canonical form only; `IIII` and `VX` are rejected.
pub fn from_roman(text: &str) -> Option<u32> {
    if text.is_empty() || !text.chars().all(|c| "IVXLCDM".contains(c)) {
        return None;
    }
    let mut rest = text;
    let mut value = 0;
    for (n, numeral) in NUMERALS {
        while let Some(tail) = rest.strip_prefix(numeral) {
            value += n;
            rest = tail;
        }
    }
    if !rest.is_empty() {
        return None;
    }
    (to_roman(value).as_deref() == Some(text)).then_some(value)
}
