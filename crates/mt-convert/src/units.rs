//! Unit conversions.
//!
//! Conversions are stored as expressions in the variable `a` (the amount in
//! the source unit). When no direct conversion exists, a single intermediary
//! unit is tried.

use std::collections::BTreeSet;
use std::fmt;

use crate::expr::{Expr, Variables};
use crate::{Error, Result};

/// Alternative spellings accepted for units.
const ALIASES: &[(&str, &str)] = &[
    ("Gal", "gal"),
    ("ml", "mL"),
    ("l", "L"),
    ("inch", "in"),
    ("mile", "mi"),
    ("miles", "mi"),
    ("sqft", "ft^2"),
    ("ft2", "ft^2"),
    ("sqm", "m^2"),
    ("m2", "m^2"),
    ("Acre", "acre"),
    ("ac", "acre"),
    ("hec", "hectare"),
    ("tsp", "teaspoon"),
    ("tbls", "tablespoon"),
    ("tbsp", "tablespoon"),
    ("lemons", "lemon"),
    ("baking-soda", "bakingsoda"),
    ("baking-powder", "bakingpowder"),
];

/// `(from, to, material, rule)`. A rule starting with `RANGE` holds two
/// expressions bounding the result.
const TABLE: &[(&str, &str, Option<&str>, &str)] = &[
    ("C", "F", None, "(a*1.8)+32"),
    ("F", "C", None, "(a-32)/1.8"),
    ("g", "mL", Some("water"), "a"),
    ("g", "L", Some("water"), "a/1000"),
    ("acre", "hectare", None, "a*0.404686"),
    ("hectare", "acre", None, "a/0.404686"),
    ("acre", "ft^2", None, "a*43560.04"),
    ("ft^2", "acre", None, "a/43560.04"),
    ("hectare", "ft^2", None, "a*107639.1"),
    ("ft^2", "hectare", None, "a/107639.1"),
    ("m", "ft", None, "a*3.28084"),
    ("km", "mi", None, "a*0.6213712"),
    ("mi", "km", None, "a/0.6213712"),
    ("m", "km", None, "a/1000"),
    ("km", "m", None, "a*1000"),
    ("m", "mm", None, "a*1000"),
    ("mm", "m", None, "a/1000"),
    ("ft", "m", None, "a/3.28084"),
    ("ft", "in", None, "a*12"),
    ("in", "ft", None, "a/12"),
    ("in", "mm", None, "a*25.4"),
    ("mm", "in", None, "a/25.4"),
    ("m^2", "ft^2", None, "a*10.76390999"),
    ("ft^2", "m^2", None, "a/10.76390999"),
    ("ft^2", "L", None, "a*28.31685"),
    ("L", "ft^2", None, "a/28.31685"),
    ("pint", "cup", None, "a*2"),
    ("cup", "pint", None, "a/2"),
    ("quart", "cup", None, "a*4"),
    ("cup", "quart", None, "a/4"),
    ("cup", "L", None, "a*0.236587524"),
    ("L", "cup", None, "a/0.236587524"),
    ("gal", "L", None, "a*4.54609"),
    ("L", "gal", None, "a/4.54609"),
    ("L", "mL", None, "a*1000"),
    ("mL", "L", None, "a/1000"),
    ("tablespoon", "teaspoon", None, "a*3"),
    ("teaspoon", "tablespoon", None, "a/3"),
    ("tablespoon", "cup", None, "a*0.0625"),
    ("cup", "tablespoon", None, "a/0.0625"),
    ("teaspoon", "cup", None, "a*0.02083333156038129"),
    ("cup", "teaspoon", None, "a/0.02083333156038129"),
    ("kg", "pound", None, "a*2.204623"),
    ("pound", "kg", None, "a/2.204623"),
    ("lemon", "tablespoon", None, "RANGE a*4 a*5"),
    ("tablespoon", "lemon", None, "RANGE a/4 a/5"),
    ("lemon", "cup", None, "RANGE a*1/4 a*1/3"),
    ("cup", "lemon", None, "RANGE a/(1/4) a/(1/3)"),
    ("cup", "egg", None, "a*5"),
    ("egg", "cup", None, "a/5"),
    ("bakingsoda", "bakingpowder", None, "a*4"),
    ("bakingpowder", "bakingsoda", None, "a/4"),
];

/// Resolve an alias to its canonical unit name.
pub fn canonical_unit(unit: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == unit)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(unit)
}

/// A converted amount: a single value or a range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Single(f64),
    Range(f64, f64),
}

impl Value {
    /// Range endpoints in ascending order; a single value is both ends.
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            Value::Single(v) => (v, v),
            Value::Range(a, b) if a <= b => (a, b),
            Value::Range(a, b) => (b, a),
        }
    }
}

#[derive(Debug, Clone)]
enum Rule {
    Single(Expr),
    Range(Expr, Expr),
}

impl Rule {
    fn parse(text: &str) -> Result<Self> {
        match text.strip_prefix("RANGE") {
            Some(rest) => {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                match parts.as_slice() {
                    [lo, hi] => Ok(Rule::Range(Expr::parse(lo)?, Expr::parse(hi)?)),
                    _ => Err(Error::BadArguments(format!(
                        "range rule needs two expressions: {}",
                        text
                    ))),
                }
            }
            None => Ok(Rule::Single(Expr::parse(text)?)),
        }
    }

    fn apply_to(&self, amount: f64) -> Result<Value> {
        let mut vars = Variables::new();
        vars.insert("a".to_string(), amount);
        match self {
            Rule::Single(expr) => Ok(Value::Single(expr.eval(&vars)?)),
            Rule::Range(lo, hi) => Ok(Value::Range(lo.eval(&vars)?, hi.eval(&vars)?)),
        }
    }

    fn apply(&self, value: Value) -> Result<Value> {
        match value {
            Value::Single(v) => self.apply_to(v),
            Value::Range(a, b) => {
                let (a_lo, a_hi) = self.apply_to(a)?.bounds();
                let (b_lo, b_hi) = self.apply_to(b)?.bounds();
                Ok(Value::Range(a_lo.min(b_lo), a_hi.max(b_hi)))
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    from: &'static str,
    to: &'static str,
    material: Option<&'static str>,
    rule: Rule,
}

/// A resolved chain of one or two conversion steps.
#[derive(Debug, Clone)]
pub struct Conversion<'t> {
    steps: Vec<&'t Entry>,
}

impl Conversion<'_> {
    /// Units passed through, including both ends.
    pub fn units(&self) -> Vec<&str> {
        let mut units: Vec<&str> = self.steps.iter().map(|e| e.from).collect();
        if let Some(last) = self.steps.last() {
            units.push(last.to);
        }
        units
    }

    /// Convert an amount.
    pub fn apply(&self, amount: f64) -> Result<Value> {
        let mut value = Value::Single(amount);
        for step in &self.steps {
            value = step.rule.apply(value)?;
        }
        Ok(value)
    }
}

/// The conversion table.
#[derive(Debug, Clone)]
pub struct ConversionTable {
    entries: Vec<Entry>,
}

impl ConversionTable {
    /// The built-in table.
    pub fn standard() -> Result<Self> {
        let entries = TABLE
            .iter()
            .map(|&(from, to, material, rule)| {
                Ok(Entry {
                    from,
                    to,
                    material,
                    rule: Rule::parse(rule)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    fn direct(&self, from: &str, to: &str, material: Option<&str>) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.from == from && e.to == to && e.material == material)
    }

    /// Find a conversion between canonical unit names.
    ///
    /// Material-specific conversions must match directly. Otherwise one
    /// intermediary unit is allowed; when several would work the
    /// lexicographically smallest is used.
    pub fn lookup(&self, from: &str, to: &str, material: Option<&str>) -> Result<Conversion<'_>> {
        if let Some(entry) = self.direct(from, to, material) {
            return Ok(Conversion { steps: vec![entry] });
        }

        let unknown = || Error::UnknownConversion {
            from: from.to_string(),
            to: to.to_string(),
        };
        if material.is_some() {
            return Err(unknown());
        }

        let reachable: BTreeSet<&str> = self
            .entries
            .iter()
            .filter(|e| e.material.is_none() && e.from == from)
            .map(|e| e.to)
            .collect();
        let reaching: BTreeSet<&str> = self
            .entries
            .iter()
            .filter(|e| e.material.is_none() && e.to == to)
            .map(|e| e.from)
            .collect();

        let common = reachable
            .intersection(&reaching)
            .next()
            .copied()
            .ok_or_else(unknown)?;
        log::debug!("converting {} to {} via {}", from, to, common);

        match (self.direct(from, common, None), self.direct(common, to, None)) {
            (Some(first), Some(second)) => Ok(Conversion {
                steps: vec![first, second],
            }),
            _ => Err(unknown()),
        }
    }
}

/// A parsed `amount from to unit [of material]` request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// The amount as typed; may be an expression.
    pub amount: String,
    pub from: String,
    pub to: String,
    pub material: Option<String>,
}

impl Request {
    /// Parse command arguments: `amount from to unit [of material]`.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let args: Vec<&str> = args.iter().map(|s| s.as_ref()).collect();
        if !(4..=6).contains(&args.len()) {
            return Err(Error::BadArguments(format!(
                "expected 4 to 6 arguments, got {}",
                args.len()
            )));
        }
        if args[2] != "to" {
            return Err(Error::BadArguments(
                "the word \"to\" not in the correct place (3rd arg)".to_string(),
            ));
        }
        let material = match args.len() {
            4 => None,
            6 if args[4] == "of" => Some(args[5].to_string()),
            6 => {
                return Err(Error::BadArguments(
                    "the word \"of\" not in the correct place (5th arg)".to_string(),
                ))
            }
            _ => {
                return Err(Error::BadArguments(
                    "a material needs both \"of\" and its name".to_string(),
                ))
            }
        };

        Ok(Self {
            amount: args[0].to_string(),
            from: args[1].to_string(),
            to: args[3].to_string(),
            material,
        })
    }

    /// Decimal places implied by the amount as typed: its fraction digits,
    /// or 2 when it has none.
    pub fn implied_decimals(&self) -> usize {
        let parts: Vec<&str> = self.amount.split('.').collect();
        match parts.as_slice() {
            [_, fraction] => fraction.len(),
            _ => 2,
        }
    }
}

/// The result of a conversion, ready to print.
#[derive(Debug, Clone, PartialEq)]
pub struct Converted {
    pub value: Value,
    pub unit: String,
    pub decimals: usize,
}

impl fmt::Display for Converted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.decimals;
        match self.value {
            Value::Single(v) => write!(f, "{:.*} {}", d, v, self.unit),
            Value::Range(..) => {
                let (lo, hi) = self.value.bounds();
                write!(f, "between {:.*} - {:.*} {}", d, lo, d, hi, self.unit)
            }
        }
    }
}

/// Run a conversion request against the standard table.
///
/// `decimals` overrides the precision implied by the amount.
pub fn convert(request: &Request, decimals: Option<usize>) -> Result<Converted> {
    let amount = crate::expr::evaluate(&request.amount)?;
    let from = canonical_unit(&request.from);
    let to = canonical_unit(&request.to);

    let table = ConversionTable::standard()?;
    let conversion = table.lookup(from, to, request.material.as_deref())?;
    let value = conversion.apply(amount)?;

    Ok(Converted {
        value,
        unit: to.to_string(),
        decimals: decimals.unwrap_or_else(|| request.implied_decimals()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(args: &[&str]) -> Request {
        Request::from_args(args).unwrap()
    }

    #[test]
    fn test_aliases() {
        assert_eq!(canonical_unit("ml"), "mL");
        assert_eq!(canonical_unit("tbsp"), "tablespoon");
        assert_eq!(canonical_unit("furlong"), "furlong");
    }

    #[test]
    fn test_table_parses() {
        let table = ConversionTable::standard().unwrap();
        assert_eq!(table.entries.len(), TABLE.len());
    }

    #[test]
    fn test_direct_conversion() {
        let out = convert(&request(&["100", "C", "to", "F"]), None).unwrap();
        assert_eq!(out.to_string(), "212.00 F");

        let out = convert(&request(&["1.5", "ft", "to", "in"]), None).unwrap();
        assert_eq!(out.to_string(), "18.0 in");
    }

    #[test]
    fn test_decimals_override() {
        let out = convert(&request(&["1", "inch", "to", "mm"]), Some(0)).unwrap();
        assert_eq!(out.to_string(), "25 mm");
    }

    #[test]
    fn test_expression_amount() {
        let out = convert(&request(&["1/2", "cup", "to", "tbsp"]), None).unwrap();
        assert_eq!(out.to_string(), "8.00 tablespoon");
    }

    #[test]
    fn test_intermediary() {
        let table = ConversionTable::standard().unwrap();
        let conv = table.lookup("km", "ft", None).unwrap();
        assert_eq!(conv.units(), vec!["km", "m", "ft"]);
        match conv.apply(1.0).unwrap() {
            Value::Single(v) => assert!((v - 3280.84).abs() < 1e-6),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_intermediary_picks_smallest_common_unit() {
        // teaspoon reaches lemon through both cup and tablespoon
        let table = ConversionTable::standard().unwrap();
        let conv = table.lookup("teaspoon", "lemon", None).unwrap();
        assert_eq!(conv.units(), vec!["teaspoon", "cup", "lemon"]);
    }

    #[test]
    fn test_range_is_ordered() {
        let out = convert(&request(&["2", "tbsp", "to", "lemons"]), None).unwrap();
        assert_eq!(out.to_string(), "between 0.40 - 0.50 lemon");

        let out = convert(&request(&["1", "lemon", "to", "cup"]), None).unwrap();
        assert_eq!(out.to_string(), "between 0.25 - 0.33 cup");
    }

    #[test]
    fn test_material() {
        let out = convert(&request(&["250", "g", "to", "ml", "of", "water"]), None).unwrap();
        assert_eq!(out.to_string(), "250.00 mL");

        let err = convert(&request(&["250", "g", "to", "ml", "of", "honey"]), None).unwrap_err();
        assert!(matches!(err, Error::UnknownConversion { .. }));
    }

    #[test]
    fn test_bad_arguments() {
        assert!(matches!(
            Request::from_args(&["1", "m", "in", "ft"]),
            Err(Error::BadArguments(_))
        ));
        assert!(matches!(
            Request::from_args(&["1", "m", "to", "ft", "of"]),
            Err(Error::BadArguments(_))
        ));
        assert!(matches!(
            Request::from_args(&["1", "g", "to", "mL", "from", "water"]),
            Err(Error::BadArguments(_))
        ));
        assert!(matches!(
            convert(&request(&["1", "parsec", "to", "ft"]), None),
            Err(Error::UnknownConversion { .. })
        ));
    }

    #[test]
    fn test_implied_decimals() {
        assert_eq!(request(&["1.125", "m", "to", "ft"]).implied_decimals(), 3);
        assert_eq!(request(&["3", "m", "to", "ft"]).implied_decimals(), 2);
        assert_eq!(request(&["1/3", "m", "to", "ft"]).implied_decimals(), 2);
    }
}
