//! Minimal WKT 1 reader for reference-system definitions.
//!
//! Handles the element grammar `KEYWORD["name", item, ...]` with `[]` or
//! `()` brackets, quoted strings, numbers and bare direction words. Only the
//! elements the data model needs are interpreted; anything unrecognized is
//! skipped without failing the definition.
//!
//! Beyond standard `GEOGCS`/`PROJCS`/`GEOCCS`/`LOCAL_CS`, a fitted system is
//! written as
//!
//! ```text
//! FITTED_CS["name", GEOCTRANS[dx, dy, dz], BASECRS["AUTH:CODE"]]
//! ```
//!
//! where the transform element is either `GEOCTRANS[dx, dy, dz]` or
//! `AFFINE[dim, e00, e01, ...]` with `(dim + 1)^2` row-major elements.

use crate::foundation::core::AuthorityCode;
use crate::foundation::error::{TellusError, TellusResult};
use crate::model::crs::{
    AnchorToBase, Axis, AxisDirection, CoordinateSystem, Datum, ReferenceSystem,
    ReferenceSystemKind, Unit,
};
use crate::transform::{GeocentricTranslation, MatrixTransform, Transform};

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Ident(String),
    Number(f64),
    Text(String),
    Open,
    Close,
    Comma,
}

fn lex(input: &str) -> TellusResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '[' | '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ']' | ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '"' => {
                chars.next();
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some(c) => text.push(c),
                        None => {
                            return Err(TellusError::illegal_argument(
                                "unterminated quoted string in definition",
                            ));
                        }
                    }
                }
                tokens.push(Token::Text(text));
            }
            c if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                let mut raw = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                        raw.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value: f64 = raw.parse().map_err(|_| {
                    TellusError::illegal_argument(format!("malformed number '{raw}'"))
                })?;
                tokens.push(Token::Number(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        word.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(word));
            }
            other => {
                return Err(TellusError::illegal_argument(format!(
                    "unexpected character '{other}' in definition"
                )));
            }
        }
    }

    Ok(tokens)
}

#[derive(Clone, Debug)]
enum WktValue {
    Text(String),
    Number(f64),
    Word(String),
    Element(WktElement),
}

#[derive(Clone, Debug)]
struct WktElement {
    keyword: String,
    values: Vec<WktValue>,
}

impl WktElement {
    fn first_text(&self) -> Option<&str> {
        self.values.iter().find_map(|v| match v {
            WktValue::Text(t) => Some(t.as_str()),
            _ => None,
        })
    }

    fn numbers(&self) -> Vec<f64> {
        self.values
            .iter()
            .filter_map(|v| match v {
                WktValue::Number(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    fn child(&self, keyword: &str) -> Option<&WktElement> {
        self.values.iter().find_map(|v| match v {
            WktValue::Element(e) if e.keyword == keyword => Some(e),
            _ => None,
        })
    }

    fn children(&self, keyword: &str) -> impl Iterator<Item = &WktElement> {
        self.values.iter().filter_map(move |v| match v {
            WktValue::Element(e) if e.keyword == keyword => Some(e),
            _ => None,
        })
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn next(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn parse_element(&mut self) -> TellusResult<WktElement> {
        let keyword = match self.next() {
            Some(Token::Ident(word)) => word.to_ascii_uppercase(),
            other => {
                return Err(TellusError::illegal_argument(format!(
                    "expected an element keyword, got {other:?}"
                )));
            }
        };
        match self.next() {
            Some(Token::Open) => {}
            other => {
                return Err(TellusError::illegal_argument(format!(
                    "expected '[' after {keyword}, got {other:?}"
                )));
            }
        }

        let mut values = Vec::new();
        loop {
            match self.peek() {
                Some(Token::Close) => {
                    self.next();
                    break;
                }
                Some(Token::Comma) => {
                    self.next();
                }
                Some(Token::Text(_)) => {
                    let Some(Token::Text(t)) = self.next() else {
                        unreachable!("peeked a text token");
                    };
                    values.push(WktValue::Text(t));
                }
                Some(Token::Number(_)) => {
                    let Some(Token::Number(n)) = self.next() else {
                        unreachable!("peeked a number token");
                    };
                    values.push(WktValue::Number(n));
                }
                Some(Token::Ident(_)) => {
                    // An identifier opens a nested element or stands alone as
                    // a direction word.
                    if matches!(self.tokens.get(self.pos + 1), Some(Token::Open)) {
                        values.push(WktValue::Element(self.parse_element()?));
                    } else {
                        let Some(Token::Ident(word)) = self.next() else {
                            unreachable!("peeked an ident token");
                        };
                        values.push(WktValue::Word(word.to_ascii_uppercase()));
                    }
                }
                Some(Token::Open) => {
                    return Err(TellusError::illegal_argument(
                        "unexpected '[' inside element body",
                    ));
                }
                None => {
                    return Err(TellusError::illegal_argument(format!(
                        "unterminated {keyword} element"
                    )));
                }
            }
        }

        Ok(WktElement { keyword, values })
    }
}

/// Parse one definition into a [`ReferenceSystem`].
pub fn parse_reference_system(text: &str) -> TellusResult<ReferenceSystem> {
    let tokens = lex(text)?;
    let mut parser = Parser { tokens, pos: 0 };
    let root = parser.parse_element()?;

    let kind = match root.keyword.as_str() {
        "GEOGCS" => ReferenceSystemKind::Geographic,
        "PROJCS" => ReferenceSystemKind::Projected,
        "GEOCCS" => ReferenceSystemKind::Geocentric,
        "LOCAL_CS" | "FITTED_CS" => ReferenceSystemKind::Engineering,
        other => {
            return Err(TellusError::illegal_argument(format!(
                "unsupported definition keyword '{other}'"
            )));
        }
    };

    let name = root
        .first_text()
        .ok_or_else(|| TellusError::illegal_argument("definition is missing its name"))?
        .to_string();

    let identifiers = root
        .children("AUTHORITY")
        .filter_map(parse_authority)
        .collect::<Vec<_>>();

    let datum = root
        .child("DATUM")
        .or_else(|| root.child("GEOGCS").and_then(|g| g.child("DATUM")))
        .and_then(parse_datum);

    let anchor = if root.keyword == "FITTED_CS" {
        Some(parse_anchor(&root)?)
    } else {
        None
    };

    let unit = root.child("UNIT").and_then(parse_unit);
    let axes: Vec<Axis> = root
        .children("AXIS")
        .map(|el| parse_axis(el, kind, unit.as_ref()))
        .collect::<TellusResult<_>>()?;

    let coordinate_system = if axes.is_empty() {
        default_coordinate_system(kind, anchor.as_ref())
    } else {
        CoordinateSystem::new(axes)?
    };

    ReferenceSystem::new(name, identifiers, kind, coordinate_system, datum, anchor)
}

fn parse_authority(el: &WktElement) -> Option<AuthorityCode> {
    let mut texts = el.values.iter().filter_map(|v| match v {
        WktValue::Text(t) => Some(t.as_str()),
        _ => None,
    });
    let authority = texts.next()?;
    let code = texts.next()?;
    AuthorityCode::new(authority, code).ok()
}

fn parse_datum(el: &WktElement) -> Option<Datum> {
    let name = el.first_text()?.to_string();
    let to_wgs84 = el.child("TOWGS84").and_then(|t| {
        let numbers = t.numbers();
        // TOWGS84 may carry up to seven Bursa-Wolf parameters; only the
        // translation part is modeled.
        if numbers.len() >= 3 {
            Some([numbers[0], numbers[1], numbers[2]])
        } else {
            None
        }
    });
    Some(Datum { name, to_wgs84 })
}

fn parse_unit(el: &WktElement) -> Option<Unit> {
    let name = el.first_text()?.to_string();
    let to_base = el.numbers().first().copied()?;
    Some(Unit { name, to_base })
}

fn parse_axis(
    el: &WktElement,
    kind: ReferenceSystemKind,
    unit: Option<&Unit>,
) -> TellusResult<Axis> {
    let name = el
        .first_text()
        .ok_or_else(|| TellusError::illegal_argument("AXIS element is missing its name"))?;
    let direction = el
        .values
        .iter()
        .find_map(|v| match v {
            WktValue::Word(w) => Some(AxisDirection::parse(w)),
            _ => None,
        })
        .transpose()?
        .unwrap_or(AxisDirection::Other);
    let unit = unit.cloned().unwrap_or_else(|| default_unit(kind));
    Ok(Axis::new(name, direction, unit))
}

fn default_unit(kind: ReferenceSystemKind) -> Unit {
    match kind {
        ReferenceSystemKind::Geographic => Unit::degree(),
        _ => Unit::metre(),
    }
}

fn parse_anchor(root: &WktElement) -> TellusResult<AnchorToBase> {
    let base_el = root.child("BASECRS").ok_or_else(|| {
        TellusError::illegal_argument("FITTED_CS is missing its BASECRS element")
    })?;
    let base = base_el
        .first_text()
        .ok_or_else(|| TellusError::illegal_argument("BASECRS is missing its code"))
        .and_then(AuthorityCode::parse)?;

    let to_base = if let Some(el) = root.child("GEOCTRANS") {
        let numbers = el.numbers();
        if numbers.len() != 3 {
            return Err(TellusError::illegal_argument(format!(
                "GEOCTRANS expects 3 parameters, got {}",
                numbers.len()
            )));
        }
        Transform::GeocentricTranslation(GeocentricTranslation::new(
            numbers[0], numbers[1], numbers[2],
        ))
    } else if let Some(el) = root.child("AFFINE") {
        let numbers = el.numbers();
        let Some((&dim, elements)) = numbers.split_first() else {
            return Err(TellusError::illegal_argument("AFFINE element is empty"));
        };
        Transform::Matrix(MatrixTransform::from_row_major(dim as usize, elements)?)
    } else {
        return Err(TellusError::illegal_argument(
            "FITTED_CS is missing its transform element (GEOCTRANS or AFFINE)",
        ));
    };

    Ok(AnchorToBase { base, to_base })
}

fn default_coordinate_system(
    kind: ReferenceSystemKind,
    anchor: Option<&AnchorToBase>,
) -> CoordinateSystem {
    match kind {
        ReferenceSystemKind::Geographic => CoordinateSystem::default_geographic(),
        ReferenceSystemKind::Projected => CoordinateSystem::default_projected(),
        ReferenceSystemKind::Geocentric => CoordinateSystem::default_geocentric(),
        ReferenceSystemKind::Engineering => {
            let dim = anchor.map_or(2, |a| a.to_base.source_dim());
            let names = ["x", "y", "z"];
            let axes = (0..dim.min(3))
                .map(|i| Axis::new(names[i], AxisDirection::Other, Unit::metre()))
                .collect();
            CoordinateSystem::new(axes).unwrap_or_else(|_| CoordinateSystem::default_projected())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/wkt.rs"]
mod tests;
