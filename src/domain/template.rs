//! Command templates and the renderer that fills them in.
//!
//! A template is plain text with `{name}` or `{name:kind}` placeholders.
//! Rendering is purely textual: every placeholder is replaced by a value
//! taken from the selected entry or the user's parameters and formatted in
//! the exact numeric form the game console expects.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use super::error::RenderError;
use super::models::{CatalogEntry, CatalogKind};

pub const ITEM_TEMPLATE: &str = "cheat gfi {id} {quantity} {quality} {blueprint}";
pub const CREATURE_TEMPLATE: &str = "admincheat Summon {id}";
pub const LOCATION_TEMPLATE: &str = "cheat setplayerpos {x} {y} {z}";
pub const COLOR_TEMPLATE: &str = "cheat setTargetDinoColor {region} {id}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Integer,
    Decimal,
    Flag,
    Text,
}

impl ParamKind {
    /// Kind of a placeholder that did not spell one out.
    #[must_use]
    pub fn infer(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "quantity" | "quality" | "region" | "radius" | "amount" | "level" => ParamKind::Integer,
            "x" | "y" | "z" | "gamma" => ParamKind::Decimal,
            "blueprint" => ParamKind::Flag,
            _ => ParamKind::Text,
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "int" | "integer" => Some(ParamKind::Integer),
            "dec" | "decimal" => Some(ParamKind::Decimal),
            "flag" | "bool" => Some(ParamKind::Flag),
            "text" | "str" => Some(ParamKind::Text),
            _ => None,
        }
    }

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            ParamKind::Integer => "int",
            ParamKind::Decimal => "dec",
            ParamKind::Flag => "flag",
            ParamKind::Text => "text",
        }
    }

    #[must_use]
    pub fn expected(self) -> &'static str {
        match self {
            ParamKind::Integer => "a whole number",
            ParamKind::Decimal => "a number",
            ParamKind::Flag => "true or false",
            ParamKind::Text => "a single line of text",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Integer(i64),
    Decimal(f64),
    Flag(bool),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Integer(i) => write!(f, "{i}"),
            ParamValue::Decimal(d) => write!(f, "{d}"),
            ParamValue::Flag(b) => write!(f, "{b}"),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Integer(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Decimal(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Flag(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

pub type Params = BTreeMap<String, ParamValue>;

#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub name: String,
    pub kind: ParamKind,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Slot(Placeholder),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandTemplate {
    source: String,
    segments: Vec<Segment>,
    /// Whether placeholders may resolve to the entry's id, label and fields.
    entry_values: bool,
}

impl CommandTemplate {
    /// Parses a template. Text that does not form a valid placeholder
    /// (unclosed brace, empty or non-identifier name) stays literal.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                break;
            };
            match parse_placeholder(&after[..close]) {
                Some(slot) => {
                    literal.push_str(&rest[..open]);
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Slot(slot));
                }
                None => literal.push_str(&rest[..open + close + 2]),
            }
            rest = &after[close + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            source: source.to_string(),
            segments,
            entry_values: true,
        }
    }

    /// Resolves placeholders from the parameters only, so a console
    /// argument named `<ID>` or `<Name>` never picks up the entry's own values.
    #[must_use]
    pub fn params_only(mut self) -> Self {
        self.entry_values = false;
        self
    }

    /// Built-in template of a catalog. Commands derive theirs per entry and
    /// taming produces no command.
    #[must_use]
    pub fn for_catalog(kind: CatalogKind) -> Option<Self> {
        let source = match kind {
            CatalogKind::Items => ITEM_TEMPLATE,
            CatalogKind::Creatures => CREATURE_TEMPLATE,
            CatalogKind::Locations => LOCATION_TEMPLATE,
            CatalogKind::Colors => COLOR_TEMPLATE,
            CatalogKind::Taming | CatalogKind::Commands => return None,
        };
        Some(Self::parse(source))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Slot(p) => Some(p),
            Segment::Literal(_) => None,
        })
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_placeholder(inner: &str) -> Option<Placeholder> {
    let (name, tag) = match inner.split_once(':') {
        Some((name, tag)) => (name.trim(), Some(tag.trim())),
        None => (inner.trim(), None),
    };
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    let kind = tag
        .and_then(ParamKind::from_tag)
        .unwrap_or_else(|| ParamKind::infer(name));
    Some(Placeholder {
        name: name.to_string(),
        kind,
    })
}

/// A selected entry plus the values the user typed for it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest<'a> {
    pub entry: &'a CatalogEntry,
    pub params: Params,
}

impl<'a> RenderRequest<'a> {
    pub fn new(entry: &'a CatalogEntry) -> Self {
        Self {
            entry,
            params: Params::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    pub fn render(&self, template: &CommandTemplate) -> Result<String, RenderError> {
        render(self.entry, template, &self.params)
    }
}

/// Fills `template` in. Placeholders resolve to the entry's id or label,
/// then to `params`, then to the entry's metadata fields. A
/// [`params_only`](CommandTemplate::params_only) template reads `params` alone.
pub fn render(
    entry: &CatalogEntry,
    template: &CommandTemplate,
    params: &Params,
) -> Result<String, RenderError> {
    let mut out = String::with_capacity(template.source.len());
    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Slot(slot) if template.entry_values => {
                out.push_str(&resolve(entry, slot, params)?);
            }
            Segment::Slot(slot) => {
                let value = params
                    .get(&slot.name)
                    .ok_or_else(|| RenderError::MissingParameter(slot.name.clone()))?;
                out.push_str(&format_value(&slot.name, slot.kind, value)?);
            }
        }
    }
    Ok(out)
}

fn resolve(entry: &CatalogEntry, slot: &Placeholder, params: &Params) -> Result<String, RenderError> {
    let value: Cow<'_, ParamValue> = match slot.name.as_str() {
        "id" => Cow::Owned(ParamValue::Text(entry.id().to_string())),
        "label" => Cow::Owned(ParamValue::Text(entry.label().to_string())),
        name => match (params.get(name), entry.field(name)) {
            (Some(value), _) => Cow::Borrowed(value),
            (None, Some(raw)) => Cow::Owned(ParamValue::Text(raw.to_string())),
            (None, None) => return Err(RenderError::MissingParameter(name.to_string())),
        },
    };
    format_value(&slot.name, slot.kind, &value)
}

/// Formats `value` as `kind` in console syntax.
pub fn format_value(name: &str, kind: ParamKind, value: &ParamValue) -> Result<String, RenderError> {
    match kind {
        ParamKind::Integer => coerce_integer(name, value).map(|i| i.to_string()),
        ParamKind::Decimal => coerce_decimal(name, value),
        ParamKind::Flag => coerce_flag(name, value).map(|b| b.to_string()),
        ParamKind::Text => coerce_text(name, value),
    }
}

fn coerce_integer(name: &str, value: &ParamValue) -> Result<i64, RenderError> {
    let expected = ParamKind::Integer.expected();
    match value {
        ParamValue::Integer(i) => Ok(*i),
        ParamValue::Decimal(d) if d.is_finite() && d.fract() == 0.0 && d.abs() < 9.0e15 => {
            Ok(*d as i64)
        }
        ParamValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Err(RenderError::MissingParameter(name.to_string()));
            }
            s.parse::<i64>()
                .map_err(|_| RenderError::invalid(name, s, expected))
        }
        other => Err(RenderError::invalid(name, other.to_string(), expected)),
    }
}

fn coerce_decimal(name: &str, value: &ParamValue) -> Result<String, RenderError> {
    let expected = ParamKind::Decimal.expected();
    let number = match value {
        ParamValue::Integer(i) => return Ok(i.to_string()),
        ParamValue::Decimal(d) => *d,
        ParamValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Err(RenderError::MissingParameter(name.to_string()));
            }
            s.parse::<f64>()
                .map_err(|_| RenderError::invalid(name, s, expected))?
        }
        ParamValue::Flag(b) => return Err(RenderError::invalid(name, b.to_string(), expected)),
    };
    if !number.is_finite() {
        return Err(RenderError::invalid(name, value.to_string(), expected));
    }
    Ok(format_decimal(number))
}

/// Shortest decimal form without exponent; `-0` becomes `0`.
#[must_use]
pub fn format_decimal(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

fn coerce_flag(name: &str, value: &ParamValue) -> Result<bool, RenderError> {
    let expected = ParamKind::Flag.expected();
    match value {
        ParamValue::Flag(b) => Ok(*b),
        ParamValue::Integer(0) => Ok(false),
        ParamValue::Integer(1) => Ok(true),
        ParamValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Err(RenderError::MissingParameter(name.to_string())),
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(RenderError::invalid(name, s.trim(), expected)),
        },
        other => Err(RenderError::invalid(name, other.to_string(), expected)),
    }
}

fn coerce_text(name: &str, value: &ParamValue) -> Result<String, RenderError> {
    let text = value.to_string();
    let text = text.trim();
    if text.is_empty() {
        return Err(RenderError::MissingParameter(name.to_string()));
    }
    if text.contains(['\n', '\r']) {
        return Err(RenderError::invalid(name, text, ParamKind::Text.expected()));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rifle() -> CatalogEntry {
        CatalogEntry::new("PrimalItem_WeaponRifle", "Rifle")
    }

    #[test]
    fn test_item_command() {
        let template = CommandTemplate::parse(ITEM_TEMPLATE);
        let entry = rifle();
        let out = RenderRequest::new(&entry)
            .with_param("quantity", 1)
            .with_param("quality", 0)
            .with_param("blueprint", false)
            .render(&template)
            .unwrap();
        assert_eq!(out, "cheat gfi PrimalItem_WeaponRifle 1 0 false");
    }

    #[test]
    fn test_creature_command() {
        let template = CommandTemplate::for_catalog(CatalogKind::Creatures).unwrap();
        let entry = CatalogEntry::new("Rex_Character_BP_C", "Rex");
        let out = render(&entry, &template, &Params::new()).unwrap();
        assert_eq!(out, "admincheat Summon Rex_Character_BP_C");
    }

    #[test]
    fn test_location_command_from_params() {
        let template = CommandTemplate::parse(LOCATION_TEMPLATE);
        let entry = CatalogEntry::new("0 0 0", "Somewhere");
        let out = RenderRequest::new(&entry)
            .with_param("x", 100.5)
            .with_param("y", -200.25)
            .with_param("z", 50)
            .render(&template)
            .unwrap();
        assert_eq!(out, "cheat setplayerpos 100.5 -200.25 50");
    }

    #[test]
    fn test_params_only_ignores_entry_values() {
        let template = CommandTemplate::parse("cheat RenamePlayer {id:text} {name:text}").params_only();
        let entry = CatalogEntry::new("RenamePlayer", "RenamePlayer").with_field("name", "RenamePlayer");

        let out = RenderRequest::new(&entry)
            .with_param("id", "12345")
            .with_param("name", "Bob")
            .render(&template)
            .unwrap();
        assert_eq!(out, "cheat RenamePlayer 12345 Bob");

        let err = RenderRequest::new(&entry)
            .with_param("id", "12345")
            .render(&template)
            .unwrap_err();
        assert_eq!(err, RenderError::MissingParameter("name".to_string()));
    }

    #[test]
    fn test_location_falls_back_to_entry_fields() {
        let template = CommandTemplate::parse(LOCATION_TEMPLATE);
        let entry = CatalogEntry::new("-1.5 2 300", "Hidden Lake")
            .with_field("x", "-1.5")
            .with_field("y", "2")
            .with_field("z", "300.0");
        let out = RenderRequest::new(&entry)
            .with_param("z", 10.0)
            .render(&template)
            .unwrap();
        assert_eq!(out, "cheat setplayerpos -1.5 2 10");

        let out = render(&entry, &template, &Params::new()).unwrap();
        assert_eq!(out, "cheat setplayerpos -1.5 2 300");
    }

    #[test]
    fn test_missing_quantity() {
        let template = CommandTemplate::parse(ITEM_TEMPLATE);
        let entry = rifle();
        let err = RenderRequest::new(&entry)
            .with_param("quality", 0)
            .with_param("blueprint", false)
            .render(&template)
            .unwrap_err();
        assert_eq!(err, RenderError::MissingParameter("quantity".to_string()));
        assert_eq!(err.parameter(), "quantity");
    }

    #[test]
    fn test_first_missing_is_reported() {
        let template = CommandTemplate::parse(ITEM_TEMPLATE);
        let err = render(&rifle(), &template, &Params::new()).unwrap_err();
        assert_eq!(err, RenderError::MissingParameter("quantity".to_string()));
    }

    #[test]
    fn test_invalid_quantity() {
        let template = CommandTemplate::parse(ITEM_TEMPLATE);
        let entry = rifle();
        let err = RenderRequest::new(&entry)
            .with_param("quantity", "lots")
            .with_param("quality", 0)
            .with_param("blueprint", false)
            .render(&template)
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidParameter { ref name, ref value, .. }
                if name == "quantity" && value == "lots"
        ));

        let err = RenderRequest::new(&entry)
            .with_param("quantity", 2.5)
            .with_param("quality", 0)
            .with_param("blueprint", false)
            .render(&template)
            .unwrap_err();
        assert_eq!(err.parameter(), "quantity");
    }

    #[test]
    fn test_numeric_text_is_coerced() {
        let template = CommandTemplate::parse(ITEM_TEMPLATE);
        let entry = rifle();
        let out = RenderRequest::new(&entry)
            .with_param("quantity", " 1000 ")
            .with_param("quality", 3.0)
            .with_param("blueprint", "1")
            .render(&template)
            .unwrap();
        assert_eq!(out, "cheat gfi PrimalItem_WeaponRifle 1000 3 true");
    }

    #[test]
    fn test_decimal_formatting() {
        assert_eq!(format_decimal(50.0), "50");
        assert_eq!(format_decimal(-0.0), "0");
        assert_eq!(format_decimal(100.5), "100.5");
        assert_eq!(format_decimal(-200.25), "-200.25");
        assert_eq!(format_decimal(1.0e21), "1000000000000000000000");
        assert_eq!(format_decimal(0.000_001), "0.000001");

        assert!(format_value("x", ParamKind::Decimal, &ParamValue::Decimal(f64::NAN)).is_err());
        assert!(format_value("x", ParamKind::Decimal, &"inf".into()).is_err());
        assert_eq!(
            format_value("x", ParamKind::Decimal, &"-3.50".into()).unwrap(),
            "-3.5"
        );
    }

    #[test]
    fn test_text_must_be_single_line() {
        let err = format_value("name", ParamKind::Text, &"a\nb".into()).unwrap_err();
        assert_eq!(err.parameter(), "name");
        assert_eq!(
            format_value("name", ParamKind::Text, &"  ".into()).unwrap_err(),
            RenderError::MissingParameter("name".to_string())
        );
    }

    #[test]
    fn test_parse_keeps_stray_braces_literal() {
        let template = CommandTemplate::parse("say {hello world} {id} {");
        let names: Vec<_> = template.placeholders().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id"]);
        let out = render(&rifle(), &template, &Params::new()).unwrap();
        assert_eq!(out, "say {hello world} PrimalItem_WeaponRifle {");
    }

    #[test]
    fn test_explicit_kind_tag() {
        let template = CommandTemplate::parse("admincheat SetGamma {value:dec} {fast:flag}");
        let kinds: Vec<_> = template.placeholders().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![ParamKind::Decimal, ParamKind::Flag]);
        assert_eq!(ParamKind::infer("Quantity"), ParamKind::Integer);
        assert_eq!(ParamKind::infer("name"), ParamKind::Text);
    }

    #[test]
    fn test_render_is_deterministic_and_complete() {
        let entry = CatalogEntry::new("42", "Teal").with_field("hex", "#008080");
        for kind in [
            CatalogKind::Items,
            CatalogKind::Creatures,
            CatalogKind::Locations,
            CatalogKind::Colors,
        ] {
            let template = CommandTemplate::for_catalog(kind).unwrap();
            let request = RenderRequest::new(&entry)
                .with_param("quantity", 5)
                .with_param("quality", 100)
                .with_param("blueprint", true)
                .with_param("x", 1.25)
                .with_param("y", 0)
                .with_param("z", -7.0)
                .with_param("region", 3);
            let first = request.render(&template).unwrap();
            assert_eq!(first, request.render(&template).unwrap());
            assert!(!first.contains('{') && !first.contains('}'), "{first}");
        }
    }
}
