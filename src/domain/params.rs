use super::error::RenderError;
use super::models::CatalogKind;
use super::template::{format_decimal, ParamKind, ParamValue, Params};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Integer,
    Decimal,
    Flag,
    Choice(Vec<String>),
    Text,
}

impl FieldKind {
    /// Field kind used for a template placeholder of `kind`.
    #[must_use]
    pub fn for_param(kind: ParamKind) -> Self {
        match kind {
            ParamKind::Integer => FieldKind::Integer,
            ParamKind::Decimal => FieldKind::Decimal,
            ParamKind::Flag => FieldKind::Flag,
            ParamKind::Text => FieldKind::Text,
        }
    }
}

/// One input field of a parameter form.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub default: Option<String>,
    pub range: Option<(f64, f64)>,
    pub hint: Option<String>,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            default: None,
            range: None,
            hint: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Initial text of the field.
    #[must_use]
    pub fn initial_input(&self) -> String {
        match (&self.default, &self.kind) {
            (Some(d), _) => d.clone(),
            (None, FieldKind::Flag) => "false".to_string(),
            (None, FieldKind::Choice(options)) => options.first().cloned().unwrap_or_default(),
            (None, _) => String::new(),
        }
    }

    /// Parses raw field text. Blank input means the value was not supplied.
    pub fn parse_input(&self, raw: &str) -> Result<Option<ParamValue>, RenderError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        let value = match &self.kind {
            FieldKind::Integer => {
                let n = raw
                    .parse::<i64>()
                    .map_err(|_| RenderError::invalid(&self.name, raw, "a whole number"))?;
                self.check_range(raw, n as f64)?;
                ParamValue::Integer(n)
            }
            FieldKind::Decimal => {
                let n = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| RenderError::invalid(&self.name, raw, "a number"))?;
                self.check_range(raw, n)?;
                ParamValue::Decimal(n)
            }
            FieldKind::Flag => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => ParamValue::Flag(true),
                "false" | "0" | "no" | "off" => ParamValue::Flag(false),
                _ => return Err(RenderError::invalid(&self.name, raw, "true or false")),
            },
            FieldKind::Choice(options) => options
                .iter()
                .find(|o| o.eq_ignore_ascii_case(raw))
                .map(|o| ParamValue::Text(o.clone()))
                .ok_or_else(|| {
                    RenderError::invalid(&self.name, raw, format!("one of {}", options.join(", ")))
                })?,
            FieldKind::Text => ParamValue::Text(raw.to_string()),
        };
        Ok(Some(value))
    }

    fn check_range(&self, raw: &str, n: f64) -> Result<(), RenderError> {
        match self.range {
            Some((min, max)) if n < min || n > max => Err(RenderError::invalid(
                &self.name,
                raw,
                format!(
                    "a value between {} and {}",
                    format_decimal(min),
                    format_decimal(max)
                ),
            )),
            _ => Ok(()),
        }
    }

    /// Next value of a flag or choice field; `None` for free-form fields.
    #[must_use]
    pub fn cycle(&self, current: &str, forward: bool) -> Option<String> {
        match &self.kind {
            FieldKind::Flag => {
                let on = matches!(
                    current.trim().to_ascii_lowercase().as_str(),
                    "true" | "1" | "yes" | "on"
                );
                Some((!on).to_string())
            }
            FieldKind::Choice(options) if !options.is_empty() => {
                let len = options.len();
                let next = match options.iter().position(|o| o.eq_ignore_ascii_case(current.trim())) {
                    Some(i) if forward => (i + 1) % len,
                    Some(i) => (i + len - 1) % len,
                    None => 0,
                };
                Some(options[next].clone())
            }
            _ => None,
        }
    }
}

/// Turns form inputs into render parameters, skipping blank fields.
pub fn collect_params(specs: &[ParamSpec], inputs: &[String]) -> Result<Params, RenderError> {
    let mut params = Params::new();
    for (spec, raw) in specs.iter().zip(inputs) {
        if let Some(value) = spec.parse_input(raw)? {
            params.insert(spec.name.clone(), value);
        }
    }
    Ok(params)
}

/// Form fields of a catalog with a fixed template.
#[must_use]
pub fn form_for(kind: CatalogKind) -> Vec<ParamSpec> {
    match kind {
        CatalogKind::Items => vec![
            ParamSpec::new("quantity", "Quantity", FieldKind::Integer)
                .with_default("1")
                .with_range(1.0, 9999.0),
            ParamSpec::new("quality", "Quality", FieldKind::Integer)
                .with_default("1")
                .with_range(0.0, 100.0),
            ParamSpec::new("blueprint", "Blueprint", FieldKind::Flag)
                .with_default("false")
                .with_hint("Spawn the blueprint instead of the item"),
        ],
        CatalogKind::Locations => ["x", "y", "z"]
            .into_iter()
            .map(|axis| {
                ParamSpec::new(axis, axis.to_uppercase(), FieldKind::Decimal)
                    .with_hint("Leave blank to use the location's coordinates")
            })
            .collect(),
        CatalogKind::Colors => vec![ParamSpec::new("region", "Region", FieldKind::Integer)
            .with_default("0")
            .with_range(0.0, 5.0)],
        CatalogKind::Creatures | CatalogKind::Taming | CatalogKind::Commands => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_form_defaults_render() {
        let specs = form_for(CatalogKind::Items);
        let inputs: Vec<String> = specs.iter().map(ParamSpec::initial_input).collect();
        let params = collect_params(&specs, &inputs).unwrap();
        assert_eq!(params.get("quantity"), Some(&ParamValue::Integer(1)));
        assert_eq!(params.get("quality"), Some(&ParamValue::Integer(1)));
        assert_eq!(params.get("blueprint"), Some(&ParamValue::Flag(false)));
    }

    #[test]
    fn test_range_is_enforced() {
        let specs = form_for(CatalogKind::Items);
        let err = specs[1].parse_input("101").unwrap_err();
        assert_eq!(
            err,
            RenderError::invalid("quality", "101", "a value between 0 and 100")
        );
        assert!(specs[0].parse_input("0").is_err());
        assert!(specs[0].parse_input("1,000").is_err());
        assert_eq!(
            specs[0].parse_input(" 9999 ").unwrap(),
            Some(ParamValue::Integer(9999))
        );
    }

    #[test]
    fn test_blank_location_fields_are_skipped() {
        let specs = form_for(CatalogKind::Locations);
        let inputs = vec![String::new(), "-12.5".to_string(), " ".to_string()];
        let params = collect_params(&specs, &inputs).unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("y"), Some(&ParamValue::Decimal(-12.5)));
        assert!(specs[0].parse_input("NaN").is_err());
    }

    #[test]
    fn test_cycle_flag_and_choice() {
        let flag = ParamSpec::new("blueprint", "Blueprint", FieldKind::Flag);
        assert_eq!(flag.cycle("false", true).as_deref(), Some("true"));
        assert_eq!(flag.cycle("true", false).as_deref(), Some("false"));

        let choice = ParamSpec::new(
            "category",
            "Category",
            FieldKind::Choice(vec!["pawns".into(), "dinos".into(), "wild".into()]),
        );
        assert_eq!(choice.initial_input(), "pawns");
        assert_eq!(choice.cycle("pawns", true).as_deref(), Some("dinos"));
        assert_eq!(choice.cycle("pawns", false).as_deref(), Some("wild"));
        assert_eq!(choice.cycle("bogus", true).as_deref(), Some("pawns"));
        assert_eq!(
            choice.parse_input("DINOS").unwrap(),
            Some(ParamValue::Text("dinos".into()))
        );
        assert!(choice.parse_input("rocks").is_err());

        let text = ParamSpec::new("name", "Name", FieldKind::Text);
        assert_eq!(text.cycle("x", true), None);
    }
}
