//! Admin console commands.
//!
//! Entries of the commands catalog only carry a human-readable `syntax`
//! such as `cheat AddExperience <Amount> <fromTribeShare> <preventSharing>`.
//! The template and the parameter form are derived from it here. Command
//! templates read the form alone, never the command entry itself.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::models::{CatalogEntry, CatalogKind, CatalogSet};
use super::params::{FieldKind, ParamSpec};
use super::template::CommandTemplate;

pub const KILL_AOE_CATEGORIES: [&str; 6] = ["pawns", "dinos", "tamed", "players", "wild", "structures"];

const INTEGER_MARKERS: [&str; 4] = ["Amount", "Level", "Quality", "Stats"];
const SWITCH_PREFIXES: [&str; 5] = ["true", "false", "prevent", "cloned", "neutered"];
const INTEGER_MAX: f64 = 999_999.0;
const SPAWN_LIMIT: f64 = 9999.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleCommand {
    pub template: CommandTemplate,
    pub form: Vec<ParamSpec>,
}

/// Catalog ids offered by command forms that pick an item or a creature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pickers {
    pub items: Vec<String>,
    pub creatures: Vec<String>,
}

impl Pickers {
    #[must_use]
    pub fn from_catalogs(catalogs: &CatalogSet) -> Self {
        let ids = |kind: CatalogKind| -> Vec<String> {
            catalogs
                .get(kind)
                .entries()
                .iter()
                .map(|e| e.id().to_string())
                .collect()
        };
        Self {
            items: ids(CatalogKind::Items),
            creatures: ids(CatalogKind::Creatures),
        }
    }
}

fn param_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<([^<>]+)>").expect("parameter pattern is valid"))
}

/// Template and form for one entry of the commands catalog.
#[must_use]
pub fn derive(entry: &CatalogEntry, pickers: &Pickers) -> ConsoleCommand {
    let syntax = entry.field("syntax").unwrap_or_else(|| entry.id());
    match entry.id() {
        "KillAOE" => kill_aoe(syntax),
        "SetGamma" => set_gamma(syntax),
        "ClearWater" => clear_water(),
        "SpawnExactDino" => spawn_exact_dino(syntax, pickers),
        _ if is_gfi(entry.id(), syntax) => give_item(syntax, pickers),
        _ => from_syntax(syntax),
    }
}

/// Replaces every `<Param>` of `syntax` with a typed placeholder.
#[must_use]
pub fn from_syntax(syntax: &str) -> ConsoleCommand {
    let mut form = Vec::new();
    let mut seen = HashSet::new();

    let source = param_pattern().replace_all(syntax, |caps: &Captures<'_>| {
        let raw = caps[1].trim();
        let name = unique_slug(raw, &mut seen);
        let (kind, tag) = classify(raw);
        let spec = match kind {
            FieldKind::Integer => ParamSpec::new(&name, raw, kind)
                .with_default("0")
                .with_range(0.0, INTEGER_MAX),
            FieldKind::Choice(_) => switch(&name, raw).with_hint("1 = on, 0 = off"),
            _ => ParamSpec::new(&name, raw, kind),
        };
        form.push(spec);
        format!("{{{name}:{tag}}}")
    });

    ConsoleCommand {
        template: CommandTemplate::parse(&source).params_only(),
        form,
    }
}

fn classify(param: &str) -> (FieldKind, &'static str) {
    let lower = param.to_ascii_lowercase();
    if INTEGER_MARKERS.iter().any(|m| param.contains(m)) {
        (FieldKind::Integer, "int")
    } else if SWITCH_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        (switch_kind(), "int")
    } else {
        (FieldKind::Text, "text")
    }
}

fn switch_kind() -> FieldKind {
    FieldKind::Choice(vec!["0".into(), "1".into()])
}

/// A `0`/`1` console switch, off by default.
fn switch(name: &str, label: &str) -> ParamSpec {
    ParamSpec::new(name, label, switch_kind()).with_default("0")
}

fn integer(name: &str, label: &str, min: f64, max: f64) -> ParamSpec {
    ParamSpec::new(name, label, FieldKind::Integer)
        .with_default(if min > 0.0 { "1" } else { "0" })
        .with_range(min, max)
}

/// Picks one of `ids`. Falls back to free text while the catalog is empty.
fn picker(name: &str, label: &str, ids: &[String], catalog: CatalogKind) -> ParamSpec {
    if ids.is_empty() {
        ParamSpec::new(name, label, FieldKind::Text)
            .with_hint(format!("{} catalog is empty, type an id", catalog.title()))
    } else {
        ParamSpec::new(name, label, FieldKind::Choice(ids.to_vec()))
            .with_hint("Left/Right to pick, or type an id")
    }
}

/// Lowercase identifier for a syntax parameter, unique within one command.
fn unique_slug(raw: &str, seen: &mut HashSet<String>) -> String {
    let mut slug = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("arg");
    }

    let mut candidate = slug.clone();
    let mut n = 2;
    while !seen.insert(candidate.clone()) {
        candidate = format!("{slug}_{n}");
        n += 1;
    }
    candidate
}

/// Leading words of a syntax, up to its first parameter.
fn head(syntax: &str) -> String {
    syntax
        .split_whitespace()
        .take_while(|word| !word.starts_with('<'))
        .collect::<Vec<_>>()
        .join(" ")
}

fn with_head(syntax: &str, rest: &str) -> CommandTemplate {
    let head = head(syntax);
    let template = if head.is_empty() {
        CommandTemplate::parse(rest)
    } else {
        CommandTemplate::parse(&format!("{head} {rest}"))
    };
    template.params_only()
}

/// Template slots for `form`, in order.
fn slots(form: &[ParamSpec]) -> Vec<String> {
    form.iter()
        .map(|spec| {
            let tag = match &spec.kind {
                FieldKind::Integer => "int",
                FieldKind::Decimal => "dec",
                FieldKind::Flag => "flag",
                FieldKind::Choice(options) if options == &["0", "1"] => "int",
                FieldKind::Choice(_) | FieldKind::Text => "text",
            };
            format!("{{{}:{tag}}}", spec.name)
        })
        .collect()
}

fn is_gfi(name: &str, syntax: &str) -> bool {
    name.eq_ignore_ascii_case("GFI")
        || syntax
            .split_whitespace()
            .nth(1)
            .is_some_and(|word| word.eq_ignore_ascii_case("GFI"))
}

fn give_item(syntax: &str, pickers: &Pickers) -> ConsoleCommand {
    let form = vec![
        picker("item", "Item", &pickers.items, CatalogKind::Items),
        integer("amount", "Amount", 1.0, 9999.0).with_hint("Quantity of the item"),
        integer("quality", "Quality", 0.0, 100.0),
        switch("force_blueprint", "Force blueprint").with_hint("1 = full blueprint path"),
    ];
    ConsoleCommand {
        template: with_head(syntax, &slots(&form).join(" ")),
        form,
    }
}

fn spawn_exact_dino(syntax: &str, pickers: &Pickers) -> ConsoleCommand {
    let text = |name: &str, label: &str, hint: &str| {
        ParamSpec::new(name, label, FieldKind::Text).with_hint(hint)
    };
    let signed = |name: &str, label: &str| integer(name, label, -SPAWN_LIMIT, SPAWN_LIMIT);

    let before_fixed = vec![
        picker("blueprint", "Blueprint", &pickers.creatures, CatalogKind::Creatures),
        picker("saddle", "Saddle blueprint", &pickers.items, CatalogKind::Items),
        integer("saddle_quality", "Saddle quality", 0.0, SPAWN_LIMIT),
        integer("base_level", "Base level", 0.0, SPAWN_LIMIT),
        integer("extra_levels", "Extra levels", 0.0, SPAWN_LIMIT),
        text("base_stats", "Base stats", "e.g. 10,13,..."),
        text("added_stats", "Added stats", "e.g. 10,13,..."),
        text("name", "Name", "e.g. MyDino"),
        switch("cloned", "Cloned"),
        switch("neutered", "Neutered"),
        text("tamed_date", "Tamed date", "YYYY-MM-DD"),
        text("uploaded_from", "Uploaded from", "Location"),
        text("imprinter_name", "Imprinter name", "Name"),
        text("imprinter_id", "Imprinter ID", "UE4 ID"),
        integer("imprint_quality", "Imprint quality", 0.0, 100.0),
    ];
    let after_fixed = vec![
        text("region_colors", "Region colors", "e.g. 12,49,..."),
        signed("creature_id", "Creature ID"),
        signed("experience", "Experience"),
        signed("spawn_distance", "Spawn distance"),
        signed("spawn_y", "Spawn Y"),
        signed("spawn_z", "Spawn Z"),
    ];

    // The argument between imprint quality and region colors is always 0.
    let rest = format!(
        "{} 0 {}",
        slots(&before_fixed).join(" "),
        slots(&after_fixed).join(" ")
    );
    let mut form = before_fixed;
    form.extend(after_fixed);
    ConsoleCommand {
        template: with_head(syntax, &rest),
        form,
    }
}

fn kill_aoe(syntax: &str) -> ConsoleCommand {
    let categories = KILL_AOE_CATEGORIES.iter().map(|c| (*c).to_string()).collect();
    ConsoleCommand {
        template: with_head(syntax, "{category:text} {radius:int}"),
        form: vec![
            ParamSpec::new("category", "Category", FieldKind::Choice(categories))
                .with_hint("Target group"),
            ParamSpec::new("radius", "Radius", FieldKind::Integer)
                .with_default("0")
                .with_range(0.0, 9999.0)
                .with_hint("Radius in units"),
        ],
    }
}

fn set_gamma(syntax: &str) -> ConsoleCommand {
    ConsoleCommand {
        template: with_head(syntax, "{value:dec}"),
        form: vec![ParamSpec::new("value", "Gamma", FieldKind::Decimal)
            .with_default("1.0")
            .with_range(0.0, 6.0)
            .with_hint("0.0 (dark) to 6.0 (bright)")],
    }
}

fn clear_water() -> ConsoleCommand {
    ConsoleCommand {
        template: CommandTemplate::parse("r.VolumetricFog {fog:int}").params_only(),
        form: vec![ParamSpec::new("fog", "Volumetric fog", switch_kind())
            .with_default("1")
            .with_hint("0 clears underwater fog")],
    }
}
