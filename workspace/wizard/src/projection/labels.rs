use chrono::{Datelike, NaiveDate};

const FEATURE_NAMES: &[(&str, &str)] = &[
    ("growth_rate", "Taxa de Crescimento"),
    ("rolling_mean", "Média Móvel"),
    ("rolling_std", "Desvio Padrão Móvel"),
    ("trend", "Tendência"),
    ("lag", "Defasagem"),
    ("selic", "Taxa Selic"),
    ("incc", "Índice INCC"),
    ("month", "Mês"),
    ("month_sin", "Seno do Mês"),
    ("month_cos", "Cosseno do Mês"),
    ("day_of_year", "Dia do Ano"),
    ("quarter", "Trimestre"),
    ("year", "Ano"),
    ("week_of_year", "Semana do Ano"),
    ("quarter_sin", "Seno do Trimestre"),
    ("quarter_cos", "Cosseno do Trimestre"),
    ("is_holiday", "Feriado"),
];

const MONTHS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

fn translate(name: &str) -> Option<&'static str> {
    FEATURE_NAMES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, label)| *label)
}

/// Splits `rolling_mean_3` into (`rolling_mean`, `3`).
fn windowed(name: &str) -> Option<(&str, &str)> {
    let (base, window) = name.rsplit_once('_')?;
    let windowed = !base.is_empty()
        && !window.is_empty()
        && window.chars().all(|c| c.is_ascii_digit())
        && base.chars().all(|c| c.is_ascii_lowercase() || c == '_');
    windowed.then_some((base, window))
}

fn title_case(words: &str) -> String {
    words
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Human readable (Portuguese) name of a model feature.
///
/// `rolling_mean_3` becomes `Média Móvel (3m)`, `selic_value` becomes
/// `Selic`, known names are translated and anything else is returned as is.
pub fn feature_label(name: &str) -> String {
    if let Some((base, window)) = windowed(name) {
        let base = translate(base).unwrap_or(base);
        return format!("{} ({}m)", base, window);
    }

    if let Some(variable) = name.strip_suffix("_value").filter(|v| !v.is_empty()) {
        return title_case(variable);
    }

    translate(name).map(str::to_string).unwrap_or_else(|| name.to_string())
}

/// Parses the date part of an ISO date or date-time.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// `jan/25` style axis label; the raw value when it is not a date.
pub fn month_label(ds: &str) -> String {
    match parse_date(ds) {
        Some(date) => format!(
            "{}/{:02}",
            MONTHS[date.month0() as usize],
            date.year().rem_euclid(100)
        ),
        None => ds.to_string(),
    }
}

/// `dd/mm/yyyy`; the raw value when it is not a date.
pub fn day_label(raw: &str) -> String {
    parse_date(raw)
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Display name of the aggregation type reported by the service.
pub fn aggregation_label(kind: &str) -> &'static str {
    match kind {
        "familia" => "Linha",
        "processo" => "Processo",
        "all_products" | "all" => "Todos",
        "sku" => "SKU Individual",
        _ => "Combinação",
    }
}
