//! Multilingual pattern library
//!
//! Every keyword and regex the classifier, extractor and scorers match
//! against lives here, compiled once into module-level statics. Patterns
//! cover Catalan, Spanish, French and English variants side by side.
//!
//! The classifier table is ordered: computation intents first, then
//! informational intents, then meta-intents. Reordering it changes
//! observable behaviour, so the order is locked by regression tests in
//! `intent.rs`.

use once_cell::sync::Lazy;
use regex::Regex;

use fiscal_core::{IncomeType, Relationship};

use crate::intent::Intent;

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("pattern library regex is valid")
}

/// Priority-ordered classification table. First match wins.
pub(crate) static INTENT_RULES: Lazy<Vec<(Regex, Intent)>> = Lazy::new(|| {
    vec![
        // --- computation intents (most specific first) ---
        (
            pattern(
                r"(?i)(plusv\w*|capital gain\w*|guany\w*|ganancia\w*|plus-value\w*).*(\bpis\b|apartament\w*|appartement\w*|apartment\w*|casa|house|flat|immoble\w*|inmueble\w*|propert\w*|immobilier|terreny\w*|terreno\w*)|(\bpis\b|apartament\w*|appartement\w*|apartment\w*|casa|house|flat|immoble\w*|inmueble\w*|propert\w*|immobilier|terreny\w*|terreno\w*).*(plusv\w*|capital gain\w*|guany\w*|ganancia\w*|plus-value\w*)|(vend\w*|venut|venda|venta|vente|sold|sell\w*|sale)\b.*(\bpis\b|apartament\w*|appartement\w*|apartment\w*|casa|house|flat|immoble\w*|inmueble\w*|propert\w*|terreny\w*|terreno\w*)",
            ),
            Intent::ComputePropertyGain,
        ),
        (
            pattern(
                r"(?i)(vend\w*|sold|sell\w*|sale|guany\w*|ganancia\w*|gain\w*|plusv\w*).*(accions|acciones|actions|shares|stock\w*|valors|valores|fondo\w*|fund\w*|obligacions|bonos|bonds|crypto\w*|bitcoin)|(accions|acciones|shares|stock\w*|fondo\w*|fund\w*).*(vend\w*|sold|sell\w*|guany\w*|ganancia\w*|gain\w*)",
            ),
            Intent::ComputeSavingsGain,
        ),
        (
            pattern(
                r"(?i)(herèn\w*|heren\w*|hérit\w*|inherit\w*|hereta\w*|hered\w*|donaci\w*|donation\w*|llegat|legado|successi\w*|succession\w*).*\d|\d.*(herèn\w*|heren\w*|hérit\w*|inherit\w*|hereta\w*|hered\w*|donaci\w*|donation\w*|llegat|legado|successi\w*)|(quant\w*|cu[aá]nt\w*|combien|how much).*(herèn\w*|heren\w*|hérit\w*|inherit\w*|donaci\w*|donation\w*)",
            ),
            Intent::ComputeInheritance,
        ),
        (
            pattern(
                r"(?i)non.?resident\w*|no resident\w*|no residente\w*|\birnr\b|withhold\w*|retenci\w*|retenue",
            ),
            Intent::ComputeWithholding,
        ),
        (
            pattern(
                r"(?i)(quant\w*|cu[aá]nt\w*|combien|how much|calcul\w*|comput\w*)\b.*(societat\w*|sociedades|sociétés|corporate|empresa|company)|(societat\w*|sociedades|sociétés|corporate|empresa|company)\b.*(\d|profit\w*|benefici\w*|beneficio\w*|bénéfice\w*)",
            ),
            Intent::ComputeCorporateTax,
        ),
        (
            pattern(
                r"(?i)(\bigi\b|\biva\b|\bvat\b).*\d|\d.*(\bigi\b|\biva\b|\bvat\b)|(quant\w*|cu[aá]nt\w*|combien|how much).*(\bigi\b|\biva\b|\bvat\b)",
            ),
            Intent::ComputeIndirectTax,
        ),
        (
            pattern(
                r"(?i)(quant\w*|cu[aá]nt\w*|combien|how much|calcul\w*|comput\w*|what will i pay)\b.*(\birpf\b|renda|renta|revenu\w*|income|salari\w*|salario|salaire|salary|\bsou\b|n[oò]mina|earn\w*)|(\birpf\b|income tax|renda|renta|salari\w*|salario|salaire|salary|n[oò]mina).*\d",
            ),
            Intent::ComputeIncomeTax,
        ),
        // --- informational intents ---
        (
            pattern(
                r"(?i)\birpf\b|impost sobre la renda|impuesto sobre la renta|impôt sur le revenu|income tax|personal income",
            ),
            Intent::ExplainIncomeTax,
        ),
        (
            pattern(
                r"(?i)impost de societats|impuesto de sociedades|impôt sur les sociétés|corporate tax|societat\w*|sociedades",
            ),
            Intent::ExplainCorporateTax,
        ),
        (
            pattern(
                r"(?i)\bigi\b|\biva\b|\bvat\b|impost general indirecte|indirect tax|sales tax",
            ),
            Intent::ExplainIndirectTax,
        ),
        (
            pattern(r"(?i)plusv\w*|capital gain\w*|guany\w*|ganancia\w*|plus-value\w*"),
            Intent::ExplainGains,
        ),
        (
            pattern(
                r"(?i)herèn\w*|heren\w*|hérit\w*|inherit\w*|hereta\w*|hered\w*|donaci\w*|donation\w*|llegat|legado|successi\w*|succession\w*",
            ),
            Intent::ExplainInheritance,
        ),
        (
            pattern(
                r"(?i)\bresident\w*|residència|residencia|résiden\w*|183 dies|183 días|183 days|183 jours",
            ),
            Intent::ExplainResidency,
        ),
        (
            pattern(
                r"(?i)deducci\w*|deduction\w*|déduction\w*|desgrav\w*|deduïble|deducible",
            ),
            Intent::ExplainDeductions,
        ),
        // --- meta-intents ---
        (
            pattern(
                r"(?i)compar\w*|diferèn\w*|diferen\w*|différen\w*|versus|\bvs\b|millor que|mejor que|better than",
            ),
            Intent::Comparison,
        ),
        (
            pattern(
                r"(?i)optimit\w*|optimiz\w*|optimis\w*|estalvi\w*|ahorr\w*|économis\w*|save tax|pay less|minimi\w*",
            ),
            Intent::Optimization,
        ),
    ]
});

/// Numeric token with optional locale separators, optionally followed by a
/// thousands suffix ("k")
pub(crate) static AMOUNT_TOKEN: Lazy<Regex> =
    Lazy::new(|| pattern(r"(\d[\d.,]*)\s*(\bk\b)?"));

/// Holding period in full years
pub(crate) static HOLDING_YEARS: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)(\d+)\s*(anys?|años?|ans?\b|years?|yrs?)\b"));

/// Percentage token; stripped before amount scanning so "10%" never becomes
/// a monetary amount
pub(crate) static PERCENT_TOKEN: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)(\d[\d.,]*)\s*(%|percent|per cent)"));

/// Income-type tags: presence-based, not bound to any amount
pub(crate) static INCOME_TYPE_RULES: Lazy<Vec<(IncomeType, Regex)>> = Lazy::new(|| {
    vec![
        (
            IncomeType::Salary,
            pattern(r"(?i)\b(salari\w*|salary|salaire|sueldo|\bsou\b|n[oò]mina|wage|wages|payroll)\b"),
        ),
        (IncomeType::Dividends, pattern(r"(?i)\bdividend\w*\b")),
        (
            IncomeType::Rental,
            pattern(r"(?i)\b(lloguer\w*|alquiler\w*|loyer\w*|rent\w*|arrend\w*)\b"),
        ),
        (
            IncomeType::Freelance,
            pattern(
                r"(?i)\b(aut[oò]nom\w*|freelance\w*|ind[eé]pendant\w*|self.?employed)\b|per compte propi",
            ),
        ),
    ]
});

/// Kinship keywords for inheritance questions; first match wins
pub(crate) static RELATIONSHIP_RULES: Lazy<Vec<(Relationship, Regex)>> = Lazy::new(|| {
    vec![
        (
            Relationship::Child,
            pattern(
                r"(?i)\b(fill|fills|filla|filles|hij[oa]s?|fils|fille|son|sons|daughter\w*|child|children)\b",
            ),
        ),
        (
            Relationship::Spouse,
            pattern(
                r"(?i)\b(c[oò]njuge|conjoint\w*|esp[oò]s|esposa|esposo|spouse|wife|husband|marit|muller|[eé]poux|[eé]pouse)\b",
            ),
        ),
        (
            Relationship::Parent,
            pattern(
                r"(?i)\b(pares?|mares?|padres?|madres?|p[eè]res?|m[eè]res?|father|mother|parents?)\b",
            ),
        ),
        (
            Relationship::Sibling,
            pattern(
                r"(?i)\b(germ[aà]|germans?|germanes?|herman[oa]s?|fr[eè]res?|soeurs?|brothers?|sisters?|siblings?)\b",
            ),
        ),
    ]
});

/// Treaty-partner countries; keys match the knowledge-base treaty table
pub(crate) static COUNTRY_RULES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        (
            "spain",
            pattern(r"(?i)\b(espanya|espa[ñn]a|espagne|spain|spanish|espanyol\w*|espa[ñn]ol\w*)\b"),
        ),
        (
            "france",
            pattern(r"(?i)\b(fran[çc]a|francia|france|french|franc[eè]s\w*)\b"),
        ),
        ("luxembourg", pattern(r"(?i)\b(luxembourg|luxemburg)\w*")),
        ("portugal", pattern(r"(?i)\b(portugal|portugu\w*)\b")),
        (
            "uae",
            pattern(r"(?i)\b(uae|emirats?|emiratos?|dubai)\b"),
        ),
    ]
});

/// Corporate special-regime keywords; keys match the knowledge-base regimes
pub(crate) static REGIME_RULES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        (
            "patent_box",
            pattern(r"(?i)\b(patent\w*|intangible\w*)\b|propietat intel|propiedad intel"),
        ),
        (
            "holding",
            pattern(r"(?i)\b(holding\w*|tinen[çc]a|tenencia)\b"),
        ),
    ]
});

/// Positive-sentiment lexicon across the four supported languages
pub(crate) const POSITIVE_WORDS: &[&str] = &[
    "gràcies", "gracias", "merci", "thanks", "thank", "perfecte", "perfecto", "parfait",
    "perfect", "genial", "great", "excellent", "excelente", "fantàstic", "fantastic",
    "good", "bien", "bé",
];

/// Negative-sentiment lexicon
pub(crate) const NEGATIVE_WORDS: &[&str] = &[
    "preocupat", "preocupada", "preocupado", "worried", "worry", "inquiet", "inquiète",
    "problema", "problem", "problème", "multa", "sanció", "sanción", "penalty", "miedo",
    "peur", "afraid", "angoixa", "error", "wrong", "dolent", "confused", "confós",
];

/// Urgency markers; two or more exclamation marks count as one as well
pub(crate) const URGENT_WORDS: &[&str] = &[
    "urgent", "urgente", "urgently", "deadline", "termini", "plazo", "asap",
    "immediatament", "inmediatamente", "immédiatement",
];

/// Vocabulary whose presence bumps the complexity score
pub(crate) const COMPLEX_VOCABULARY: &[&str] = &[
    "optimitz", "optimiz", "optimis", "treaty", "conveni", "convenio", "convention",
    "doble imposició", "doble imposicion", "double taxation", "double imposition",
    "restructur", "reestructur", "holding", "internacional", "international", "offshore",
    "trust", "patrimoni", "patrimonio",
];
