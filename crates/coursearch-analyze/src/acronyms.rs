//! Acronym expansion for query terms.
//!
//! Students type acronyms ("POO", "BDD") while course descriptions spell the
//! concepts out ("programmation orientée objet", "base de données").
//! Expansion bridges the gap and is applied to the query side only; document
//! tokens are indexed as written.

/// Expansion terms for a token whose uppercase form is a known acronym.
///
/// The returned terms are appended to the query token list as-is.
#[must_use]
pub fn expansion_terms(token: &str) -> Option<&'static [&'static str]> {
    let upper = token.to_uppercase();
    let terms: &'static [&'static str] = match upper.as_str() {
        "POO" => &["programmation", "orientée", "objet"],
        "UML" => &["uml", "modélisation"],
        "API" => &["api", "interface", "programmation"],
        "CAO" => &["cao", "conception", "assistée"],
        "BDD" => &["base", "données", "bdd"],
        "IOT" => &["internet", "objets", "iot", "connectés"],
        "IA" => &["intelligence", "artificielle", "ia"],
        "ML" => &["machine", "learning", "apprentissage", "automatique"],
        "SQL" => &["sql", "requêtes", "données", "relationnel"],
        "ORM" => &["orm", "mapping", "objet", "relationnel"],
        "REST" => &["rest", "api", "web", "service"],
        "TDD" => &["tdd", "test", "driven", "développement"],
        "CI" => &["ci", "intégration", "continue"],
        "CD" => &["cd", "déploiement", "continu"],
        "TCP" => &["tcp", "transmission", "protocole", "réseau"],
        "IP" => &["ip", "internet", "protocole", "réseau"],
        "HTTP" => &["http", "web", "protocole"],
        "GUI" => &["gui", "interface", "graphique", "utilisateur"],
        "CLI" => &["cli", "commande", "ligne", "terminal"],
        _ => return None,
    };
    Some(terms)
}
