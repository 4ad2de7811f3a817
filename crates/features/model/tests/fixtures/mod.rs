#![allow(dead_code)]

use modulith_model::Modules;
use modulith_symbols::InMemoryImporter;
use modulith_symbols::domain::config::ModulithConfig;
use modulith_symbols::domain::symbol::Symbol;

/// Builds one symbol per `(module, simple name)` pair below `com.acme`, each referencing the
/// given fully qualified targets.
pub fn symbol(module: &str, name: &str, targets: &[&str]) -> Symbol {
    Symbol::new(format!("com.acme.{module}.{name}")).referencing(targets.iter().copied())
}

/// Modules `a`, `b`, `c` referencing each other in a ring: a -> b -> c -> a.
pub fn ring() -> Vec<Symbol> {
    vec![
        symbol("a", "A", &["com.acme.b.B"]),
        symbol("b", "B", &["com.acme.c.C"]),
        symbol("c", "C", &["com.acme.a.A"]),
    ]
}

/// A chain a -> b -> c -> d.
pub fn chain() -> Vec<Symbol> {
    vec![
        symbol("a", "A", &["com.acme.b.B"]),
        symbol("b", "B", &["com.acme.c.C"]),
        symbol("c", "C", &["com.acme.d.D"]),
        symbol("d", "D", &[]),
    ]
}

/// Orders depends on catalog, shipping is independent, plus some third-party noise.
pub fn shop() -> Vec<Symbol> {
    vec![
        Symbol::new("com.acme.Application"),
        Symbol::new("com.acme.orders.Order")
            .referencing(["com.acme.catalog.Item", "org.thirdparty.Util", "java.lang.String"]),
        Symbol::new("com.acme.orders.internal.OrderRepository")
            .extending(["com.acme.orders.Order"]),
        Symbol::new("com.acme.catalog.Item"),
        Symbol::new("com.acme.shipping.Dock"),
        Symbol::new("org.thirdparty.Util"),
    ]
}

pub fn modules(symbols: Vec<Symbol>) -> Modules {
    modules_with(&ModulithConfig::new("com.acme"), symbols)
}

pub fn modules_with(config: &ModulithConfig, symbols: Vec<Symbol>) -> Modules {
    Modules::of(config, &InMemoryImporter::new(symbols)).expect("module detection failed")
}
