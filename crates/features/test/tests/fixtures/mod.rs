#![allow(dead_code)]

use modulith_symbols::InMemoryImporter;
use modulith_test::domain::config::ModulithConfig;
use modulith_test::domain::symbol::Symbol;

pub const ORDERS_ANCHOR: &str = "com.acme.orders.OrderModuleTests";
pub const SHIPPING_ANCHOR: &str = "com.acme.shipping.ShippingModuleTests";

/// Orders -> catalog -> pricing, shipping independent, plus third-party code.
pub fn importer() -> InMemoryImporter {
    InMemoryImporter::new([
        Symbol::new("com.acme.Application"),
        Symbol::new("com.acme.orders.Order").referencing(["com.acme.catalog.Item"]),
        Symbol::new("com.acme.orders.internal.OrderRepository")
            .referencing(["com.acme.orders.Order", "org.thirdparty.Util"]),
        Symbol::new("com.acme.catalog.Item").referencing(["com.acme.pricing.Price"]),
        Symbol::new("com.acme.pricing.Price"),
        Symbol::new("com.acme.shipping.Dock"),
        Symbol::new("org.thirdparty.Util"),
    ])
}

/// Catalog and pricing reference each other.
pub fn cyclic_importer() -> InMemoryImporter {
    InMemoryImporter::new([
        Symbol::new("com.acme.orders.Order").referencing(["com.acme.catalog.Item"]),
        Symbol::new("com.acme.catalog.Item").referencing(["com.acme.pricing.Price"]),
        Symbol::new("com.acme.pricing.Price").referencing(["com.acme.catalog.Item"]),
    ])
}

pub fn config() -> ModulithConfig {
    ModulithConfig::new("com.acme")
}
