/// Cities offered by the form.
pub const CITIES: [&str; 4] = ["Bogotá", "Medellín", "Cali", "Barranquilla"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    pub unit_price: i64,
}

/// Read-only product list with unit prices. Order is display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new<I, S>(products: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Self {
            products: products
                .into_iter()
                .map(|(name, unit_price)| Product { name: name.into(), unit_price })
                .collect(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn contains(&self, name: &str) -> bool {
        self.unit_price(name).is_some()
    }

    pub fn unit_price(&self, name: &str) -> Option<i64> {
        self.products
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.unit_price)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new([
            ("Laptop Dell", 800_000),
            ("Monitor Samsung", 1_200_000),
            ("Teclado Mecánico", 250_000),
            ("Mouse Gamer", 70_000),
            ("Impresora HP", 400_000),
            ("Disco SSD 1TB", 100_000),
            ("Memoria RAM 16GB", 385_000),
            ("Tarjeta Gráfica RTX 3060", 6_000_000),
            ("Audífonos Inalámbricos", 300_000),
            ("Silla Gamer", 700_000),
        ])
    }
}

pub fn is_known_city(city: &str) -> bool {
    CITIES.contains(&city)
}
