//! 示例商品

use super::model::NewProduct;

const SAMPLES: [(&str, &str, &str, f64, u64); 10] = [
    ("\"Head Chef\" stockpot 20l", "Pots", "Stainless steel, triple-layer base", 5990.0, 15),
    ("Enamel pot 5l", "Pots", "Classic enamelled pot", 1200.0, 30),
    ("Cast iron cauldron 12l", "Cauldrons", "Real cast iron for pilaf", 3500.0, 8),
    ("Non-stick saute pan", "Saute pans", "Non-stick coating, 24cm", 2100.0, 20),
    ("Grill pan 28cm", "Frying pans", "Cast iron grill pan", 2500.0, 12),
    ("Milk ladle 1.5l", "Ladles", "Ideal for porridge and sauces", 890.0, 40),
    ("Ceramic roaster", "Bakeware", "Ceramic for oven roasting", 3200.0, 6),
    ("Bamboo steamer", "Accessories", "Eco-friendly steamer", 1500.0, 10),
    ("Copper coffee pot 500ml", "Coffee", "For brewing proper coffee", 1100.0, 18),
    ("Wok 32cm", "Frying pans", "For high-heat stir frying", 2800.0, 9),
];

/// 启动时写入存储的示例商品
pub fn sample_products() -> Vec<NewProduct> {
    SAMPLES
        .iter()
        .map(|&(name, category, description, price, quantity)| NewProduct {
            name: name.to_string(),
            category: Some(category.to_string()),
            description: Some(description.to_string()),
            price,
            quantity,
        })
        .collect()
}
