//! 启动时的初始商品数据

use super::model::NewProduct;

const SEED: [(&str, &str, &str, f64, i64); 11] = [
    ("Классическая футболка", "Футболки", "Хлопок 100%, оверсайз", 1290.0, 25),
    ("Джинсы скинни", "Джинсы", "Синие, эластичные, размеры 28-34", 3490.0, 12),
    ("Кожаная куртка", "Куртки", "Натуральная кожа, чёрная", 8990.0, 5),
    ("Спортивные штаны", "Штаны", "Трикотаж, утеплённые", 1990.0, 18),
    ("Рубашка поло", "Рубашки", "Хлопок, пике, тёмно-синяя", 1790.0, 10),
    ("Платье", "Платья", "Вискоза, цветочный принт", 2490.0, 8),
    ("Кепка бейсболка", "Аксессуары", "Хлопок, чёрная, регулируемая", 890.0, 30),
    ("Тёплый свитер", "Свитеры", "Шерсть с акрилом, серый", 2790.0, 7),
    ("Шорты джинсовые", "Шорты", "Деним, летние", 1390.0, 15),
    ("Толстовка с капюшоном", "Толстовки", "Флис, серая", 2990.0, 11),
    ("Носки классические", "Аксессуары", "Хлопок, набор 3 пары", 590.0, 40),
];

pub fn seed_products() -> Vec<NewProduct> {
    SEED.iter()
        .map(|&(name, category, description, price, stock)| NewProduct {
            name: name.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            price,
            stock,
            image: None,
        })
        .collect()
}
