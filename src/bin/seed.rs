use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use finite_storefront_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_user(&pool, "admin@finiteluxury.com", "admin123", "admin").await?;
    seed_catalogue(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn seed_catalogue(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let categories = [
        ("Shirts", "Timeless essentials for the refined man"),
        ("Tops", "Essential everyday pieces for men"),
        ("Slides", "Comfort meets masculine style"),
        ("Shoes", "Refined footwear for distinguished men"),
        ("Caps", "Finishing touches for the modern man"),
        ("Perfume", "Signature scents for men"),
    ];

    for (name, description) in categories {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .execute(pool)
        .await?;
    }

    // name, price, category, sizes, description
    let products = [
        (
            "Black Oxford Shirt",
            25000_i64,
            "Shirts",
            &["S", "M", "L", "XL"][..],
            "Classic oxford shirt in premium cotton.",
        ),
        (
            "White Linen Shirt",
            28000,
            "Shirts",
            &["S", "M", "L", "XL"][..],
            "Breathable linen for warm days.",
        ),
        (
            "Minimal Tank Top",
            12000,
            "Tops",
            &["S", "M", "L"][..],
            "Essential layering piece.",
        ),
        (
            "Oversized Tee",
            15000,
            "Tops",
            &["S", "M", "L", "XL"][..],
            "Relaxed fit premium cotton tee.",
        ),
        (
            "White Sneakers",
            45000,
            "Shoes",
            &["40", "41", "42", "43", "44"][..],
            "Classic leather sneakers.",
        ),
        (
            "Noir Perfume",
            35000,
            "Perfume",
            &["One Size"][..],
            "Signature evening scent.",
        ),
    ];

    for (name, price, category, sizes, description) in products {
        let sizes: Vec<String> = sizes.iter().map(|s| s.to_string()).collect();
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, category_id, sizes, description)
            SELECT $1, $2, $3, c.id, $5, $6
            FROM categories c
            WHERE c.name = $4
              AND NOT EXISTS (SELECT 1 FROM products p WHERE p.name = $2)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(price)
        .bind(category)
        .bind(&sizes)
        .bind(description)
        .execute(pool)
        .await?;
    }

    println!("Seeded catalogue");
    Ok(())
}
