use barbershop_booking::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    domain::{Role, WorkingHours},
    models::Settings,
    services::auth_service::hash_password,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let admin_id = ensure_user(&pool, "Admin", "admin@example.com", "admin123", Role::Admin).await?;
    let client_id =
        ensure_user(&pool, "João Silva", "client@example.com", "client123", Role::Client).await?;
    seed_barbers(&pool).await?;
    seed_services(&pool).await?;
    seed_settings(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, Client ID: {client_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role.as_str())
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={})", role.as_str());
    Ok(user_id)
}

async fn seed_barbers(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let weekdays = WorkingHours::default();
    let saturdays = WorkingHours {
        start: "10:00".into(),
        end: "19:00".into(),
        days: vec![2, 3, 4, 5, 6],
    };
    let barbers = [
        ("Carlos Oliveira", "carlos@example.com", vec!["Classic cuts", "Beard"], &weekdays),
        ("Ricardo Alves", "ricardo@example.com", vec!["Fades", "Designs"], &saturdays),
        ("André Martins", "andre@example.com", vec!["Hair treatment"], &weekdays),
        ("Paulo Santos", "paulo@example.com", vec!["Beard", "Hot towel shave"], &saturdays),
    ];

    for (name, email, specialties, hours) in barbers {
        // barbers have no natural key, so skip names that already exist
        sqlx::query(
            r#"
            INSERT INTO barbers (id, name, email, specialties, work_start, work_end, work_days)
            SELECT $1, $2, $3, $4, $5, $6, $7
            WHERE NOT EXISTS (SELECT 1 FROM barbers WHERE name = $2)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(serde_json::json!(specialties))
        .bind(&hours.start)
        .bind(&hours.end)
        .bind(serde_json::json!(hours.days))
        .execute(pool)
        .await?;
    }

    println!("Seeded barbers");
    Ok(())
}

async fn seed_services(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let services = [
        ("Classic Cut", "Scissors and clipper cut", "Hair", 3500_i64, 30),
        ("Fade Cut", "Skin or low fade", "Hair", 4000, 45),
        ("Full Beard", "Trim, shape and hot towel", "Beard", 2500, 30),
        ("Cut + Beard Combo", "Classic cut with full beard", "Combos", 5500, 60),
        ("Hair Treatment", "Hydration and scalp care", "Treatments", 8000, 40),
        ("Eyebrow Touch-up", "Razor eyebrow cleanup", "", 1500, 10),
    ];

    for (name, description, category, price, duration) in services {
        sqlx::query(
            r#"
            INSERT INTO services (id, name, description, category, price, duration_minutes)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(Some(category).filter(|c| !c.is_empty()))
        .bind(price)
        .bind(duration)
        .execute(pool)
        .await?;
    }

    println!("Seeded services");
    Ok(())
}

async fn seed_settings(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let mut settings = Settings::default();
    settings.general.shop_name = "Barbershop".into();
    settings.general.phone = "11987654321".into();

    sqlx::query(
        r#"
        INSERT INTO settings (id, general, business_hours, notifications)
        VALUES (1, $1, $2, $3)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(serde_json::to_value(&settings.general)?)
    .bind(serde_json::to_value(&settings.business_hours)?)
    .bind(serde_json::to_value(&settings.notifications)?)
    .execute(pool)
    .await?;

    println!("Seeded settings");
    Ok(())
}
