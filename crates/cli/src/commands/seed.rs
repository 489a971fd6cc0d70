//! Seed the database with demo data.
//!
//! Inserts one user, one product, one order and one order line item so a
//! freshly migrated database has something to serve. Running it twice fails
//! on the user's uniqueness constraints rather than duplicating data.

use secrecy::SecretString;
use tracing::info;

use merch_store_api::db::{
    self, OrderDetailRepository, OrderRepository, ProductRepository, UserRepository,
};
use merch_store_api::models::{NewOrder, NewOrderDetail, NewProduct, NewUser};

/// Seed demo data.
///
/// # Errors
///
/// Returns an error if the database URL is not configured or any insert
/// fails, including the uniqueness conflict when the demo user already
/// exists.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("MERCH_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "MERCH_DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let user = UserRepository::new(&pool)
        .create(&NewUser {
            username: "demo".to_owned(),
            email: "demo@example.com".to_owned(),
            password: "demo-password".to_owned(),
        })
        .await?;
    info!(user_id = %user.id, "Created demo user");

    let product = ProductRepository::new(&pool)
        .create(&NewProduct {
            name: "Demo Widget".to_owned(),
            description: "A widget for trying out the API".to_owned(),
            price: 9.99,
            stock: 100,
        })
        .await?;
    info!(product_id = %product.id, "Created demo product");

    let order = OrderRepository::new(&pool)
        .create(&NewOrder {
            user_id: user.id,
            total: 19.98,
        })
        .await?;
    info!(order_id = %order.id, "Created demo order");

    let detail = OrderDetailRepository::new(&pool)
        .create(&NewOrderDetail {
            order_id: order.id,
            product_id: product.id,
            quantity: 2,
        })
        .await?;
    info!(detail_id = %detail.id, sub_total = detail.sub_total, "Created demo line item");

    info!("Seeding complete!");
    Ok(())
}
