//! Repository tests against an in-memory database.

mod common;

use merch_store_api::db::{
    OrderDetailRepository, OrderRepository, ProductRepository, RepositoryError, UserRepository,
};
use merch_store_api::models::{
    NewOrder, NewOrderDetail, NewProduct, NewUser, OrderDetailPatch, OrderPatch, ProductPatch,
    UserPatch,
};
use merch_store_core::{OrderDetailId, OrderId, ProductId, UserId};

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_owned(),
        email: email.to_owned(),
        password: "p".to_owned(),
    }
}

fn new_product(name: &str, price: f64, stock: i64) -> NewProduct {
    NewProduct {
        name: name.to_owned(),
        description: String::new(),
        price,
        stock,
    }
}

#[tokio::test]
async fn user_create_and_get_roundtrip() {
    let pool = common::test_pool().await;
    let repo = UserRepository::new(&pool);

    let created = repo.create(&new_user("alice", "a@x.com")).await.unwrap();
    assert!(created.id.as_i64() > 0);

    let fetched = repo.get(created.id).await.unwrap().expect("user exists");
    assert_eq!(fetched.username, "alice");
    assert_eq!(fetched.email, "a@x.com");
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn user_get_unknown_is_none() {
    let pool = common::test_pool().await;
    let repo = UserRepository::new(&pool);

    assert!(repo.get(UserId::new(9999)).await.unwrap().is_none());
}

#[tokio::test]
async fn user_duplicate_username_is_conflict() {
    let pool = common::test_pool().await;
    let repo = UserRepository::new(&pool);

    repo.create(&new_user("alice", "a@x.com")).await.unwrap();
    let err = repo
        .create(&new_user("alice", "other@x.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::Conflict(_)));
}

#[tokio::test]
async fn user_duplicate_email_is_conflict() {
    let pool = common::test_pool().await;
    let repo = UserRepository::new(&pool);

    repo.create(&new_user("alice", "a@x.com")).await.unwrap();
    let err = repo.create(&new_user("bob", "a@x.com")).await.unwrap_err();

    assert!(matches!(err, RepositoryError::Conflict(_)));
}

#[tokio::test]
async fn user_update_merges_only_present_fields() {
    let pool = common::test_pool().await;
    let repo = UserRepository::new(&pool);

    let created = repo.create(&new_user("alice", "a@x.com")).await.unwrap();

    let updated = repo
        .update(
            created.id,
            UserPatch {
                email: Some("alice@x.com".to_owned()),
                ..UserPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.username, "alice");
    assert_eq!(updated.email, "alice@x.com");
    assert_eq!(updated.password, "p");
}

#[tokio::test]
async fn user_update_unknown_is_not_found() {
    let pool = common::test_pool().await;
    let repo = UserRepository::new(&pool);

    let err = repo
        .update(UserId::new(1), UserPatch::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound));
}

#[tokio::test]
async fn user_delete_is_idempotent_in_outcome() {
    let pool = common::test_pool().await;
    let repo = UserRepository::new(&pool);

    let created = repo.create(&new_user("alice", "a@x.com")).await.unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
}

#[tokio::test]
async fn product_defaults_and_merge() {
    let pool = common::test_pool().await;
    let repo = ProductRepository::new(&pool);

    let created = repo.create(&new_product("Widget", 10.0, 5)).await.unwrap();
    assert_eq!(created.description, "");

    // Negative values are stored as provided; there is no range validation.
    let updated = repo
        .update(
            created.id,
            ProductPatch {
                price: Some(-1.0),
                stock: Some(-3),
                ..ProductPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Widget");
    assert!((updated.price - -1.0).abs() < f64::EPSILON);
    assert_eq!(updated.stock, -3);
}

#[tokio::test]
async fn product_unknown_update_is_not_found() {
    let pool = common::test_pool().await;
    let repo = ProductRepository::new(&pool);

    let err = repo
        .update(ProductId::new(1), ProductPatch::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound));
}

#[tokio::test]
async fn order_create_requires_existing_user() {
    let pool = common::test_pool().await;
    let repo = OrderRepository::new(&pool);

    let err = repo
        .create(&NewOrder {
            user_id: UserId::new(42),
            total: 10.0,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::MissingReference("user")));
}

#[tokio::test]
async fn order_survives_user_deletion() {
    let pool = common::test_pool().await;
    let users = UserRepository::new(&pool);
    let orders = OrderRepository::new(&pool);

    let user = users.create(&new_user("alice", "a@x.com")).await.unwrap();
    let order = orders
        .create(&NewOrder {
            user_id: user.id,
            total: 10.0,
        })
        .await
        .unwrap();

    assert!(users.delete(user.id).await.unwrap());

    // The relationship is denormalized: the orphaned order stays readable.
    let fetched = orders.get(order.id).await.unwrap().expect("order exists");
    assert_eq!(fetched.user_id, user.id);
}

#[tokio::test]
async fn order_update_zero_total_is_explicit() {
    let pool = common::test_pool().await;
    let users = UserRepository::new(&pool);
    let orders = OrderRepository::new(&pool);

    let user = users.create(&new_user("alice", "a@x.com")).await.unwrap();
    let order = orders
        .create(&NewOrder {
            user_id: user.id,
            total: 10.0,
        })
        .await
        .unwrap();

    // A present zero is written; only an absent field means "no change".
    let updated = orders
        .update(order.id, OrderPatch { total: Some(0.0) })
        .await
        .unwrap();
    assert!(updated.total.abs() < f64::EPSILON);

    let unchanged = orders.update(order.id, OrderPatch::default()).await.unwrap();
    assert!(unchanged.total.abs() < f64::EPSILON);
}

#[tokio::test]
async fn order_detail_create_computes_sub_total() {
    let pool = common::test_pool().await;
    let users = UserRepository::new(&pool);
    let products = ProductRepository::new(&pool);
    let orders = OrderRepository::new(&pool);
    let details = OrderDetailRepository::new(&pool);

    let user = users.create(&new_user("alice", "a@x.com")).await.unwrap();
    let product = products.create(&new_product("Widget", 10.0, 5)).await.unwrap();
    let order = orders
        .create(&NewOrder {
            user_id: user.id,
            total: 10.0,
        })
        .await
        .unwrap();

    let detail = details
        .create(&NewOrderDetail {
            order_id: order.id,
            product_id: product.id,
            quantity: 2,
        })
        .await
        .unwrap();

    assert!((detail.sub_total - 20.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn order_detail_create_rejects_dangling_references() {
    let pool = common::test_pool().await;
    let details = OrderDetailRepository::new(&pool);

    let err = details
        .create(&NewOrderDetail {
            order_id: OrderId::new(1),
            product_id: ProductId::new(1),
            quantity: 2,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RepositoryError::MissingReference("order or product")
    ));

    // Nothing was persisted.
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_details")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn order_detail_quantity_update_uses_current_price() {
    let pool = common::test_pool().await;
    let users = UserRepository::new(&pool);
    let products = ProductRepository::new(&pool);
    let orders = OrderRepository::new(&pool);
    let details = OrderDetailRepository::new(&pool);

    let user = users.create(&new_user("alice", "a@x.com")).await.unwrap();
    let product = products.create(&new_product("Widget", 10.0, 5)).await.unwrap();
    let order = orders
        .create(&NewOrder {
            user_id: user.id,
            total: 10.0,
        })
        .await
        .unwrap();
    let detail = details
        .create(&NewOrderDetail {
            order_id: order.id,
            product_id: product.id,
            quantity: 2,
        })
        .await
        .unwrap();

    // Price changes between creation and the quantity update; the sub-total
    // follows the current price.
    products
        .update(
            product.id,
            ProductPatch {
                price: Some(12.5),
                ..ProductPatch::default()
            },
        )
        .await
        .unwrap();

    let updated = details
        .update(detail.id, OrderDetailPatch { quantity: Some(3) })
        .await
        .unwrap();

    assert_eq!(updated.quantity, 3);
    assert!((updated.sub_total - 37.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn order_detail_update_without_quantity_changes_nothing() {
    let pool = common::test_pool().await;
    let users = UserRepository::new(&pool);
    let products = ProductRepository::new(&pool);
    let orders = OrderRepository::new(&pool);
    let details = OrderDetailRepository::new(&pool);

    let user = users.create(&new_user("alice", "a@x.com")).await.unwrap();
    let product = products.create(&new_product("Widget", 10.0, 5)).await.unwrap();
    let order = orders
        .create(&NewOrder {
            user_id: user.id,
            total: 10.0,
        })
        .await
        .unwrap();
    let detail = details
        .create(&NewOrderDetail {
            order_id: order.id,
            product_id: product.id,
            quantity: 2,
        })
        .await
        .unwrap();

    let unchanged = details
        .update(detail.id, OrderDetailPatch::default())
        .await
        .unwrap();

    assert_eq!(unchanged.quantity, 2);
    assert!((unchanged.sub_total - 20.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn order_detail_unknown_is_not_found() {
    let pool = common::test_pool().await;
    let details = OrderDetailRepository::new(&pool);

    assert!(details.get(OrderDetailId::new(7)).await.unwrap().is_none());

    let err = details
        .update(OrderDetailId::new(7), OrderDetailPatch { quantity: Some(1) })
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}
