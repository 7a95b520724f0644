use std::sync::Arc;

use serde_json::json;

use kitstore::domain::admin::{AdminService, NewProduct, ProductUpdate};
use kitstore::domain::order::{CreateOrderRequest, OrderService};
use kitstore::metrics::Metrics;
use kitstore::models::{
    Order, OrderItem, OrderStatus, ProductVariant, Size, Stock, Variant,
};
use kitstore::store::{DocumentStore, ORDERS};

// ============================================================================
// Storefront flows across services
// ============================================================================

struct Fixture {
    store: Arc<DocumentStore>,
    orders: OrderService,
    admin: AdminService,
}

fn fixture() -> Fixture {
    let store = Arc::new(DocumentStore::new());
    let metrics = Arc::new(Metrics::new().unwrap());
    Fixture {
        orders: OrderService::new(Arc::clone(&store), Arc::clone(&metrics)),
        admin: AdminService::new(Arc::clone(&store), metrics),
        store,
    }
}

fn new_product(name: &str, home_m: u32) -> NewProduct {
    let mut stock = Stock::new();
    stock.set(Variant::Home, Size::M, home_m);
    NewProduct {
        name: name.to_string(),
        description: "Official shirt".into(),
        price: 80.0,
        club: "FC Test".into(),
        season: Some("24/25".into()),
        variants: vec![ProductVariant {
            variant_type: Variant::Home,
            images: vec!["https://img.example/kit.png".into()],
            sku: "SKU-1".into(),
        }],
        sizes: vec![Size::S, Size::M, Size::L, Size::XL],
        stock,
    }
}

fn order_for(product_id: &str, quantity: u32, price: f64) -> CreateOrderRequest {
    CreateOrderRequest {
        shipping_address: json!({"street": "1 Stadium Way"}),
        items: vec![OrderItem {
            product_id: product_id.to_string(),
            variant_type: Variant::Home,
            size: Size::M,
            quantity,
            price,
        }],
    }
}

#[tokio::test]
async fn order_keeps_name_and_price_frozen_after_product_edits() {
    let f = fixture();
    let product_id = f.admin.create_product(new_product("Home Kit", 10)).await.unwrap();

    let order_id = f
        .orders
        .place_order("u1", order_for(&product_id, 1, 80.0))
        .await
        .unwrap();

    // Rename and reprice, then delete outright.
    f.admin
        .update_product(
            &product_id,
            ProductUpdate {
                name: Some("Renamed Kit".into()),
                price: Some(120.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    f.admin.delete_product(&product_id).await.unwrap();

    let order: Order = f.store.get(ORDERS, &order_id).unwrap().unwrap();
    assert_eq!(order.items[0].product_name, "Home Kit");
    assert_eq!(order.items[0].item.price, 80.0);
    assert_eq!(order.total_amount, 80.0);
}

#[tokio::test]
async fn admin_transitions_status_of_a_placed_order() {
    let f = fixture();
    let product_id = f.admin.create_product(new_product("Home Kit", 5)).await.unwrap();
    let order_id = f
        .orders
        .place_order("u1", order_for(&product_id, 1, 80.0))
        .await
        .unwrap();

    let order: Order = f.store.get(ORDERS, &order_id).unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Pending);

    f.admin
        .update_order_status(&order_id, OrderStatus::Paid)
        .await
        .unwrap();
    f.admin
        .update_order_status(&order_id, OrderStatus::Shipped)
        .await
        .unwrap();

    let order: Order = f.store.get(ORDERS, &order_id).unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Shipped);
    // The transition never touches the rest of the document.
    assert_eq!(order.total_amount, 80.0);
    assert_eq!(order.user_id, "u1");
}

#[tokio::test]
async fn analytics_reflect_placed_orders() {
    let f = fixture();
    let home = f.admin.create_product(new_product("Home Kit", 10)).await.unwrap();
    let away = f.admin.create_product(new_product("Away Kit", 10)).await.unwrap();

    f.orders.place_order("u1", order_for(&home, 3, 80.0)).await.unwrap();
    f.orders.place_order("u2", order_for(&home, 2, 80.0)).await.unwrap();
    f.orders.place_order("u2", order_for(&away, 1, 95.0)).await.unwrap();

    let analytics = f.admin.analytics().await.unwrap();
    assert_eq!(analytics.total_orders, 3);
    assert_eq!(analytics.total_revenue, 5.0 * 80.0 + 95.0);
    assert_eq!(analytics.total_sold_products, 6);
    assert_eq!(analytics.top5_products[0].name, "Home Kit-M");
    assert_eq!(analytics.top5_products[0].quantity, 5);
    assert_eq!(analytics.top5_products[1].name, "Away Kit-M");
}

#[tokio::test]
async fn admin_listing_sees_orders_of_all_users() {
    let f = fixture();
    let product_id = f.admin.create_product(new_product("Home Kit", 10)).await.unwrap();

    f.orders.place_order("u1", order_for(&product_id, 1, 80.0)).await.unwrap();
    f.orders.place_order("u2", order_for(&product_id, 1, 80.0)).await.unwrap();

    let all = f.admin.list_orders().await.unwrap();
    assert_eq!(all.len(), 2);

    let owners: Vec<&str> = all.iter().map(|o| o.doc.user_id.as_str()).collect();
    assert!(owners.contains(&"u1"));
    assert!(owners.contains(&"u2"));
}
