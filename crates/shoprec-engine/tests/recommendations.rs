//! End-to-end engine tests: registration through filtering and ranking
//! with deterministic mock oracles.

use std::sync::Arc;

use shoprec_engine::mock::MockVectorIndex;
use shoprec_engine::{
    Category, MerchantSettings, PriceRange, ProductInput, RecommendRequest, Recommender,
    UserPreferences,
};

fn input(id: &str, title: &str, tags: &[&str], price: &str) -> ProductInput {
    ProductInput {
        id: id.to_string(),
        title: title.to_string(),
        product_type: String::new(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        price: price.to_string(),
        image: String::new(),
    }
}

fn recommender() -> Recommender {
    let index = MockVectorIndex::new()
        .with_representative("rep-beauty-0", Category::Beauty, vec![1.0, 0.0, 0.0, 0.0])
        .with_representative("rep-beauty-1", Category::Beauty, vec![0.95, 0.05, 0.0, 0.0])
        .with_representative("rep-fashion-0", Category::Fashion, vec![0.0, 1.0, 0.0, 0.0])
        .with_representative("rep-home-0", Category::Home, vec![0.3, 0.0, 0.0, 0.95]);
    Recommender::new(Arc::new(index), None)
}

#[test]
fn test_reregistration_fully_replaces_catalog() {
    let r = recommender();
    r.register_merchant_products(
        "m1",
        vec![
            input("old-1", "Face Cream", &["skincare"], "30"),
            input("old-2", "Face Serum", &["skincare"], "35"),
        ],
    )
    .unwrap();
    r.register_merchant_products("m1", vec![input("new-1", "Face Lotion", &["skincare"], "28")])
        .unwrap();

    let ids: Vec<String> = r
        .merchant_products("m1", None)
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec!["new-1"]);

    // A removed product must not resurface through any query path
    let mut request = RecommendRequest::for_merchant("m1");
    request.current_product_id = Some("new-1".to_string());
    let results = r.recommend(&request).unwrap();
    assert!(results.iter().all(|rec| !rec.product_id.starts_with("old")));
}

#[test]
fn test_hot_climate_code_excludes_winter_products() {
    let r = recommender();
    r.register_merchant_products(
        "m1",
        vec![
            input("coat", "Heavy Coat", &["winter", "apparel"], "100"),
            input("tee", "Plain Shirt", &["apparel"], "20"),
        ],
    )
    .unwrap();

    let mut request = RecommendRequest::for_merchant("m1");
    request.signals.added_to_cart = vec!["tee".to_string()];
    request.location = Some("PK".to_string());
    let results = r.recommend(&request).unwrap();

    assert!(!results.iter().any(|rec| rec.product_id == "coat"));
    // The untagged product passes (it is the cart anchor, not excluded)
    assert!(results.iter().any(|rec| rec.product_id == "tee"));
}

#[test]
fn test_price_range_low_boundary_through_popular() {
    let r = recommender();
    r.register_merchant_products(
        "m1",
        vec![
            input("edge", "Desk Lamp", &["home"], "50.00"),
            input("over", "Floor Lamp", &["home"], "50.01"),
        ],
    )
    .unwrap();

    let prefs = UserPreferences {
        price_range: Some(PriceRange::Low),
        ..Default::default()
    };
    let results = r
        .popular("m1", None, None, &prefs, 10, &MerchantSettings::default())
        .unwrap();
    let ids: Vec<&str> = results.iter().map(|rec| rec.product_id.as_str()).collect();
    assert_eq!(ids, vec!["edge"]);
}

#[test]
fn test_vegan_preference_in_pakistan_returns_only_vegan_beauty() {
    let r = recommender();
    r.register_merchant_products(
        "m1",
        vec![
            input("a", "Vegan Face Cream", &["vegan"], "30"),
            input("b", "Winter Coat", &["winter"], "100"),
        ],
    )
    .unwrap();

    let mut request = RecommendRequest::for_merchant("m1");
    request.signals.added_to_cart = vec!["a".to_string()];
    request.location = Some("Pakistan".to_string());
    request.preferences.vegan = true;
    let results = r.recommend(&request).unwrap();

    let ids: Vec<&str> = results.iter().map(|rec| rec.product_id.as_str()).collect();
    assert_eq!(ids, vec!["a"]);
}

#[test]
fn test_hard_price_filter_never_empties_results() {
    let r = recommender();
    r.register_merchant_products(
        "m1",
        vec![
            input("anchor", "Face Cream", &["skincare"], "10"),
            input("pricey", "Face Serum Set", &["skincare"], "500"),
        ],
    )
    .unwrap();

    // Every candidate falls outside the +/-30% window of 10, so the
    // hard filter backs off instead of returning nothing
    let mut request = RecommendRequest::for_merchant("m1");
    request.current_product_id = Some("anchor".to_string());
    let results = r.recommend(&request).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].product_id, "pricey");
}

#[test]
fn test_same_category_off_spans_categories() {
    let r = recommender();
    r.register_merchant_products(
        "m1",
        vec![
            input("cream", "Face Cream", &["skincare"], "30"),
            input("serum", "Face Serum", &["skincare"], "32"),
            input("mug", "Coffee Mug", &["kitchen"], "12"),
        ],
    )
    .unwrap();

    let settings = serde_json::json!({"filters": {"sameCategoryOnly": false, "priceProximity": false}});
    let mut request = RecommendRequest::for_merchant("m1");
    request.current_product_id = Some("cream".to_string());
    request.settings = MerchantSettings::from_value(Some(&settings));
    let results = r.recommend(&request).unwrap();

    let categories: Vec<Category> = results.iter().map(|rec| rec.category).collect();
    assert!(categories.contains(&Category::Home));
    assert!(categories.contains(&Category::Beauty));
}

#[test]
fn test_weight_overrides_change_ranking() {
    let r = recommender();
    r.register_merchant_products(
        "m1",
        vec![
            input("viewed-like", "Face Cream", &["skincare"], "30"),
            input("cart-like", "Leather Handbag", &["apparel"], "90"),
        ],
    )
    .unwrap();

    // Browsing history dominates when its weight is cranked far above
    // the cart weight
    let settings = serde_json::json!({
        "filters": {"sameCategoryOnly": false, "priceProximity": false, "locationFilter": false},
        "weights": {"browsingHistory": 5.0, "cartItems": 0.01}
    });
    let mut request = RecommendRequest::for_merchant("m1");
    request.signals.viewed = vec!["viewed-like".to_string()];
    request.signals.added_to_cart = vec!["cart-like".to_string()];
    request.exclude_viewed = false;
    request.settings = MerchantSettings::from_value(Some(&settings));

    let results = r.recommend(&request).unwrap();
    assert_eq!(results[0].product_id, "viewed-like");
}

#[test]
fn test_unavailable_index_degrades_to_popular() {
    let r = Recommender::new(Arc::new(MockVectorIndex::unavailable()), None);
    r.register_merchant_products("m1", vec![input("a", "Face Cream", &["skincare"], "30")])
        .unwrap();

    let mut request = RecommendRequest::for_merchant("m1");
    request.signals.purchased = vec!["a".to_string()];
    request.exclude_purchased = false;
    let results = r.recommend(&request).unwrap();

    // No embeddings resolve, so the popular fallback serves results
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 1.0);
}

#[test]
fn test_excluded_purchases_do_not_reappear() {
    let r = recommender();
    r.register_merchant_products(
        "m1",
        vec![
            input("bought", "Face Cream", &["skincare"], "30"),
            input("fresh", "Face Serum", &["skincare"], "32"),
        ],
    )
    .unwrap();

    let mut request = RecommendRequest::for_merchant("m1");
    request.signals.purchased = vec!["bought".to_string()];
    let results = r.recommend(&request).unwrap();

    assert!(results.iter().all(|rec| rec.product_id != "bought"));
    assert!(results.iter().any(|rec| rec.product_id == "fresh"));
}
