use std::collections::HashMap;

use quotebook::import::import_bytes;
use quotebook::resolver::args::Arguments;
use quotebook::schema::OperationKind;
use quotebook::{QuoteStore, Resolvers};
use serde_json::{json, Value};

fn to_args(value: Value) -> Arguments {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

#[tokio::test]
async fn test_imported_records_are_served_field_for_field() {
    let mut document = serde_json::Map::new();
    for i in 1..=25 {
        let author = if i % 2 == 0 {
            Some(format!("author {i}"))
        } else {
            None
        };
        document.insert(
            format!("q{i}"),
            json!({
                "id": i,
                "text": format!("quote number {i}"),
                "author": author,
                "tags": [format!("t{i}"), "shared"],
                "created_at": format!("2020-01-{:02}T00:00:00Z", i),
            }),
        );
    }
    let bytes = serde_json::to_vec(&Value::Object(document.clone())).unwrap();

    let mut store = QuoteStore::new();
    let report = import_bytes(&mut store, &bytes);
    assert!(report.success);
    assert_eq!(report.imported, 25);

    let resolvers = Resolvers::new(store);
    let listed = resolvers
        .dispatch(OperationKind::Query, "list", &Arguments::new())
        .await
        .unwrap();
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 25);

    let by_id: HashMap<i64, &Value> = listed
        .iter()
        .map(|q| (q["id"].as_i64().unwrap(), q))
        .collect();
    for source in document.values() {
        let served = by_id[&source["id"].as_i64().unwrap()];
        assert_eq!(served["text"], source["text"]);
        assert_eq!(served["author"], source["author"]);
        assert_eq!(served["tags"], source["tags"]);
        assert_eq!(served["created_at"], source["created_at"]);
    }
}

#[tokio::test]
async fn test_mutations_after_import() {
    let mut store = QuoteStore::new();
    import_bytes(
        &mut store,
        br#"{"seed": {"id": 1, "quote": "Hello world", "author": "John Will", "tags": ["love", "hate"]}}"#,
    );
    let resolvers = Resolvers::new(store);

    let created = resolvers
        .dispatch(
            OperationKind::Mutation,
            "create",
            &to_args(json!({"text": "Second", "tags": ["new"]})),
        )
        .await
        .unwrap();
    let new_id = created["id"].as_i64().unwrap();
    assert_ne!(new_id, 1);

    let updated = resolvers
        .dispatch(
            OperationKind::Mutation,
            "update",
            &to_args(json!({"id": 1, "tags": ["only"], "created_at": "bad"})),
        )
        .await
        .unwrap();
    assert_eq!(updated["text"], "Hello world");
    assert_eq!(updated["tags"], json!(["only"]));
    assert_eq!(updated["created_at"], "1970-01-01T00:00:00Z");

    let deleted = resolvers
        .dispatch(OperationKind::Mutation, "delete", &to_args(json!({"id": 1})))
        .await
        .unwrap();
    assert_eq!(deleted["id"], 1);

    let again = resolvers
        .dispatch(OperationKind::Mutation, "delete", &to_args(json!({"id": 1})))
        .await
        .unwrap();
    assert_eq!(again["id"], 0);
    assert_eq!(again["text"], "");

    let listed = resolvers
        .dispatch(OperationKind::Query, "list", &Arguments::new())
        .await
        .unwrap();
    assert_eq!(listed, json!([created]));
}
