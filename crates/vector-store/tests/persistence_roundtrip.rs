use proptest::prelude::*;
use tempfile::TempDir;
use tidy_vector_store::{IndexedItem, ItemId, VectorStore, VectorStoreError};

fn save_and_load(store: &VectorStore) -> VectorStore {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("index.json");
    runtime.block_on(async {
        store.save(&path).await.unwrap();
        VectorStore::load(&path).await.unwrap()
    })
}

fn bits(store: &VectorStore) -> Vec<(ItemId, Vec<u32>)> {
    store
        .all()
        .map(|item| {
            let bits = item.embedding.iter().map(|v| v.to_bits()).collect();
            (item.id.clone(), bits)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn accepted_embeddings_survive_save_and_load(
        embeddings in prop::collection::vec(prop::collection::vec(any::<f32>(), 3), 1..8),
    ) {
        let mut store = VectorStore::new();
        for (i, embedding) in embeddings.into_iter().enumerate() {
            let non_finite = embedding.iter().position(|v| !v.is_finite());
            match (store.append(IndexedItem::new(format!("item-{i}"), embedding)), non_finite) {
                (Ok(()), None) => {}
                (Err(VectorStoreError::NonFiniteEmbedding { position }), Some(expected)) => {
                    prop_assert_eq!(position, expected);
                }
                (result, _) => prop_assert!(false, "unexpected append result: {:?}", result),
            }
        }

        let loaded = save_and_load(&store);
        prop_assert_eq!(loaded.dimension(), store.dimension());
        prop_assert_eq!(bits(&loaded), bits(&store));
    }
}

#[test]
fn integer_keys_survive_save_and_load() {
    let mut store = VectorStore::new();
    store
        .append(IndexedItem::new(42_u64, vec![1.0, 0.0]))
        .unwrap();
    store
        .append(IndexedItem::new(7_u64, vec![0.0, 1.0]))
        .unwrap();

    let loaded = save_and_load(&store);
    let ids: Vec<&str> = loaded.all().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["42", "7"]);
    assert!(loaded.find(&ItemId::from(7_u64)).is_some());
}
