//! The cart store.

use std::sync::Arc;

use cart_cache::{Cache, KeyValueStore};
use cart_core::{Cart, CartError, LineItem, Operation, ProductId};
use cart_data::{FetchError, InventoryService, ProductCatalog};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{Notification, NotificationSink, StoreConfig, TracingNotifier};

/// Collaborators a [`CartStore`] talks to.
#[derive(Clone)]
pub struct Services {
    pub inventory: Arc<dyn InventoryService>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub storage: Arc<dyn KeyValueStore>,
    pub notifier: Arc<dyn NotificationSink>,
}

impl Services {
    /// Bundle the lookups and storage, notifying through tracing.
    pub fn new(
        inventory: Arc<dyn InventoryService>,
        catalog: Arc<dyn ProductCatalog>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            inventory,
            catalog,
            storage,
            notifier: Arc::new(TracingNotifier),
        }
    }

    /// Replace the notification sink.
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }
}

/// Owner of one session's cart.
///
/// The cart is only changed through [`add_product`](Self::add_product),
/// [`remove_product`](Self::remove_product) and
/// [`update_product_amount`](Self::update_product_amount). Each one runs its
/// lookups first, then checks and applies the change against the current
/// cart in a single step, persists the result and notifies subscribers.
///
/// Failures are reported to the notification sink and returned; the cart
/// is left untouched and the store stays usable.
pub struct CartStore {
    state: watch::Sender<Cart>,
    inventory: Arc<dyn InventoryService>,
    catalog: Arc<dyn ProductCatalog>,
    cache: Cache,
    notifier: Arc<dyn NotificationSink>,
    config: StoreConfig,
}

impl CartStore {
    /// Create the store, restoring the persisted cart.
    ///
    /// A missing, unreadable or invalid persisted cart yields an empty one.
    pub fn initialize(services: Services, config: StoreConfig) -> Self {
        let cache = Cache::new(services.storage);
        let cart = hydrate(&cache, &config.storage_key);
        let (state, _) = watch::channel(cart);

        Self {
            state,
            inventory: services.inventory,
            catalog: services.catalog,
            cache,
            notifier: services.notifier,
            config,
        }
    }

    /// Snapshot of the current cart.
    pub fn cart(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Receiver that observes every committed change.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart has its quantity raised by one, as
    /// long as stock covers the new quantity. Otherwise its details are
    /// fetched from the catalog and it is appended with quantity one.
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_add(product_id).await;
        match &result {
            Ok(()) => {
                info!(%product_id, "product added");
                self.notifier
                    .notify(Notification::success(&self.config.messages.add_succeeded));
            }
            Err(err) => self.report(Operation::Add, product_id, err),
        }
        result
    }

    /// Remove a product from the cart.
    ///
    /// Succeeds silently; only a product missing from the cart is reported.
    pub fn remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.commit(|cart| cart.remove(product_id).map(|_| ()));
        match &result {
            Ok(()) => debug!(%product_id, "product removed"),
            Err(err) => self.report(Operation::Remove, product_id, err),
        }
        result
    }

    /// Set a product's quantity to `amount`.
    ///
    /// Amounts of zero or below are ignored without error. The stock check
    /// runs before the cart is searched, so a product missing from the cart
    /// is only reported when stock would have allowed the change.
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<(), CartError> {
        if amount <= 0 {
            debug!(%product_id, amount, "ignoring non-positive amount");
            return Ok(());
        }

        let result = self.try_update(product_id, amount).await;
        match &result {
            Ok(()) => debug!(%product_id, amount, "product amount updated"),
            Err(err) => self.report(Operation::Update, product_id, err),
        }
        result
    }

    async fn try_add(&self, product_id: ProductId) -> Result<(), CartError> {
        let stock = self
            .inventory
            .stock(product_id)
            .await
            .map_err(|e| CartError::fetch(Operation::Add, e))?;

        if stock.is_out_of_stock() {
            return Err(CartError::OutOfStock {
                product_id,
                requested: 1,
                available: stock.available_quantity,
            });
        }

        if self.state.borrow().contains(product_id) {
            return self.commit(|cart| cart.increment(product_id, &stock).map(|_| ()));
        }

        let product = self
            .catalog
            .product(product_id)
            .await
            .map_err(|e| CartError::fetch(Operation::Add, e))?;

        if product.id != product_id {
            return Err(CartError::fetch(
                Operation::Add,
                FetchError::UnexpectedProduct {
                    requested: product_id,
                    returned: product.id,
                },
            ));
        }

        // Another add may have appended the product during the catalog lookup.
        self.commit(|cart| {
            if cart.contains(product_id) {
                cart.increment(product_id, &stock).map(|_| ())
            } else {
                cart.append(LineItem::from_product(product))
            }
        })
    }

    async fn try_update(&self, product_id: ProductId, amount: i64) -> Result<(), CartError> {
        let stock = self
            .inventory
            .stock(product_id)
            .await
            .map_err(|e| CartError::fetch(Operation::Update, e))?;

        let quantity = u32::try_from(amount).map_err(|_| CartError::OutOfStock {
            product_id,
            requested: amount.unsigned_abs(),
            available: stock.available_quantity,
        })?;

        self.commit(|cart| cart.set_quantity(product_id, quantity, &stock))
    }

    /// Apply `mutate` to the live cart, then persist.
    ///
    /// Subscribers are only woken when the mutation succeeds.
    fn commit<F>(&self, mutate: F) -> Result<(), CartError>
    where
        F: FnOnce(&mut Cart) -> Result<(), CartError>,
    {
        let mut outcome = Ok(());
        self.state.send_if_modified(|cart| match mutate(cart) {
            Ok(()) => true,
            Err(err) => {
                outcome = Err(err);
                false
            }
        });
        outcome?;

        self.persist();
        Ok(())
    }

    fn persist(&self) {
        let cart = self.cart();
        if let Err(err) = self.cache.set(&self.config.storage_key, &cart) {
            warn!(key = %self.config.storage_key, error = %err, "failed to persist cart");
        }
    }

    fn report(&self, operation: Operation, product_id: ProductId, err: &CartError) {
        let messages = &self.config.messages;
        let message = match (err, operation) {
            (CartError::OutOfStock { .. }, _) => &messages.out_of_stock,
            (_, Operation::Add) => &messages.add_failed,
            (_, Operation::Remove) => &messages.remove_failed,
            (_, Operation::Update) => &messages.update_failed,
        };

        if matches!(err, CartError::Fetch { .. }) {
            warn!(%product_id, %operation, error = %err, "cart lookup failed");
        } else {
            info!(%product_id, %operation, error = %err, "cart operation rejected");
        }
        self.notifier.notify(Notification::error(message));
    }
}

fn hydrate(cache: &Cache, key: &str) -> Cart {
    match cache.get::<Cart>(key) {
        Ok(Some(cart)) => {
            debug!(key, items = cart.len(), "restored cart");
            cart
        }
        Ok(None) => Cart::new(),
        Err(err) => {
            warn!(key, error = %err, "discarding unreadable cart");
            Cart::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Level, RecordingNotifier};
    use cart_cache::{CacheError, MemoryStore};
    use cart_core::Product;
    use cart_data::FixtureApi;

    /// Storage that refuses every write.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), CacheError> {
            Err(CacheError::StoreError("quota exceeded".to_string()))
        }

        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Ok(())
        }

        fn keys(&self) -> Result<Vec<String>, CacheError> {
            Ok(vec![])
        }
    }

    fn store_with(storage: Arc<dyn KeyValueStore>) -> (CartStore, Arc<RecordingNotifier>) {
        let api = Arc::new(
            FixtureApi::new()
                .with_product(Product::new(ProductId::new(1), "Shoe", 100.0, "x"))
                .with_stock(ProductId::new(1), 5),
        );
        let notifier = Arc::new(RecordingNotifier::new());
        let services =
            Services::new(api.clone(), api, storage).with_notifier(notifier.clone());
        (
            CartStore::initialize(services, StoreConfig::default()),
            notifier,
        )
    }

    #[test]
    fn test_hydrate_missing_is_empty() {
        let (store, _) = store_with(Arc::new(MemoryStore::new()));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_hydrate_existing() {
        let raw = r#"[{"id":1,"name":"Shoe","price":100,"image":"x","amount":2}]"#;
        let (store, _) = store_with(Arc::new(MemoryStore::with_entry(
            crate::DEFAULT_STORAGE_KEY,
            raw,
        )));

        assert_eq!(store.cart().get(ProductId::new(1)).unwrap().quantity, 2);
    }

    #[test]
    fn test_hydrate_corrupt_is_empty() {
        for raw in ["{oops", "null", r#"[{"id":1}]"#, r#"[{"id":1,"name":"a","price":1,"image":"x","amount":0}]"#] {
            let (store, _) = store_with(Arc::new(MemoryStore::with_entry(
                crate::DEFAULT_STORAGE_KEY,
                raw,
            )));
            assert!(store.cart().is_empty(), "{raw} should hydrate empty");
        }
    }

    #[tokio::test]
    async fn test_persist_failure_keeps_mutation() {
        let (store, notifier) = store_with(Arc::new(ReadOnlyStore));

        store.add_product(ProductId::new(1)).await.unwrap();

        assert_eq!(store.cart().len(), 1);
        assert_eq!(notifier.take()[0].level, Level::Success);
    }

    #[tokio::test]
    async fn test_subscribers_see_commits_only() {
        let (store, _) = store_with(Arc::new(MemoryStore::new()));
        let mut rx = store.subscribe();

        assert!(store.remove_product(ProductId::new(1)).is_err());
        assert!(!rx.has_changed().unwrap());

        store.add_product(ProductId::new(1)).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }

    #[tokio::test]
    async fn test_oversized_amount_is_out_of_stock() {
        let (store, _) = store_with(Arc::new(MemoryStore::new()));
        store.add_product(ProductId::new(1)).await.unwrap();

        let err = store
            .update_product_amount(ProductId::new(1), i64::from(u32::MAX) + 1)
            .await
            .unwrap_err();
        assert!(err.is_out_of_stock());
        assert_eq!(store.cart().get(ProductId::new(1)).unwrap().quantity, 1);
    }
}
