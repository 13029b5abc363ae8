//! Resolvers for the quote schema.
//!
//! Each resolver coerces its arguments, takes the store lock once and maps
//! the outcome onto the engine's response contract. "Not found" is never an
//! error: `quote` yields `None`, `update` and `delete` yield the empty record.

pub mod args;

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::entity::Quote;
use crate::error::{QuoteError, Result};
use crate::schema::{FieldDescriptor, OperationKind, Schema};
use crate::storage::QuoteStore;
use args::{Arguments, CreateArgs, DeleteArgs, QuoteArgs, UpdateArgs};

/// Store handle shared by every resolver invocation.
pub type SharedStore = Arc<Mutex<QuoteStore>>;

#[derive(Clone)]
pub struct Resolvers {
    store: SharedStore,
    schema: Arc<Schema>,
}

impl Resolvers {
    pub fn new(store: QuoteStore) -> Self {
        Self::from_shared(Arc::new(Mutex::new(store)))
    }

    pub fn from_shared(store: SharedStore) -> Self {
        Self {
            store,
            schema: Arc::new(Schema::new()),
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// `quote(id)`: the matching record, or `None`.
    pub async fn quote(&self, args: QuoteArgs) -> Option<Quote> {
        let id = args.id?;
        let store = self.store.lock().await;
        store.get(id).cloned()
    }

    /// `list`: every record in store order.
    pub async fn list(&self) -> Vec<Quote> {
        let store = self.store.lock().await;
        store.list().to_vec()
    }

    /// `create(text, author?, tags?)`: the stored record with its new id.
    pub async fn create(&self, args: CreateArgs) -> Result<Quote> {
        let mut store = self.store.lock().await;
        let quote = store.insert(args.draft)?;
        info!(id = quote.id, "created quote");
        Ok(quote)
    }

    /// `update(id, ...)`: the updated record, or the empty record.
    pub async fn update(&self, args: UpdateArgs) -> Quote {
        let Some(id) = args.id else {
            return Quote::default();
        };
        let mut store = self.store.lock().await;
        match store.apply_update(id, args.update) {
            Some(quote) => {
                info!(id, "updated quote");
                quote
            }
            None => {
                debug!(id, "update target not found");
                Quote::default()
            }
        }
    }

    /// `delete(id)`: the removed record, or the empty record.
    pub async fn delete(&self, args: DeleteArgs) -> Quote {
        let Some(id) = args.id else {
            return Quote::default();
        };
        let mut store = self.store.lock().await;
        match store.remove(id) {
            Some(quote) => {
                info!(id, "deleted quote");
                quote
            }
            None => {
                debug!(id, "delete target not found");
                Quote::default()
            }
        }
    }

    /// Resolve one field invocation against the schema.
    ///
    /// Unknown fields, undeclared arguments and missing non-null arguments
    /// are rejected before any coercion runs.
    pub async fn dispatch(
        &self,
        operation: OperationKind,
        field: &str,
        arguments: &Arguments,
    ) -> Result<Value> {
        let descriptor =
            self.schema
                .field(operation, field)
                .ok_or_else(|| QuoteError::UnknownField {
                    operation: operation.to_string(),
                    field: field.to_string(),
                })?;
        check_arguments(descriptor, arguments)?;

        let value = match (operation, field) {
            (OperationKind::Query, "quote") => {
                serde_json::to_value(self.quote(QuoteArgs::from_args(arguments)).await)?
            }
            (OperationKind::Query, "list") => serde_json::to_value(self.list().await)?,
            (OperationKind::Mutation, "create") => {
                let args = CreateArgs::from_args(arguments)?;
                serde_json::to_value(self.create(args).await?)?
            }
            (OperationKind::Mutation, "update") => {
                serde_json::to_value(self.update(UpdateArgs::from_args(arguments)).await)?
            }
            (OperationKind::Mutation, "delete") => {
                serde_json::to_value(self.delete(DeleteArgs::from_args(arguments)).await)?
            }
            _ => {
                return Err(QuoteError::UnknownField {
                    operation: operation.to_string(),
                    field: field.to_string(),
                })
            }
        };
        Ok(value)
    }
}

fn check_arguments(field: &FieldDescriptor, arguments: &Arguments) -> Result<()> {
    if let Some(name) = arguments.keys().find(|k| field.argument(k).is_none()) {
        return Err(QuoteError::UnknownArgument {
            field: field.name.to_string(),
            argument: name.clone(),
        });
    }
    for arg in field.required_args() {
        if arguments.get(arg.name).map_or(true, Value::is_null) {
            return Err(QuoteError::MissingArgument {
                field: field.name.to_string(),
                argument: arg.name.to_string(),
            });
        }
    }
    Ok(())
}
