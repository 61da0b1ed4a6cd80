use std::future::Future;

use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions, UpdateOptions},
    IndexModel,
};
use tracing::trace;

use super::{Backend, Record};
use crate::utils::UserId;

pub type HashMap = tokio::sync::RwLock<std::collections::HashMap<UserId, Record>>;

trait BackendInfallible: Send + Sync + 'static {
    fn record_game(&self, user: UserId, points: u32, name: String)
        -> impl Future<Output = ()> + Send;
    fn get(&self, user: UserId) -> impl Future<Output = Option<Record>> + Send;
    fn all(&self) -> impl Future<Output = Vec<Record>> + Send;
}

impl<B: BackendInfallible> Backend for B {
    type Error = std::convert::Infallible;

    async fn record_game(&self, user: UserId, points: u32, name: String) -> Result<(), Self::Error> {
        BackendInfallible::record_game(self, user, points, name).await;
        Ok(())
    }

    async fn get(&self, user: UserId) -> Result<Option<Record>, Self::Error> {
        Ok(BackendInfallible::get(self, user).await)
    }

    async fn all(&self) -> Result<Vec<Record>, Self::Error> {
        Ok(BackendInfallible::all(self).await)
    }
}

impl BackendInfallible for HashMap {
    async fn record_game(&self, user: UserId, points: u32, name: String) {
        let mut guard = self.write().await;
        let record = guard
            .entry(user)
            .or_insert_with(|| Record::new(user, name.clone()));

        record.points += u64::from(points);
        record.games_played += 1;
        record.name = name;
    }

    async fn get(&self, user: UserId) -> Option<Record> {
        let guard = self.read().await;
        guard.get(&user).cloned()
    }

    async fn all(&self) -> Vec<Record> {
        let guard = self.read().await;
        guard.values().cloned().collect()
    }
}

#[derive(Debug, Clone)]
pub struct MongoDb {
    collection: mongodb::Collection<Record>,
}

impl MongoDb {
    pub fn new(collection: mongodb::Collection<Record>) -> Self {
        Self { collection }
    }

    /// Makes `user` unique, so racing upserts for a new user retry instead of
    /// inserting two records.
    pub async fn ensure_indexes(&self) -> mongodb::error::Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "user": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index, None).await?;
        trace!("user index ready");

        Ok(())
    }
}

impl Backend for MongoDb {
    type Error = mongodb::error::Error;

    async fn record_game(&self, user: UserId, points: u32, name: String) -> Result<(), Self::Error> {
        trace!(%user, points, "recording game");

        self.collection
            .update_one(
                doc! { "user": user.get() },
                doc! {
                    "$inc": { "points": i64::from(points), "games_played": 1 },
                    "$set": { "name": name },
                },
                UpdateOptions::builder().upsert(true).build(),
            )
            .await?;

        Ok(())
    }

    async fn get(&self, user: UserId) -> Result<Option<Record>, Self::Error> {
        self.collection
            .find_one(doc! { "user": user.get() }, None)
            .await
    }

    async fn all(&self) -> Result<Vec<Record>, Self::Error> {
        self.collection
            .find(
                None,
                FindOptions::builder()
                    .sort(doc! { "points": -1, "user": 1 })
                    .build(),
            )
            .await?
            .try_collect()
            .await
    }
}
