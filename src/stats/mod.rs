//! All-time points and games played, per user.

use std::{future::Future, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::utils::UserId;

mod backend;
pub use backend::{HashMap, MongoDb};

mod error;
pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub user: UserId,
    pub points: u64,
    pub games_played: u32,
    pub name: String,
}

impl Record {
    fn new(user: UserId, name: String) -> Self {
        Self {
            user,
            points: 0,
            games_played: 0,
            name,
        }
    }
}

pub trait Backend: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Adds one finished game to `user`'s record, creating it if needed.
    ///
    /// Must be atomic: concurrent calls for one user never lose an increment.
    fn record_game(
        &self,
        user: UserId,
        points: u32,
        name: String,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn get(&self, user: UserId) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send;

    fn all(&self) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send;
}

#[derive(Debug, Default)]
pub struct Stats<B = HashMap> {
    backend: Arc<B>,
}

impl<B> Clone for Stats<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
        }
    }
}

impl<B> From<B> for Stats<B> {
    fn from(value: B) -> Self {
        Self {
            backend: Arc::new(value),
        }
    }
}

impl Stats<HashMap> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stats<MongoDb> {
    pub async fn mongodb(db: &mongodb::Database) -> mongodb::error::Result<Self> {
        let backend = MongoDb::new(db.collection("stats"));
        backend.ensure_indexes().await?;
        Ok(backend.into())
    }
}

impl<B: Backend> Stats<B> {
    pub async fn record_game(&self, user: UserId, points: u32, name: String) -> Result<()> {
        self.backend
            .record_game(user, points, name)
            .await
            .map_err(Error::backend)
    }

    pub async fn get(&self, user: UserId) -> Result<Option<Record>> {
        self.backend.get(user).await.map_err(Error::backend)
    }

    /// Every record, most points first. Ties go to the lower user id.
    pub async fn leaderboard(&self) -> Result<Vec<Record>> {
        let mut records = self.backend.all().await.map_err(Error::backend)?;
        records.sort_by(|a, b| b.points.cmp(&a.points).then(a.user.cmp(&b.user)));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    type Result<T = ()> = std::result::Result<T, Box<dyn std::error::Error>>;

    mod consts {
        use crate::utils::UserId;

        pub const ALICE: UserId = UserId::new(1);
        pub const BOB: UserId = UserId::new(2);
        pub const CAROL: UserId = UserId::new(3);
    }

    macro_rules! test_backends {
        {$($backend:ident as $mod_name:ident $block:block)+} => {
            $(
            paste::paste! {
                mod [<$mod_name _ backend>] {
                    use super::consts::*;
                    use super::Result;
                    use crate::utils::UserId;
                    use pretty_assertions::assert_eq;

                    type Stats = super::super::Stats<super::super::$backend>;

                    #[tracing_test::traced_test]
                    #[tokio::test]
                    async fn accumulates_across_games() -> Result {
                        let (stats, _db): (Stats, _) = $block;

                        stats.record_game(ALICE, 20, "alice".to_owned()).await?;
                        stats.record_game(ALICE, 15, "alice".to_owned()).await?;

                        let record = stats.get(ALICE).await?.expect("alice has played");
                        assert_eq!(record.points, 35);
                        assert_eq!(record.games_played, 2);

                        Ok(())
                    }

                    #[tracing_test::traced_test]
                    #[tokio::test]
                    async fn concurrent_games_all_count() -> Result {
                        let (stats, _db): (Stats, _) = $block;

                        let games = (0..10).map(|_| stats.record_game(ALICE, 3, "alice".to_owned()));
                        for result in futures::future::join_all(games).await {
                            result?;
                        }

                        let record = stats.get(ALICE).await?.expect("alice has played");
                        assert_eq!(record.points, 30);
                        assert_eq!(record.games_played, 10);

                        Ok(())
                    }

                    #[tracing_test::traced_test]
                    #[tokio::test]
                    async fn unknown_user() -> Result {
                        let (stats, _db): (Stats, _) = $block;

                        assert!(stats.get(BOB).await?.is_none());
                        assert!(stats.leaderboard().await?.is_empty());

                        Ok(())
                    }

                    #[tracing_test::traced_test]
                    #[tokio::test]
                    async fn name_follows_latest_game() -> Result {
                        let (stats, _db): (Stats, _) = $block;

                        stats.record_game(ALICE, 1, "alice".to_owned()).await?;
                        stats.record_game(ALICE, 1, "Alice!".to_owned()).await?;

                        let record = stats.get(ALICE).await?.expect("alice has played");
                        assert_eq!(record.name, "Alice!");

                        Ok(())
                    }

                    #[tracing_test::traced_test]
                    #[tokio::test]
                    async fn leaderboard_order() -> Result {
                        let (stats, _db): (Stats, _) = $block;

                        stats.record_game(CAROL, 10, "carol".to_owned()).await?;
                        stats.record_game(BOB, 45, "bob".to_owned()).await?;
                        stats.record_game(ALICE, 10, "alice".to_owned()).await?;

                        let order: Vec<UserId> = stats
                            .leaderboard()
                            .await?
                            .into_iter()
                            .map(|record| record.user)
                            .collect();

                        assert_eq!(order, [BOB, ALICE, CAROL]);

                        Ok(())
                    }
                }
            }
            )+
        };
    }

    test_backends! {
        HashMap as hash_map {
            (Stats::new(), ())
        }

        MongoDb as mongodb {
            let mongodb = temp_mongo::TempMongo::new()
                .await
                .expect("setting up db should not fail");
            let db = mongodb.client().database("anagram_test");
            let stats = Stats::mongodb(&db)
                .await
                .expect("creating indexes should not fail");
            (stats, mongodb)
        }
    }
}
