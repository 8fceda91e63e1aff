//! Hotel records.

use uuid::Uuid;

use super::{ReadRepository, Record, Repository};
use crate::config::COLLECTION_HOTELS;
use crate::domain::Hotel;
use crate::errors::AppResult;
use crate::infra::store::IndexSpec;

impl Record for Hotel {
    const COLLECTION: &'static str = COLLECTION_HOTELS;
    const ENTITY: &'static str = "Hotel";

    fn id(&self) -> Uuid {
        self.id
    }

    fn indexes() -> Vec<IndexSpec> {
        vec![
            IndexSpec::new("name", "name"),
            IndexSpec::new("location", "location"),
        ]
    }
}

impl Repository<Hotel> {
    /// Hotels sorted by name
    pub async fn list(&self) -> AppResult<Vec<Hotel>> {
        let mut hotels = self.find_all().await?;
        hotels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hotels)
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Hotel>> {
        Ok(self.find_by_index("name", name).await?.into_iter().next())
    }
}
